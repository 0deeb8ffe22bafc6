use std::fmt;

/// Mean Earth radius in miles, as used by the distance formula.
const EARTH_RADIUS_MILES: f64 = 3959.0;

const FEET_PER_MILE: f64 = 5280.0;

/// A geographical position in decimal degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self::from_lat_lng_deg(lat, lng))
        } else {
            None
        }
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Great-circle distance between two positions (haversine).
    pub fn distance(p1: Self, p2: Self) -> Distance {
        let d_lat = deg2rad(p2.lat - p1.lat);
        let d_lng = deg2rad(p2.lng - p1.lng);
        let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
            + deg2rad(p1.lat).cos()
                * deg2rad(p2.lat).cos()
                * (d_lng / 2.0).sin()
                * (d_lng / 2.0).sin();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::from_miles(EARTH_RADIUS_MILES * c)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

pub fn deg2rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

/// A non-directional distance, stored in miles.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_miles(miles: f64) -> Self {
        Self(miles)
    }

    pub const fn to_miles(self) -> f64 {
        self.0
    }

    pub fn from_feet(feet: f64) -> Self {
        Self(feet / FEET_PER_MILE)
    }

    pub fn to_feet(self) -> f64 {
        self.0 * FEET_PER_MILE
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} mi", self.0)
    }
}
