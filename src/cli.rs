use std::sync::Arc;

use clap::{Parser, Subcommand};

use lspot_application::{locations::LocationStore, session::SessionStore};
use lspot_core::{
    gateways::geocode::GeoCodingGateway,
    usecases::{self, LocationFilter},
};
use lspot_entities::geo::Distance;
use lspot_gateways::{auth::RestAuth, geolocate::DevicePosition, postgrest::PostgrestGateway};

use crate::{cfg::Cfg, gateways};

#[derive(Parser)]
#[command(
    name = "localspot",
    version,
    about = "Discover, review and rate local businesses"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in user
    Whoami,
    /// List the known cities
    Cities,
    /// List visible locations
    Locations {
        /// Restrict to a city id
        #[arg(long)]
        city: Option<String>,
        /// Case-insensitive search across names, addresses and reviews
        #[arg(long)]
        search: Option<String>,
        /// Only locations with a positive net vote count
        #[arg(long)]
        with_votes: bool,
        /// Maximum distance in miles from the configured device position
        #[arg(long)]
        max_miles: Option<f64>,
    },
    /// Find existing locations with a similar street address
    Duplicates { address: String },
    /// Resolve an address to coordinates
    Geocode { address: String },
    /// Resolve coordinates to an address
    ReverseGeocode { lat: f64, lng: f64 },
    /// Read an application setting
    GetSetting { key: String },
    /// Store an application setting (the value is parsed as JSON)
    PutSetting { key: String, value: String },
}

type Session = Arc<SessionStore<RestAuth, PostgrestGateway>>;
type Locations = LocationStore<RestAuth, PostgrestGateway, DevicePosition>;

fn stores(cfg: &Cfg) -> (Session, Locations) {
    let db = Arc::new(gateways::backend_gateway(cfg));
    let auth = Arc::new(gateways::auth_gateway(cfg));
    let session = Arc::new(SessionStore::new(auth, Arc::clone(&db)));
    if let Err(err) = session.initialize() {
        warn!("Could not restore a session: {err}");
    }
    let locations = LocationStore::new(
        db,
        Arc::new(gateways::geolocation_gateway(cfg)),
        Arc::clone(&session),
    );
    (session, locations)
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = Cfg::from_env_or_default();

    match args.command {
        Command::Whoami => {
            let (session, _) = stores(&cfg);
            match session.profile() {
                Some(profile) => {
                    let role = if profile.is_admin { "admin" } else { "member" };
                    println!("{} ({role})", profile.email);
                }
                None => match session.current_session() {
                    Some(session) => println!("{} (no profile row)", session.email),
                    None => println!("anonymous"),
                },
            }
        }
        Command::Cities => {
            let (_, locations) = stores(&cfg);
            for city in locations.fetch_cities()? {
                println!("{}  {}, {}", city.id, city.name, city.state);
            }
        }
        Command::Locations {
            city,
            search,
            with_votes,
            max_miles,
        } => {
            let (_, locations) = stores(&cfg);
            locations.set_current_city(city.map(Into::into));
            locations.set_filter(LocationFilter {
                text: search,
                max_distance: max_miles.map(Distance::from_miles),
                with_votes: with_votes.then_some(true),
            });
            if max_miles.is_some() {
                if let Err(err) = locations.get_user_location() {
                    warn!("Device position unavailable, the distance filter is inert: {err}");
                }
            }
            locations.fetch_locations()?;
            for view in locations.filtered_locations() {
                let fav = if view.is_favorited { " *" } else { "" };
                println!(
                    "{}  {} | {} | {:+} votes, {} review(s){fav}",
                    view.location.id,
                    view.location.business_name,
                    view.location.address,
                    view.location.net_votes(),
                    view.reviews.len(),
                );
            }
        }
        Command::Duplicates { address } => {
            let (_, locations) = stores(&cfg);
            let duplicates = locations.check_for_duplicates(&address);
            if duplicates.is_empty() {
                println!("No similar locations found");
            }
            for duplicate in duplicates {
                println!(
                    "{}  {} | {}",
                    duplicate.location.id,
                    duplicate.location.business_name,
                    duplicate.location.address
                );
            }
        }
        Command::Geocode { address } => {
            let gw = gateways::geocoding_gateway(&cfg);
            for place in gw.geocode_address(&address)? {
                println!(
                    "{}  {} (confidence {})",
                    place.pos, place.formatted_address, place.confidence
                );
            }
        }
        Command::ReverseGeocode { lat, lng } => {
            let gw = gateways::geocoding_gateway(&cfg);
            let place = gw.reverse_geocode(lat, lng)?;
            println!("{}", place.formatted_address);
        }
        Command::GetSetting { key } => {
            let db = gateways::backend_gateway(&cfg);
            let setting = usecases::get_app_setting(&db, &key)?;
            println!("{}", setting.value);
        }
        Command::PutSetting { key, value } => {
            let db = gateways::backend_gateway(&cfg);
            let value = serde_json::from_str(&value)?;
            let setting = usecases::put_app_setting(&db, &key, value)?;
            println!("{} = {}", setting.key, setting.value);
        }
    }
    Ok(())
}
