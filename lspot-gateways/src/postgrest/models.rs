//! Wire representations of the backend tables and their conversions into
//! domain entities.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use lspot_core::{entities::*, repositories::PopulatedLocation};

pub fn parse_ts(from: &str) -> anyhow::Result<Timestamp> {
    let dt = OffsetDateTime::parse(from, &Rfc3339)
        .with_context(|| format!("Invalid timestamp: {from}"))?;
    Ok(dt.into())
}

pub fn format_ts(from: Timestamp) -> anyhow::Result<String> {
    let dt = OffsetDateTime::try_from(from)?;
    Ok(dt.format(&Rfc3339)?)
}

#[derive(Debug, Deserialize)]
pub struct IdRow {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub is_admin: bool,
    pub daily_review_limit: u32,
    pub pending_invitations: u32,
    pub last_invitation_received: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;
    fn try_from(from: UserRow) -> anyhow::Result<Self> {
        let UserRow {
            id,
            email,
            created_at,
            is_admin,
            daily_review_limit,
            pending_invitations,
            last_invitation_received,
        } = from;
        Ok(Self {
            id: id.into(),
            email,
            created_at: parse_ts(&created_at)?,
            is_admin,
            daily_review_limit,
            pending_invitations,
            last_invitation_received: last_invitation_received
                .as_deref()
                .map(parse_ts)
                .transpose()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_review_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_invitations: Option<u32>,
    // Double option: outer None = untouched, inner None = set to NULL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_invitation_received: Option<Option<String>>,
}

impl UserPatch {
    pub fn try_from_update(from: &UserUpdate) -> anyhow::Result<Self> {
        let UserUpdate {
            email,
            daily_review_limit,
            pending_invitations,
            last_invitation_received,
        } = from;
        Ok(Self {
            email: email.clone(),
            daily_review_limit: *daily_review_limit,
            pending_invitations: *pending_invitations,
            last_invitation_received: match last_invitation_received {
                None => None,
                Some(None) => Some(None),
                Some(Some(ts)) => Some(Some(format_ts(*ts)?)),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CityRow {
    pub id: String,
    pub name: String,
    pub state: String,
    pub country: String,
    pub bounds: serde_json::Value,
    pub created_at: String,
}

impl TryFrom<CityRow> for City {
    type Error = anyhow::Error;
    fn try_from(from: CityRow) -> anyhow::Result<Self> {
        let CityRow {
            id,
            name,
            state,
            country,
            bounds,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            name,
            state,
            country,
            bounds,
            created_at: parse_ts(&created_at)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRow {
    pub id: String,
    pub location_id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub address_note: Option<String>,
    pub star_rating: u8,
    pub review_text: Option<String>,
    pub photos: Option<Vec<String>>,
    pub created_at: String,
    pub hidden: bool,
    pub upvotes: u32,
    pub downvotes: u32,
}

impl TryFrom<ReviewRow> for Review {
    type Error = anyhow::Error;
    fn try_from(from: ReviewRow) -> anyhow::Result<Self> {
        let ReviewRow {
            id,
            location_id,
            user_id,
            title,
            address_note,
            star_rating,
            review_text,
            photos,
            created_at,
            hidden,
            upvotes,
            downvotes,
        } = from;
        let star_rating = StarRating::try_from(star_rating)?;
        Ok(Self {
            id: id.into(),
            location_id: location_id.into(),
            user_id: user_id.into(),
            title,
            address_note,
            star_rating,
            review_text,
            photos,
            created_at: parse_ts(&created_at)?,
            hidden,
            upvotes,
            downvotes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewReviewRow {
    pub id: String,
    pub location_id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub address_note: Option<String>,
    pub star_rating: u8,
    pub review_text: Option<String>,
    pub photos: Option<Vec<String>>,
}

impl From<&Review> for NewReviewRow {
    fn from(from: &Review) -> Self {
        Self {
            id: from.id.to_string(),
            location_id: from.location_id.to_string(),
            user_id: from.user_id.to_string(),
            title: from.title.clone(),
            address_note: from.address_note.clone(),
            star_rating: from.star_rating.into(),
            review_text: from.review_text.clone(),
            photos: from.photos.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationRow {
    pub id: String,
    pub business_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pin_latitude: Option<f64>,
    pub pin_longitude: Option<f64>,
    pub city_id: String,
    pub created_by: String,
    pub created_at: String,
    pub hidden: bool,
    pub upvotes: u32,
    pub downvotes: u32,
    // Only present when the read expands the nested relations
    #[serde(default)]
    pub city: Option<CityRow>,
    #[serde(default)]
    pub reviews: Vec<ReviewRow>,
}

impl TryFrom<LocationRow> for Location {
    type Error = anyhow::Error;
    fn try_from(from: LocationRow) -> anyhow::Result<Self> {
        let pin_pos = match (from.pin_latitude, from.pin_longitude) {
            (Some(lat), Some(lng)) => Some(MapPoint::from_lat_lng_deg(lat, lng)),
            _ => None,
        };
        Ok(Self {
            id: from.id.into(),
            business_name: from.business_name,
            address: from.address,
            pos: MapPoint::from_lat_lng_deg(from.latitude, from.longitude),
            pin_pos,
            city_id: from.city_id.into(),
            created_by: from.created_by.into(),
            created_at: parse_ts(&from.created_at)?,
            hidden: from.hidden,
            upvotes: from.upvotes,
            downvotes: from.downvotes,
        })
    }
}

impl TryFrom<LocationRow> for PopulatedLocation {
    type Error = anyhow::Error;
    fn try_from(mut from: LocationRow) -> anyhow::Result<Self> {
        let city = from
            .city
            .take()
            .ok_or_else(|| anyhow!("Missing city expansion for location {}", from.id))?;
        let reviews = std::mem::take(&mut from.reviews);
        Ok(Self {
            location: from.try_into()?,
            city: city.try_into()?,
            reviews: reviews
                .into_iter()
                .map(TryInto::try_into)
                .collect::<anyhow::Result<_>>()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewLocationRow {
    pub id: String,
    pub business_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pin_latitude: Option<f64>,
    pub pin_longitude: Option<f64>,
    pub city_id: String,
    pub created_by: String,
}

impl From<&Location> for NewLocationRow {
    fn from(from: &Location) -> Self {
        Self {
            id: from.id.to_string(),
            business_name: from.business_name.clone(),
            address: from.address.clone(),
            latitude: from.pos.lat(),
            longitude: from.pos.lng(),
            pin_latitude: from.pin_pos.map(MapPoint::lat),
            pin_longitude: from.pin_pos.map(MapPoint::lng),
            city_id: from.city_id.to_string(),
            created_by: from.created_by.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteRow {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub target_type: String,
    pub vote_type: String,
    pub created_at: String,
}

impl TryFrom<VoteRow> for Vote {
    type Error = anyhow::Error;
    fn try_from(from: VoteRow) -> anyhow::Result<Self> {
        let VoteRow {
            id,
            user_id,
            target_id,
            target_type,
            vote_type,
            created_at,
        } = from;
        let kind: VoteTargetKind = target_type
            .parse()
            .map_err(|_| anyhow!("Invalid vote target type: {target_type}"))?;
        let target = match kind {
            VoteTargetKind::Location => VoteTarget::Location(target_id.into()),
            VoteTargetKind::Review => VoteTarget::Review(target_id.into()),
        };
        let direction: VoteDirection = vote_type
            .parse()
            .map_err(|_| anyhow!("Invalid vote type: {vote_type}"))?;
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            target,
            direction,
            created_at: parse_ts(&created_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewVoteRow {
    pub user_id: String,
    pub target_id: String,
    pub target_type: String,
    pub vote_type: String,
}

impl From<&Vote> for NewVoteRow {
    fn from(from: &Vote) -> Self {
        Self {
            user_id: from.user_id.to_string(),
            target_id: from.target.id().to_string(),
            target_type: from.target.kind().to_string(),
            vote_type: from.direction.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRow {
    pub id: String,
    pub user_id: String,
    pub location_id: String,
    pub created_at: String,
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = anyhow::Error;
    fn try_from(from: FavoriteRow) -> anyhow::Result<Self> {
        let FavoriteRow {
            id,
            user_id,
            location_id,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            location_id: location_id.into(),
            created_at: parse_ts(&created_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewFavoriteRow {
    pub user_id: String,
    pub location_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InvitationRow {
    pub id: String,
    pub access_code: String,
    pub created_by: String,
    pub sent_to_email: String,
    pub used_by: Option<String>,
    pub used_at: Option<String>,
    pub created_at: String,
}

impl TryFrom<InvitationRow> for Invitation {
    type Error = anyhow::Error;
    fn try_from(from: InvitationRow) -> anyhow::Result<Self> {
        let InvitationRow {
            id,
            access_code,
            created_by,
            sent_to_email,
            used_by,
            used_at,
            created_at,
        } = from;
        let redeemed = match (used_by, used_at) {
            (Some(used_by), Some(used_at)) => Some(Redemption {
                used_by: used_by.into(),
                used_at: parse_ts(&used_at)?,
            }),
            _ => None,
        };
        Ok(Self {
            id: id.into(),
            access_code,
            created_by: created_by.into(),
            sent_to_email,
            redeemed,
            created_at: parse_ts(&created_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewInvitationRow {
    pub id: String,
    pub access_code: String,
    pub created_by: String,
    pub sent_to_email: String,
}

impl From<&Invitation> for NewInvitationRow {
    fn from(from: &Invitation) -> Self {
        Self {
            id: from.id.to_string(),
            access_code: from.access_code.clone(),
            created_by: from.created_by.to_string(),
            sent_to_email: from.sent_to_email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationPatch {
    pub used_by: Option<String>,
    pub used_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewAdminActionRow {
    pub admin_user_id: String,
    pub action_type: String,
    pub target_id: String,
    pub reason: Option<String>,
}

impl From<&AdminAction> for NewAdminActionRow {
    fn from(from: &AdminAction) -> Self {
        Self {
            admin_user_id: from.admin_user_id.to_string(),
            action_type: from.action.to_string(),
            target_id: from.target_id.to_string(),
            reason: from.reason.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppSettingRow {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<AppSettingRow> for AppSetting {
    type Error = anyhow::Error;
    fn try_from(from: AppSettingRow) -> anyhow::Result<Self> {
        let AppSettingRow {
            key,
            value,
            created_at,
            updated_at,
        } = from;
        Ok(Self {
            key,
            value,
            created_at: parse_ts(&created_at)?,
            updated_at: parse_ts(&updated_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AppSettingUpsert {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_timestamps() {
        let ts = parse_ts("2024-05-01T12:30:00Z").unwrap();
        let formatted = format_ts(ts).unwrap();
        assert_eq!(parse_ts(&formatted).unwrap(), ts);
        assert!(parse_ts("yesterday").is_err());
    }

    #[test]
    fn vote_row_round_trip() {
        let row = VoteRow {
            id: "v1".into(),
            user_id: "u1".into(),
            target_id: "l1".into(),
            target_type: "location".into(),
            vote_type: "up".into(),
            created_at: "2024-05-01T12:30:00Z".into(),
        };
        let vote = Vote::try_from(row).unwrap();
        assert_eq!(vote.target, VoteTarget::Location("l1".into()));
        assert_eq!(vote.direction, VoteDirection::Up);
        let wire = NewVoteRow::from(&vote);
        assert_eq!(wire.target_type, "location");
        assert_eq!(wire.vote_type, "up");
    }

    #[test]
    fn populated_location_requires_city() {
        let row = LocationRow {
            id: "l1".into(),
            business_name: "Joe's Diner".into(),
            address: "123 Main St, Springfield".into(),
            latitude: 39.8,
            longitude: -89.65,
            pin_latitude: None,
            pin_longitude: None,
            city_id: "c1".into(),
            created_by: "u1".into(),
            created_at: "2024-05-01T12:30:00Z".into(),
            hidden: false,
            upvotes: 2,
            downvotes: 0,
            city: None,
            reviews: vec![],
        };
        assert!(PopulatedLocation::try_from(row).is_err());
    }
}
