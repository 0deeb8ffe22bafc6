use lspot_core::{entities::*, repositories::*};

use super::{eq, ilike_contains, in_list, models::*, PostgrestGateway, Result};

const POPULATED_SELECT: &str = "*,city:cities(*),reviews:reviews(*)";

fn id_strs(ids: &[Id]) -> impl Iterator<Item = &str> {
    ids.iter().map(Id::as_str)
}

impl UserRepo for PostgrestGateway {
    fn get_user(&self, id: &Id) -> Result<User> {
        let rows: Vec<UserRow> = self.select("users", &[("id", eq(id)), ("select", "*".into())])?;
        let row = rows.into_iter().next().ok_or(Error::NotFound)?;
        Ok(row.try_into()?)
    }

    fn update_user(&self, id: &Id, update: &UserUpdate) -> Result<User> {
        let patch = UserPatch::try_from_update(update)?;
        let rows: Vec<UserRow> = self.update_returning("users", &[("id", eq(id))], &patch)?;
        let row = rows.into_iter().next().ok_or(Error::NotFound)?;
        Ok(row.try_into()?)
    }
}

impl CityRepo for PostgrestGateway {
    fn all_cities(&self) -> Result<Vec<City>> {
        let rows: Vec<CityRow> = self.select(
            "cities",
            &[("select", "*".into()), ("order", "name.asc".into())],
        )?;
        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<_>>()?)
    }
}

impl LocationRepo for PostgrestGateway {
    fn visible_locations(&self, city_id: Option<&Id>) -> Result<Vec<PopulatedLocation>> {
        let mut query = vec![
            ("select", POPULATED_SELECT.to_string()),
            ("hidden", eq(false)),
        ];
        if let Some(city_id) = city_id {
            query.push(("city_id", eq(city_id)));
        }
        let rows: Vec<LocationRow> = self.select("locations", &query)?;
        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<_>>()?)
    }

    fn visible_locations_with_similar_address(
        &self,
        fragment: &str,
    ) -> Result<Vec<PopulatedLocation>> {
        let query = [
            ("select", POPULATED_SELECT.to_string()),
            ("hidden", eq(false)),
            ("address", ilike_contains(fragment)),
        ];
        let rows: Vec<LocationRow> = self.select("locations", &query)?;
        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<_>>()?)
    }

    fn create_location(&self, location: Location) -> Result<Location> {
        let row: LocationRow =
            self.insert_returning("locations", &NewLocationRow::from(&location))?;
        Ok(row.try_into()?)
    }

    fn delete_location(&self, id: &Id) -> Result<()> {
        self.delete("locations", &[("id", eq(id))])
    }

    fn set_location_hidden(&self, id: &Id, hidden: bool) -> Result<()> {
        let rows: Vec<IdRow> = self.update_returning(
            "locations",
            &[("id", eq(id))],
            &serde_json::json!({ "hidden": hidden }),
        )?;
        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

impl ReviewRepo for PostgrestGateway {
    fn create_review(&self, review: Review) -> Result<Review> {
        let row: ReviewRow = self.insert_returning("reviews", &NewReviewRow::from(&review))?;
        Ok(row.try_into()?)
    }

    fn review_ids_of_locations(&self, location_ids: &[Id]) -> Result<Vec<Id>> {
        if location_ids.is_empty() {
            return Ok(vec![]);
        }
        let query = [
            ("select", "id".to_string()),
            ("location_id", in_list(id_strs(location_ids))),
        ];
        let rows: Vec<IdRow> = self.select("reviews", &query)?;
        Ok(rows.into_iter().map(|row| row.id.into()).collect())
    }

    fn set_review_hidden(&self, id: &Id, hidden: bool) -> Result<()> {
        let rows: Vec<IdRow> = self.update_returning(
            "reviews",
            &[("id", eq(id))],
            &serde_json::json!({ "hidden": hidden }),
        )?;
        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

impl VoteRepo for PostgrestGateway {
    fn user_votes(
        &self,
        user_id: &Id,
        kind: VoteTargetKind,
        target_ids: &[Id],
    ) -> Result<Vec<Vote>> {
        if target_ids.is_empty() {
            return Ok(vec![]);
        }
        let query = [
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("target_type", eq(kind)),
            ("target_id", in_list(id_strs(target_ids))),
        ];
        let rows: Vec<VoteRow> = self.select("votes", &query)?;
        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<_>>()?)
    }

    fn upsert_vote(&self, vote: Vote) -> Result<()> {
        self.upsert(
            "votes",
            &NewVoteRow::from(&vote),
            "user_id,target_id,target_type",
        )
    }

    fn delete_vote(&self, user_id: &Id, target: &VoteTarget) -> Result<()> {
        let query = [
            ("user_id", eq(user_id)),
            ("target_id", eq(target.id())),
            ("target_type", eq(target.kind())),
        ];
        self.delete("votes", &query)
    }
}

impl FavoriteRepo for PostgrestGateway {
    fn user_favorites(&self, user_id: &Id, location_ids: &[Id]) -> Result<Vec<Favorite>> {
        if location_ids.is_empty() {
            return Ok(vec![]);
        }
        let query = [
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("location_id", in_list(id_strs(location_ids))),
        ];
        let rows: Vec<FavoriteRow> = self.select("favorites", &query)?;
        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<anyhow::Result<_>>()?)
    }

    fn create_favorite(&self, favorite: Favorite) -> Result<()> {
        self.insert(
            "favorites",
            &NewFavoriteRow {
                user_id: favorite.user_id.to_string(),
                location_id: favorite.location_id.to_string(),
            },
        )
    }

    fn delete_favorite(&self, user_id: &Id, location_id: &Id) -> Result<()> {
        let query = [("user_id", eq(user_id)), ("location_id", eq(location_id))];
        self.delete("favorites", &query)
    }
}

impl InvitationRepo for PostgrestGateway {
    fn create_invitation(&self, invitation: Invitation) -> Result<Invitation> {
        let row: InvitationRow =
            self.insert_returning("invitations", &NewInvitationRow::from(&invitation))?;
        Ok(row.try_into()?)
    }

    fn get_invitation_by_code(&self, access_code: &str) -> Result<Invitation> {
        let query = [
            ("select", "*".to_string()),
            ("access_code", eq(access_code)),
        ];
        let rows: Vec<InvitationRow> = self.select("invitations", &query)?;
        let row = rows.into_iter().next().ok_or(Error::NotFound)?;
        Ok(row.try_into()?)
    }

    fn update_invitation(&self, invitation: &Invitation) -> Result<()> {
        let patch = match &invitation.redeemed {
            Some(redemption) => InvitationPatch {
                used_by: Some(redemption.used_by.to_string()),
                used_at: Some(format_ts(redemption.used_at)?),
            },
            None => InvitationPatch {
                used_by: None,
                used_at: None,
            },
        };
        let rows: Vec<IdRow> =
            self.update_returning("invitations", &[("id", eq(&invitation.id))], &patch)?;
        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

impl AdminActionRepo for PostgrestGateway {
    fn log_admin_action(&self, action: AdminAction) -> Result<()> {
        self.insert("admin_actions", &NewAdminActionRow::from(&action))
    }
}

impl AppSettingRepo for PostgrestGateway {
    fn get_setting(&self, key: &str) -> Result<AppSetting> {
        let query = [("select", "*".to_string()), ("key", eq(key))];
        let rows: Vec<AppSettingRow> = self.select("app_settings", &query)?;
        let row = rows.into_iter().next().ok_or(Error::NotFound)?;
        Ok(row.try_into()?)
    }

    fn put_setting(&self, setting: AppSetting) -> Result<()> {
        let payload = AppSettingUpsert {
            key: setting.key.clone(),
            value: setting.value.clone(),
            updated_at: format_ts(setting.updated_at)?,
        };
        self.upsert("app_settings", &payload, "key")
    }
}
