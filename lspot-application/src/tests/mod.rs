mod session_store;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use lspot_core::gateways::{
    auth::{AuthError, AuthGateway, Session, SessionEvent, SessionListener},
    geolocate::{GeolocationError, GeolocationGateway, PositionRequest},
};
use lspot_entities::builders::Builder;

use crate::{
    locations::LocationStore,
    repositories::{Error as RepoError, PopulatedLocation, *},
    session::SessionStore,
    AdminAction, AppSetting, City, Favorite, Id, Invitation, Location, MapPoint, Review,
    Timestamp, User, UserUpdate, Vote, VoteTarget, VoteTargetKind,
};

type Result<T> = std::result::Result<T, RepoError>;

/// In-memory stand-in for the remote backend.
///
/// The vote counters on locations/reviews are *not* recomputed here; tests
/// that care about votes read the vote rows or the per-user annotations.
/// Nested reviews are expanded unfiltered, like the backend does; only the
/// locations themselves carry a hidden filter.
#[derive(Default)]
pub struct MockDb {
    pub users: Mutex<Vec<User>>,
    pub cities: Mutex<Vec<City>>,
    pub locations: Mutex<Vec<Location>>,
    pub reviews: Mutex<Vec<Review>>,
    pub votes: Mutex<Vec<Vote>>,
    pub favorites: Mutex<Vec<Favorite>>,
    pub invitations: Mutex<Vec<Invitation>>,
    pub admin_actions: Mutex<Vec<AdminAction>>,
    pub settings: Mutex<Vec<AppSetting>>,
    pub fail_next_review_insert: AtomicBool,
    pub fail_next_user_update: AtomicBool,
}

impl MockDb {
    fn populate(&self, location: &Location) -> Result<PopulatedLocation> {
        let city = self
            .cities
            .lock()
            .unwrap()
            .iter()
            .find(|city| city.id == location.city_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;
        let reviews = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|review| review.location_id == location.id)
            .cloned()
            .collect();
        Ok(PopulatedLocation {
            location: location.clone(),
            city,
            reviews,
        })
    }
}

impl UserRepo for MockDb {
    fn get_user(&self, id: &Id) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| &user.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn update_user(&self, id: &Id, update: &UserUpdate) -> Result<User> {
        if self.fail_next_user_update.swap(false, Ordering::SeqCst) {
            return Err(RepoError::Other(anyhow::anyhow!("injected failure")));
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(limit) = update.daily_review_limit {
            user.daily_review_limit = limit;
        }
        if let Some(pending) = update.pending_invitations {
            user.pending_invitations = pending;
        }
        if let Some(last) = update.last_invitation_received {
            user.last_invitation_received = last;
        }
        Ok(user.clone())
    }
}

impl CityRepo for MockDb {
    fn all_cities(&self) -> Result<Vec<City>> {
        let mut cities = self.cities.lock().unwrap().clone();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }
}

impl LocationRepo for MockDb {
    fn visible_locations(&self, city_id: Option<&Id>) -> Result<Vec<PopulatedLocation>> {
        let locations = self.locations.lock().unwrap().clone();
        locations
            .iter()
            .filter(|location| !location.hidden)
            .filter(|location| city_id.map_or(true, |id| &location.city_id == id))
            .map(|location| self.populate(location))
            .collect()
    }

    fn visible_locations_with_similar_address(
        &self,
        fragment: &str,
    ) -> Result<Vec<PopulatedLocation>> {
        let fragment = fragment.to_lowercase();
        let locations = self.locations.lock().unwrap().clone();
        locations
            .iter()
            .filter(|location| !location.hidden)
            .filter(|location| location.address.to_lowercase().contains(&fragment))
            .map(|location| self.populate(location))
            .collect()
    }

    fn create_location(&self, location: Location) -> Result<Location> {
        self.locations.lock().unwrap().push(location.clone());
        Ok(location)
    }

    fn delete_location(&self, id: &Id) -> Result<()> {
        let mut locations = self.locations.lock().unwrap();
        let len = locations.len();
        locations.retain(|location| &location.id != id);
        if locations.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn set_location_hidden(&self, id: &Id, hidden: bool) -> Result<()> {
        let mut locations = self.locations.lock().unwrap();
        let location = locations
            .iter_mut()
            .find(|location| &location.id == id)
            .ok_or(RepoError::NotFound)?;
        location.hidden = hidden;
        Ok(())
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, review: Review) -> Result<Review> {
        if self.fail_next_review_insert.swap(false, Ordering::SeqCst) {
            return Err(RepoError::Forbidden);
        }
        self.reviews.lock().unwrap().push(review.clone());
        Ok(review)
    }

    fn review_ids_of_locations(&self, location_ids: &[Id]) -> Result<Vec<Id>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|review| location_ids.contains(&review.location_id))
            .map(|review| review.id.clone())
            .collect())
    }

    fn set_review_hidden(&self, id: &Id, hidden: bool) -> Result<()> {
        let mut reviews = self.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|review| &review.id == id)
            .ok_or(RepoError::NotFound)?;
        review.hidden = hidden;
        Ok(())
    }
}

impl VoteRepo for MockDb {
    fn user_votes(
        &self,
        user_id: &Id,
        kind: VoteTargetKind,
        target_ids: &[Id],
    ) -> Result<Vec<Vote>> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|vote| {
                &vote.user_id == user_id
                    && vote.target.kind() == kind
                    && target_ids.contains(vote.target.id())
            })
            .cloned()
            .collect())
    }

    fn upsert_vote(&self, vote: Vote) -> Result<()> {
        let mut votes = self.votes.lock().unwrap();
        votes.retain(|existing| {
            !(existing.user_id == vote.user_id && existing.target == vote.target)
        });
        votes.push(vote);
        Ok(())
    }

    fn delete_vote(&self, user_id: &Id, target: &VoteTarget) -> Result<()> {
        self.votes
            .lock()
            .unwrap()
            .retain(|vote| !(&vote.user_id == user_id && &vote.target == target));
        Ok(())
    }
}

impl FavoriteRepo for MockDb {
    fn user_favorites(&self, user_id: &Id, location_ids: &[Id]) -> Result<Vec<Favorite>> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|favorite| {
                &favorite.user_id == user_id && location_ids.contains(&favorite.location_id)
            })
            .cloned()
            .collect())
    }

    fn create_favorite(&self, favorite: Favorite) -> Result<()> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites.iter().any(|existing| {
            existing.user_id == favorite.user_id && existing.location_id == favorite.location_id
        }) {
            return Err(RepoError::AlreadyExists);
        }
        favorites.push(favorite);
        Ok(())
    }

    fn delete_favorite(&self, user_id: &Id, location_id: &Id) -> Result<()> {
        self.favorites.lock().unwrap().retain(|favorite| {
            !(&favorite.user_id == user_id && &favorite.location_id == location_id)
        });
        Ok(())
    }
}

impl InvitationRepo for MockDb {
    fn create_invitation(&self, invitation: Invitation) -> Result<Invitation> {
        self.invitations.lock().unwrap().push(invitation.clone());
        Ok(invitation)
    }

    fn get_invitation_by_code(&self, access_code: &str) -> Result<Invitation> {
        self.invitations
            .lock()
            .unwrap()
            .iter()
            .find(|invitation| invitation.access_code == access_code)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn update_invitation(&self, invitation: &Invitation) -> Result<()> {
        let mut invitations = self.invitations.lock().unwrap();
        let existing = invitations
            .iter_mut()
            .find(|existing| existing.id == invitation.id)
            .ok_or(RepoError::NotFound)?;
        *existing = invitation.clone();
        Ok(())
    }
}

impl AdminActionRepo for MockDb {
    fn log_admin_action(&self, action: AdminAction) -> Result<()> {
        self.admin_actions.lock().unwrap().push(action);
        Ok(())
    }
}

impl AppSettingRepo for MockDb {
    fn get_setting(&self, key: &str) -> Result<AppSetting> {
        self.settings
            .lock()
            .unwrap()
            .iter()
            .find(|setting| setting.key == key)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn put_setting(&self, setting: AppSetting) -> Result<()> {
        let mut settings = self.settings.lock().unwrap();
        if let Some(existing) = settings.iter_mut().find(|existing| existing.key == setting.key)
        {
            *existing = setting;
        } else {
            settings.push(setting);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAuth {
    session: Mutex<Option<Session>>,
    listeners: Mutex<Vec<SessionListener>>,
    pub fail_session_lookup: AtomicBool,
}

impl MockAuth {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            ..Default::default()
        }
    }

    /// Simulates a sign-in completing out of band (e.g. the OAuth redirect).
    pub fn emit_sign_in(&self, session: Session) {
        *self.session.lock().unwrap() = Some(session.clone());
        let event = SessionEvent::SignedIn(session);
        for listener in self.listeners.lock().unwrap().iter() {
            listener(&event);
        }
    }
}

impl AuthGateway for MockAuth {
    fn current_session(&self) -> std::result::Result<Option<Session>, AuthError> {
        if self.fail_session_lookup.swap(false, Ordering::SeqCst) {
            return Err(anyhow::anyhow!("injected failure").into());
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn google_sign_in_url(&self, redirect_to: &str) -> std::result::Result<String, AuthError> {
        Ok(format!(
            "https://auth.test/authorize?provider=google&redirect_to={redirect_to}"
        ))
    }

    fn sign_out(&self) -> std::result::Result<(), AuthError> {
        *self.session.lock().unwrap() = None;
        for listener in self.listeners.lock().unwrap().iter() {
            listener(&SessionEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self, listener: SessionListener) {
        self.listeners.lock().unwrap().push(listener);
    }
}

pub struct MockGeolocation(pub Option<MapPoint>);

impl GeolocationGateway for MockGeolocation {
    fn current_position(
        &self,
        _request: &PositionRequest,
    ) -> std::result::Result<MapPoint, GeolocationError> {
        self.0.ok_or(GeolocationError::Unsupported)
    }
}

pub struct Fixture {
    pub db: Arc<MockDb>,
    pub auth: Arc<MockAuth>,
    pub session: Arc<SessionStore<MockAuth, MockDb>>,
    pub locations: LocationStore<MockAuth, MockDb, MockGeolocation>,
}

impl Fixture {
    pub fn anonymous() -> Self {
        Self::new(MockDb::default(), MockAuth::default(), None)
    }

    /// A fixture whose auth gateway reports a persisted session for `user`
    /// and whose backend knows the matching profile row.
    pub fn signed_in(user: User) -> Self {
        let db = MockDb::default();
        let auth = MockAuth::with_session(Session {
            user_id: user.id.clone(),
            email: user.email.clone(),
        });
        db.users.lock().unwrap().push(user);
        Self::new(db, auth, None)
    }

    pub fn new(db: MockDb, auth: MockAuth, device_pos: Option<MapPoint>) -> Self {
        let db = Arc::new(db);
        let auth = Arc::new(auth);
        let session = Arc::new(SessionStore::new(Arc::clone(&auth), Arc::clone(&db)));
        session.initialize().unwrap();
        let locations = LocationStore::new(
            Arc::clone(&db),
            Arc::new(MockGeolocation(device_pos)),
            Arc::clone(&session),
        );
        Self {
            db,
            auth,
            session,
            locations,
        }
    }

    pub fn seed_city(&self, name: &str) -> City {
        let city = City {
            id: Id::new(),
            name: name.into(),
            state: "IL".into(),
            country: "US".into(),
            bounds: serde_json::Value::Null,
            created_at: Timestamp::now(),
        };
        self.db.cities.lock().unwrap().push(city.clone());
        city
    }

    pub fn seed_location(&self, city: &City, name: &str, address: &str) -> Location {
        let location = Location::build()
            .business_name(name)
            .address(address)
            .city_id(city.id.as_str())
            .finish();
        self.db.locations.lock().unwrap().push(location.clone());
        location
    }
}

pub fn member() -> User {
    User::build().email("member@example.com").finish()
}

pub fn admin() -> User {
    User::build().email("admin@example.com").admin(true).finish()
}
