use std::sync::{Arc, Mutex};

use lspot_core::{
    gateways::{
        auth::AuthGateway,
        geolocate::{GeolocationGateway, PositionRequest},
    },
    repositories::PopulatedLocation,
    usecases::{LocationFilter, LocationView, VoteChange},
};

use crate::{
    repositories,
    session::SessionStore,
    usecases, City, Db, Favorite, Id, Location, MapPoint, Review, StarRating, Timestamp, Vote,
    VoteDirection, VoteTarget, VoteTargetKind,
};

/// Input for creating a location through the store. The creator, timestamps
/// and vote counters are filled in here.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub business_name: String,
    pub address: String,
    pub pos: MapPoint,
    pub pin_pos: Option<MapPoint>,
    pub city_id: Id,
}

/// Input for a review created together with (or attached to) a location.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub title: Option<String>,
    pub address_note: Option<String>,
    pub star_rating: StarRating,
    pub review_text: Option<String>,
    pub photos: Option<Vec<String>>,
}

/// The location aggregate of the app: visible locations of the current city
/// with their per-user annotations, plus the client-side filter state.
pub struct LocationStore<A, D, G> {
    db: Arc<D>,
    geo: Arc<G>,
    session: Arc<SessionStore<A, D>>,
    state: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    locations: Vec<LocationView>,
    cities: Vec<City>,
    current_city: Option<Id>,
    filter: LocationFilter,
    user_position: Option<MapPoint>,
    loading: bool,
}

impl<A, D, G> LocationStore<A, D, G>
where
    A: AuthGateway + Send + Sync + 'static,
    D: Db + Send + Sync + 'static,
    G: GeolocationGateway,
{
    pub fn new(db: Arc<D>, geo: Arc<G>, session: Arc<SessionStore<A, D>>) -> Self {
        Self {
            db,
            geo,
            session,
            state: Mutex::new(Inner::default()),
        }
    }

    pub fn fetch_cities(&self) -> crate::Result<Vec<City>> {
        let cities = self.db.all_cities()?;
        self.state.lock().unwrap().cities = cities.clone();
        Ok(cities)
    }

    pub fn cities(&self) -> Vec<City> {
        self.state.lock().unwrap().cities.clone()
    }

    pub fn set_current_city(&self, city_id: Option<Id>) {
        self.state.lock().unwrap().current_city = city_id;
    }

    pub fn current_city(&self) -> Option<Id> {
        self.state.lock().unwrap().current_city.clone()
    }

    pub fn set_filter(&self, filter: LocationFilter) {
        self.state.lock().unwrap().filter = filter;
    }

    pub fn filter(&self) -> LocationFilter {
        self.state.lock().unwrap().filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Loads the visible locations of the current city and annotates them
    /// with the signed-in user's votes and favorites.
    ///
    /// A failed annotation fetch degrades to unannotated results; a failed
    /// location fetch is an error, but the loading flag is reset either way.
    pub fn fetch_locations(&self) -> crate::Result<()> {
        let city_id = {
            let mut inner = self.state.lock().unwrap();
            inner.loading = true;
            inner.current_city.clone()
        };

        let populated = match self.db.visible_locations(city_id.as_ref()) {
            Ok(populated) => populated,
            Err(err) => {
                self.state.lock().unwrap().loading = false;
                return Err(err.into());
            }
        };
        let mut views: Vec<LocationView> = populated.into_iter().map(Into::into).collect();

        if let Some(session) = self.session.current_session() {
            let user_id = session.user_id;
            if let Err(err) = fetch_user_votes(&*self.db, &user_id, &mut views) {
                warn!("Failed to load the votes of user {user_id}: {err}");
            }
            if let Err(err) = fetch_user_favorites(&*self.db, &user_id, &mut views) {
                warn!("Failed to load the favorites of user {user_id}: {err}");
            }
        }

        let mut inner = self.state.lock().unwrap();
        inner.locations = views;
        inner.loading = false;
        Ok(())
    }

    pub fn locations(&self) -> Vec<LocationView> {
        self.state.lock().unwrap().locations.clone()
    }

    /// The fetched locations with the current filter applied.
    pub fn filtered_locations(&self) -> Vec<LocationView> {
        let inner = self.state.lock().unwrap();
        usecases::filter_locations(&inner.locations, &inner.filter, inner.user_position)
    }

    /// Creates a location owned by the signed-in user.
    ///
    /// The store is not refreshed; the next `fetch_locations` picks up the
    /// new row with its expanded relations.
    pub fn create_location(&self, new: NewLocation) -> crate::Result<Location> {
        let user_id = self.session.current_user_id()?;
        let NewLocation {
            business_name,
            address,
            pos,
            pin_pos,
            city_id,
        } = new;
        let location = Location {
            id: Id::new(),
            business_name,
            address,
            pos,
            pin_pos,
            city_id,
            created_by: user_id,
            created_at: Timestamp::now(),
            hidden: false,
            upvotes: 0,
            downvotes: 0,
        };
        Ok(self.db.create_location(location)?)
    }

    /// Creates a location and its first review as one logical step.
    ///
    /// There is no transaction across the two inserts. If the review insert
    /// fails, the freshly created location is deleted again and the review
    /// error is returned; a failure of that rollback is only logged.
    pub fn create_location_with_review(
        &self,
        new: NewLocation,
        new_review: NewReview,
    ) -> crate::Result<(Location, Review)> {
        let user_id = self.session.current_user_id()?;
        let location = self.create_location(new)?;
        let NewReview {
            title,
            address_note,
            star_rating,
            review_text,
            photos,
        } = new_review;
        let review = Review {
            id: Id::new(),
            location_id: location.id.clone(),
            user_id,
            title,
            address_note,
            star_rating,
            review_text,
            photos,
            created_at: Timestamp::now(),
            hidden: false,
            upvotes: 0,
            downvotes: 0,
        };
        match self.db.create_review(review) {
            Ok(review) => Ok((location, review)),
            Err(err) => {
                match self.db.delete_location(&location.id) {
                    Ok(()) | Err(repositories::Error::NotFound) => {}
                    Err(rollback_err) => {
                        warn!(
                            "Failed to roll back location {} after its review could not be created: {rollback_err}",
                            location.id
                        );
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Visible locations whose street line matches the given address.
    /// Backend failures degrade to "no duplicates found".
    pub fn check_for_duplicates(&self, address: &str) -> Vec<PopulatedLocation> {
        match usecases::find_possible_duplicates(&*self.db, address) {
            Ok(duplicates) => duplicates,
            Err(err) => {
                warn!("Duplicate check for '{address}' failed: {err}");
                vec![]
            }
        }
    }

    /// Flips the favorite flag of a location, optimistically in the store
    /// first. The flag is reverted when the backend rejects the change.
    ///
    /// Returns the new flag value.
    pub fn toggle_favorite(&self, location_id: &Id) -> crate::Result<bool> {
        let user_id = self.session.current_user_id()?;
        let was_favorited = {
            let mut inner = self.state.lock().unwrap();
            let view = inner
                .locations
                .iter_mut()
                .find(|view| &view.location.id == location_id)
                .ok_or(repositories::Error::NotFound)?;
            let was_favorited = view.is_favorited;
            view.is_favorited = !was_favorited;
            was_favorited
        };

        let result = if was_favorited {
            self.db.delete_favorite(&user_id, location_id)
        } else {
            self.db.create_favorite(Favorite {
                id: Id::new(),
                user_id: user_id.clone(),
                location_id: location_id.clone(),
                created_at: Timestamp::now(),
            })
        };
        if let Err(err) = result {
            let mut inner = self.state.lock().unwrap();
            if let Some(view) = inner
                .locations
                .iter_mut()
                .find(|view| &view.location.id == location_id)
            {
                view.is_favorited = was_favorited;
            }
            return Err(err.into());
        }
        Ok(!was_favorited)
    }

    /// Toggle vote on a location, then refetch.
    ///
    /// The location must be in the fetched list; an unknown id is an error
    /// before anything is sent to the backend.
    pub fn vote_location(
        &self,
        location_id: &Id,
        direction: VoteDirection,
    ) -> crate::Result<()> {
        let user_id = self.session.current_user_id()?;
        let current = {
            let inner = self.state.lock().unwrap();
            inner
                .locations
                .iter()
                .find(|view| &view.location.id == location_id)
                .ok_or(repositories::Error::NotFound)?
                .user_vote
        };
        self.apply_vote(
            &user_id,
            VoteTarget::Location(location_id.clone()),
            current,
            direction,
        )
    }

    /// Toggle vote on a review, then refetch.
    pub fn vote_review(&self, review_id: &Id, direction: VoteDirection) -> crate::Result<()> {
        let user_id = self.session.current_user_id()?;
        let current = {
            let inner = self.state.lock().unwrap();
            inner
                .locations
                .iter()
                .flat_map(|view| view.reviews.iter())
                .find(|view| &view.review.id == review_id)
                .ok_or(repositories::Error::NotFound)?
                .user_vote
        };
        self.apply_vote(
            &user_id,
            VoteTarget::Review(review_id.clone()),
            current,
            direction,
        )
    }

    fn apply_vote(
        &self,
        user_id: &Id,
        target: VoteTarget,
        current: Option<VoteDirection>,
        requested: VoteDirection,
    ) -> crate::Result<()> {
        match usecases::next_vote_change(current, requested) {
            VoteChange::Removed => self.db.delete_vote(user_id, &target)?,
            VoteChange::Set(direction) => self.db.upsert_vote(Vote {
                id: Id::new(),
                user_id: user_id.clone(),
                target,
                direction,
                created_at: Timestamp::now(),
            })?,
        }
        // The vote counters are maintained by the backend; a full refetch
        // reconciles them together with the annotations.
        self.fetch_locations()
    }

    /// Acquires the device position and caches it for the distance filter.
    pub fn get_user_location(&self) -> crate::Result<MapPoint> {
        let pos = self.geo.current_position(&PositionRequest::default())?;
        self.state.lock().unwrap().user_position = Some(pos);
        Ok(pos)
    }

    pub fn user_position(&self) -> Option<MapPoint> {
        self.state.lock().unwrap().user_position
    }

    /// Admin moderation: hide or unhide a location, then refetch.
    pub fn set_location_visibility(
        &self,
        location_id: &Id,
        hidden: bool,
        reason: Option<String>,
    ) -> crate::Result<()> {
        let admin = self
            .session
            .profile()
            .ok_or(usecases::Error::Unauthorized)?;
        usecases::set_location_visibility(&*self.db, &admin, location_id, hidden, reason)?;
        self.fetch_locations()
    }

    /// Admin moderation: hide or unhide a review, then refetch.
    pub fn set_review_visibility(
        &self,
        review_id: &Id,
        hidden: bool,
        reason: Option<String>,
    ) -> crate::Result<()> {
        let admin = self
            .session
            .profile()
            .ok_or(usecases::Error::Unauthorized)?;
        usecases::set_review_visibility(&*self.db, &admin, review_id, hidden, reason)?;
        self.fetch_locations()
    }
}

fn fetch_user_votes<D: Db>(
    db: &D,
    user_id: &Id,
    views: &mut [LocationView],
) -> std::result::Result<(), repositories::Error> {
    let location_ids: Vec<Id> = views.iter().map(|view| view.location.id.clone()).collect();

    let votes = db.user_votes(user_id, VoteTargetKind::Location, &location_ids)?;
    for vote in votes {
        if let Some(view) = views
            .iter_mut()
            .find(|view| &view.location.id == vote.target.id())
        {
            view.user_vote = Some(vote.direction);
        }
    }

    let review_ids = db.review_ids_of_locations(&location_ids)?;
    let review_votes = db.user_votes(user_id, VoteTargetKind::Review, &review_ids)?;
    for vote in review_votes {
        for view in views.iter_mut() {
            if let Some(review_view) = view
                .reviews
                .iter_mut()
                .find(|review_view| &review_view.review.id == vote.target.id())
            {
                review_view.user_vote = Some(vote.direction);
            }
        }
    }
    Ok(())
}

fn fetch_user_favorites<D: Db>(
    db: &D,
    user_id: &Id,
    views: &mut [LocationView],
) -> std::result::Result<(), repositories::Error> {
    let location_ids: Vec<Id> = views.iter().map(|view| view.location.id.clone()).collect();
    let favorites = db.user_favorites(user_id, &location_ids)?;
    for favorite in favorites {
        if let Some(view) = views
            .iter_mut()
            .find(|view| view.location.id == favorite.location_id)
        {
            view.is_favorited = true;
        }
    }
    Ok(())
}
