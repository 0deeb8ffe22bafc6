pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{location_builder::*, review_builder::*, user_builder::*};

pub mod location_builder {

    use super::*;
    use crate::{geo::*, id::*, location::*, time::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.location.id = id.into();
            self
        }
        pub fn business_name(mut self, name: &str) -> Self {
            self.location.business_name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.location.address = address.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.location.pos = pos;
            self
        }
        pub fn city_id(mut self, id: &str) -> Self {
            self.location.city_id = id.into();
            self
        }
        pub fn created_by(mut self, id: &str) -> Self {
            self.location.created_by = id.into();
            self
        }
        pub fn hidden(mut self, hidden: bool) -> Self {
            self.location.hidden = hidden;
            self
        }
        pub fn votes(mut self, upvotes: u32, downvotes: u32) -> Self {
            self.location.upvotes = upvotes;
            self.location.downvotes = downvotes;
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> Self::Build {
            Self::Build {
                location: Location {
                    id: Id::new(),
                    business_name: "".into(),
                    address: "".into(),
                    pos: MapPoint::default(),
                    pin_pos: None,
                    city_id: Id::new(),
                    created_by: Id::new(),
                    created_at: Timestamp::now(),
                    hidden: false,
                    upvotes: 0,
                    downvotes: 0,
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{id::*, review::*, time::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn location_id(mut self, id: &str) -> Self {
            self.review.location_id = id.into();
            self
        }
        pub fn user_id(mut self, id: &str) -> Self {
            self.review.user_id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.review.title = Some(title.into());
            self
        }
        pub fn address_note(mut self, note: &str) -> Self {
            self.review.address_note = Some(note.into());
            self
        }
        pub fn review_text(mut self, text: &str) -> Self {
            self.review.review_text = Some(text.into());
            self
        }
        pub fn star_rating(mut self, stars: u8) -> Self {
            self.review.star_rating = StarRating::try_from(stars).unwrap();
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> Self::Build {
            Self::Build {
                review: Review {
                    id: Id::new(),
                    location_id: Id::new(),
                    user_id: Id::new(),
                    title: None,
                    address_note: None,
                    star_rating: StarRating::try_from(3).unwrap(),
                    review_text: None,
                    photos: None,
                    created_at: Timestamp::now(),
                    hidden: false,
                    upvotes: 0,
                    downvotes: 0,
                },
            }
        }
    }
}

pub mod user_builder {

    use super::*;
    use crate::{id::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = email.into();
            self
        }
        pub fn admin(mut self, is_admin: bool) -> Self {
            self.user.is_admin = is_admin;
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> Self::Build {
            Self::Build {
                user: User {
                    id: Id::new(),
                    email: "".into(),
                    created_at: Timestamp::now(),
                    is_admin: false,
                    daily_review_limit: 10,
                    pending_invitations: 0,
                    last_invitation_received: None,
                },
            }
        }
    }
}
