use super::LocationView;
use crate::entities::*;

/// The filter parameters of the location list.
///
/// `with_votes` is deliberately tri-state: only `Some(true)` restricts the
/// result to locations with a positive net vote count, `Some(false)` and
/// `None` both impose no filter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LocationFilter {
    pub text: Option<String>,
    pub max_distance: Option<Distance>,
    pub with_votes: Option<bool>,
}

/// Applies the search text, distance and vote filters, in that order.
///
/// The distance filter only takes effect when the user's position is known.
pub fn filter_locations(
    locations: &[LocationView],
    filter: &LocationFilter,
    user_pos: Option<MapPoint>,
) -> Vec<LocationView> {
    let mut filtered: Vec<_> = locations.to_vec();

    if let Some(text) = filter.text.as_deref().filter(|text| !text.is_empty()) {
        let query = text.to_lowercase();
        filtered.retain(|view| matches_query(view, &query));
    }

    if let (Some(max_distance), Some(user_pos)) = (filter.max_distance, user_pos) {
        filtered
            .retain(|view| MapPoint::distance(user_pos, view.location.pos) <= max_distance);
    }

    if filter.with_votes == Some(true) {
        filtered.retain(|view| view.location.net_votes() > 0);
    }

    filtered
}

fn matches_query(view: &LocationView, query: &str) -> bool {
    view.location.business_name.to_lowercase().contains(query)
        || view.location.address.to_lowercase().contains(query)
        || view.reviews.iter().any(|view| {
            let review = &view.review;
            contains_ignoring_case(review.title.as_deref(), query)
                || contains_ignoring_case(review.address_note.as_deref(), query)
                || contains_ignoring_case(review.review_text.as_deref(), query)
        })
}

fn contains_ignoring_case(text: Option<&str>, query: &str) -> bool {
    text.is_some_and(|text| text.to_lowercase().contains(query))
}
