use super::prelude::*;

/// The fragment of an address used for duplicate matching: everything before
/// the first comma, i.e. usually the street line.
///
/// Note that this deliberately matches across cities ("123 Main St,
/// Springfield" finds "123 Main St, Shelbyville").
pub fn address_search_fragment(address: &str) -> &str {
    address.split(',').next().unwrap_or(address)
}

/// Looks up visible locations whose address contains the street line of the
/// given address.
pub fn find_possible_duplicates<R: LocationRepo>(
    repo: &R,
    address: &str,
) -> Result<Vec<PopulatedLocation>> {
    let fragment = address_search_fragment(address);
    Ok(repo.visible_locations_with_similar_address(fragment)?)
}
