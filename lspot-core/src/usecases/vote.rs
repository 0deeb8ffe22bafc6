use crate::entities::VoteDirection;

/// The backend mutation a vote request translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// The existing vote matched the request: toggle it off.
    Removed,
    /// Insert or replace the vote with this direction.
    Set(VoteDirection),
}

/// Toggle semantics of voting: requesting the direction that is already set
/// removes the vote, anything else upserts the requested direction.
pub fn next_vote_change(
    current: Option<VoteDirection>,
    requested: VoteDirection,
) -> VoteChange {
    if current == Some(requested) {
        VoteChange::Removed
    } else {
        VoteChange::Set(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VoteDirection::*;

    #[test]
    fn voting_without_existing_vote_sets_it() {
        assert_eq!(next_vote_change(None, Up), VoteChange::Set(Up));
        assert_eq!(next_vote_change(None, Down), VoteChange::Set(Down));
    }

    #[test]
    fn voting_the_same_direction_again_removes_it() {
        assert_eq!(next_vote_change(Some(Up), Up), VoteChange::Removed);
        assert_eq!(next_vote_change(Some(Down), Down), VoteChange::Removed);
    }

    #[test]
    fn voting_the_opposite_direction_replaces_it() {
        assert_eq!(next_vote_change(Some(Up), Down), VoteChange::Set(Down));
        assert_eq!(next_vote_change(Some(Down), Up), VoteChange::Set(Up));
    }
}
