//! Shared application state and vote-tally reconciliation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{Candidate, Student};

/// Vote counts keyed by candidate id.
pub type VoteTally = HashMap<i64, u32>;

/// State shared between the host application and the synchronizer.
///
/// Passed around as an explicit [`SharedState`] handle rather than looked
/// up through a global. Both lists are replaced wholesale on sync; `votes`
/// is rebuilt so it always holds exactly one entry per known candidate.
#[derive(Debug, Default)]
pub struct AppState {
    pub students: Vec<Student>,
    pub candidates: Vec<Candidate>,
    pub votes: VoteTally,
}

pub type SharedState = Arc<Mutex<AppState>>;

pub fn shared_state() -> SharedState {
    Arc::new(Mutex::new(AppState::default()))
}

/// Rebuild the tally for a fresh candidate list.
///
/// Counts for retained candidates carry over verbatim, new candidates
/// start at zero, and entries for candidates no longer listed are
/// dropped.
pub fn rebuild_votes(previous: &VoteTally, candidates: &[Candidate]) -> VoteTally {
    candidates
        .iter()
        .map(|c| (c.id, previous.get(&c.id).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn candidate(id: i64) -> Candidate {
        Candidate {
            id,
            name: format!("Candidata {id}"),
            code: format!("C{id}"),
            photo_url: String::new(),
            platform: String::new(),
        }
    }

    #[test]
    fn test_rebuild_preserves_drops_and_zeroes() {
        let previous = VoteTally::from([(1, 5), (2, 3)]);
        let candidates = [candidate(1), candidate(3)];

        let rebuilt = rebuild_votes(&previous, &candidates);

        assert_eq!(rebuilt, VoteTally::from([(1, 5), (3, 0)]));
    }

    #[test]
    fn test_rebuild_from_empty_tally_is_all_zeroes() {
        let candidates = defaults::default_candidates();

        let rebuilt = rebuild_votes(&VoteTally::new(), &candidates);

        assert_eq!(rebuilt.len(), candidates.len());
        assert!(rebuilt.values().all(|&count| count == 0));
    }
}
