mod find_matches;

pub use find_matches::{find_matches, MatchCandidate};
