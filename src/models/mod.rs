// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GenderMode, MatchingWeights, ScoreBreakdown, ScoredCandidate, User};
pub use requests::MatchGroupRequest;
pub use responses::MatchGroupResponse;
