//! Coala Algo - group matching engine for Coala social activities
//!
//! Given a requesting user, a candidate pool, a desired group size and a set
//! of weighted preferences, the engine picks companions for an activity
//! group. Hard filters exclude candidates outright, weighted scores rank the
//! rest, and ties are broken with an injectable random source.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance_miles, match_group, MatchResult, Matcher};
pub use error::AlgoError;
pub use models::{
    GenderMode, MatchGroupRequest, MatchGroupResponse, MatchingWeights, ScoredCandidate, User,
};
