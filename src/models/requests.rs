use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{GenderMode, MatchingWeights, User};

/// Request to assemble a group around `me`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroupRequest {
    pub me: User,
    /// Candidate pool. Empty means "use a synthetic population".
    #[serde(default)]
    pub pool: Vec<User>,
    /// Falls back to the configured default group size. Zero or negative
    /// sizes yield the solo group.
    #[validate(range(max = 64))]
    #[serde(default, alias = "desired_size")]
    pub desired_size: Option<i64>,
    #[serde(default, alias = "activityFilter")]
    pub activity: Option<String>,
    #[serde(default)]
    pub gender_mode: GenderMode,
    /// Overrides the configured weights when present
    #[serde(default)]
    pub weights: Option<MatchingWeights>,
    /// Seed for reproducible tie-breaking
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MatchGroupRequest {
    /// Requested group size, clamped at zero
    pub fn group_size(&self, default_size: usize) -> usize {
        match self.desired_size {
            Some(size) => usize::try_from(size).unwrap_or(0),
            None => default_size,
        }
    }
}
