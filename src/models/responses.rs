use serde::{Deserialize, Serialize};

use crate::models::domain::User;

/// Response for a group match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroupResponse {
    /// Requester first, then the chosen companions
    pub group: Vec<User>,
    pub requested_size: usize,
    /// How many seats are still empty
    pub shortfall: usize,
    pub eligible_candidates: usize,
    pub used_activity_fallback: bool,
    pub filled_from_pool: usize,
}
