// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{city_coordinates, distance_miles, haversine_miles, is_known_city};
pub use filters::{check_candidate, is_eligible, normalize_gender, Rejection};
pub use matcher::{match_group, MatchResult, Matcher};
pub use scoring::calculate_match_score;
