use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};
use validator::Validate;

use crate::core::distance::is_known_city;
use crate::error::AlgoError;
use crate::models::MatchGroupRequest;

/// Read and validate a request from a JSON file
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<MatchGroupRequest, AlgoError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading match request");
    let raw = std::fs::read_to_string(path)?;
    parse_request(&raw)
}

/// Read and validate a request from any reader (e.g. stdin)
pub fn read_request<R: Read>(mut reader: R) -> Result<MatchGroupRequest, AlgoError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    parse_request(&raw)
}

/// Parse and validate a request body
pub fn parse_request(raw: &str) -> Result<MatchGroupRequest, AlgoError> {
    let request: MatchGroupRequest = serde_json::from_str(raw)?;
    request.validate()?;
    if let Some(weights) = &request.weights {
        weights.validate()?;
    }

    // Unknown cities are legal but only ever score neutrally on distance
    if let Some(city) = request.me.city.as_deref() {
        if !is_known_city(city) {
            warn!(city, "requester city not in table, distance will be neutral");
        }
    }
    let unknown = request
        .pool
        .iter()
        .filter(|u| u.city.as_deref().is_some_and(|c| !is_known_city(c)))
        .count();
    if unknown > 0 {
        debug!(unknown, pool_size = request.pool.len(), "pool members with unknown cities");
    }

    Ok(request)
}
