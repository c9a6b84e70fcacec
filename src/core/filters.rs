use std::fmt;

use crate::core::distance::distance_miles;
use crate::models::{GenderMode, User};

/// Candidates this many years apart (or more) are never grouped
pub const MAX_AGE_GAP_YEARS: u32 = 8;
/// Candidates further than this (when the distance is known) are never grouped
pub const MAX_DISTANCE_MILES: f64 = 50.0;

/// The hard filter that excluded a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    SelfMatch,
    ActivityMismatch,
    AgeGap,
    TooFar,
    GenderMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::SelfMatch => "requester",
            Rejection::ActivityMismatch => "activity mismatch",
            Rejection::AgeGap => "age gap",
            Rejection::TooFar => "too far",
            Rejection::GenderMismatch => "gender mismatch",
        };
        f.write_str(reason)
    }
}

#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Canonical spelling for the two common genders, anything else trimmed
pub fn normalize_gender(gender: &str) -> String {
    let trimmed = gender.trim();
    match trimmed.to_lowercase().as_str() {
        "male" => "Male".to_string(),
        "female" => "Female".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Trim an activity filter; blank filters mean "no filter"
#[inline]
pub fn activity_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|activity| !activity.is_empty())
}

/// The activity used for scoring: the filter if set, else the requester's own
pub fn activity_of_interest<'a>(me: &'a User, filter: Option<&'a str>) -> Option<&'a str> {
    activity_filter(filter).or_else(|| activity_filter(me.activity.as_deref()))
}

/// Whether the candidate is doing, or has done, the activity
#[inline]
pub fn matches_activity(candidate: &User, activity: &str) -> bool {
    candidate
        .activity
        .as_deref()
        .is_some_and(|current| eq_ignore_case(current.trim(), activity))
        || candidate
            .attendance
            .iter()
            .any(|past| eq_ignore_case(past.trim(), activity))
}

/// Run every hard filter against a candidate
///
/// `activity` is the already-trimmed filter (`None` disables it). Filters run
/// in order: self, activity, age gap, known distance, same gender.
pub fn check_candidate(
    me: &User,
    candidate: &User,
    activity: Option<&str>,
    gender_mode: GenderMode,
) -> Result<(), Rejection> {
    if candidate.id == me.id {
        return Err(Rejection::SelfMatch);
    }

    if let Some(activity) = activity {
        if !matches_activity(candidate, activity) {
            return Err(Rejection::ActivityMismatch);
        }
    }

    if me.age.abs_diff(candidate.age) >= MAX_AGE_GAP_YEARS {
        return Err(Rejection::AgeGap);
    }

    // Unknown cities never trip the distance cutoff
    if let Some(miles) = distance_miles(me.city.as_deref(), candidate.city.as_deref()) {
        if miles > MAX_DISTANCE_MILES {
            return Err(Rejection::TooFar);
        }
    }

    if gender_mode == GenderMode::SameGenderOnly && !same_gender(me, candidate) {
        return Err(Rejection::GenderMismatch);
    }

    Ok(())
}

#[inline]
pub fn is_eligible(
    me: &User,
    candidate: &User,
    activity: Option<&str>,
    gender_mode: GenderMode,
) -> bool {
    check_candidate(me, candidate, activity, gender_mode).is_ok()
}

fn same_gender(me: &User, candidate: &User) -> bool {
    let mine = normalize_gender(&me.gender);
    let theirs = normalize_gender(&candidate.gender);
    !mine.is_empty() && !theirs.is_empty() && eq_ignore_case(&mine, &theirs)
}
