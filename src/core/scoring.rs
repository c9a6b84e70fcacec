use crate::core::distance::distance_miles;
use crate::core::filters::{activity_of_interest, eq_ignore_case};
use crate::models::{MatchingWeights, ScoreBreakdown, User};

/// Age gap (years) at which the age score drops to 1/e
pub const AGE_HALF_LIFE_YEARS: f64 = 5.0;
/// Distance (miles) within which the distance score stays at 1.0
pub const DISTANCE_SOFT_CAP_MILES: f64 = 10.0;
/// Score lost for every mile past the soft cap
pub const DISTANCE_DECAY_PER_MILE: f64 = 0.08;
/// Distance score when either city is unknown
pub const UNKNOWN_DISTANCE_SCORE: f64 = 0.5;

pub const EXACT_MATCH_SCORE: f64 = 1.0;
pub const VIBE_CLOSE_SCORE: f64 = 0.5;
pub const ETHNICITY_CLOSE_SCORE: f64 = 0.3;
pub const RELIGION_CLOSE_SCORE: f64 = 0.5;

/// Candidate is about to do the activity of interest
pub const ACTIVITY_CURRENT_SCORE: f64 = 1.0;
/// Candidate has only done the activity before
pub const ACTIVITY_HISTORY_SCORE: f64 = 0.5;

/// Calculate the final weighted score for a candidate
///
/// `weights` must already be normalised. Scoring formula:
/// score = (
///     activity_score * w.activity +
///     age_score * w.age +
///     distance_score * w.distance +
///     vibe_score * w.vibe +
///     religion_score * w.religion +
///     ethnicity_score * w.ethnicity
/// )
pub fn calculate_match_score(
    me: &User,
    candidate: &User,
    activity: Option<&str>,
    weights: &MatchingWeights,
) -> f64 {
    score_breakdown(me, candidate, activity).weighted(weights)
}

/// Per-factor sub-scores for a candidate relative to the requester
pub fn score_breakdown(me: &User, candidate: &User, activity: Option<&str>) -> ScoreBreakdown {
    let distance = distance_miles(me.city.as_deref(), candidate.city.as_deref());

    ScoreBreakdown {
        activity: activity_score(activity_of_interest(me, activity), candidate),
        age: age_score(me.age, candidate.age),
        distance: distance_score(distance),
        vibe: equality_score(&me.vibe, &candidate.vibe, EXACT_MATCH_SCORE, VIBE_CLOSE_SCORE),
        religion: equality_score(
            &me.religion,
            &candidate.religion,
            EXACT_MATCH_SCORE,
            RELIGION_CLOSE_SCORE,
        ),
        ethnicity: equality_score(
            &me.ethnicity,
            &candidate.ethnicity,
            EXACT_MATCH_SCORE,
            ETHNICITY_CLOSE_SCORE,
        ),
    }
}

/// Calculate age score (0-1)
/// Exponential decay on the absolute age gap
#[inline]
pub fn age_score(a: i32, b: i32) -> f64 {
    let gap = (f64::from(a) - f64::from(b)).abs();
    (-gap / AGE_HALF_LIFE_YEARS).exp().clamp(0.0, 1.0)
}

/// Calculate distance score (0-1)
/// Full marks inside the soft cap, then a linear penalty per mile
#[inline]
pub fn distance_score(distance_miles: Option<f64>) -> f64 {
    let Some(miles) = distance_miles else {
        return UNKNOWN_DISTANCE_SCORE;
    };

    let extra = (miles - DISTANCE_SOFT_CAP_MILES).max(0.0);
    let penalty = extra * DISTANCE_DECAY_PER_MILE;
    (1.0 - penalty).clamp(0.0, 1.0)
}

/// Score two categorical values: `exact` on a case-insensitive match,
/// `close` otherwise, and 0 when either side is blank
#[inline]
pub fn equality_score(a: &str, b: &str, exact: f64, close: f64) -> f64 {
    let a = a.trim();
    let b = b.trim();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if eq_ignore_case(a, b) {
        exact
    } else {
        close
    }
}

/// Score how well a candidate fits the activity of interest
#[inline]
pub fn activity_score(activity: Option<&str>, candidate: &User) -> f64 {
    let Some(activity) = activity else {
        return 0.0;
    };

    let current = candidate
        .activity
        .as_deref()
        .is_some_and(|current| eq_ignore_case(current.trim(), activity));
    if current {
        return ACTIVITY_CURRENT_SCORE;
    }

    let attended = candidate
        .attendance
        .iter()
        .any(|past| eq_ignore_case(past.trim(), activity));
    if attended {
        ACTIVITY_HISTORY_SCORE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(age: i32, city: &str) -> User {
        let mut user = User::new("Test User", age);
        user.city = Some(city.to_string());
        user.ethnicity = "Asian".to_string();
        user.religion = "Christian".to_string();
        user.vibe = "Chill".to_string();
        user
    }

    #[test]
    fn test_age_score() {
        assert_eq!(age_score(25, 25), 1.0);

        let five = age_score(25, 30);
        assert!((five - 0.3679).abs() < 1e-3);

        let ten = age_score(40, 30);
        assert!((ten - 0.1353).abs() < 1e-3);

        assert_eq!(age_score(20, 30), age_score(30, 20));
    }

    #[test]
    fn test_distance_score() {
        assert_eq!(distance_score(None), UNKNOWN_DISTANCE_SCORE);
        assert_eq!(distance_score(Some(0.0)), 1.0);
        assert_eq!(distance_score(Some(10.0)), 1.0);

        let fifteen = distance_score(Some(15.0));
        assert!((fifteen - 0.6).abs() < 1e-9);

        // 60 miles is 50 past the cap, far beyond what the penalty allows
        assert_eq!(distance_score(Some(60.0)), 0.0);
        assert!(distance_score(Some(0.0)) > distance_score(Some(60.0)));
    }

    #[test]
    fn test_equality_score() {
        assert_eq!(equality_score("Chill", " chill ", 1.0, 0.5), 1.0);
        assert_eq!(equality_score("Chill", "Party", 1.0, 0.5), 0.5);
        assert_eq!(equality_score("", "Party", 1.0, 0.5), 0.0);
        assert_eq!(equality_score("Chill", "   ", 1.0, 0.5), 0.0);
    }

    #[test]
    fn test_activity_score() {
        let mut candidate = User::new("Candidate", 28);
        candidate.attendance = vec!["Hiking".to_string()];
        assert_eq!(activity_score(Some("hiking"), &candidate), ACTIVITY_HISTORY_SCORE);

        candidate.activity = Some("HIKING".to_string());
        assert_eq!(activity_score(Some("hiking"), &candidate), ACTIVITY_CURRENT_SCORE);

        assert_eq!(activity_score(Some("Bowling"), &candidate), 0.0);
        assert_eq!(activity_score(None, &candidate), 0.0);
    }

    #[test]
    fn test_breakdown_uses_per_attribute_fallbacks() {
        let me = create_test_user(28, "Irvine");
        let mut other = create_test_user(28, "Irvine");
        other.ethnicity = "Hispanic".to_string();
        other.religion = "Muslim".to_string();
        other.vibe = "Party".to_string();

        let breakdown = score_breakdown(&me, &other, None);

        assert_eq!(breakdown.age, 1.0);
        assert_eq!(breakdown.distance, 1.0);
        assert_eq!(breakdown.ethnicity, ETHNICITY_CLOSE_SCORE);
        assert_eq!(breakdown.religion, RELIGION_CLOSE_SCORE);
        assert_eq!(breakdown.vibe, VIBE_CLOSE_SCORE);
        assert_eq!(breakdown.activity, 0.0);
    }

    #[test]
    fn test_identical_users_score_highest() {
        let weights = MatchingWeights::default().normalized();
        let mut me = create_test_user(28, "Irvine");
        me.activity = Some("Hiking".to_string());

        let mut twin = create_test_user(28, "Irvine");
        twin.activity = Some("Hiking".to_string());

        let score = calculate_match_score(&me, &twin, None, &weights);
        assert!((score - 1.0).abs() < 1e-9);

        let older = create_test_user(35, "Santa Ana");
        let lower = calculate_match_score(&me, &older, None, &weights);
        assert!(lower < score);
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let zero = MatchingWeights {
            activity: 0.0,
            age: 0.0,
            distance: 0.0,
            vibe: 0.0,
            religion: 0.0,
            ethnicity: 0.0,
        };
        let me = create_test_user(28, "Irvine");
        let other = create_test_user(30, "Tustin");

        assert_eq!(calculate_match_score(&me, &other, None, &zero.normalized()), 0.0);
    }
}
