use std::cmp::Ordering;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::core::{
    filters::{activity_filter, check_candidate, is_eligible},
    scoring::score_breakdown,
};
use crate::models::{GenderMode, MatchingWeights, ScoredCandidate, User};

/// Scores closer than this are treated as tied
pub const TIE_EPSILON: f64 = 1e-6;

/// Result of assembling a group
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Requester first, then the companions
    pub group: Vec<User>,
    /// Candidates that survived the hard filters of the ranking that was used
    pub eligible_candidates: usize,
    /// No one matched the activity filter, so ranking ran without it
    pub used_activity_fallback: bool,
    /// Companions added at random after ranked selection fell short
    pub filled_from_pool: usize,
}

impl MatchResult {
    fn solo(me: &User) -> Self {
        Self {
            group: vec![me.clone()],
            eligible_candidates: 0,
            used_activity_fallback: false,
            filled_from_pool: 0,
        }
    }
}

/// Group matching orchestrator
///
/// # Pipeline Stages
/// 1. Hard filters (self, activity, age gap, known distance, gender mode)
/// 2. Weighted scoring of survivors
/// 3. Shuffle, then stable sort by score so equal scores land in random order
/// 4. Selection above the cutoff score, with random picks among boundary ties
/// 5. Optional shortfall filling from any other eligible pool members
///
/// The matcher holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: MatchingWeights,
    fill_shortfall: bool,
}

impl Matcher {
    pub fn new(weights: MatchingWeights) -> Self {
        Self {
            weights,
            fill_shortfall: true,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(MatchingWeights::default())
    }

    /// Enable or disable the shortfall-filling stage
    pub fn with_fill_shortfall(mut self, fill_shortfall: bool) -> Self {
        self.fill_shortfall = fill_shortfall;
        self
    }

    pub fn weights(&self) -> &MatchingWeights {
        &self.weights
    }

    pub fn fills_shortfall(&self) -> bool {
        self.fill_shortfall
    }

    /// Filter and score the pool, best first
    ///
    /// Candidates with equal scores come out in random relative order.
    pub fn rank_candidates<'a, R: Rng + ?Sized>(
        &self,
        me: &User,
        pool: &'a [User],
        activity: Option<&str>,
        gender_mode: GenderMode,
        rng: &mut R,
    ) -> Vec<ScoredCandidate<'a>> {
        let activity = activity_filter(activity);
        let weights = self.weights.normalized();

        // Pools may hold the same user twice; rank each id once
        let mut seen: HashSet<Uuid> = HashSet::from([me.id]);

        let mut scored: Vec<ScoredCandidate<'a>> = pool
            .iter()
            .filter(|candidate| candidate.id == me.id || seen.insert(candidate.id))
            .filter(|candidate| match check_candidate(me, candidate, activity, gender_mode) {
                Ok(()) => true,
                Err(reason) => {
                    trace!(candidate = %candidate.id, %reason, "candidate rejected");
                    false
                }
            })
            .map(|candidate| {
                let breakdown = score_breakdown(me, candidate, activity);
                let score = breakdown.weighted(&weights);
                trace!(candidate = %candidate.id, score, ?breakdown, "candidate scored");
                ScoredCandidate {
                    user: candidate,
                    score,
                }
            })
            .collect();

        scored.shuffle(rng);
        // sort_by is stable, so the shuffle decides the order among ties
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        scored
    }

    /// Assemble a group of up to `desired_size` users around `me`
    ///
    /// The requester is always first. The group is smaller than requested
    /// only when not enough candidates pass the hard filters.
    pub fn match_group<R: Rng + ?Sized>(
        &self,
        me: &User,
        pool: &[User],
        desired_size: usize,
        activity: Option<&str>,
        gender_mode: GenderMode,
        rng: &mut R,
    ) -> MatchResult {
        let companions_needed = desired_size.saturating_sub(1);
        if companions_needed == 0 {
            return MatchResult::solo(me);
        }

        let activity = activity_filter(activity);
        let mut used_activity_fallback = false;
        let mut ranked = self.rank_candidates(me, pool, activity, gender_mode, rng);

        if ranked.is_empty() && activity.is_some() {
            debug!(?activity, "no candidates for activity, ranking without it");
            used_activity_fallback = true;
            ranked = self.rank_candidates(me, pool, None, gender_mode, rng);
        }

        if ranked.is_empty() {
            debug!(pool_size = pool.len(), "no eligible candidates, returning solo group");
            return MatchResult {
                used_activity_fallback,
                ..MatchResult::solo(me)
            };
        }

        let eligible_candidates = ranked.len();
        let mut chosen = select_companions(&ranked, companions_needed, rng);

        let mut filled_from_pool = 0;
        if self.fill_shortfall && chosen.len() < companions_needed {
            let shortfall = companions_needed - chosen.len();
            let extra = fill_shortfall(me, pool, &chosen, shortfall, gender_mode, rng);
            filled_from_pool = extra.len();
            if filled_from_pool > 0 {
                debug!(filled_from_pool, "filled shortfall from remaining pool");
            }
            chosen.extend(extra);
        }

        let mut group = Vec::with_capacity(chosen.len() + 1);
        group.push(me.clone());
        group.extend(chosen.into_iter().cloned());

        MatchResult {
            group,
            eligible_candidates,
            used_activity_fallback,
            filled_from_pool,
        }
    }

    /// Same as [`Matcher::match_group`] with a reproducible random source
    pub fn match_group_seeded(
        &self,
        me: &User,
        pool: &[User],
        desired_size: usize,
        activity: Option<&str>,
        gender_mode: GenderMode,
        seed: u64,
    ) -> MatchResult {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.match_group(me, pool, desired_size, activity, gender_mode, &mut rng)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Assemble a group with the given weights and random source
///
/// Returns the requester followed by at most `desired_size - 1` companions.
pub fn match_group<R: Rng + ?Sized>(
    me: &User,
    pool: &[User],
    desired_size: usize,
    activity: Option<&str>,
    gender_mode: GenderMode,
    weights: MatchingWeights,
    rng: &mut R,
) -> Vec<User> {
    Matcher::new(weights)
        .match_group(me, pool, desired_size, activity, gender_mode, rng)
        .group
}

/// Take everyone strictly above the cutoff score, then fill the remaining
/// seats with a random subset of the candidates tied at the cutoff.
fn select_companions<'a, R: Rng + ?Sized>(
    ranked: &[ScoredCandidate<'a>],
    needed: usize,
    rng: &mut R,
) -> Vec<&'a User> {
    if ranked.len() < needed {
        return ranked.iter().map(|c| c.user).collect();
    }

    let cutoff = ranked[needed - 1].score;
    let above = ranked
        .iter()
        .take_while(|c| c.score > cutoff + TIE_EPSILON)
        .count();

    let mut chosen: Vec<&User> = ranked[..above].iter().map(|c| c.user).collect();

    let remaining = needed - above;
    if remaining > 0 {
        let mut tied: Vec<&User> = ranked[above..]
            .iter()
            .take_while(|c| (c.score - cutoff).abs() <= TIE_EPSILON)
            .map(|c| c.user)
            .collect();
        tied.shuffle(rng);
        chosen.extend(tied.into_iter().take(remaining));
    }

    chosen
}

/// Pick random pool members that pass every hard filter except the activity
/// filter and are not already in the group.
fn fill_shortfall<'a, R: Rng + ?Sized>(
    me: &User,
    pool: &'a [User],
    chosen: &[&User],
    shortfall: usize,
    gender_mode: GenderMode,
    rng: &mut R,
) -> Vec<&'a User> {
    let mut taken: HashSet<Uuid> = chosen.iter().map(|u| u.id).collect();
    taken.insert(me.id);

    let mut leftovers: Vec<&User> = pool
        .iter()
        .filter(|candidate| !taken.contains(&candidate.id))
        .filter(|candidate| is_eligible(me, candidate, None, gender_mode))
        .collect();
    leftovers.shuffle(rng);

    let mut extra = Vec::with_capacity(shortfall.min(leftovers.len()));
    for candidate in leftovers {
        if extra.len() == shortfall {
            break;
        }
        // Pools may hold the same user twice
        if taken.insert(candidate.id) {
            extra.push(candidate);
        }
    }

    extra
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(name: &str, age: i32, gender: &str, city: &str) -> User {
        let mut user = User::new(name, age);
        user.gender = gender.to_string();
        user.city = Some(city.to_string());
        user.ethnicity = "Asian".to_string();
        user.religion = "Christian".to_string();
        user.vibe = "Chill".to_string();
        user
    }

    fn create_me() -> User {
        let mut me = create_candidate("Me", 28, "Female", "Irvine");
        me.activity = Some("Hiking".to_string());
        me
    }

    fn ids(users: &[User]) -> Vec<Uuid> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_zero_or_one_seat_is_solo() {
        let matcher = Matcher::with_default_weights();
        let me = create_me();
        let pool = vec![create_candidate("A", 28, "Female", "Irvine")];

        for size in [0, 1] {
            let result = matcher.match_group_seeded(&me, &pool, size, None, GenderMode::Any, 7);
            assert_eq!(ids(&result.group), vec![me.id]);
        }
    }

    #[test]
    fn test_rank_orders_by_score() {
        let matcher = Matcher::with_default_weights();
        let me = create_me();
        let pool = vec![
            create_candidate("Far", 28, "Female", "Riverside"),
            create_candidate("Near", 28, "Female", "Irvine"),
            create_candidate("Older", 34, "Female", "Irvine"),
        ];

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ranked = matcher.rank_candidates(&me, &pool, None, GenderMode::Any, &mut rng);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].user.name, "Near");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_strictly_higher_always_selected() {
        let matcher = Matcher::with_default_weights();
        let me = create_me();
        let best = create_candidate("Best", 28, "Female", "Irvine");
        let pool = vec![
            create_candidate("Tie1", 30, "Female", "Tustin"),
            best.clone(),
            create_candidate("Tie2", 30, "Female", "Tustin"),
            create_candidate("Tie3", 30, "Female", "Tustin"),
        ];

        for seed in 0..20 {
            let result = matcher.match_group_seeded(&me, &pool, 3, None, GenderMode::Any, seed);
            assert_eq!(result.group.len(), 3);
            assert_eq!(result.group[1].id, best.id);
        }
    }

    #[test]
    fn test_boundary_ties_are_shuffled() {
        let tied = vec![
            create_candidate("A", 30, "Female", "Tustin"),
            create_candidate("B", 30, "Female", "Tustin"),
            create_candidate("C", 30, "Female", "Tustin"),
        ];
        let ranked: Vec<ScoredCandidate> = tied
            .iter()
            .map(|u| ScoredCandidate { user: u, score: 0.5 })
            .collect();

        let mut seen = HashSet::new();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chosen = select_companions(&ranked, 1, &mut rng);
            assert_eq!(chosen.len(), 1);
            seen.insert(chosen[0].name.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_ties_within_epsilon() {
        let users = [
            create_candidate("High", 30, "Female", "Tustin"),
            create_candidate("Tie", 30, "Female", "Tustin"),
            create_candidate("AlmostTie", 30, "Female", "Tustin"),
            create_candidate("Low", 30, "Female", "Tustin"),
        ];
        let ranked = vec![
            ScoredCandidate { user: &users[0], score: 0.9 },
            ScoredCandidate { user: &users[1], score: 0.5 + 5e-7 },
            ScoredCandidate { user: &users[2], score: 0.5 },
            ScoredCandidate { user: &users[3], score: 0.1 },
        ];

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let chosen = select_companions(&ranked, 2, &mut rng);
        assert_eq!(chosen.len(), 2);
        assert_eq!(chosen[0].name, "High");
        assert!(chosen[1].name == "Tie" || chosen[1].name == "AlmostTie");
    }

    #[test]
    fn test_activity_fallback_flag() {
        let matcher = Matcher::with_default_weights();
        let me = create_me();
        let pool = vec![
            create_candidate("A", 28, "Female", "Irvine"),
            create_candidate("B", 29, "Female", "Irvine"),
        ];

        let result =
            matcher.match_group_seeded(&me, &pool, 3, Some("Curling"), GenderMode::Any, 11);
        assert!(result.used_activity_fallback);
        assert_eq!(result.group.len(), 3);
        assert_eq!(result.filled_from_pool, 0);
    }

    #[test]
    fn test_shortfall_filled_from_non_activity_candidates() {
        let me = create_me();
        let mut hiker = create_candidate("Hiker", 28, "Female", "Irvine");
        hiker.attendance = vec!["Hiking".to_string()];
        let pool = vec![
            hiker.clone(),
            create_candidate("A", 28, "Female", "Irvine"),
            create_candidate("B", 29, "Female", "Irvine"),
            create_candidate("TooOld", 50, "Female", "Irvine"),
        ];

        let filling = Matcher::with_default_weights();
        let result = filling.match_group_seeded(&me, &pool, 4, Some("Hiking"), GenderMode::Any, 5);
        assert_eq!(result.group.len(), 4);
        assert_eq!(result.group[1].id, hiker.id);
        assert_eq!(result.filled_from_pool, 2);
        assert!(!result.used_activity_fallback);
        assert!(result.group.iter().all(|u| u.name != "TooOld"));

        let strict = Matcher::with_default_weights().with_fill_shortfall(false);
        let result = strict.match_group_seeded(&me, &pool, 4, Some("Hiking"), GenderMode::Any, 5);
        assert_eq!(ids(&result.group), vec![me.id, hiker.id]);
    }

    #[test]
    fn test_duplicate_pool_entries_not_filled_twice() {
        let me = create_me();
        let mut hiker = create_candidate("Hiker", 28, "Female", "Irvine");
        hiker.attendance = vec!["Hiking".to_string()];
        let other = create_candidate("Other", 28, "Female", "Irvine");
        let pool = vec![hiker, other.clone(), other.clone(), me.clone()];

        let result =
            Matcher::default().match_group_seeded(&me, &pool, 5, Some("Hiking"), GenderMode::Any, 9);
        assert_eq!(result.group.len(), 3);
        assert_eq!(result.group.iter().filter(|u| u.id == other.id).count(), 1);
        assert_eq!(result.group.iter().filter(|u| u.id == me.id).count(), 1);
    }

    #[test]
    fn test_duplicate_pool_entries_ranked_once() {
        let me = create_me();
        let mut hiker = create_candidate("Hiker", 28, "Female", "Irvine");
        hiker.attendance = vec!["Hiking".to_string()];
        let third = create_candidate("Third", 29, "Female", "Irvine");
        let pool = vec![hiker.clone(), hiker.clone(), third.clone()];

        let matcher = Matcher::default().with_fill_shortfall(false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ranked = matcher.rank_candidates(&me, &pool, None, GenderMode::Any, &mut rng);
        assert_eq!(ranked.len(), 2);

        for seed in 0..10 {
            let result = matcher.match_group_seeded(&me, &pool, 3, None, GenderMode::Any, seed);
            let mut got = ids(&result.group[1..]);
            got.sort();
            let mut expected = vec![hiker.id, third.id];
            expected.sort();
            assert_eq!(result.group[0].id, me.id);
            assert_eq!(got, expected);

            let result =
                matcher.match_group_seeded(&me, &pool, 3, Some("Hiking"), GenderMode::Any, seed);
            assert_eq!(ids(&result.group), vec![me.id, hiker.id]);
        }
    }

    #[test]
    fn test_huge_group_size_returns_smaller_group() {
        let me = create_me();
        let pool = vec![
            create_candidate("A", 28, "Female", "Irvine"),
            create_candidate("B", 29, "Female", "Tustin"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let weights = MatchingWeights::default();
        let group = match_group(&me, &pool, usize::MAX, None, GenderMode::Any, weights, &mut rng);
        assert_eq!(group.len(), pool.len() + 1);
        assert_eq!(group[0].id, me.id);

        let mut hiker = create_candidate("Hiker", 28, "Female", "Irvine");
        hiker.attendance = vec!["Hiking".to_string()];
        let pool = vec![hiker, create_candidate("C", 27, "Female", "Irvine")];
        let matcher = Matcher::default();
        let result =
            matcher.match_group_seeded(&me, &pool, usize::MAX, Some("Hiking"), GenderMode::Any, 2);
        assert_eq!(result.group.len(), 3);
        assert_eq!(result.filled_from_pool, 1);
    }

    #[test]
    fn test_free_function_matches_contract() {
        let me = create_me();
        let pool = vec![
            create_candidate("A", 28, "Female", "Irvine"),
            create_candidate("B", 27, "Male", "Tustin"),
            create_candidate("C", 26, "Female", "Costa Mesa"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let weights = MatchingWeights::default();
        let group = match_group(&me, &pool, 3, None, GenderMode::Any, weights, &mut rng);
        assert_eq!(group.len(), 3);
        assert_eq!(group[0].id, me.id);
    }
}
