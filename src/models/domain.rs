use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A member of the candidate pool (or the requester)
///
/// The matcher only ever reads these records. Profile fields such as `mbti`
/// and `badges` are carried through untouched for the host app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub ethnicity: String,
    #[serde(default)]
    pub religion: String,
    #[serde(default)]
    pub vibe: String,
    /// The activity the user currently intends to do
    #[serde(default)]
    pub activity: Option<String>,
    /// Activities the user has attended before
    #[serde(default)]
    pub attendance: Vec<String>,
    #[serde(default)]
    pub mbti: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub attendance_rating: Option<f64>,
}

impl User {
    /// Create a user with a fresh id and empty optional attributes
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            gender: String::new(),
            city: None,
            ethnicity: String::new(),
            religion: String::new(),
            vibe: String::new(),
            activity: None,
            attendance: Vec::new(),
            mbti: String::new(),
            badges: Vec::new(),
            attendance_rating: None,
        }
    }
}

/// How the requester's gender constrains the group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenderMode {
    #[default]
    Any,
    #[serde(alias = "sameGender")]
    SameGenderOnly,
    /// Reserved. Filters and scores exactly like `Any`.
    MixedPreferred,
}

/// Relative importance of each compatibility factor
///
/// Only the ratios matter: weights are normalised by their sum before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MatchingWeights {
    #[validate(range(min = 0.0))]
    pub activity: f64,
    #[validate(range(min = 0.0))]
    pub age: f64,
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[validate(range(min = 0.0))]
    pub vibe: f64,
    #[validate(range(min = 0.0))]
    pub religion: f64,
    #[validate(range(min = 0.0))]
    pub ethnicity: f64,
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.activity + self.age + self.distance + self.vibe + self.religion + self.ethnicity
    }

    /// Divide every weight by the total. A zero (or negative) total leaves
    /// the weights as they are.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum <= 0.0 {
            return *self;
        }

        Self {
            activity: self.activity / sum,
            age: self.age / sum,
            distance: self.distance / sum,
            vibe: self.vibe / sum,
            religion: self.religion / sum,
            ethnicity: self.ethnicity / sum,
        }
    }
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            activity: 5.0,
            age: 1.4,
            distance: 1.0,
            vibe: 0.0,
            religion: 0.6,
            ethnicity: 1.0,
        }
    }
}

/// Per-factor compatibility of one candidate, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub activity: f64,
    pub age: f64,
    pub distance: f64,
    pub vibe: f64,
    pub religion: f64,
    pub ethnicity: f64,
}

impl ScoreBreakdown {
    /// Weighted sum using already-normalised weights
    pub fn weighted(&self, weights: &MatchingWeights) -> f64 {
        weights.activity * self.activity
            + weights.age * self.age
            + weights.distance * self.distance
            + weights.vibe * self.vibe
            + weights.religion * self.religion
            + weights.ethnicity * self.ethnicity
    }
}

/// A candidate that survived the hard filters, with its final score
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub user: &'a User,
    pub score: f64,
}
