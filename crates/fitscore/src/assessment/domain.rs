use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw answer on the five point agreement scale.
///
/// The raw value is kept exactly as submitted. Scoring clamps it into `1..=5`; anything that
/// could not be read as a number is stored as [`Rating::MISSING`] and scores as the minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(i64);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const MISSING: Rating = Rating(0);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub fn clamped(self) -> u8 {
        // both bounds fit in u8 so the cast cannot truncate
        self.0.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8
    }

    /// Reads a rating from free text such as a form field or CSV cell.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self(value);
        }
        trimmed
            .parse::<f64>()
            .map(Self::from_float)
            .unwrap_or(Self::MISSING)
    }

    fn from_float(value: f64) -> Self {
        if value.is_finite() {
            // saturating conversion
            Self(value.round() as i64)
        } else {
            Self::MISSING
        }
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RatingVisitor)
    }
}

struct RatingVisitor;

impl<'de> Visitor<'de> for RatingVisitor {
    type Value = Rating;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rating between 1 and 5")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Rating, E> {
        Ok(Rating(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Rating, E> {
        Ok(Rating(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Rating, E> {
        let saturated = if value.is_negative() { i64::MIN } else { i64::MAX };
        Ok(Rating(i64::try_from(value).unwrap_or(saturated)))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Rating, E> {
        Ok(Rating(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Rating, E> {
        Ok(Rating::from_float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Rating, E> {
        Ok(Rating::parse_lenient(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Rating, E> {
        Ok(Rating::MISSING)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Rating, E> {
        Ok(Rating::MISSING)
    }

    fn visit_none<E: de::Error>(self) -> Result<Rating, E> {
        Ok(Rating::MISSING)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Rating, D::Error>
    where
        D: Deserializer<'de>,
    {
        Rating::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Rating, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Rating::MISSING)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Rating, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Rating::MISSING)
    }
}

/// The three weighted areas of the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Performance,
    Energy,
    Culture,
}

impl Dimension {
    pub const fn ordered() -> [Dimension; 3] {
        [Self::Performance, Self::Energy, Self::Culture]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Performance => "P",
            Self::Energy => "E",
            Self::Culture => "C",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Energy => "Energy",
            Self::Culture => "Culture",
        }
    }
}

/// The ten self-reported ratings collected by the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub p_experience: Rating,
    pub p_delivery: Rating,
    pub p_skills: Rating,
    pub e_availability: Rating,
    pub e_deadlines: Rating,
    pub e_pressure: Rating,
    pub e_proactivity: Rating,
    pub c_values: Rating,
    pub c_communication: Rating,
    pub c_collaboration: Rating,
}

impl AnswerSet {
    pub const FIELD_COUNT: usize = 10;

    /// Builds an answer set from ratings in form order: performance, energy, then culture.
    pub fn from_ratings(ratings: [i64; Self::FIELD_COUNT]) -> Self {
        let [p1, p2, p3, e1, e2, e3, e4, c1, c2, c3] = ratings.map(Rating::new);
        Self {
            p_experience: p1,
            p_delivery: p2,
            p_skills: p3,
            e_availability: e1,
            e_deadlines: e2,
            e_pressure: e3,
            e_proactivity: e4,
            c_values: c1,
            c_communication: c2,
            c_collaboration: c3,
        }
    }

    pub fn uniform(rating: i64) -> Self {
        Self::from_ratings([rating; Self::FIELD_COUNT])
    }

    pub fn ratings(&self, dimension: Dimension) -> Vec<Rating> {
        match dimension {
            Dimension::Performance => vec![self.p_experience, self.p_delivery, self.p_skills],
            Dimension::Energy => vec![
                self.e_availability,
                self.e_deadlines,
                self.e_pressure,
                self.e_proactivity,
            ],
            Dimension::Culture => vec![self.c_values, self.c_communication, self.c_collaboration],
        }
    }
}

/// Fixed classification ladder applied to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FitTier {
    #[serde(rename = "Highest Fit")]
    HighestFit,
    #[serde(rename = "Approved Fit")]
    ApprovedFit,
    #[serde(rename = "Questionable Fit")]
    QuestionableFit,
    #[serde(rename = "Out of Profile")]
    OutOfProfile,
}

impl FitTier {
    pub const fn ordered() -> [FitTier; 4] {
        [
            Self::HighestFit,
            Self::ApprovedFit,
            Self::QuestionableFit,
            Self::OutOfProfile,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighestFit => "Highest Fit",
            Self::ApprovedFit => "Approved Fit",
            Self::QuestionableFit => "Questionable Fit",
            Self::OutOfProfile => "Out of Profile",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|tier| tier.label() == label)
    }
}

impl fmt::Display for FitTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-dimension scores on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(rename = "P")]
    pub performance: f64,
    #[serde(rename = "E")]
    pub energy: f64,
    #[serde(rename = "C")]
    pub culture: f64,
}

impl Breakdown {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Performance => self.performance,
            Dimension::Energy => self.energy,
            Dimension::Culture => self.culture,
        }
    }

    /// Whole percentages for progress bars, clamped to `0..=100`.
    pub fn display_percentages(&self) -> [u8; 3] {
        Dimension::ordered().map(|dimension| {
            let value = self.get(dimension);
            if value.is_nan() {
                0
            } else {
                value.clamp(0.0, 100.0).round() as u8
            }
        })
    }
}

/// Derived evaluation for one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: f64,
    pub breakdown: Breakdown,
    pub class: FitTier,
}

/// Incoming form payload: identity plus the raw answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSubmission {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub answers: AnswerSet,
}

/// Persisted candidate as returned by the datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: AnswerSet,
    pub score: ScoreRecord,
}
