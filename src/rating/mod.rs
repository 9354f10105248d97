//! Rating domain shared by every scoring surface: the five-step
//! probability/impact scale, the four risk-rating outcomes, and their
//! parsing from stored option labels.
//!
//! The portal stores levels as `VERY_LOW`..`VERY_HIGH` tokens on each answer
//! option and expects ratings back as title-case labels (`Sustainable`..
//! `Critical`). Both enums derive their ordering from variant order, so
//! comparisons and `max` follow severity.

pub mod aggregate;
pub mod answer;
pub mod matrix;

pub use aggregate::{aggregate, highest, MatrixBreakdown, MatrixCell, RatingDistribution};
pub use answer::rate_answer;
pub use matrix::rate;

use serde::{Deserialize, Serialize};

/// Probability or impact magnitude of a risk scenario, lowest to highest.
///
/// Serializes as the storage token (`VERY_LOW`); displays as the chart
/// label (`Very Low`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    /// All levels in ordinal order; positions match [`Level::index`].
    pub const ALL: [Level; 5] = [
        Level::VeryLow,
        Level::Low,
        Level::Medium,
        Level::High,
        Level::VeryHigh,
    ];

    /// Parse a stored label into a level.
    ///
    /// Labels are matched case-insensitively against the five canonical
    /// tokens after trimming whitespace. Anything else, including empty
    /// input and typos in stored records, is `None`, never an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riskmap::rating::Level;
    ///
    /// assert_eq!(Level::parse("very_high"), Some(Level::VeryHigh));
    /// assert_eq!(Level::parse("VERY_HIGH"), Some(Level::VeryHigh));
    /// assert_eq!(Level::parse(" Medium "), Some(Level::Medium));
    /// assert_eq!(Level::parse("extreme"), None);
    /// assert_eq!(Level::parse(""), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "VERY_LOW" => Some(Level::VeryLow),
            "LOW" => Some(Level::Low),
            "MEDIUM" => Some(Level::Medium),
            "HIGH" => Some(Level::High),
            "VERY_HIGH" => Some(Level::VeryHigh),
            _ => None,
        }
    }

    /// Ordinal position, also the row/column index into the rating matrix.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical storage token.
    pub fn token(self) -> &'static str {
        match self {
            Level::VeryLow => "VERY_LOW",
            Level::Low => "LOW",
            Level::Medium => "MEDIUM",
            Level::High => "HIGH",
            Level::VeryHigh => "VERY_HIGH",
        }
    }

    /// Human-readable label for chart axes and answer cards.
    pub fn label(self) -> &'static str {
        match self {
            Level::VeryLow => "Very Low",
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative risk outcome for one answered question, or the aggregate
/// outcome for a respondent, lowest to highest severity.
///
/// Serializes as the display label (`Sustainable`), which is the stable
/// contract the dashboards sort and badge by.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskRating {
    Sustainable,
    Moderate,
    Severe,
    Critical,
}

impl RiskRating {
    /// All ratings in severity order; positions match [`RiskRating::score`].
    pub const ALL: [RiskRating; 4] = [
        RiskRating::Sustainable,
        RiskRating::Moderate,
        RiskRating::Severe,
        RiskRating::Critical,
    ];

    /// Ordinal score used by the averaging rule, and only there.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riskmap::rating::RiskRating;
    ///
    /// assert_eq!(RiskRating::Sustainable.score(), 0);
    /// assert_eq!(RiskRating::Critical.score(), 3);
    /// ```
    pub fn score(self) -> u8 {
        self as u8
    }

    /// Map a rounded average score back to a rating.
    ///
    /// Out-of-range indexes are clamped rather than panicking; they can
    /// only arise from floating-point edge effects at the boundaries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riskmap::rating::RiskRating;
    ///
    /// assert_eq!(RiskRating::from_score(1), RiskRating::Moderate);
    /// assert_eq!(RiskRating::from_score(9), RiskRating::Critical);
    /// assert_eq!(RiskRating::from_score(-1), RiskRating::Sustainable);
    /// ```
    pub fn from_score(score: i64) -> Self {
        Self::ALL[score.clamp(0, 3) as usize]
    }

    /// Parse a rating from either its storage token (`SEVERE`) or its
    /// display label (`Severe`), case-insensitively. Unknown text is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "SUSTAINABLE" => Some(RiskRating::Sustainable),
            "MODERATE" => Some(RiskRating::Moderate),
            "SEVERE" => Some(RiskRating::Severe),
            "CRITICAL" => Some(RiskRating::Critical),
            _ => None,
        }
    }

    /// Canonical storage token.
    pub fn token(self) -> &'static str {
        match self {
            RiskRating::Sustainable => "SUSTAINABLE",
            RiskRating::Moderate => "MODERATE",
            RiskRating::Severe => "SEVERE",
            RiskRating::Critical => "CRITICAL",
        }
    }

    /// Display label, title case.
    pub fn label(self) -> &'static str {
        match self {
            RiskRating::Sustainable => "Sustainable",
            RiskRating::Moderate => "Moderate",
            RiskRating::Severe => "Severe",
            RiskRating::Critical => "Critical",
        }
    }

    /// Short operator guidance shown beside the rating badge.
    pub fn guidance(self) -> &'static str {
        match self {
            RiskRating::Sustainable => "Low risk, maintain controls",
            RiskRating::Moderate => "Monitor and address as needed",
            RiskRating::Severe => "High priority for mitigation",
            RiskRating::Critical => "Immediate action required",
        }
    }
}

impl std::fmt::Display for RiskRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
