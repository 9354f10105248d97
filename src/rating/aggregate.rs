//! Folds per-answer ratings into respondent-level results: the ordinal
//! average, the worst-case rating, and the count breakdowns behind the
//! distribution and matrix charts.

use serde::{Deserialize, Serialize};

use super::{matrix, Level, RiskRating};

/// Average a set of ratings into one overall rating.
///
/// Ratings are averaged on their ordinal scores and the mean is rounded
/// half-up, so a Sustainable/Moderate pair lands on Moderate. Returns
/// `None` when there is nothing to average; "no data" is distinct from
/// "rated Sustainable".
///
/// # Examples
///
/// ```rust
/// use riskmap::rating::{aggregate, RiskRating};
///
/// let ratings = [
///     RiskRating::Sustainable,
///     RiskRating::Sustainable,
///     RiskRating::Critical,
/// ];
/// assert_eq!(aggregate(&ratings), Some(RiskRating::Moderate));
/// assert_eq!(aggregate(&[]), None);
/// ```
pub fn aggregate(ratings: &[RiskRating]) -> Option<RiskRating> {
    if ratings.is_empty() {
        return None;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(r.score())).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    Some(RiskRating::from_score(mean.round() as i64))
}

/// The most severe rating present, or `None` when nothing is rated.
pub fn highest(ratings: &[RiskRating]) -> Option<RiskRating> {
    ratings.iter().copied().max()
}

/// Per-rating answer counts, including answers that could not be rated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub sustainable_count: usize,
    pub moderate_count: usize,
    pub severe_count: usize,
    pub critical_count: usize,
    pub unrated_count: usize,
}

impl RatingDistribution {
    pub fn record(&mut self, rating: Option<RiskRating>) {
        match rating {
            Some(RiskRating::Sustainable) => self.sustainable_count += 1,
            Some(RiskRating::Moderate) => self.moderate_count += 1,
            Some(RiskRating::Severe) => self.severe_count += 1,
            Some(RiskRating::Critical) => self.critical_count += 1,
            None => self.unrated_count += 1,
        }
    }

    pub fn count(&self, rating: RiskRating) -> usize {
        match rating {
            RiskRating::Sustainable => self.sustainable_count,
            RiskRating::Moderate => self.moderate_count,
            RiskRating::Severe => self.severe_count,
            RiskRating::Critical => self.critical_count,
        }
    }

    /// Answers that produced a rating.
    pub fn rated_count(&self) -> usize {
        RiskRating::ALL.iter().map(|r| self.count(*r)).sum()
    }

    /// All recorded answers, rated or not.
    pub fn total(&self) -> usize {
        self.rated_count() + self.unrated_count
    }

    /// How many distinct ratings appear at least once.
    pub fn distinct_ratings(&self) -> usize {
        RiskRating::ALL
            .iter()
            .filter(|r| self.count(**r) > 0)
            .count()
    }
}

/// One cell of the probability x impact grid with its answer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub probability: Level,
    pub impact: Level,
    pub rating: RiskRating,
    pub count: usize,
}

/// Answer counts laid out on the rating matrix, for the grid chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixBreakdown {
    counts: [[usize; 5]; 5],
}

impl MatrixBreakdown {
    pub fn record(&mut self, probability: Level, impact: Level) {
        self.counts[probability.index()][impact.index()] += 1;
    }

    pub fn count(&self, probability: Level, impact: Level) -> usize {
        self.counts[probability.index()][impact.index()]
    }

    /// Total answers placed on the grid; equals the rated answer count.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// All 25 cells in probability-major order, zero counts included so
    /// renderers always draw the full grid.
    pub fn cells(&self) -> impl Iterator<Item = MatrixCell> + '_ {
        Level::ALL.iter().flat_map(move |probability| {
            Level::ALL.iter().map(move |impact| MatrixCell {
                probability: *probability,
                impact: *impact,
                rating: matrix::rate(*probability, *impact),
                count: self.count(*probability, *impact),
            })
        })
    }
}
