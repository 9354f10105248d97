//! The probability x impact rating matrix.
//!
//! This table is review-board policy, not a formula: it is deliberately
//! non-symmetric (high impact escalates faster than high probability) and
//! any change to a cell is a policy change. Every rating in the system
//! comes from this single table.

use super::{Level, RiskRating};

use RiskRating::{Critical, Moderate, Severe, Sustainable};

/// Rating for each probability (row) x impact (column) pair.
///
/// Rows and columns run `VeryLow` to `VeryHigh` in [`Level::ALL`] order.
pub const RATING_MATRIX: [[RiskRating; 5]; 5] = [
    // impact:    VeryLow      Low          Medium       High       VeryHigh
    /* VeryLow  */ [Sustainable, Sustainable, Sustainable, Moderate, Severe],
    /* Low      */ [Sustainable, Sustainable, Moderate, Severe, Critical],
    /* Medium   */ [Sustainable, Moderate, Moderate, Severe, Critical],
    /* High     */ [Sustainable, Moderate, Severe, Critical, Critical],
    /* VeryHigh */ [Moderate, Severe, Severe, Critical, Critical],
];

/// Look up the rating for a probability/impact pair. Total over all 25
/// combinations; never fails.
pub fn rate(probability: Level, impact: Level) -> RiskRating {
    RATING_MATRIX[probability.index()][impact.index()]
}
