use super::{matrix, Level, RiskRating};

/// Rate a single answer from the raw labels stored on its selected option.
///
/// Returns `None` (shown as "Not Rated") when either label is missing or
/// fails to parse. Background questions carry no levels at all, so an
/// unratable answer is a value here, not an error.
pub fn rate_answer(probability: Option<&str>, impact: Option<&str>) -> Option<RiskRating> {
    let probability = Level::parse(probability?)?;
    let impact = Level::parse(impact?)?;
    Some(matrix::rate(probability, impact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_a_fully_labelled_answer() {
        assert_eq!(
            rate_answer(Some("HIGH"), Some("MEDIUM")),
            Some(RiskRating::Severe)
        );
        assert_eq!(
            rate_answer(Some("VERY_LOW"), Some("VERY_LOW")),
            Some(RiskRating::Sustainable)
        );
    }

    #[test]
    fn missing_either_label_is_unrated() {
        assert_eq!(rate_answer(None, Some("HIGH")), None);
        assert_eq!(rate_answer(Some("HIGH"), None), None);
        assert_eq!(rate_answer(None, None), None);
    }

    #[test]
    fn unparsable_label_is_unrated() {
        assert_eq!(rate_answer(Some("garbage"), Some("HIGH")), None);
        assert_eq!(rate_answer(Some("HIGH"), Some("")), None);
        assert_eq!(rate_answer(Some("HGIH"), Some("MEDIUM")), None);
    }

    #[test]
    fn labels_are_normalized_before_lookup() {
        assert_eq!(
            rate_answer(Some(" high "), Some("medium")),
            Some(RiskRating::Severe)
        );
    }
}
