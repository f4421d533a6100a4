//! Continuous-vs-discrete classification of feature columns.

use crate::types::{DiscreteOption, FeatureColumnType};
use crate::utils::is_numeric_cell;
use std::collections::{BTreeMap, HashMap};

/// Classify a column of raw cells.
///
/// A column is continuous when every non-empty cell is a number or the NaN
/// token. Otherwise it is discrete, and each distinct non-empty raw value is
/// encoded in first-seen order starting at 0. Matching is case-sensitive.
pub fn classify<S: AsRef<str>>(values: &[S]) -> FeatureColumnType {
    let numeric = values.iter().all(|v| {
        let cell = v.as_ref();
        cell.trim().is_empty() || is_numeric_cell(cell)
    });

    if numeric {
        return FeatureColumnType::Continuous;
    }

    FeatureColumnType::Discrete {
        options: encode_categories(values),
    }
}

/// Build the category encoding of a discrete column.
pub(crate) fn encode_categories<S: AsRef<str>>(values: &[S]) -> BTreeMap<u32, DiscreteOption> {
    let mut codes: HashMap<&str, u32> = HashMap::new();
    let mut options: BTreeMap<u32, DiscreteOption> = BTreeMap::new();

    for value in values {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        match codes.get(raw) {
            Some(code) => {
                if let Some(option) = options.get_mut(code) {
                    option.count += 1;
                }
            }
            None => {
                let code = codes.len() as u32;
                codes.insert(raw, code);
                options.insert(
                    code,
                    DiscreteOption {
                        name: raw.to_string(),
                        key: raw.to_string(),
                        count: 1,
                    },
                );
            }
        }
    }

    options
}

/// Number of cells that are not missing (empty).
pub fn count_valid<S: AsRef<str>>(values: &[S]) -> usize {
    values
        .iter()
        .filter(|v| !v.as_ref().trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn option(name: &str, count: usize) -> DiscreteOption {
        DiscreteOption {
            name: name.to_string(),
            key: name.to_string(),
            count,
        }
    }

    // ==================== classify tests ====================

    #[test]
    fn test_classify_numeric_column() {
        assert_eq!(classify(&["1", "7", "4", "9"]), FeatureColumnType::Continuous);
        assert_eq!(classify(&["2", "3.4", "5", "2.8"]), FeatureColumnType::Continuous);
    }

    #[test]
    fn test_classify_numeric_with_nan_and_empty() {
        assert_eq!(classify(&["3", "", "NaN", "nan"]), FeatureColumnType::Continuous);
    }

    #[test]
    fn test_classify_all_empty_is_continuous() {
        assert_eq!(classify(&["", "", ""]), FeatureColumnType::Continuous);
    }

    #[test]
    fn test_classify_infinity_token_makes_discrete() {
        let column_type = classify(&["inf", "1"]);
        assert!(column_type.is_discrete());
        assert_eq!(column_type.options().unwrap()[&0], option("inf", 1));
    }

    #[test]
    fn test_classify_single_malformed_makes_discrete() {
        let column_type = classify(&["1", "2", "three"]);
        assert!(column_type.is_discrete());
        let options = column_type.options().unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[&2], option("three", 1));
    }

    #[test]
    fn test_classify_discrete_first_seen_order_and_counts() {
        let column_type = classify(&["A", "B", "B", "C"]);
        let expected = BTreeMap::from([
            (0, option("A", 1)),
            (1, option("B", 2)),
            (2, option("C", 1)),
        ]);
        assert_eq!(column_type, FeatureColumnType::Discrete { options: expected });
    }

    #[test]
    fn test_classify_discrete_is_case_sensitive() {
        let options = classify(&["a", "A", "a"]).options().cloned().unwrap();
        assert_eq!(options[&0], option("a", 2));
        assert_eq!(options[&1], option("A", 1));
    }

    #[test]
    fn test_classify_discrete_skips_empty_cells() {
        let options = classify(&["", "x", "", "y", "x"]).options().cloned().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[&0], option("x", 2));
    }

    #[test]
    fn test_classify_discrete_nan_token_is_a_category() {
        let options = classify(&["A", "NaN"]).options().cloned().unwrap();
        assert_eq!(options[&1], option("NaN", 1));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let column = ["z", "y", "z", "", "x", "y", "z"];
        assert_eq!(classify(&column), classify(&column));
    }

    #[test]
    fn test_classify_counts_sum_to_non_empty_cells() {
        let column = ["p", "q", "", "p", "r", "p"];
        let total: usize = classify(&column)
            .options()
            .unwrap()
            .values()
            .map(|o| o.count)
            .sum();
        assert_eq!(total, count_valid(&column));
    }

    // ==================== count_valid tests ====================

    #[test]
    fn test_count_valid() {
        assert_eq!(count_valid(&["", "1", "NaN", " "]), 2);
        assert_eq!(count_valid::<&str>(&[]), 0);
    }
}
