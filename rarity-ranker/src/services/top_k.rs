//! Top-K selection of the rarest items

use crate::error::{RankerError, Result};
use crate::models::RarityScorecard;
use std::cmp::Ordering;

/// Number of items reported when not configured
pub const DEFAULT_TOP_K: usize = 5;

/// Return the `k` highest-rarity scorecards, descending
///
/// The sort is stable: equal scores keep their input order (id-ascending for
/// a positionally ordered score list).
///
/// # Errors
/// - `InvalidInput` if `k` is 0
/// - `InsufficientItems` if fewer than `k` scores are available
pub fn select_top_k(scores: &[RarityScorecard], k: usize) -> Result<Vec<RarityScorecard>> {
    if k == 0 {
        return Err(RankerError::InvalidInput(
            "top-K selection requires k >= 1".to_string(),
        ));
    }

    if scores.len() < k {
        return Err(RankerError::InsufficientItems {
            requested: k,
            available: scores.len(),
        });
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.rarity.partial_cmp(&a.rarity).unwrap_or(Ordering::Equal));
    sorted.truncate(k);

    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(rarities: &[f64]) -> Vec<RarityScorecard> {
        rarities
            .iter()
            .enumerate()
            .map(|(id, &rarity)| RarityScorecard::new(id, rarity))
            .collect()
    }

    fn ids(cards: &[RarityScorecard]) -> Vec<usize> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_descending_order() {
        let scores = cards(&[0.1, 0.9, 0.3, 0.7, 0.5, 0.2]);
        let top = select_top_k(&scores, DEFAULT_TOP_K).unwrap();
        assert_eq!(ids(&top), vec![1, 3, 4, 2, 5]);
    }

    #[test]
    fn test_ties_keep_id_order() {
        let scores = cards(&[1.0 / 6.0, 1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0]);
        let top = select_top_k(&scores, 4).unwrap();
        assert_eq!(ids(&top), vec![2, 3, 0, 1]);

        let all_equal = cards(&[0.5; 7]);
        let top = select_top_k(&all_equal, 5).unwrap();
        assert_eq!(ids(&top), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_exactly_k_items() {
        let scores = cards(&[0.2, 0.4, 0.1, 0.5, 0.3]);
        let top = select_top_k(&scores, 5).unwrap();
        assert_eq!(ids(&top), vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_insufficient_items_is_error() {
        let scores = cards(&[0.2, 0.4, 0.1, 0.5]);
        let err = select_top_k(&scores, 5).unwrap_err();
        assert!(matches!(
            err,
            RankerError::InsufficientItems {
                requested: 5,
                available: 4
            }
        ));
    }

    #[test]
    fn test_zero_k_rejected() {
        let scores = cards(&[0.2]);
        assert!(matches!(
            select_top_k(&scores, 0),
            Err(RankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_input_left_untouched() {
        let scores = cards(&[0.1, 0.9, 0.3, 0.7, 0.5]);
        let _ = select_top_k(&scores, 3).unwrap();
        assert_eq!(ids(&scores), vec![0, 1, 2, 3, 4]);
    }
}
