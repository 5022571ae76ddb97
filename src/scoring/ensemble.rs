//! Ensemble score fusion
//!
//! Each base vector is min-max scaled to `[0, 1]` independently and the
//! fused score is their unweighted mean. A constant vector scales to all 1.0.

use crate::types::ScoreVector;

/// Fuse score vectors by averaging their min-max normalized values.
///
/// All vectors must cover the same sentences. An empty slice yields an empty
/// vector.
pub fn fuse(vectors: &[&ScoreVector]) -> ScoreVector {
    let Some(first) = vectors.first() else {
        return ScoreVector::default();
    };
    let n = first.len();
    debug_assert!(vectors.iter().all(|v| v.len() == n));

    let normalized: Vec<ScoreVector> = vectors.iter().map(|v| v.min_max_normalized()).collect();
    let count = normalized.len() as f64;

    let fused = (0..n)
        .map(|i| normalized.iter().map(|v| v.get(i)).sum::<f64>() / count)
        .collect();

    ScoreVector::new(fused)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_normalized_vectors() {
        let textrank = ScoreVector::new(vec![0.1, 0.3, 0.2]);
        let tfidf = ScoreVector::new(vec![4.0, 2.0, 0.0]);

        let fused = fuse(&[&textrank, &tfidf]);

        // textrank -> [0, 1, 0.5]; tfidf -> [1, 0.5, 0]
        let expected = [0.5, 0.75, 0.25];
        for (i, e) in expected.iter().enumerate() {
            assert!((fused.get(i) - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fused_scores_are_bounded() {
        let a = ScoreVector::new(vec![-3.0, 7.0, 1.5, 2.0]);
        let b = ScoreVector::new(vec![0.0, 0.0, 0.0, 0.0]);
        let fused = fuse(&[&a, &b]);
        for &s in fused.as_slice() {
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_constant_vector_contributes_uniformly() {
        let flat = ScoreVector::new(vec![0.2, 0.2]);
        let varied = ScoreVector::new(vec![1.0, 0.0]);
        let fused = fuse(&[&flat, &varied]);
        assert_eq!(fused.as_slice(), &[1.0, 0.5]);
    }

    #[test]
    fn test_empty_input() {
        assert!(fuse(&[]).is_empty());
    }
}
