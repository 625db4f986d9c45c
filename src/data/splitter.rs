//! Train/Test Splitter Module
//! Seeded random partition of a DataFrame's rows into train and test sets.
//!
//! The test set takes `ceil(test_size * n_rows)` rows and the training set
//! the rest. Rows are assigned through a shuffled row index, so every row
//! lands in exactly one partition and the same seed always yields the same
//! assignment.

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("test size must be a fraction in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("with {n_rows} rows and test size {test_size}, one of the partitions would be empty")]
    EmptyPartition { n_rows: usize, test_size: f64 },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// The two partitions of one table.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: DataFrame,
    pub test: DataFrame,
}

/// Partition `df` into train and test rows.
pub fn split_train_test(
    df: &DataFrame,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, SplitError> {
    let (train_idx, test_idx) = partition_indices(df.height(), test_size, seed)?;

    let train = df.take(&IdxCa::from_vec("train_idx".into(), train_idx))?;
    let test = df.take(&IdxCa::from_vec("test_idx".into(), test_idx))?;

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        train.height(),
        test.height(),
        seed
    );

    Ok(TrainTestSplit { train, test })
}

/// Row indices `(train, test)` for a table of `n_rows` rows.
pub fn partition_indices(
    n_rows: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<IdxSize>, Vec<IdxSize>), SplitError> {
    if !(test_size.is_finite() && test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let n_test = (test_size * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition { n_rows, test_size });
    }

    let mut permutation: Vec<IdxSize> = (0..n_rows as IdxSize).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    // Test rows come first in the permutation, training rows take the remainder.
    let train = permutation.split_off(n_test);
    Ok((train, permutation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn id_frame(n: usize) -> DataFrame {
        let ids: Vec<String> = (0..n).map(|i| format!("row-{i}")).collect();
        let labels: Vec<&str> = (0..n).map(|i| if i % 3 == 0 { "spam" } else { "ham" }).collect();
        DataFrame::new(vec![
            Column::new("id".into(), ids),
            Column::new("target".into(), labels),
        ])
        .unwrap()
    }

    fn ids(df: &DataFrame) -> Vec<String> {
        df.column("id")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_split_sizes_for_hundred_rows() {
        let split = split_train_test(&id_frame(100), 0.2, 2).unwrap();
        assert_eq!(split.train.height(), 80);
        assert_eq!(split.test.height(), 20);
    }

    #[test]
    fn test_split_is_a_partition() {
        let df = id_frame(57);
        let split = split_train_test(&df, 0.3, 11).unwrap();

        let train: HashSet<String> = ids(&split.train).into_iter().collect();
        let test: HashSet<String> = ids(&split.test).into_iter().collect();
        let all: HashSet<String> = ids(&df).into_iter().collect();

        assert_eq!(train.len(), split.train.height());
        assert_eq!(test.len(), split.test.height());
        assert!(train.is_disjoint(&test));
        assert_eq!(train.union(&test).cloned().collect::<HashSet<_>>(), all);
    }

    #[test]
    fn test_partition_indices_cover_every_row_once() {
        for n_rows in [2usize, 3, 10, 99, 1000] {
            for test_size in [0.01, 0.2, 0.5, 0.75, 0.99] {
                let Ok((train, test)) = partition_indices(n_rows, test_size, 2) else {
                    continue;
                };
                let mut seen: Vec<IdxSize> = train.iter().chain(test.iter()).copied().collect();
                seen.sort_unstable();
                let expected: Vec<IdxSize> = (0..n_rows as IdxSize).collect();
                assert_eq!(seen, expected, "n_rows={n_rows} test_size={test_size}");
            }
        }
    }

    #[test]
    fn test_test_fraction_within_one_row() {
        for n_rows in [10usize, 37, 100, 5572] {
            for test_size in [0.1, 0.2, 0.33, 0.5] {
                let (_, test) = partition_indices(n_rows, test_size, 2).unwrap();
                let expected = test_size * n_rows as f64;
                assert!(
                    (test.len() as f64 - expected).abs() <= 1.0,
                    "n_rows={n_rows} test_size={test_size} got {}",
                    test.len()
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let df = id_frame(40);
        let first = split_train_test(&df, 0.2, 2).unwrap();
        let second = split_train_test(&df, 0.2, 2).unwrap();
        assert_eq!(ids(&first.train), ids(&second.train));
        assert_eq!(ids(&first.test), ids(&second.test));
    }

    #[test]
    fn test_different_seed_changes_assignment() {
        let (_, a) = partition_indices(200, 0.2, 2).unwrap();
        let (_, b) = partition_indices(200, 0.2, 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_invalid_test_size() {
        for bad in [0.0, 1.0, -0.1, f64::INFINITY] {
            assert!(matches!(
                partition_indices(10, bad, 2),
                Err(SplitError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn test_rejects_empty_partition() {
        assert!(matches!(
            partition_indices(0, 0.2, 2),
            Err(SplitError::EmptyPartition { n_rows: 0, .. })
        ));
        // A single row cannot feed both sides.
        assert!(matches!(
            partition_indices(1, 0.2, 2),
            Err(SplitError::EmptyPartition { n_rows: 1, .. })
        ));
    }
}
