//! Anonymous assessment result aggregation.
//!
//! Persistence is an optional external collaborator; without a store the
//! aggregation feature is disabled and the heatmap reports zero counts.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use waypoint_core::Result;

use crate::scorer::Stage;

/// Counter store for anonymous placement results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Atomically count one placement in the given cell.
    async fn record(&self, level: u8, stage: Stage) -> Result<()>;

    /// All cell counts recorded so far.
    async fn cell_counts(&self) -> Result<HashMap<(u8, Stage), u64>>;
}

/// In-process result store; counts reset with the process.
#[derive(Default)]
pub struct InMemoryResultStore {
    counts: Mutex<HashMap<(u8, Stage), u64>>,
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn record(&self, level: u8, stage: Stage) -> Result<()> {
        let mut counts = self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *counts.entry((level, stage)).or_insert(0) += 1;
        Ok(())
    }

    async fn cell_counts(&self) -> Result<HashMap<(u8, Stage), u64>> {
        let counts = self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(counts.clone())
    }
}

/// Aggregated 6×5 grid of placement counts.
#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    /// Counts keyed `"{level}_{letter}"`, zero-filled for all 30 cells.
    pub counts: BTreeMap<String, u64>,
    /// Total recorded placements.
    pub total: u64,
    /// When the aggregation was computed (RFC 3339, UTC).
    pub updated_at: String,
}

/// Aggregate all results into the 6×5 grid.
///
/// Every cell appears in the output even with zero results; passing no
/// store yields an all-zero grid (the feature is disabled, not failing).
pub async fn heatmap(store: Option<&dyn ResultStore>) -> Heatmap {
    let mut counts = BTreeMap::new();
    for level in 0..=5_u8 {
        for stage in Stage::ALL {
            counts.insert(format!("{level}_{}", stage.letter()), 0_u64);
        }
    }

    let mut total = 0;
    if let Some(store) = store
        && let Ok(recorded) = store.cell_counts().await
    {
        for ((level, stage), count) in recorded {
            let key = format!("{level}_{}", stage.letter());
            if let Some(entry) = counts.get_mut(&key) {
                *entry += count;
                total += count;
            }
        }
    }

    Heatmap {
        counts,
        total,
        updated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn heatmap_zero_fills_all_cells_without_a_store() {
        let grid = heatmap(None).await;
        assert_eq!(grid.counts.len(), 30);
        assert_eq!(grid.total, 0);
        assert!(grid.counts.values().all(|count| *count == 0));
    }

    #[tokio::test]
    async fn recorded_results_aggregate_into_cells() {
        let store = InMemoryResultStore::default();
        store.record(2, Stage::Practitioner).await.expect("record");
        store.record(2, Stage::Practitioner).await.expect("record");
        store.record(4, Stage::Steward).await.expect("record");

        let grid = heatmap(Some(&store)).await;
        assert_eq!(grid.counts.get("2_P"), Some(&2));
        assert_eq!(grid.counts.get("4_S"), Some(&1));
        assert_eq!(grid.counts.get("0_E"), Some(&0));
        assert_eq!(grid.total, 3);
    }

    #[tokio::test]
    async fn out_of_range_levels_do_not_invent_cells() {
        let store = InMemoryResultStore::default();
        store.record(9, Stage::Explorer).await.expect("record");

        let grid = heatmap(Some(&store)).await;
        assert_eq!(grid.counts.len(), 30);
        assert_eq!(grid.total, 0);
    }
}
