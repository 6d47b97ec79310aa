//! Daily token usage tracking with budget enforcement.
//!
//! An external counter store may back the tracker; when it is absent or
//! failing, the in-process counters carry the totals. The in-process
//! counters are always updated so reads stay meaningful mid-outage.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

use crate::Result;

/// External daily counter store with atomic increments.
///
/// Implementations must make `increment` atomic under concurrent callers;
/// a read-check-then-write sequence would under-count.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Atomically adds `delta_tokens` to the counter for `date_key` and
    /// returns the new total.
    async fn increment(&self, date_key: &str, delta_tokens: u64) -> Result<u64>;

    /// Returns the current total for `date_key`.
    async fn get(&self, date_key: &str) -> Result<u64>;
}

/// Point-in-time usage summary.
#[derive(Debug, Clone, Serialize)]
pub struct UsageStats {
    /// UTC date key the counters apply to.
    pub date: String,
    /// Tokens consumed so far today.
    pub tokens_used: u64,
    /// Completed LLM requests today.
    pub requests: u64,
    /// Configured daily budget.
    pub budget: u64,
    /// Tokens left before the budget check starts rejecting.
    pub remaining: u64,
}

/// Per-day in-process counters.
#[derive(Debug, Default, Clone, Copy)]
struct DayCounters {
    tokens: u64,
    requests: u64,
}

/// Tracks token consumption against a daily budget.
pub struct UsageTracker {
    budget: u64,
    store: Option<Arc<dyn UsageStore>>,
    days: Mutex<HashMap<String, DayCounters>>,
}

impl UsageTracker {
    /// Creates a tracker with in-process counters only.
    pub fn new(daily_token_budget: u64) -> Self {
        Self {
            budget: daily_token_budget,
            store: None,
            days: Mutex::new(HashMap::new()),
        }
    }

    /// Backs the tracker with an external counter store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn UsageStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Today's UTC date key.
    fn today() -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }

    /// Records token usage for one completed request and returns the
    /// updated stats.
    pub async fn record(&self, input_tokens: u64, output_tokens: u64) -> UsageStats {
        let total = input_tokens + output_tokens;
        let today = Self::today();

        if let Some(store) = &self.store
            && let Err(error) = store.increment(&today, total).await
        {
            warn!("Usage store increment failed, keeping in-process count: {error}");
        }

        {
            let mut days = self
                .days
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let day = days.entry(today).or_default();
            day.tokens += total;
            day.requests += 1;
        }

        self.stats().await
    }

    /// Returns `true` while today's consumption is under the budget.
    pub async fn check_budget(&self) -> bool {
        let today = Self::today();

        if let Some(store) = &self.store {
            match store.get(&today).await {
                Ok(total) => return total < self.budget,
                Err(error) => {
                    warn!("Usage store read failed, using in-process count: {error}");
                }
            }
        }

        self.memory_counters(&today).tokens < self.budget
    }

    /// Current usage summary for today.
    pub async fn stats(&self) -> UsageStats {
        let today = Self::today();
        let memory = self.memory_counters(&today);

        let tokens_used = if let Some(store) = &self.store {
            match store.get(&today).await {
                Ok(total) => total,
                Err(_) => memory.tokens,
            }
        } else {
            memory.tokens
        };

        UsageStats {
            remaining: self.budget.saturating_sub(tokens_used),
            date: today,
            tokens_used,
            requests: memory.requests,
            budget: self.budget,
        }
    }

    fn memory_counters(&self, date_key: &str) -> DayCounters {
        let days = self
            .days
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        days.get(date_key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    struct FlakyStore {
        total: AtomicU64,
        fail: AtomicBool,
    }

    #[async_trait]
    impl UsageStore for FlakyStore {
        async fn increment(&self, _date_key: &str, delta_tokens: u64) -> Result<u64> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(crate::Error::Other("store down".to_owned()));
            }
            Ok(self.total.fetch_add(delta_tokens, Ordering::SeqCst) + delta_tokens)
        }

        async fn get(&self, _date_key: &str) -> Result<u64> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(crate::Error::Other("store down".to_owned()));
            }
            Ok(self.total.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn records_and_reports_usage() {
        let tracker = UsageTracker::new(1000);
        let stats = tracker.record(300, 200).await;
        assert_eq!(stats.tokens_used, 500);
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.remaining, 500);
        assert!(tracker.check_budget().await);
    }

    #[tokio::test]
    async fn budget_check_flips_at_the_budget() {
        let tracker = UsageTracker::new(500);
        tracker.record(400, 99).await;
        assert!(tracker.check_budget().await);
        tracker.record(1, 0).await;
        assert!(!tracker.check_budget().await);
    }

    #[tokio::test]
    async fn concurrent_records_never_undercount() {
        let tracker = Arc::new(UsageTracker::new(1_000_000));
        let mut handles = Vec::new();
        for _ in 0..20 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                for _ in 0..50 {
                    tracker.record(1, 1).await;
                }
            }));
        }
        for handle in handles {
            handle.await.expect("task panicked");
        }
        let stats = tracker.stats().await;
        assert_eq!(stats.tokens_used, 2000);
        assert_eq!(stats.requests, 1000);
    }

    #[tokio::test]
    async fn store_outage_degrades_to_memory() {
        let store = Arc::new(FlakyStore {
            total: AtomicU64::new(0),
            fail: AtomicBool::new(false),
        });
        let tracker = UsageTracker::new(1000).with_store(Arc::clone(&store) as _);

        tracker.record(100, 0).await;
        assert_eq!(tracker.stats().await.tokens_used, 100);

        store.fail.store(true, Ordering::SeqCst);
        tracker.record(50, 0).await;
        // Store failed, but the in-process counter kept both increments.
        assert_eq!(tracker.stats().await.tokens_used, 150);
        assert!(tracker.check_budget().await);
    }
}
