//! Shared series store: the one piece of state the refresh loop and the
//! renderers contend on.

use crate::record::MarketRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the full ordered series for one symbol.
///
/// The series itself is immutable behind an `Arc`; the lock only guards the
/// pointer swap. `snapshot()` clones the `Arc`, so readers hold no lock
/// while they compute, and a concurrent `replace()` is observed either
/// entirely or not at all.
pub struct SeriesStore {
    series: RwLock<Arc<[MarketRecord]>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            series: RwLock::new(Vec::new().into()),
        }
    }

    pub fn with_series(records: Vec<MarketRecord>) -> Self {
        Self {
            series: RwLock::new(records.into()),
        }
    }

    /// Atomically swap in a full replacement series.
    pub fn replace(&self, records: Vec<MarketRecord>) {
        let new: Arc<[MarketRecord]> = records.into();
        *self.series.write() = new;
    }

    /// Consistent point-in-time view of the current series.
    pub fn snapshot(&self) -> Arc<[MarketRecord]> {
        self.series.read().clone()
    }

    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::thread;

    fn record(symbol: &str, price: f32) -> MarketRecord {
        MarketRecord {
            symbol: symbol.to_string(),
            time: NaiveDateTime::parse_from_str("2025-06-12 09:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            price,
            vol: 0,
            open_interest: 0,
            diff_vol: 0,
            diff_oi: 0,
            bid_1: 0.0,
            bid_volumn_1: 0,
            ask_1: 0.0,
            ask_volumn_1: 0,
            datetime: 0,
        }
    }

    fn series(symbol: &str, n: usize) -> Vec<MarketRecord> {
        (0..n).map(|i| record(symbol, i as f32)).collect()
    }

    #[test]
    fn test_replace_and_snapshot() {
        let store = SeriesStore::with_series(series("a", 3));
        assert_eq!(store.len(), 3);

        store.replace(series("b", 5));
        let snap = store.snapshot();
        assert_eq!(snap.len(), 5);
        assert!(snap.iter().all(|r| r.symbol == "b"));
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = SeriesStore::with_series(series("a", 3));
        let old = store.snapshot();
        store.replace(series("b", 1));
        // The earlier snapshot still sees the full old series.
        assert_eq!(old.len(), 3);
        assert!(old.iter().all(|r| r.symbol == "a"));
    }

    #[test]
    fn test_replace_is_atomic_under_concurrent_snapshots() {
        let store = Arc::new(SeriesStore::with_series(series("old", 100)));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let snap = store.snapshot();
                        // Every snapshot is homogeneous: all-old or all-new,
                        // never a mix and never truncated.
                        let symbol = &snap[0].symbol;
                        assert!(snap.len() == 100 || snap.len() == 200);
                        assert!(snap.iter().all(|r| &r.symbol == symbol));
                    }
                })
            })
            .collect();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    if i % 2 == 0 {
                        store.replace(series("new", 200));
                    } else {
                        store.replace(series("old", 100));
                    }
                }
            })
        };

        for r in readers {
            r.join().unwrap();
        }
        writer.join().unwrap();
    }
}
