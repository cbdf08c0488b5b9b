use serde::{Deserialize, Serialize};

/// One day of market quotes, keyed by Korea-local date.
///
/// All four quotes are required; a day with any source missing is never
/// written (the sync aborts instead of persisting a partial record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// `YYYY-MM-DD`, unique within the store
    pub date: String,
    pub nasdaq: f64,
    pub kospi: f64,
    pub bitcoin: f64,
    pub usd_krw: f64,
}

/// Insert-or-replace-by-date into the ordered price history.
///
/// An existing record for the same date is replaced in place, keeping the
/// sequence length and the position of every other record unchanged;
/// otherwise the record is appended.
pub fn upsert(history: &mut Vec<PriceRecord>, record: PriceRecord) {
    match history.iter_mut().find(|r| r.date == record.date) {
        Some(existing) => *existing = record,
        None => history.push(record),
    }
}
