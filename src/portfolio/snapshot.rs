use crate::models::DailyRecord;

/// Maximum number of daily records retained in the history log.
pub const HISTORY_CAPACITY: usize = 365;

/// Upserts `record` into the history log and enforces the capacity bound.
///
/// Re-running the update within one day replaces today's record in place, so
/// repeated runs converge to the same final log. Once the log exceeds
/// capacity, the oldest records are evicted from the front; surviving
/// entries keep their order.
pub fn record_snapshot(history: &mut Vec<DailyRecord>, record: DailyRecord) {
    match history.iter_mut().find(|r| r.date == record.date) {
        Some(existing) => *existing = record,
        None => history.push(record),
    }

    if history.len() > HISTORY_CAPACITY {
        let excess = history.len() - HISTORY_CAPACITY;
        history.drain(..excess);
    }
}
