use std::collections::HashMap;

use time::{Date, Duration};

use super::dto::{DayTotals, HistoryEntry};
use super::repo::DayRow;

/// The history view always covers this many days, today included.
pub const HISTORY_DAYS: i64 = 14;

/// Expands sparse per-day rows into a dense window of `days` entries
/// ending at `today`, most recent first. Days missing from `rows` get
/// zero totals.
pub fn fill_history(today: Date, days: i64, rows: Vec<DayRow>) -> Vec<HistoryEntry> {
    let mut by_date: HashMap<Date, DayTotals> =
        rows.into_iter().map(DayRow::into_totals).collect();

    (0..days)
        .map(|offset| {
            let date = today - Duration::days(offset);
            HistoryEntry {
                date,
                totals: by_date.remove(&date).unwrap_or_default(),
            }
        })
        .collect()
}
