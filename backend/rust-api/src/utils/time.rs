use chrono::{Datelike, NaiveDate};

/// Cyclic offset into the question pool for a calendar date: day-of-year
/// (January 1st = 1) modulo pool size. Stable across calls within one day,
/// wraps at pool length as days advance.
pub fn day_index_for(date: NaiveDate, pool_len: usize) -> usize {
    debug_assert!(pool_len > 0);
    date.ordinal() as usize % pool_len
}
