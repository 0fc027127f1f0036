//! Time-bucket boundaries.
//!
//! Every bucket is labelled by its last day: weeks end on Sunday, months on
//! their last calendar day, quarters on Mar 31 / Jun 30 / Sep 30 / Dec 31.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::TimeBucket;

/// The boundary date of the bucket containing `date`.
pub fn period_end(date: NaiveDate, bucket: TimeBucket) -> NaiveDate {
    match bucket {
        TimeBucket::Daily => date,
        TimeBucket::Weekly => week_end(date),
        TimeBucket::Monthly => month_end(date.year(), date.month()),
        TimeBucket::Quarterly => {
            let quarter_last_month = date.month0() / 3 * 3 + 3;
            month_end(date.year(), quarter_last_month)
        }
    }
}

fn week_end(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    date.checked_add_signed(Duration::days(i64::from(days_to_sunday)))
        .unwrap_or(NaiveDate::MAX)
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
