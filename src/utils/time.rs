//! Korea-local calendar helpers.
//!
//! Both collectors key their output by the Korea-local date, so "today"
//! rolls over at midnight KST regardless of where the job runs. KST is a
//! fixed UTC+9 offset with no daylight saving.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Asia::Seoul;

/// Current calendar date in Korea Standard Time
pub fn today_seoul() -> NaiveDate {
    Utc::now().with_timezone(&Seoul).date_naive()
}

/// Monday of the week containing `date`.
///
/// A Monday maps to itself; a Sunday maps to the Monday six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = i64::from(date.weekday().num_days_from_monday());
    date - Duration::days(days_from_monday)
}

/// Format a date the way store files key it (`YYYY-MM-DD`)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
