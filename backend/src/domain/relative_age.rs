//! Humanised relative-age strings for feed items and notifications.
//!
//! The formatting rule is part of the client contract and must stay stable:
//! `diff < 0` renders "in the future", then "N sec ago" under a minute,
//! "N min ago" under an hour, "N hr ago" under a day, "N day ago" under a
//! week, and a short month/day form ("Mar 15") beyond that.

use chrono::{DateTime, Utc};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_WEEK: i64 = 604_800;

/// Format the age of `created_at` relative to `now`.
///
/// # Examples
/// ```
/// use backend::domain::relative_age::format_relative_age;
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// assert_eq!(format_relative_age(now, now - Duration::seconds(90)), "1 min ago");
/// ```
pub fn format_relative_age(now: DateTime<Utc>, created_at: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(created_at).num_seconds();
    if diff < 0 {
        return "in the future".to_owned();
    }
    if diff < SECS_PER_MINUTE {
        return format!("{diff} sec ago");
    }
    if diff < SECS_PER_HOUR {
        return format!("{} min ago", diff / SECS_PER_MINUTE);
    }
    if diff < SECS_PER_DAY {
        return format!("{} hr ago", diff / SECS_PER_HOUR);
    }
    if diff < SECS_PER_WEEK {
        return format!("{} day ago", diff / SECS_PER_DAY);
    }
    created_at.format("%b %-d").to_string()
}
