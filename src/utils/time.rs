// Relative time formatting ("3 days ago", "about 2 hours ago")

use chrono::{DateTime, Utc};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

fn round_div(value: i64, divisor: i64) -> i64 {
    (value as f64 / divisor as f64).round() as i64
}

/// Distance between two instants in words, without a suffix
pub fn format_distance(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().abs();
    let minutes = round_div(seconds, 60);

    match minutes {
        0 => "less than a minute".to_string(),
        m if m < 45 => plural(m, "minute"),
        m if m < 90 => "about 1 hour".to_string(),
        m if m < MINUTES_IN_DAY => format!("about {}", plural(round_div(m, 60), "hour")),
        m if m < 2520 => "1 day".to_string(),
        m if m < MINUTES_IN_MONTH => plural(round_div(m, MINUTES_IN_DAY), "day"),
        m if m < MINUTES_IN_TWO_MONTHS => {
            format!("about {}", plural(round_div(m, MINUTES_IN_MONTH), "month"))
        }
        m => {
            let months = m / MINUTES_IN_MONTH;
            if months < 12 {
                return plural(round_div(m, MINUTES_IN_MONTH).max(2), "month");
            }
            let years = months / 12;
            match months % 12 {
                r if r < 3 => format!("about {}", plural(years, "year")),
                r if r < 9 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}

/// Age of `then` relative to `now`, with a suffix: "5 minutes ago", "in 2 days"
pub fn format_distance_to_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance = format_distance(then, now);
    if then > now && distance != "less than a minute" {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}
