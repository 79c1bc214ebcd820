//! Calendar arithmetic for deadline rules.
//!
//! Business-day addition skips Saturdays and Sundays only; municipal
//! holidays are deliberately not modelled.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Add `n` business days to `start`, skipping weekends.
pub fn add_business_days(start: DateTime<Utc>, n: u32) -> DateTime<Utc> {
  let mut date = start;
  let mut remaining = n;
  while remaining > 0 {
    date += Duration::days(1);
    if !is_weekend(date) {
      remaining -= 1;
    }
  }
  date
}

/// Add `n` calendar days to `start`.
pub fn add_days(start: DateTime<Utc>, n: u32) -> DateTime<Utc> {
  start + Duration::days(i64::from(n))
}

/// Signed whole-day difference between the date components of `a` and `b`;
/// positive when `a` is after `b`.
pub fn difference_in_days(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
  (a.date_naive() - b.date_naive()).num_days()
}

fn is_weekend(date: DateTime<Utc>) -> bool {
  matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn friday() -> DateTime<Utc> {
    // 2024-06-07 was a Friday.
    Utc.with_ymd_and_hms(2024, 6, 7, 10, 0, 0).unwrap()
  }

  #[test]
  fn one_business_day_after_friday_is_monday() {
    let next = add_business_days(friday(), 1);
    assert_eq!(next.weekday(), Weekday::Mon);
    assert_eq!(next.date_naive().to_string(), "2024-06-10");
  }

  #[test]
  fn fifteen_business_days_span_three_full_weeks() {
    let due = add_business_days(friday(), 15);
    assert_eq!(due.date_naive().to_string(), "2024-06-28");
  }

  #[test]
  fn zero_business_days_is_identity() {
    assert_eq!(add_business_days(friday(), 0), friday());
  }

  #[test]
  fn calendar_days_do_not_skip_weekends() {
    let due = add_days(friday(), 2);
    assert_eq!(due.weekday(), Weekday::Sun);
  }

  #[test]
  fn day_difference_is_signed() {
    let a = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
    let b = Utc.with_ymd_and_hms(2024, 6, 7, 23, 59, 0).unwrap();
    assert_eq!(difference_in_days(a, b), 3);
    assert_eq!(difference_in_days(b, a), -3);
  }

  #[test]
  fn day_difference_ignores_time_of_day() {
    let morning = Utc.with_ymd_and_hms(2024, 6, 7, 1, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 6, 7, 23, 0, 0).unwrap();
    assert_eq!(difference_in_days(evening, morning), 0);
  }
}
