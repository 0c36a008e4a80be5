use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Canonical `YYYY-MM` identifier for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Months left in the calendar year, counting the one containing `date`.
/// January yields 12, December yields 1.
pub fn months_remaining_in_year(date: NaiveDate) -> i64 {
    12 - i64::from(date.month0())
}

/// Year parsed from the prefix of a `YYYY-MM` month key.
pub fn year_of(key: &str) -> Option<i32> {
    key.split('-').next()?.parse().ok()
}

/// Whether `key` is a well-formed `YYYY-MM` string.
pub fn is_month_key(key: &str) -> bool {
    let mut parts = key.splitn(2, '-');
    let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
        return false;
    };
    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && month.len() == 2
        && month.chars().all(|c| c.is_ascii_digit())
        && matches!(month.parse::<u32>(), Ok(1..=12))
}

/// First calendar day of the month named by `key`.
pub fn first_day_of(key: &str) -> Option<NaiveDate> {
    let mut parts = key.splitn(2, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}
