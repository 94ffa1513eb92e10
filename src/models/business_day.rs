use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Calendar date of `now` in the business timezone
pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// UTC half-open range `[start, end)` covering `date` in the business timezone
pub fn day_bounds_utc(date: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_midnight = date.and_time(NaiveTime::default());
    let start = DateTime::<Utc>::from_naive_utc_and_offset(local_midnight, Utc)
        - Duration::seconds(i64::from(offset.local_minus_utc()));
    (start, start + Duration::days(1))
}

/// Range of the business day that contains `now`
pub fn today_bounds_utc(now: DateTime<Utc>, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    day_bounds_utc(local_date(now, offset), offset)
}
