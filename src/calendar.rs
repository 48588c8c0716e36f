use chrono::{DateTime, TimeZone, Utc};

/// Whether `instant` falls on the same calendar day as `reference`.
///
/// The comparison happens in `reference`'s timezone: both instants are
/// converted to local wall-clock dates before comparing, so an instant late
/// in the evening UTC can still be "today" for a user east of Greenwich.
pub fn is_same_day<Tz: TimeZone>(instant: &DateTime<Utc>, reference: &DateTime<Tz>) -> bool {
    instant.with_timezone(&reference.timezone()).date_naive() == reference.date_naive()
}
