/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carry no time-of-day (lesson plans, exam dates).
pub type Date = chrono::NaiveDate;
