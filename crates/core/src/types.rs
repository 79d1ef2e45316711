/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Map positions, in light-years.
pub type Vector = glam::DVec2;

/// Player number used for objects nobody owns.
pub const UNOWNED: i32 = 0;
