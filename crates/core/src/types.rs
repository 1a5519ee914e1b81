/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User identifiers are opaque strings assigned by the auth provider.
pub type UserId = String;
