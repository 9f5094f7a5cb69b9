use chrono::{DateTime, Local, Utc};

use crate::access_key;
use crate::PastelError;

/// Display format for memo timestamps, rendered in the server's local timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// A stored paste. `id` is the storage surrogate and never leaves the server.
#[derive(Debug, Clone)]
pub struct Memo {
    pub id: i64,
    pub access_key: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    pub fn created_at_display(&self) -> String {
        format_timestamp(self.created_at)
    }
}

#[derive(Debug, Clone)]
pub struct CreateMemo {
    pub access_key: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl CreateMemo {
    /// Validate `body` and derive a fresh access key for it.
    ///
    /// Timestamps are truncated to whole seconds since storage keeps Unix
    /// epoch seconds.
    pub fn new(body: impl Into<String>, now: DateTime<Utc>) -> Result<Self, PastelError> {
        let body = body.into();
        validate_body(&body)?;
        let created_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Ok(Self {
            access_key: access_key::generate(&body, created_at),
            body,
            created_at,
        })
    }
}

pub fn validate_body(body: &str) -> Result<(), PastelError> {
    if body.is_empty() {
        return Err(PastelError::InvalidInput("Body is required".into()));
    }
    Ok(())
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}
