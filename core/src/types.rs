//! Shared primitive types used across the dashboard.

/// Primary key of an `account` row. Artists reuse their account id.
pub type AccountId = i64;

/// Primary key of a `content` row (albums and podcasts).
pub type ContentId = i64;

/// Primary key of a `song` or `episode` row.
pub type TrackId = i64;
