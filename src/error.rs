use strum_macros::Display;

/// A malformed tracking record. The offending record is skipped and the
/// surrounding batch continues.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ParseError {
    LineTooShort,
    MalformedField(&'static str),
    MissingCompanionLine,
}

impl std::error::Error for ParseError {}

/// Out-of-range orbital elements or object properties. Rejects the object,
/// surfaced to the caller instead of creating inconsistent state.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ValidationError {
    NonPositiveSemiMajorAxis,
    EccentricityOutOfRange,
    NonPositiveMass,
    NonPositiveCrossSection,
}

impl std::error::Error for ValidationError {}

/// An upstream feed could not deliver data. Never propagated past the feed
/// adapter: the affected tick degrades to synthetic generation and the next
/// tick retries naturally.
#[derive(Debug, Display)]
pub enum FeedError {
    Timeout,
    NoConnection,
    BadStatus(u16),
    MalformedBody,
    Unknown,
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            FeedError::Timeout
        } else if value.is_connect() {
            FeedError::NoConnection
        } else if value.is_decode() {
            FeedError::MalformedBody
        } else if let Some(status) = value.status() {
            FeedError::BadStatus(status.as_u16())
        } else {
            FeedError::Unknown
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(_: serde_json::Error) -> Self { FeedError::MalformedBody }
}

/// Registry lookups that reference missing state.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum StateError {
    UnknownObject,
    UnknownThreat,
    UnknownAction,
}

impl std::error::Error for StateError {}
