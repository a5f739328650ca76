//! Non-numeric scalar values.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// A boolean value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BooleanValue(bool);

impl BooleanValue {
    /// `true`.
    pub const TRUE: Self = Self(true);
    /// `false`.
    pub const FALSE: Self = Self(false);

    /// Wraps a boolean.
    #[inline]
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// The wrapped value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> bool {
        self.0
    }
}

impl From<bool> for BooleanValue {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl fmt::Display for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A point in time, stored as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateValue(i64);

impl DateValue {
    /// The epoch itself.
    pub const EPOCH: Self = Self(0);
    /// `i64::MIN`, which storage reads as "no value".
    pub const NULL_SENTINEL: Self = Self(i64::MIN);

    /// Wraps a millisecond timestamp.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Wraps a millisecond timestamp, rejecting the null sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedSentinel`] for `i64::MIN`.
    pub fn checked(millis: i64) -> Result<Self, CoreError> {
        if millis == i64::MIN {
            return Err(CoreError::ReservedSentinel { type_name: "DATE".to_owned() });
        }
        Ok(Self(millis))
    }

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Milliseconds since the epoch.
    #[inline]
    #[must_use]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns `true` if this is the reserved null sentinel.
    #[inline]
    #[must_use]
    pub const fn is_null_sentinel(&self) -> bool {
        self.0 == i64::MIN
    }

    /// Converts to a UTC timestamp, `None` if out of chrono's range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// A UTF-8 string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringValue(String);

impl StringValue {
    /// Wraps a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The wrapped string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of characters.
    #[must_use]
    pub fn logical_size(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for StringValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque byte string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteStringValue(Box<[u8]>);

impl ByteStringValue {
    /// Wraps bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// The wrapped bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The number of bytes.
    #[must_use]
    pub fn logical_size(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u8>> for ByteStringValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl fmt::Display for ByteStringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A UUID value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UuidValue(Uuid);

impl UuidValue {
    /// Wraps a UUID.
    #[inline]
    #[must_use]
    pub const fn new(value: Uuid) -> Self {
        Self(value)
    }

    /// A fresh random (v4) UUID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The wrapped UUID.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UuidValue {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UuidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
