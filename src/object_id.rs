//! Document identifiers shaped like MongoDB ObjectIds.
//!
//! An [ObjectId] is 12 bytes rendered as 24 lowercase hexadecimal characters.
//! The first four bytes hold the creation time in seconds since the Unix epoch.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use crate::Error;

const OBJECT_ID_LENGTH: usize = 12;

/// A 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LENGTH]);

impl ObjectId {
    /// Create a new, random ID stamped with the current time.
    pub fn generate() -> Self {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp() as u32;
        let random = uuid::Uuid::new_v4();

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        Self(bytes)
    }

    /// Derive an ID from an email address.
    ///
    /// The email is trimmed and lower-cased first, so the same address always
    /// maps to the same ID regardless of how it was typed.
    pub fn from_email(email: &str) -> Self {
        let normalized_email = normalize_email(email);
        let hash = Sha256::digest(normalized_email.as_bytes());

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        bytes.copy_from_slice(&hash[..OBJECT_ID_LENGTH]);

        Self(bytes)
    }

    /// Parse an ID from 24 hexadecimal characters (either case).
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidObjectId] if `text` is not exactly 24 hex characters.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidObjectId(text.to_owned());

        if text.len() != OBJECT_ID_LENGTH * 2 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&text[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }

        Ok(Self(bytes))
    }

    /// Whether `text` has the shape of an ObjectId.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// The creation time encoded in the first four bytes, in seconds since the Unix epoch.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ObjectId::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl ToSql for ObjectId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for ObjectId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        ObjectId::parse(text).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
