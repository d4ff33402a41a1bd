//! Strongly-typed identifiers used across the engine.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LedgerError;

/// Opaque member identity: a fixed-width 20-byte account reference.
///
/// Carries no state of its own; it is only ever used as a key. The all-zero
/// value is the null identity and is never a valid member.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId([u8; 20]);

impl MemberId {
    /// The null identity. Rejected everywhere a member is expected.
    pub const ZERO: MemberId = MemberId([0u8; 20]);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Identity with `value` big-endian in the low 8 bytes. Handy for tests.
    pub const fn from_low_u64(value: u64) -> Self {
        let v = value.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = v[i];
            i += 1;
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for MemberId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 40 {
            return Err(LedgerError::invalid_member(format!(
                "expected 40 hex chars, got {}",
                hex.len()
            )));
        }

        let mut bytes = [0u8; 20];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let pair = core::str::from_utf8(chunk)
                .map_err(|_| LedgerError::invalid_member("non-ascii hex"))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| LedgerError::invalid_member(format!("bad hex pair '{pair}'")))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for MemberId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = MemberId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 0x-prefixed 40-char hex string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MemberId, E> {
                MemberId::from_str(v).map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Group identifier: assigned sequentially from 0, immutable after creation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct GroupId(u64);

impl GroupId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for GroupId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<GroupId> for u64 {
    fn from(value: GroupId) -> Self {
        value.0
    }
}
