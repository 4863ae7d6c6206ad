//! Key records and key sets as handed to callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of records in each key group.
pub const GROUP_SIZE: usize = 3;

/// Access tier of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "FREE_12H")]
    Free12h,
    #[serde(rename = "FREE_24H")]
    Free24h,
}

impl KeyType {
    /// Suffix written after the colon of a key.
    pub fn suffix(self) -> &'static str {
        match self {
            KeyType::Free12h => "12H",
            KeyType::Free24h => "24H",
        }
    }

    /// Human readable label shown next to a key.
    pub fn duration_label(self) -> &'static str {
        match self {
            KeyType::Free12h => "12 Hour Access",
            KeyType::Free24h => "24 Hour Access",
        }
    }

    /// How long a key of this tier is advertised as valid.
    pub fn validity(self) -> Duration {
        match self {
            KeyType::Free12h => Duration::hours(12),
            KeyType::Free24h => Duration::hours(24),
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<KeyType> {
        match suffix {
            "12H" => Some(KeyType::Free12h),
            "24H" => Some(KeyType::Free24h),
            _ => None,
        }
    }
}

/// One labelled key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// Only set on the random server path.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso_millis::option"
    )]
    pub expires: Option<DateTime<Utc>>,
}

impl KeyRecord {
    pub fn new(key: String, key_type: KeyType, expires: Option<DateTime<Utc>>) -> Self {
        Self {
            key,
            duration: key_type.duration_label().to_string(),
            key_type,
            expires,
        }
    }
}

/// The six records produced by one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub keys_12h: [KeyRecord; GROUP_SIZE],
    pub keys_24h: [KeyRecord; GROUP_SIZE],
    pub batch_id: String,
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso_millis::option"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

impl KeySet {
    /// All records, 12h group first.
    pub fn records(&self) -> impl Iterator<Item = &KeyRecord> {
        self.keys_12h.iter().chain(self.keys_24h.iter())
    }

    pub fn into_records(self) -> Vec<KeyRecord> {
        self.keys_12h.into_iter().chain(self.keys_24h).collect()
    }

    /// Check that every record sits in the group matching its type and
    /// carries the matching label.
    pub fn is_consistent(&self) -> bool {
        let group_ok = |group: &[KeyRecord], key_type: KeyType| {
            group
                .iter()
                .all(|r| r.key_type == key_type && r.duration == key_type.duration_label())
        };
        group_ok(&self.keys_12h, KeyType::Free12h) && group_ok(&self.keys_24h, KeyType::Free24h)
    }
}

/// Turn a generated group into the fixed-size array a `KeySet` holds.
pub(crate) fn into_group(records: Vec<KeyRecord>) -> crate::Result<[KeyRecord; GROUP_SIZE]> {
    let got = records.len();
    records
        .try_into()
        .map_err(|_| crate::KeyGenError::GroupSize {
            expected: GROUP_SIZE,
            got,
        })
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|at| at.with_timezone(&Utc))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => super::serialize(at, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
