//! Non-deterministic key sets: the server's random path and the client's
//! local fallback.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::alphabet::{Prefix, random_base36};
use crate::batch::batch_validity;
use crate::data::{GROUP_SIZE, KeyRecord, KeySet, KeyType, into_group};
use crate::error::{KeyGenError, Result};
use crate::template::{LOCAL_TEMPLATES, SERVER_TEMPLATES, Template, hex_timestamp};

/// Length of a generated batch id.
pub const BATCH_ID_LEN: usize = 8;

struct Profile {
    templates: &'static [Template],
    /// Stamp each record with its own expiry.
    record_expiry: bool,
    /// Stamp the set with the batch validity window.
    set_expiry: bool,
}

const SERVER: Profile = Profile {
    templates: &SERVER_TEMPLATES,
    record_expiry: true,
    set_expiry: true,
};

const LOCAL: Profile = Profile {
    templates: &LOCAL_TEMPLATES,
    record_expiry: false,
    set_expiry: false,
};

fn add(now: DateTime<Utc>, delta: chrono::Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(delta)
        .ok_or_else(|| KeyGenError::TimestampOverflow(format!("{now} + {delta}")))
}

fn build<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, profile: &Profile) -> Result<KeySet> {
    let timestamp = hex_timestamp(now.timestamp_millis());

    let mut group = |key_type: KeyType| -> Result<[KeyRecord; GROUP_SIZE]> {
        let expires = if profile.record_expiry {
            Some(add(now, key_type.validity())?)
        } else {
            None
        };
        let mut records = Vec::with_capacity(GROUP_SIZE);
        for _ in 0..GROUP_SIZE {
            let prefix = Prefix::random(rng);
            let template = Template::choose(rng, profile.templates);
            let key = template.render(rng, prefix, &timestamp, key_type)?;
            records.push(KeyRecord::new(key, key_type, expires));
        }
        into_group(records)
    };

    let keys_12h = group(KeyType::Free12h)?;
    let keys_24h = group(KeyType::Free24h)?;

    let expires_at = if profile.set_expiry {
        Some(add(now, batch_validity())?)
    } else {
        None
    };

    Ok(KeySet {
        keys_12h,
        keys_24h,
        batch_id: random_base36(rng, BATCH_ID_LEN),
        generated_at: now,
        expires_at,
    })
}

/// Six fresh keys in any of the seven server styles.
pub fn build_random_set<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Result<KeySet> {
    build(rng, now, &SERVER)
}

/// Six fresh keys in the five local styles, without expiry stamps.
pub fn build_local_set<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Result<KeySet> {
    build(rng, now, &LOCAL)
}
