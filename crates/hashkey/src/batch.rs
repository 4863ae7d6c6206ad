//! Deterministic batch key derivation.
//!
//! A batch identifier is turned into a numeric seed, and every key slot reads
//! its prefix and 12-digit hash from the seeded PRNG at `seed + slot`. The
//! trailing timestamp field comes from the wall clock, so only the prefix and
//! hash are reproducible across calls.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};

use crate::alphabet::{HEX_ALPHABET, Prefix, pick};
use crate::data::{KeyRecord, KeySet, KeyType, into_group};
use crate::error::{KeyGenError, Result};
use crate::seed::{derive_seed, seeded_random};
use crate::template::hex_timestamp;

/// Length of the seeded hash segment.
pub const HASH_LEN: usize = 12;

/// Slot indices of the 12h group.
pub const SLOTS_12H: [u32; 3] = [0, 1, 2];
/// Slot indices of the 24h group.
pub const SLOTS_24H: [u32; 3] = [10, 11, 12];

/// How long a batch is advertised as valid.
pub fn batch_validity() -> Duration {
    Duration::hours(6)
}

/// Build the key for one slot of a seeded batch.
pub fn batch_key(seed: f64, slot: u32, now_ms: i64, key_type: KeyType) -> Result<String> {
    let sub_seed = seed + f64::from(slot);
    let prefix = Prefix::from_unit(seeded_random(sub_seed));

    let mut key = String::with_capacity(32);
    write!(key, "{prefix}-")?;
    for j in 0..HASH_LEN {
        key.push(pick(HEX_ALPHABET, seeded_random(sub_seed + j as f64)));
    }
    write!(
        key,
        "-{}:{}",
        hex_timestamp(now_ms.saturating_add(i64::from(slot))),
        key_type.suffix()
    )?;
    Ok(key)
}

/// Generate the six keys of a batch at the instant `now`.
pub fn build_batch(batch_id: &str, now: DateTime<Utc>) -> Result<KeySet> {
    let now_ms = now.timestamp_millis();
    let seed = derive_seed(batch_id, now_ms);

    let group = |slots: &[u32], key_type: KeyType| {
        let records = slots
            .iter()
            .map(|&slot| {
                batch_key(seed.value, slot, now_ms, key_type)
                    .map(|key| KeyRecord::new(key, key_type, None))
            })
            .collect::<Result<Vec<_>>>()?;
        into_group(records)
    };

    let expires_at = now
        .checked_add_signed(batch_validity())
        .ok_or_else(|| KeyGenError::TimestampOverflow(format!("{now} + 6h")))?;

    Ok(KeySet {
        keys_12h: group(&SLOTS_12H, KeyType::Free12h)?,
        keys_24h: group(&SLOTS_24H, KeyType::Free24h)?,
        batch_id: batch_id.to_string(),
        generated_at: now,
        expires_at: Some(expires_at),
    })
}
