//! Decorative access-key generation.
//!
//! This crate produces sets of six labelled key strings:
//! - Batch sets, derived from a batch identifier so repeated requests for the
//!   same batch return the same keys
//! - Random sets, freshly generated on every call
//! - Local sets, the reduced style set a client uses when the server is down
//!
//! None of this is cryptographic. Keys are never stored or verified anywhere;
//! only their shape and, for batches, their reproducibility are defined.
//!
//! # Key Format
//!
//! Keys follow `PREFIX <sep?> BODY : TYPE`, e.g. `VP-C400EB774444-CFE56800:12H`.
//!
//! # Example
//!
//! ```rust
//! use hashkey::{KeyGenerator, parse};
//!
//! let generator = KeyGenerator::new();
//! let set = generator.generate_batch("BATCH42").unwrap();
//!
//! assert_eq!(set.keys_12h.len(), 3);
//! for record in set.records() {
//!     assert!(parse(&record.key).is_ok());
//! }
//! ```

mod alphabet;
mod batch;
mod data;
mod error;
mod generator;
mod parse;
mod random;
mod seed;
mod template;

// Public re-exports
pub use alphabet::{PREFIXES, Prefix};
pub use batch::{HASH_LEN, batch_validity};
pub use data::{GROUP_SIZE, KeyRecord, KeySet, KeyType};
pub use error::{KeyGenError, Result};
pub use generator::{Clock, FixedClock, KeyGenerator, SystemClock};
pub use parse::{ParsedKey, parse};
pub use random::BATCH_ID_LEN;
pub use seed::{BatchSeed, SeedSource, derive_seed, seeded_random};
pub use template::Template;
