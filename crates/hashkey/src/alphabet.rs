//! Character tables and uniform samplers shared by every generation path.

use std::fmt;

use rand::Rng;

/// Uppercase hexadecimal digits.
pub const HEX_ALPHABET: &[u8] = b"0123456789ABCDEF";

/// Alphanumeric token characters (62 symbols).
pub const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Uppercase base-36 digits, used for batch ids and short tags.
pub const BASE36_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Two-letter key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Bc,
    Rv,
    Pm,
    El,
    Vp,
    Xz,
}

/// The prefix table, in the order the seeded path indexes it.
pub const PREFIXES: [Prefix; 6] = [
    Prefix::Bc,
    Prefix::Rv,
    Prefix::Pm,
    Prefix::El,
    Prefix::Vp,
    Prefix::Xz,
];

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Bc => "BC",
            Prefix::Rv => "RV",
            Prefix::Pm => "PM",
            Prefix::El => "EL",
            Prefix::Vp => "VP",
            Prefix::Xz => "XZ",
        }
    }

    /// Match the prefix a key starts with, if any.
    pub fn strip_from(key: &str) -> Option<(Prefix, &str)> {
        PREFIXES
            .iter()
            .find_map(|p| key.strip_prefix(p.as_str()).map(|rest| (*p, rest)))
    }

    /// Pick a prefix for a unit-interval sample.
    pub fn from_unit(unit: f64) -> Prefix {
        PREFIXES[index_for_unit(unit, PREFIXES.len())]
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Prefix {
        PREFIXES[rng.gen_range(0..PREFIXES.len())]
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `floor(unit * len)`, clamped into `0..len`. NaN maps to 0.
fn index_for_unit(unit: f64, len: usize) -> usize {
    let scaled = (unit * len as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else {
        (scaled as usize).min(len - 1)
    }
}

/// Map a sample in `[0, 1)` onto a symbol of `alphabet`.
pub fn pick(alphabet: &[u8], unit: f64) -> char {
    alphabet[index_for_unit(unit, alphabet.len())] as char
}

fn random_from<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// `len` independent uniform hex digits.
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    random_from(rng, HEX_ALPHABET, len)
}

/// `len` independent uniform token characters.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    random_from(rng, TOKEN_ALPHABET, len)
}

/// `len` independent uniform base-36 digits.
pub fn random_base36<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    random_from(rng, BASE36_ALPHABET, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(HEX_ALPHABET.len(), 16);
        assert_eq!(TOKEN_ALPHABET.len(), 62);
        assert_eq!(BASE36_ALPHABET.len(), 36);
    }

    #[test]
    fn test_pick_bounds() {
        assert_eq!(pick(HEX_ALPHABET, 0.0), '0');
        assert_eq!(pick(HEX_ALPHABET, 0.999_999), 'F');
        assert_eq!(pick(HEX_ALPHABET, 0.5), '8');
        // Out-of-range samples clamp instead of panicking.
        assert_eq!(pick(HEX_ALPHABET, 1.0), 'F');
        assert_eq!(pick(HEX_ALPHABET, -0.2), '0');
        assert_eq!(pick(HEX_ALPHABET, f64::NAN), '0');
    }

    #[test]
    fn test_prefix_from_unit() {
        assert_eq!(Prefix::from_unit(0.0), Prefix::Bc);
        assert_eq!(Prefix::from_unit(0.17), Prefix::Rv);
        assert_eq!(Prefix::from_unit(0.99), Prefix::Xz);
    }

    #[test]
    fn test_strip_prefix() {
        let (prefix, rest) = Prefix::strip_from("VP-ABC:12H").unwrap();
        assert_eq!(prefix, Prefix::Vp);
        assert_eq!(rest, "-ABC:12H");
        assert!(Prefix::strip_from("QQ-ABC:12H").is_none());
    }

    #[test]
    fn test_random_runs_use_their_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);

        let hex = random_hex(&mut rng, 64);
        assert_eq!(hex.len(), 64);
        assert!(hex.bytes().all(|b| HEX_ALPHABET.contains(&b)));

        let token = random_token(&mut rng, 64);
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| b.is_ascii_alphanumeric()));

        let b36 = random_base36(&mut rng, 64);
        assert!(b36.bytes().all(|b| BASE36_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_random_prefix_covers_table() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Prefix::random(&mut rng));
        }
        assert_eq!(seen.len(), PREFIXES.len());
    }
}
