//! Visual key styles used by the random and local generation paths.

use std::fmt::Write as _;

use rand::Rng;

use crate::alphabet::{Prefix, random_base36, random_hex, random_token};
use crate::data::KeyType;
use crate::error::Result;

/// Width of the hex timestamp field.
pub const TIMESTAMP_DIGITS: usize = 8;

/// One way of laying out a key around its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `BC-0123456789AB-018F3A2C`
    DashedHex,
    /// `BC-0123-4567-89AB-CDEF0123`
    Grouped,
    /// `BC_aZ09aZ09aZ09aZ09`
    Underscore,
    /// `BC.01234567.aZ09aZ09.3A2C`
    Dotted,
    /// `BC012345aZ09aZ3A2C`
    Packed,
    /// `BC-K3Z9Q1-01234567-8F3A2C`
    Tagged,
    /// `BC018F3A2CaZ09aZ09`
    Stamped,
}

/// Styles offered by the server's random path.
pub const SERVER_TEMPLATES: [Template; 7] = [
    Template::DashedHex,
    Template::Grouped,
    Template::Underscore,
    Template::Dotted,
    Template::Packed,
    Template::Tagged,
    Template::Stamped,
];

/// Styles offered by the client-side fallback.
pub const LOCAL_TEMPLATES: [Template; 5] = [
    Template::DashedHex,
    Template::Grouped,
    Template::Underscore,
    Template::Dotted,
    Template::Packed,
];

impl Template {
    pub fn choose<R: Rng + ?Sized>(rng: &mut R, table: &[Template]) -> Template {
        table[rng.gen_range(0..table.len())]
    }

    /// Render a complete key, type suffix included.
    pub fn render<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        prefix: Prefix,
        timestamp: &str,
        key_type: KeyType,
    ) -> Result<String> {
        let mut key = String::with_capacity(40);
        match self {
            Template::DashedHex => {
                write!(key, "{prefix}-{}-{timestamp}", random_hex(rng, 12))?;
            }
            Template::Grouped => {
                write!(
                    key,
                    "{prefix}-{}-{}-{}-{}",
                    random_hex(rng, 4),
                    random_hex(rng, 4),
                    random_hex(rng, 4),
                    random_hex(rng, 8)
                )?;
            }
            Template::Underscore => {
                write!(key, "{prefix}_{}", random_token(rng, 16))?;
            }
            Template::Dotted => {
                write!(
                    key,
                    "{prefix}.{}.{}.{}",
                    random_hex(rng, 8),
                    random_token(rng, 8),
                    tail(timestamp, 4)
                )?;
            }
            Template::Packed => {
                write!(
                    key,
                    "{prefix}{}{}{}",
                    random_hex(rng, 6),
                    random_token(rng, 6),
                    tail(timestamp, 4)
                )?;
            }
            Template::Tagged => {
                write!(
                    key,
                    "{prefix}-{}-{}-{}",
                    random_base36(rng, 6),
                    random_hex(rng, 8),
                    tail(timestamp, 6)
                )?;
            }
            Template::Stamped => {
                write!(key, "{prefix}{timestamp}{}", random_token(rng, 8))?;
            }
        }
        write!(key, ":{}", key_type.suffix())?;
        Ok(key)
    }
}

/// Uppercase hex of `millis`, cut to its last eight digits.
pub fn hex_timestamp(millis: i64) -> String {
    let hex = format!("{:X}", u64::try_from(millis).unwrap_or_default());
    tail(&hex, TIMESTAMP_DIGITS).to_string()
}

/// Last `n` characters of an ASCII string, or all of it when shorter.
pub fn tail(s: &str, n: usize) -> &str {
    &s[s.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_hex_timestamp() {
        // 1_700_000_000_000 = 0x18BCFE56800
        assert_eq!(hex_timestamp(1_700_000_000_000), "CFE56800");
        assert_eq!(hex_timestamp(255), "FF");
        assert_eq!(hex_timestamp(-5), "0");
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("CFE56800", 4), "6800");
        assert_eq!(tail("AB", 4), "AB");
    }

    #[test]
    fn test_every_template_renders_valid_key() {
        let mut rng = StdRng::seed_from_u64(1);
        let ts = hex_timestamp(1_700_000_000_000);

        for template in SERVER_TEMPLATES {
            for key_type in [KeyType::Free12h, KeyType::Free24h] {
                let key = template.render(&mut rng, Prefix::Pm, &ts, key_type).unwrap();
                let parsed = parse(&key).unwrap();
                assert_eq!(parsed.prefix, Prefix::Pm, "{template:?}: {key}");
                assert_eq!(parsed.key_type, key_type, "{template:?}: {key}");
            }
        }
    }

    #[test]
    fn test_template_layouts() {
        let mut rng = StdRng::seed_from_u64(3);
        let ts = "CFE56800";
        let render = |t: Template, rng: &mut StdRng| {
            t.render(rng, Prefix::Bc, ts, KeyType::Free12h).unwrap()
        };

        let key = render(Template::DashedHex, &mut rng);
        assert_eq!(key.len(), "BC-".len() + 12 + 1 + 8 + ":12H".len());
        assert!(key.ends_with("-CFE56800:12H"));

        let key = render(Template::Grouped, &mut rng);
        assert_eq!(key.matches('-').count(), 4);

        let key = render(Template::Underscore, &mut rng);
        assert!(key.starts_with("BC_"));
        assert_eq!(key.len(), 3 + 16 + 4);

        let key = render(Template::Dotted, &mut rng);
        assert!(key.ends_with(".6800:12H"));

        let key = render(Template::Packed, &mut rng);
        assert!(key.ends_with("6800:12H"));
        assert_eq!(key.len(), 2 + 6 + 6 + 4 + 4);

        let key = render(Template::Tagged, &mut rng);
        assert!(key.ends_with("-E56800:12H"));

        let key = render(Template::Stamped, &mut rng);
        assert!(key.starts_with("BCCFE56800"));
    }

    #[test]
    fn test_local_templates_are_subset() {
        assert!(
            LOCAL_TEMPLATES
                .iter()
                .all(|t| SERVER_TEMPLATES.contains(t))
        );
    }

    #[test]
    fn test_choose_stays_in_table() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let t = Template::choose(&mut rng, &LOCAL_TEMPLATES);
            assert!(LOCAL_TEMPLATES.contains(&t));
        }
    }
}
