//! Key string parsing.
//!
//! Every key follows `PREFIX <sep?> BODY : TYPE`, where `PREFIX` is one of the
//! six table prefixes and `TYPE` is `12H` or `24H`. The body layout differs by
//! generation path and is only checked for its character set.

use crate::alphabet::Prefix;
use crate::data::KeyType;
use crate::error::{KeyGenError, Result};

/// Parsed components of a key string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub prefix: Prefix,
    /// Everything between the prefix and the colon, separators included.
    pub body: String,
    pub key_type: KeyType,
}

/// Parse a key string into its components.
pub fn parse(key: &str) -> Result<ParsedKey> {
    let (head, suffix) = key.rsplit_once(':').ok_or(KeyGenError::InvalidFormat)?;

    let key_type =
        KeyType::from_suffix(suffix).ok_or_else(|| KeyGenError::UnknownType(suffix.to_string()))?;

    let (prefix, body) =
        Prefix::strip_from(head).ok_or_else(|| KeyGenError::UnknownPrefix(key.to_string()))?;

    let body_ok = body.chars().any(|c| c.is_ascii_alphanumeric())
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !body_ok {
        return Err(KeyGenError::InvalidFormat);
    }

    Ok(ParsedKey {
        prefix,
        body: body.to_string(),
        key_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_key() {
        let parsed = parse("EL-3F9A00C1B2D4-CFE56800:24H").unwrap();
        assert_eq!(parsed.prefix, Prefix::El);
        assert_eq!(parsed.body, "-3F9A00C1B2D4-CFE56800");
        assert_eq!(parsed.key_type, KeyType::Free24h);
    }

    #[test]
    fn test_parse_unseparated_key() {
        let parsed = parse("XZCFE56800aB3dE9fQ:12H").unwrap();
        assert_eq!(parsed.prefix, Prefix::Xz);
        assert_eq!(parsed.key_type, KeyType::Free12h);
    }

    #[test]
    fn test_parse_missing_colon() {
        assert!(matches!(
            parse("BC-0123456789AB"),
            Err(KeyGenError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_unknown_type() {
        assert!(matches!(
            parse("BC-0123:48H"),
            Err(KeyGenError::UnknownType(t)) if t == "48H"
        ));
    }

    #[test]
    fn test_parse_unknown_prefix() {
        assert!(matches!(
            parse("ZZ-0123:12H"),
            Err(KeyGenError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_or_odd_body() {
        assert!(matches!(parse("BC:12H"), Err(KeyGenError::InvalidFormat)));
        assert!(matches!(parse("BC--:12H"), Err(KeyGenError::InvalidFormat)));
        assert!(matches!(
            parse("BC-01 23:12H"),
            Err(KeyGenError::InvalidFormat)
        ));
    }
}
