//! Reversible protection codec for numeric payloads.
//!
//! A protected token is the only representation of a dataset's numeric
//! payload that ever reaches the ledger. Tokens carry a fixed marker prefix
//! so `decode` can tell well-formed tokens apart from arbitrary strings;
//! the payload behind the marker is the base64 form of the value's decimal
//! string.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{EngineError, Result};

/// Marker distinguishing well-formed tokens from arbitrary strings.
pub const TOKEN_PREFIX: &str = "FHE-";

/// Encode a numeric payload into a protected token.
pub fn encode(value: f64) -> String {
    format!("{}{}", TOKEN_PREFIX, BASE64.encode(value.to_string()))
}

/// Decode a protected token back into its numeric payload.
///
/// Unmarked input is parsed as a bare number so values persisted before the
/// marker was introduced stay readable. Anything else fails with
/// [`EngineError::MalformedToken`].
pub fn decode(token: &str) -> Result<f64> {
    let malformed = || EngineError::MalformedToken(token.to_string());

    match token.strip_prefix(TOKEN_PREFIX) {
        Some(payload) => {
            let bytes = BASE64.decode(payload).map_err(|_| malformed())?;
            let text = String::from_utf8(bytes).map_err(|_| malformed())?;
            parse_number(&text).ok_or_else(malformed)
        }
        None => parse_number(token).ok_or_else(malformed),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for v in [0.0, 1.0, 40.0, 50.0, 0.5, -3.25, 1e9, 0.0001, 123.456] {
            assert_eq!(decode(&encode(v)).unwrap(), v);
        }
    }

    #[test]
    fn test_token_is_marked() {
        let token = encode(42.0);
        assert!(token.starts_with(TOKEN_PREFIX));
        assert_ne!(token, "42");
    }

    #[test]
    fn test_unmarked_fallback() {
        assert_eq!(decode("42").unwrap(), 42.0);
        assert_eq!(decode("0.5").unwrap(), 0.5);
        assert_eq!(decode(" 7 ").unwrap(), 7.0);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            decode("not a number"),
            Err(EngineError::MalformedToken(_))
        ));
        assert!(matches!(
            decode("FHE-%%%not-base64%%%"),
            Err(EngineError::MalformedToken(_))
        ));
        // Valid base64, but the payload is not numeric.
        let bogus = format!("{}{}", TOKEN_PREFIX, BASE64.encode("hello"));
        assert!(matches!(
            decode(&bogus),
            Err(EngineError::MalformedToken(_))
        ));
    }
}
