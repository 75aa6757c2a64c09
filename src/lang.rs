//! ISO 639-1 language key validation

use crate::error::{ActionError, Result};

/// Two-letter language keys accepted by the Qontract service.
pub const LANG_KEYS: &[&str] = &[
    "af", "ak", "sq", "am", "ar", "an", "hy", "as", "av", "ae", "ay", "az", "bm", "ba", "eu", "be",
    "bn", "bh", "bi", "bs", "br", "bg", "my", "ca", "ch", "ce", "ny", "zh", "cv", "kw", "co", "cr",
    "hr", "cs", "da", "dv", "nl", "dz", "en", "eo", "et", "ee", "fo", "fj", "fi", "fr", "ff", "gl",
    "ka", "de", "el", "gn", "gu", "ht", "ha", "he", "hz", "hi", "ho", "hu", "ia", "id", "ie", "ga",
    "ig", "ik", "io", "is", "it", "iu", "ja", "jv", "kl", "kn", "kr", "ks", "kk", "km", "ki", "rw",
    "ky", "kv", "kg", "ko", "ku", "kj", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "gv",
    "mk", "mg", "ms", "ml", "mt", "mi", "mr", "mh", "mn", "na", "nv", "nd", "ne", "ng", "nb", "nn",
    "no", "ii", "nr", "oc", "oj", "cu", "om", "or", "os", "pa", "pi", "fa", "pl", "ps", "pt", "qu",
    "rm", "rn", "ro", "ru", "sa", "sc", "sd", "se", "sm", "sg", "sr", "gd", "sn", "si", "sk", "sl",
    "so", "st", "es", "su", "sw", "ss", "sv", "ta", "te", "tg", "th", "ti", "bo", "tk", "tl", "tn",
    "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "cy", "wo",
    "fy", "xh", "yi", "yo", "za", "zu",
];

/// Returns true if `key` is one of the accepted language keys.
/// Exact match only; no case folding or trimming.
pub fn is_valid_key(key: &str) -> bool {
    LANG_KEYS.contains(&key)
}

/// Validates a language key, producing the fatal error the run reports
/// for an unknown key.
pub fn ensure_valid_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(ActionError::InvalidLanguageKey {
            key: key.to_string(),
            valid: LANG_KEYS.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_keys() {
        for key in ["en", "de", "zh", "zu", "af"] {
            assert!(is_valid_key(key), "expected '{}' to be valid", key);
        }
    }

    #[test]
    fn rejects_unknown_and_unnormalized_keys() {
        for key in ["xx", "EN", "eng", "", " en", "e"] {
            assert!(!is_valid_key(key), "expected '{}' to be invalid", key);
        }
    }

    #[test]
    fn error_names_offending_key_and_lists_accepted_values() {
        let err = ensure_valid_key("qq").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("qq"));
        assert!(msg.contains("en, eo, et"));
    }
}
