//! Short code generation and reserved-code checks.

use rand::{Rng, distr::Alphanumeric};

/// Length of generated codes when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest code accepted from users or configuration.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest code accepted from users or configuration.
pub const MAX_CODE_LENGTH: usize = 8;

/// Path segments served by the router itself.
///
/// A request for `/{code}` with one of these values is never resolved as a
/// short link.
pub const RESERVED_CODES: &[&str] = &["healthz", "api", "code"];

/// Generates a random short code of `len` characters.
///
/// Characters are drawn uniformly from `A-Z`, `a-z` and `0-9` using the
/// thread-local CSPRNG. Uniqueness is not guaranteed; the store reports
/// collisions as conflicts.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Returns true if `code` is a reserved path segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_default_length() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_generate_code_respects_length() {
        for len in MIN_CODE_LENGTH..=MAX_CODE_LENGTH {
            assert_eq!(generate_code(len).len(), len);
        }
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code(8);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(8)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_both_cases_and_digits() {
        let sample: String = (0..200).map(|_| generate_code(8)).collect();

        assert!(sample.chars().any(|c| c.is_ascii_uppercase()));
        assert!(sample.chars().any(|c| c.is_ascii_lowercase()));
        assert!(sample.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("healthz"));
        assert!(is_reserved("api"));
        assert!(is_reserved("code"));
        assert!(!is_reserved("Healthz"));
        assert!(!is_reserved("abc123"));
    }
}
