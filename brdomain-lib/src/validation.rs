//! Domain input normalization, splitting and hostname validation.
//!
//! All functions here are pure: the same input always gives the same result.

use crate::error::DomainCheckError;
use crate::registry::TldRegistry;
use crate::types::{DomainParts, HostnameRule, ValidationResult};

/// Shortest hostname the registry accepts, in characters.
pub const MIN_HOSTNAME_LEN: usize = 2;

/// Longest hostname the registry accepts, in characters.
pub const MAX_HOSTNAME_LEN: usize = 26;

/// Accented letters allowed in a hostname besides a-z, 0-9 and hyphen.
pub const ACCENTED_CHARS: &str = "àáâãéêíóôõúüç";

/// Trim and lower-case raw user input.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Split a normalized domain into hostname and TLD.
///
/// The TLD is the longest registry key the input ends with at a label
/// boundary. The hostname is everything before the dot preceding it, and
/// may be empty when the input is a bare TLD.
///
/// # Errors
///
/// Returns `UnsupportedTld` (listing every valid TLD) when no key matches.
pub fn split_domain(input: &str, registry: &TldRegistry) -> Result<DomainParts, DomainCheckError> {
    let tld = registry
        .match_label_tld(input)
        .ok_or_else(|| DomainCheckError::unsupported_tld(input, registry.tld_names()))?;

    let rest = &input[..input.len() - tld.len()];
    let hostname = rest.strip_suffix('.').unwrap_or(rest);

    Ok(DomainParts {
        hostname: hostname.to_string(),
        tld: tld.to_string(),
        fqdn: input.to_string(),
    })
}

/// Validate a lower-cased hostname (the part before the TLD).
///
/// Rules are applied in order and the first failure is returned:
/// 1. length between 2 and 26 characters
/// 2. no hyphen at either end
/// 3. not a number as a whole
/// 4. only a-z, 0-9, hyphen and the accented letters in [`ACCENTED_CHARS`]
pub fn validate_hostname(hostname: &str) -> ValidationResult {
    let length = hostname.chars().count();
    if !(MIN_HOSTNAME_LEN..=MAX_HOSTNAME_LEN).contains(&length) {
        return ValidationResult::Invalid(HostnameRule::Length);
    }

    if hostname.starts_with('-') || hostname.ends_with('-') {
        return ValidationResult::Invalid(HostnameRule::HyphenEdge);
    }

    if is_numeric_literal(hostname) {
        return ValidationResult::Invalid(HostnameRule::NumericOnly);
    }

    if !hostname.chars().all(is_allowed_char) {
        return ValidationResult::Invalid(HostnameRule::Charset);
    }

    ValidationResult::Ok
}

/// Run the full input pipeline: normalize, split, validate.
///
/// # Errors
///
/// - `Usage` when the input is blank
/// - `UnsupportedTld` when no registry key matches
/// - `InvalidHostname` when the hostname breaks a rule
pub fn prepare_domain(input: &str, registry: &TldRegistry) -> Result<DomainParts, DomainCheckError> {
    let domain = normalize(input);
    if domain.is_empty() {
        return Err(DomainCheckError::Usage);
    }

    let parts = split_domain(&domain, registry)?;

    match validate_hostname(&parts.hostname) {
        ValidationResult::Ok => Ok(parts),
        ValidationResult::Invalid(rule) => {
            Err(DomainCheckError::invalid_hostname(parts.hostname, rule))
        }
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || ACCENTED_CHARS.contains(c)
}

/// Whether the whole string reads as a number.
///
/// Accepts decimal forms (sign, fraction, exponent) and `0x`/`0o`/`0b`
/// integers. Blank strings count as numeric (they read as zero).
pub(crate) fn is_numeric_literal(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return true;
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    // f64 parsing also takes "inf" and "nan", which are not numbers here
    if s.chars().any(|c| c.is_alphabetic() && c != 'e') {
        return false;
    }

    s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(rule: HostnameRule) -> ValidationResult {
        ValidationResult::Invalid(rule)
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(validate_hostname(""), invalid(HostnameRule::Length));
        assert_eq!(validate_hostname("a"), invalid(HostnameRule::Length));
        assert_eq!(validate_hostname("ab"), ValidationResult::Ok);

        let max = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(max.len(), 26);
        assert_eq!(validate_hostname(max), ValidationResult::Ok);
        assert_eq!(
            validate_hostname(&format!("{}a", max)),
            invalid(HostnameRule::Length)
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 26 characters, more than 26 bytes
        let accented = "ç".repeat(26);
        assert_eq!(validate_hostname(&accented), ValidationResult::Ok);
        assert_eq!(validate_hostname("çã"), ValidationResult::Ok);
    }

    #[test]
    fn test_hyphen_edges() {
        assert_eq!(validate_hostname("-abc"), invalid(HostnameRule::HyphenEdge));
        assert_eq!(validate_hostname("abc-"), invalid(HostnameRule::HyphenEdge));
        assert_eq!(validate_hostname("a-bc"), ValidationResult::Ok);
        assert_eq!(validate_hostname("meu-site-legal"), ValidationResult::Ok);
    }

    #[test]
    fn test_numeric_only() {
        assert_eq!(validate_hostname("12345"), invalid(HostnameRule::NumericOnly));
        assert_eq!(validate_hostname("1e5"), invalid(HostnameRule::NumericOnly));
        assert_eq!(validate_hostname("0x1f"), invalid(HostnameRule::NumericOnly));
        assert_eq!(validate_hostname("12a45"), ValidationResult::Ok);
        assert_eq!(validate_hostname("123e"), ValidationResult::Ok);
    }

    #[test]
    fn test_charset() {
        assert_eq!(validate_hostname("ab_c"), invalid(HostnameRule::Charset));
        assert_eq!(validate_hostname("abç!"), invalid(HostnameRule::Charset));
        assert_eq!(validate_hostname("sub.site"), invalid(HostnameRule::Charset));
        assert_eq!(validate_hostname("ñandu"), invalid(HostnameRule::Charset));
        assert_eq!(validate_hostname("açaí"), ValidationResult::Ok);
        assert_eq!(validate_hostname("pão-de-açúcar"), ValidationResult::Ok);
    }

    #[test]
    fn test_rule_order() {
        // Too short wins over the hyphen rule
        assert_eq!(validate_hostname("-"), invalid(HostnameRule::Length));
        // Hyphen wins over charset
        assert_eq!(validate_hostname("-a_b"), invalid(HostnameRule::HyphenEdge));
    }

    #[test]
    fn test_is_numeric_literal() {
        assert!(is_numeric_literal("42"));
        assert!(is_numeric_literal("4.2"));
        assert!(is_numeric_literal("+42"));
        assert!(is_numeric_literal("0b101"));
        assert!(is_numeric_literal("0o17"));
        assert!(is_numeric_literal("  "));

        assert!(!is_numeric_literal("0x"));
        assert!(!is_numeric_literal("0b102"));
        assert!(!is_numeric_literal("inf"));
        assert!(!is_numeric_literal("nan"));
        assert!(!is_numeric_literal("12-34"));
        assert!(!is_numeric_literal("e5"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        for hostname in ["meusite", "a", "-ab", "12345", "ab_c"] {
            assert_eq!(validate_hostname(hostname), validate_hostname(hostname));
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  MeuSite.COM.br \n"), "meusite.com.br");
        assert_eq!(normalize("AÇAÍ.com.br"), "açaí.com.br");
    }

    #[test]
    fn test_split_domain() {
        let registry = TldRegistry::builtin().unwrap();

        let parts = split_domain("meusite.com.br", registry).unwrap();
        assert_eq!(parts.hostname, "meusite");
        assert_eq!(parts.tld, "com.br");
        assert_eq!(parts.fqdn, "meusite.com.br");

        let parts = split_domain("com.br", registry).unwrap();
        assert_eq!(parts.hostname, "");
    }

    #[test]
    fn test_split_domain_unsupported_lists_tlds() {
        let registry = TldRegistry::builtin().unwrap();
        match split_domain("meusite.com", registry) {
            Err(DomainCheckError::UnsupportedTld { domain, valid }) => {
                assert_eq!(domain, "meusite.com");
                assert_eq!(valid, registry.tld_names());
            }
            other => panic!("expected UnsupportedTld, got {:?}", other),
        }
        assert!(split_domain("fooblog.br", registry).is_err());
    }

    #[test]
    fn test_prepare_domain_scenarios() {
        let registry = TldRegistry::builtin().unwrap();

        let parts = prepare_domain("MeuSite.com.br", registry).unwrap();
        assert_eq!(parts.fqdn, "meusite.com.br");
        assert_eq!(parts.tld, "com.br");

        assert!(matches!(
            prepare_domain("a.com.br", registry),
            Err(DomainCheckError::InvalidHostname {
                rule: HostnameRule::Length,
                ..
            })
        ));
        assert!(matches!(
            prepare_domain("", registry),
            Err(DomainCheckError::Usage)
        ));
        assert!(matches!(
            prepare_domain("   ", registry),
            Err(DomainCheckError::Usage)
        ));
        assert!(matches!(
            prepare_domain("12345.com.br", registry),
            Err(DomainCheckError::InvalidHostname {
                rule: HostnameRule::NumericOnly,
                ..
            })
        ));
        assert!(matches!(
            prepare_domain("sub.site.com.br", registry),
            Err(DomainCheckError::InvalidHostname {
                rule: HostnameRule::Charset,
                ..
            })
        ));
    }
}
