use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns for credential redaction.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// `Bearer <anything>` as found in echoed headers
    pub fn bearer_header() -> &'static Regex {
        static BEARER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]+").unwrap()
        });
        &BEARER_REGEX
    }

    /// Three dot-separated base64url segments (JWT)
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*").unwrap()
        });
        &JWT_REGEX
    }

    /// Opaque base64/base64url runs of 16 or more chars
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Mask bearer credentials and opaque tokens in free text before it is logged.
///
/// Order: bearer headers, then JWTs, then remaining long opaque runs.
pub fn redact(input: &str) -> String {
    let bearer = PiiRegexRegistry::bearer_header().replace_all(input, "Bearer [REDACTED_TOKEN]");
    let jwt = PiiRegexRegistry::jwt().replace_all(&bearer, "[REDACTED_TOKEN]");
    PiiRegexRegistry::base64_token()
        .replace_all(&jwt, "[REDACTED_TOKEN]")
        .to_string()
}

/// Displays an identifier (owner id, subject) by its first four chars only.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        if self.0.chars().count() <= 4 {
            write!(f, "{}", "*".repeat(visible.chars().count()))
        } else {
            write!(f, "{visible}***")
        }
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
