//! Built-in sensitive field-name patterns.
//!
//! Each entry is matched case-insensitively as a substring of a field name,
//! so `token` also covers `accessToken`, `refresh_token` and `X-Token`.

/// Default blacklist, in matching order.
pub const DEFAULT_SENSITIVE_PATTERNS: &[&str] = &[
    // Credentials
    "password",
    "passwd",
    "passphrase",
    "secret",
    "credential",
    // Tokens and keys
    "token",
    "apikey",
    "api_key",
    "api-key",
    "access_key",
    "accesskey",
    "private_key",
    "privatekey",
    "client_secret",
    "signature",
    // HTTP
    "authorization",
    "cookie",
    "session_id",
    "sessionid",
    "session_key",
    // Personal data. Bare "ssn" would hit "className", so it needs a separator.
    "ssn_",
    "_ssn",
    "social_security",
    "credit_card",
    "creditcard",
    "card_number",
    "cardnumber",
    "cvv",
    "iban",
];

/// Returns whether `pattern` is one of the built-in patterns (exact match).
pub fn is_default_pattern(pattern: &str) -> bool {
    DEFAULT_SENSITIVE_PATTERNS.contains(&pattern)
}
