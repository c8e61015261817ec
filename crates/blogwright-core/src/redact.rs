use once_cell::sync::Lazy;
use std::borrow::Cow;
use regex::{Captures, Regex};

static REDACTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "api_key",
            Regex::new(r"(?i)(api[_-]?key\s*[:=]\s*)([A-Za-z0-9\-_.+/]+)")
                .expect("invalid api_key regex"),
        ),
        (
            "bearer",
            Regex::new(r"(?i)(bearer\s+)([A-Za-z0-9\-_.+=/]+)").expect("invalid bearer regex"),
        ),
        (
            "sk_token",
            Regex::new(r"(sk-[A-Za-z0-9\-_]{16,})").expect("invalid sk_token regex"),
        ),
    ]
});

/// Scrub credentials from text that may end up in logs or error messages.
pub fn sanitize_text(input: &str) -> String {
    let mut output = input.to_string();
    for (name, regex) in REDACTION_PATTERNS.iter() {
        let replaced = regex.replace_all(&output, |caps: &Captures| {
            if caps.len() > 2 {
                format!("{}[REDACTED]", &caps[1])
            } else {
                "[REDACTED]".to_string()
            }
        });
        if let Cow::Owned(scrubbed) = replaced {
            tracing::debug!(pattern = *name, "redacted credential-like text");
            output = scrubbed;
        }
    }
    output
}
