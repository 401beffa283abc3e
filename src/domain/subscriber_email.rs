use std::fmt;

/// Check `s` against `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
///
/// The address must contain no whitespace, exactly one `@` with a non-empty
/// local part, and a domain with a `.` that is neither its first nor its last
/// character.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(is_pattern_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

// `\s` as browsers read it: Unicode White_Space without U+0085 (NEL), plus
// U+FEFF (BOM).
fn is_pattern_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

// Subscriber email newtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if is_valid_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("'{}' is not a valid subscriber email.", s))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
