use serde::Serialize;
use std::fmt;

/// Sequence-assigned internal identifier. Admin-facing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeedbackId(i64);

impl FeedbackId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Parse a path segment; only positive decimal integers are ids.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<i64>().ok().filter(|id| *id > 0).map(Self)
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(FeedbackId::parse("17"), Some(FeedbackId::new(17)));
        assert_eq!(FeedbackId::parse("0"), None);
        assert_eq!(FeedbackId::parse("-3"), None);
        assert_eq!(FeedbackId::parse("+3"), None);
        assert_eq!(FeedbackId::parse("abc"), None);
        assert_eq!(FeedbackId::parse("99999999999999999999"), None);
        assert_eq!(FeedbackId::parse(""), None);
    }
}
