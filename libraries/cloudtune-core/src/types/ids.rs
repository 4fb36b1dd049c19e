/// Identifier types for CloudTune entities
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Catalog source identifier
///
/// The set of sources is open: the backend may add providers without a
/// client release, so unknown identifiers are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(Cow<'static, str>);

impl SourceId {
    /// QQ Music
    pub const QQ: SourceId = SourceId(Cow::Borrowed("qq"));

    /// NetEase Cloud Music
    pub const NETEASE: SourceId = SourceId(Cow::Borrowed("netease"));

    /// Kuwo Music
    pub const KUWO: SourceId = SourceId(Cow::Borrowed("kuwo"));

    /// Create a source ID from any identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Every source the backend is known to support
    pub fn known() -> [SourceId; 3] {
        [Self::QQ, Self::NETEASE, Self::KUWO]
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable provider name
    pub fn display_name(&self) -> &str {
        match self.as_str() {
            "qq" => "QQ Music",
            "netease" => "NetEase Cloud Music",
            "kuwo" => "Kuwo",
            other => other,
        }
    }

    /// Parse a comma-separated source list, skipping blanks
    pub fn parse_list(list: &str) -> Vec<SourceId> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SourceId::from)
            .collect()
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sources_compare_equal_to_parsed() {
        assert_eq!(SourceId::from("qq"), SourceId::QQ);
        assert_eq!(SourceId::new("netease".to_string()), SourceId::NETEASE);
    }

    #[test]
    fn display_name_falls_back_to_identifier() {
        assert_eq!(SourceId::KUWO.display_name(), "Kuwo");
        assert_eq!(SourceId::from("bandcamp").display_name(), "bandcamp");
    }

    #[test]
    fn parse_list_trims_and_skips_blanks() {
        let sources = SourceId::parse_list(" qq, ,netease,");
        assert_eq!(sources, vec![SourceId::QQ, SourceId::NETEASE]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&SourceId::QQ).unwrap();
        assert_eq!(json, "\"qq\"");

        let parsed: SourceId = serde_json::from_str("\"kuwo\"").unwrap();
        assert_eq!(parsed, SourceId::KUWO);
    }
}
