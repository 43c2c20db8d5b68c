//! Dot-separated field paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// A location in the value tree, such as `workInformation.workId` or
/// `entityInformation.0.role`.
///
/// A path always has at least one segment and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Single-segment path for a top-level key.
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Path extended by one named child.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Path extended by one sequence index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, i.e. the top-level key.
    #[must_use]
    pub fn head(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Final segment, i.e. the field name the path points at.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Enclosing path, or `None` for a top-level key.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        (self.segments.len() > 1).then(|| Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Path relative to `prefix`, if `prefix` is a strict ancestor.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Self) -> Option<Self> {
        (self.segments.len() > prefix.segments.len()
            && self.segments.starts_with(&prefix.segments))
        .then(|| Self {
            segments: self.segments[prefix.segments.len()..].to_vec(),
        })
    }
}

/// Interpret a segment as a sequence index. Only plain ASCII digits qualify.
#[must_use]
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(CoreError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty".into(),
            });
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(CoreError::InvalidPath {
                path: raw.to_string(),
                reason: "path contains an empty segment".into(),
            });
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_and_display_roundtrip() {
        let path: FieldPath = "versionInformation.eldLink".parse().unwrap();
        assert_eq!(path.segments(), ["versionInformation", "eldLink"]);
        assert_eq!(path.to_string(), "versionInformation.eldLink");
        assert_eq!(path.leaf(), "eldLink");
        assert_eq!(path.head(), "versionInformation");
    }

    #[rstest]
    #[case("")]
    #[case("a..b")]
    #[case(".a")]
    #[case("a.")]
    fn rejects_empty_segments(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<FieldPath>(),
            Err(CoreError::InvalidPath { .. })
        ));
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("12", Some(12))]
    #[case("+1", None)]
    #[case("-1", None)]
    #[case("x1", None)]
    fn index_segments_are_plain_digits(#[case] segment: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_index(segment), expected);
    }

    #[test]
    fn child_index_and_parent() {
        let base = FieldPath::key("entityInformation");
        let leaf = base.index(3).child("role");
        assert_eq!(leaf.to_string(), "entityInformation.3.role");
        assert_eq!(leaf.parent().unwrap().to_string(), "entityInformation.3");
        assert_eq!(base.parent(), None);
    }

    #[test]
    fn strip_prefix_requires_strict_ancestor() {
        let section = FieldPath::key("workInformation");
        let field = section.child("workId");
        assert_eq!(field.strip_prefix(&section), Some(FieldPath::key("workId")));
        assert_eq!(section.strip_prefix(&section), None);
        assert_eq!(field.strip_prefix(&FieldPath::key("other")), None);
    }
}
