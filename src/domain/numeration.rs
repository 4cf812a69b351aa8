//! Dotted hierarchical position strings such as `2.1.3`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ROOT_DEPTH;

/// A dotted numeration: the chain of 1-based sibling positions from a root
/// down to a node.
///
/// `2.1.3` is the third child of the first child of the second root.
/// Root nodes have a single segment.
///
/// # Examples
///
/// ```
/// use tabula::domain::Numeration;
///
/// let n: Numeration = "2.1.3".parse().unwrap();
/// assert_eq!(n.position(), 3);
/// assert_eq!(n.depth(), 2);
/// assert_eq!(n.parent().unwrap().to_string(), "2.1");
/// assert_eq!(n.child(4).to_string(), "2.1.3.4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Numeration(Vec<u32>);

/// Error returned when parsing an invalid numeration.
#[derive(Debug, Clone)]
pub struct ParseNumerationError(String);

impl fmt::Display for ParseNumerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseNumerationError {}

impl Numeration {
    /// Numeration of the root node at the given 1-based position.
    pub fn root(position: u32) -> Self {
        Self(vec![position])
    }

    /// Numeration of the child at the given 1-based position below `self`.
    pub fn child(&self, position: u32) -> Self {
        let mut segments = self.0.clone();
        segments.push(position);
        Self(segments)
    }

    /// Numeration of the parent node, or `None` for a root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// The node's own 1-based position among its siblings.
    pub fn position(&self) -> u32 {
        self.0.last().copied().unwrap_or(0)
    }

    /// Distance from a root, offset by [`ROOT_DEPTH`].
    pub fn depth(&self) -> u32 {
        ROOT_DEPTH + (self.0.len() as u32).saturating_sub(1)
    }

    /// All positions from the root down.
    pub fn positions(&self) -> &[u32] {
        &self.0
    }

    /// Returns true if this is a root numeration.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for Numeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, position) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", position)?;
        }
        Ok(())
    }
}

impl FromStr for Numeration {
    type Err = ParseNumerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return Err(ParseNumerationError(
                "numeration cannot be empty".to_string(),
            ));
        }

        let segments = trimmed
            .split('.')
            .map(|segment| match segment.parse::<u32>() {
                Ok(position) if position >= 1 => Ok(position),
                _ => Err(ParseNumerationError(format!(
                    "invalid numeration '{}': expected positive integers separated by dots",
                    s
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(segments))
    }
}

impl Serialize for Numeration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_displays_bare_position() {
        assert_eq!(Numeration::root(3).to_string(), "3");
    }

    #[test]
    fn child_appends_segment() {
        let n = Numeration::root(2).child(1).child(3);
        assert_eq!(n.to_string(), "2.1.3");
        assert_eq!(n.position(), 3);
        assert_eq!(n.depth(), ROOT_DEPTH + 2);
    }

    #[test]
    fn root_depth_matches_constant() {
        assert_eq!(Numeration::root(1).depth(), ROOT_DEPTH);
        assert!(Numeration::root(1).is_root());
        assert!(Numeration::root(1).parent().is_none());
    }

    #[test]
    fn parses_dotted_string() {
        let n: Numeration = "4.2".parse().unwrap();
        assert_eq!(n.positions(), &[4, 2]);
    }

    #[test]
    fn parse_tolerates_trailing_dot() {
        let n: Numeration = "1.".parse().unwrap();
        assert_eq!(n, Numeration::root(1));
    }

    #[test]
    fn parse_rejects_zero() {
        assert!("1.0".parse::<Numeration>().is_err());
    }

    #[test]
    fn parse_rejects_empty_segment() {
        assert!("1..2".parse::<Numeration>().is_err());
        assert!("".parse::<Numeration>().is_err());
    }

    #[test]
    fn parse_rejects_text() {
        assert!("a.b".parse::<Numeration>().is_err());
    }

    #[test]
    fn ordering_follows_segments() {
        let a: Numeration = "1.2".parse().unwrap();
        let b: Numeration = "1.10".parse().unwrap();
        let c: Numeration = "2".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn serializes_as_string() {
        let n: Numeration = "3.1".parse().unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"3.1\"");
    }
}
