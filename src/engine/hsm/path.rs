// Paths through a state tree

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sequence of state ids from the machine root (exclusive) down to a node.
///
/// The empty path is the root itself. Displays as dot-joined ids,
/// e.g. `grounded.walking`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatePath(Vec<String>);

impl StatePath {
    /// The root path
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of a direct child
    pub fn child(&self, id: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(id.to_string());
        Self(segments)
    }

    /// Path of the parent node, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.truncated(self.0.len() - 1))
        }
    }

    /// Prefix of this path holding the first `depth` segments
    pub fn truncated(&self, depth: usize) -> Self {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of leading segments shared with `other`
    pub fn common_prefix_len(&self, other: &StatePath) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for StatePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        Ok(Self::from_segments(s.split('.')))
    }
}

impl From<&str> for StatePath {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(path) => path,
            Err(never) => match never {},
        }
    }
}
