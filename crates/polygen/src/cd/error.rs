//! Syntax errors for Coxeter diagrams.

use std::fmt;
use std::ops::Range;

use super::EdgeLabel;

/// Span of characters in a diagram string, measured in characters (not
/// bytes).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Index of the first character in the span.
    pub start: usize,
    /// Index one past the last character in the span.
    pub end: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(value: Span) -> Self {
        value.start..value.end
    }
}

impl Span {
    /// Constructs a span containing a single character.
    pub fn single(index: usize) -> Self {
        Self::from(index..index + 1)
    }

    /// Returns the substring of `s` covered by the span.
    pub fn slice(self, s: &str) -> String {
        s.chars().skip(self.start).take(self.end - self.start).collect()
    }
}

/// What the parser expected to find at a position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Expected {
    /// Node symbol or virtual node.
    Node,
    /// Edge label, whitespace, or lace suffix.
    Edge,
    /// Lowercase letter after `*`.
    VirtualNodeLetter,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Node => write!(f, "a node"),
            Expected::Edge => write!(f, "an edge label"),
            Expected::VirtualNodeLetter => write!(f, "a lowercase letter"),
        }
    }
}

/// Kind of syntax error in a Coxeter diagram.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("invalid character {found:?}; expected {expected}")]
    InvalidCharacter { found: char, expected: Expected },
    #[error("node group has {found} node(s) but the first node group has {expected}")]
    GroupSizeMismatch { expected: usize, found: usize },
    #[error("malformed edge label {text:?}")]
    MalformedInteger { text: String },
    #[error(
        "virtual node *{letter} refers to node {index} but the diagram only has {node_count} node(s)"
    )]
    VirtualNodeOutOfRange {
        letter: char,
        index: usize,
        node_count: usize,
    },
    #[error("missing node")]
    MissingNode,
    #[error("invalid lace suffix {suffix:?}")]
    InvalidLaceSuffix { suffix: String },
    #[error("edge connects node {node} to itself")]
    SelfLoop { node: usize },
    #[error("conflicting edge labels {first} and {second} between nodes {i} and {j}")]
    ConflictingEdge {
        i: usize,
        j: usize,
        first: EdgeLabel,
        second: EdgeLabel,
    },
}

impl SyntaxErrorKind {
    /// Returns extra human-readable hints for the error.
    fn hints(&self) -> Vec<String> {
        match self {
            SyntaxErrorKind::InvalidCharacter {
                expected: Expected::Node,
                ..
            } => vec![format!(
                "node symbols are {}, or `*` followed by a letter",
                super::NODE_TYPES.iter().map(|n| n.symbol).collect::<String>(),
            )],
            SyntaxErrorKind::InvalidCharacter {
                expected: Expected::Edge,
                ..
            } => vec!["edges are whitespace, an integer, or a fraction such as `5/2`".to_string()],
            SyntaxErrorKind::MalformedInteger { .. } => vec![
                "edge labels are one- or two-digit integers of at least 2".to_string(),
                "a denominator must be positive and smaller than its numerator".to_string(),
            ],
            SyntaxErrorKind::InvalidLaceSuffix { .. } => {
                vec!["lace suffixes are `&#x`, `&#xt`, `&#m`, and `&#xr`".to_string()]
            }
            SyntaxErrorKind::MissingNode => {
                vec!["a diagram must start and end with a node".to_string()]
            }
            _ => vec![],
        }
    }
}

/// Error encountered while parsing a Coxeter diagram.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at {span})")]
pub struct DiagramSyntaxError {
    /// Kind of error.
    pub kind: SyntaxErrorKind,
    /// Span of offending characters in the diagram.
    pub span: Span,
    /// Human-readable reasons, starting with the description of the error
    /// kind.
    pub reasons: Vec<String>,
}

impl DiagramSyntaxError {
    /// Constructs a syntax error and fills in its reasons.
    pub fn new(kind: SyntaxErrorKind, span: impl Into<Span>) -> Self {
        let mut reasons = vec![kind.to_string()];
        reasons.extend(kind.hints());
        Self {
            kind,
            span: span.into(),
            reasons,
        }
    }
}
