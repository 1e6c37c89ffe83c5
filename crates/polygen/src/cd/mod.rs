//! Coxeter diagrams in the plaintext notation used by
//! [Klitzing](https://bendwavy.org/klitzing/explain/dynkin-notation.htm).
//!
//! A diagram such as `x4o3o` lists one node per mirror, with the edge between
//! consecutive nodes giving the angle between their mirrors.

mod error;
mod node;
mod parse;

use std::fmt;

use polymath::Float;

pub use error::{DiagramSyntaxError, Expected, Span, SyntaxErrorKind};
pub use node::{NODE_TYPES, NodeType};

/// Label on an edge between two nodes: mirrors meeting at an angle of
/// `π * den / num`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeLabel {
    /// Numerator, used for the length of relator words.
    pub num: u8,
    /// Denominator, which is 1 for non-star edges.
    pub den: u8,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.den {
            1 => write!(f, "{}", self.num),
            den => write!(f, "{}/{den}", self.num),
        }
    }
}

impl EdgeLabel {
    /// Label between a mirror and itself.
    pub const IDENTITY: Self = Self { num: 1, den: 1 };
    /// Label between orthogonal mirrors, which is omitted from diagrams.
    pub const ORTHOGONAL: Self = Self { num: 2, den: 1 };

    /// Returns the label as a real number.
    pub fn value(self) -> Float {
        self.num as Float / self.den as Float
    }
    /// Returns whether the label is a fraction (a star polygon edge).
    pub fn is_fractional(self) -> bool {
        self.den != 1
    }
}

/// How multiple subpolytopes in a diagram combine.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CombineMethod {
    /// Single polytope.
    #[default]
    None,
    /// Compound of several polytopes.
    Compound,
    /// Lace prism (`&#x`).
    LacePrism,
    /// Lace tower (`&#xt`).
    LaceTower,
    /// Lace tegum (`&#m`).
    LaceTegum,
    /// Lace ring (`&#xr`).
    LaceRing,
}

impl fmt::Display for CombineMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMethod::None => write!(f, "none"),
            CombineMethod::Compound => write!(f, "compound"),
            CombineMethod::LacePrism => write!(f, "lace prism"),
            CombineMethod::LaceTower => write!(f, "lace tower"),
            CombineMethod::LaceTegum => write!(f, "lace tegum"),
            CombineMethod::LaceRing => write!(f, "lace ring"),
        }
    }
}

/// Per-mirror data for one subpolytope.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeInfo {
    /// Symbol the node was written with.
    pub symbol: char,
    /// Distance from the mirror to the initial vertex.
    pub offset: Float,
    /// Whether the mirror generates edges.
    pub active: bool,
    /// Whether the node is a dual node.
    pub dual: bool,
    /// Whether the node is a snub node.
    pub snub: bool,
}

impl From<&NodeType> for NodeInfo {
    fn from(node: &NodeType) -> Self {
        Self {
            symbol: node.symbol,
            offset: node.offset(),
            active: node.is_active(),
            dual: node.dual,
            snub: node.snub,
        }
    }
}

/// One polytope in a (possibly compound or laced) diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Subpolytope {
    /// Node data, indexed by mirror.
    pub nodes: Vec<NodeInfo>,
}

impl Subpolytope {
    /// Returns the offset of each mirror.
    pub fn offsets(&self) -> Vec<Float> {
        self.nodes.iter().map(|node| node.offset).collect()
    }
    /// Returns whether each mirror is active.
    pub fn active_mirrors(&self) -> Vec<bool> {
        self.nodes.iter().map(|node| node.active).collect()
    }
}

/// Parsed Coxeter diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoxeterDiagram {
    source: String,
    /// Symmetric matrix of edge labels with [`EdgeLabel::IDENTITY`] on the
    /// diagonal.
    edge_labels: Vec<Vec<EdgeLabel>>,
    combine_method: CombineMethod,
    subpolytopes: Vec<Subpolytope>,
}

/// Structured description of a polytope, as parsed from a diagram.
pub type PolytopeDescription = CoxeterDiagram;

impl fmt::Display for CoxeterDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl CoxeterDiagram {
    /// Parses a Coxeter diagram.
    pub fn parse(diagram: &str) -> Result<Self, DiagramSyntaxError> {
        parse::DiagramParser::new(diagram).parse(diagram)
    }

    /// Returns the string that the diagram was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the number of nodes (mirrors) in the diagram.
    pub fn node_count(&self) -> usize {
        self.edge_labels.len()
    }
    /// Returns the number of nodes in each node group, which is the number of
    /// subpolytopes.
    pub fn group_size(&self) -> usize {
        self.subpolytopes.len()
    }

    /// Returns the label of the edge between two nodes.
    ///
    /// # Panics
    ///
    /// This method panics if either index is out of range.
    pub fn edge_label(&self, i: usize, j: usize) -> EdgeLabel {
        self.edge_labels[i][j]
    }
    /// Returns the matrix of edge labels.
    pub fn edge_labels(&self) -> &[Vec<EdgeLabel>] {
        &self.edge_labels
    }

    /// Returns the symmetry matrix, where mirrors `i` and `j` meet at an angle
    /// of `π / S[i][j]`.
    pub fn symmetry_matrix(&self) -> Vec<Vec<Float>> {
        self.map_labels(|label| label.value())
    }
    /// Returns the [Coxeter matrix](https://w.wiki/7SNw), which ignores the
    /// denominators of fractional edges.
    pub fn coxeter_matrix(&self) -> Vec<Vec<usize>> {
        self.map_labels(|label| label.num as usize)
    }
    fn map_labels<T>(&self, mut f: impl FnMut(EdgeLabel) -> T) -> Vec<Vec<T>> {
        self.edge_labels
            .iter()
            .map(|row| row.iter().map(|&label| f(label)).collect())
            .collect()
    }

    /// Returns whether any edge is fractional.
    pub fn is_fractional(&self) -> bool {
        self.edge_labels.iter().flatten().any(|l| l.is_fractional())
    }

    /// Returns how the subpolytopes combine.
    pub fn combine_method(&self) -> CombineMethod {
        self.combine_method
    }
    /// Returns the subpolytopes, one per node in each node group.
    pub fn subpolytopes(&self) -> &[Subpolytope] {
        &self.subpolytopes
    }
}

/// Parses a Coxeter diagram.
pub fn parse(diagram: &str) -> Result<PolytopeDescription, DiagramSyntaxError> {
    CoxeterDiagram::parse(diagram)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn parse_err(diagram: &str) -> DiagramSyntaxError {
        parse(diagram).expect_err("expected syntax error")
    }

    #[test]
    fn test_parse_linear() {
        let cd = parse("x4o3o").unwrap();
        assert_eq!(cd.node_count(), 3);
        assert_eq!(cd.group_size(), 1);
        assert_eq!(cd.combine_method(), CombineMethod::None);
        assert_eq!(cd.coxeter_matrix(), vec![vec![1, 4, 2], vec![4, 1, 3], vec![2, 3, 1]]);
        assert_eq!(
            cd.symmetry_matrix(),
            vec![vec![1.0, 4.0, 2.0], vec![4.0, 1.0, 3.0], vec![2.0, 3.0, 1.0]],
        );

        let nodes = &cd.subpolytopes()[0].nodes;
        assert_eq!(nodes.iter().map(|n| n.symbol).collect::<String>(), "xoo");
        assert_eq!(cd.subpolytopes()[0].offsets(), vec![0.5, 0.0, 0.0]);
        assert_eq!(cd.subpolytopes()[0].active_mirrors(), vec![true, false, false]);
    }

    #[test]
    fn test_parse_fractional() {
        let cd = parse("x5/2o3o").unwrap();
        assert!(cd.is_fractional());
        assert_eq!(cd.edge_label(0, 1), EdgeLabel { num: 5, den: 2 });
        assert_eq!(cd.coxeter_matrix()[0][1], 5);
        assert_eq!(cd.symmetry_matrix()[1][0], 2.5);
        assert_eq!(cd.edge_label(0, 1).to_string(), "5/2");
    }

    #[test]
    fn test_parse_whitespace_and_virtual_nodes() {
        // Prism: whitespace leaves mirrors orthogonal.
        let cd = parse("x x3o").unwrap();
        assert_eq!(cd.coxeter_matrix(), vec![vec![1, 2, 2], vec![2, 1, 3], vec![2, 3, 1]]);

        // D4: a branch written with a virtual node.
        let cd = parse("o3o3o *b3o").unwrap();
        assert_eq!(cd.node_count(), 4);
        assert_eq!(cd.edge_label(1, 3).num, 3);
        assert_eq!(cd.edge_label(2, 3).num, 2);
        assert_eq!(cd.edge_label(0, 3).num, 2);

        // Cycle closing back onto the first node.
        let cd = parse("x3o3o3*a").unwrap();
        assert_eq!(cd.edge_label(2, 0).num, 3);

        // Forward references are resolved at the end.
        let cd = parse("x3o *e4o o3o").unwrap();
        assert_eq!(cd.node_count(), 5);
        assert_eq!(cd.edge_label(4, 2).num, 4);
        assert_eq!(cd.edge_label(3, 4).num, 3);
    }

    #[test]
    fn test_parse_leading_virtual_node() {
        let e = parse_err("*c3x3o3o");
        assert_eq!(
            e.kind,
            SyntaxErrorKind::InvalidCharacter {
                found: '*',
                expected: Expected::Node,
            },
        );
        assert_eq!(e.span, Span::single(0));

        let e = parse_err("*a");
        assert_eq!(e.span, Span::single(0));
    }

    #[test]
    fn test_parse_compound_and_lace() {
        let cd = parse("xo4ox").unwrap();
        assert_eq!(cd.group_size(), 2);
        assert_eq!(cd.combine_method(), CombineMethod::Compound);
        assert_eq!(cd.subpolytopes()[1].nodes[0].symbol, 'o');
        assert_eq!(cd.subpolytopes()[1].nodes[1].symbol, 'x');

        for (suffix, method) in [
            ("&#x", CombineMethod::LacePrism),
            ("&#xt", CombineMethod::LaceTower),
            ("&#m", CombineMethod::LaceTegum),
            ("&#xr", CombineMethod::LaceRing),
        ] {
            let cd = parse(&format!("xo3ox{suffix}")).unwrap();
            assert_eq!(cd.combine_method(), method);
        }
        assert_eq!(parse("xo3ox &#x").unwrap().combine_method(), CombineMethod::LacePrism);
    }

    #[test]
    fn test_parse_flags() {
        let cd = parse("s4m3o").unwrap();
        let nodes = &cd.subpolytopes()[0].nodes;
        assert!(nodes[0].snub && !nodes[0].dual);
        assert!(nodes[1].dual && !nodes[1].snub);
        assert!(!nodes[2].active);
    }

    #[test]
    fn test_parse_errors() {
        let e = parse_err("x4o3o3*z");
        assert_eq!(
            e.kind,
            SyntaxErrorKind::VirtualNodeOutOfRange {
                letter: 'z',
                index: 25,
                node_count: 3,
            },
        );
        assert_eq!(e.span, Span::from(6..8));
        assert_eq!(e.span.slice("x4o3o3*z"), "*z");
        assert!(e.reasons[0].contains("*z"));

        let e = parse_err("");
        assert_eq!(e.kind, SyntaxErrorKind::MissingNode);

        let e = parse_err("x4o3");
        assert_eq!(e.kind, SyntaxErrorKind::MissingNode);
        assert_eq!(e.span, Span::from(4..4));

        let e = parse_err("4o3o");
        assert_eq!(
            e.kind,
            SyntaxErrorKind::InvalidCharacter {
                found: '4',
                expected: Expected::Node,
            },
        );
        assert_eq!(e.span, Span::single(0));

        let e = parse_err("x4y3o");
        assert_eq!(e.span, Span::single(2));
        assert!(e.reasons.len() > 1);

        let e = parse_err("xo4x");
        assert_eq!(e.kind, SyntaxErrorKind::GroupSizeMismatch { expected: 2, found: 1 });
        assert_eq!(e.span, Span::from(3..4));

        for bad in ["x123o", "x1o", "x5/5o", "x5/0o", "x5/o", "x0o"] {
            let e = parse_err(bad);
            assert!(
                matches!(e.kind, SyntaxErrorKind::MalformedInteger { .. }),
                "{bad}: {e}",
            );
            assert_eq!(e.span.start, 1);
        }

        let e = parse_err("x3o&#q");
        assert_eq!(
            e.kind,
            SyntaxErrorKind::InvalidLaceSuffix {
                suffix: "&#q".to_string(),
            },
        );
        assert_eq!(e.span, Span::from(3..6));
        assert!(matches!(parse_err("x3o&#").kind, SyntaxErrorKind::InvalidLaceSuffix { .. }));

        let e = parse_err("x3*a");
        assert_eq!(e.kind, SyntaxErrorKind::SelfLoop { node: 0 });

        let e = parse_err("x3o#");
        assert_eq!(
            e.kind,
            SyntaxErrorKind::InvalidCharacter {
                found: '#',
                expected: Expected::Edge,
            },
        );
    }

    #[test]
    fn test_parse_conflicting_edges() {
        let e = parse_err("x3o *a4*b");
        assert!(matches!(e.kind, SyntaxErrorKind::ConflictingEdge { .. }), "{e}");

        // Restating the same edge is fine.
        assert!(parse("x3o *a3*b").is_ok());
    }
}
