//! Coxeter diagram parser.
//!
//! The parser alternates between node slots and edge slots. A node slot is a
//! run of node symbols (one per subpolytope) or a virtual node `*a`..`*z`. An
//! edge slot is whitespace (no edge), an integer, or a fraction, optionally
//! followed by a lace suffix at the end of the diagram.

use std::iter::{Enumerate, Peekable};
use std::str::Chars;

use super::error::{DiagramSyntaxError, Expected, Span, SyntaxErrorKind};
use super::{CombineMethod, CoxeterDiagram, EdgeLabel, NodeInfo, NodeType, Subpolytope};

type Result<T, E = DiagramSyntaxError> = std::result::Result<T, E>;

/// Group of node symbols occupying one position in the diagram.
#[derive(Debug, Clone)]
struct NodeGroup {
    nodes: Vec<&'static NodeType>,
}

/// Explicit edge between two node positions.
#[derive(Debug, Copy, Clone)]
struct ParsedEdge {
    from: usize,
    to: usize,
    label: EdgeLabel,
    span: Span,
}

/// Reference to a node by letter, validated once the whole diagram is read.
#[derive(Debug, Copy, Clone)]
struct VirtualNode {
    letter: char,
    index: usize,
    span: Span,
}

pub(super) struct DiagramParser<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
    char_count: usize,

    node_groups: Vec<NodeGroup>,
    edges: Vec<ParsedEdge>,
    virtual_nodes: Vec<VirtualNode>,
    combine_method: Option<CombineMethod>,
}

impl<'a> DiagramParser<'a> {
    pub(super) fn new(diagram: &'a str) -> Self {
        Self {
            chars: diagram.chars().enumerate().peekable(),
            char_count: diagram.chars().count(),

            node_groups: vec![],
            edges: vec![],
            virtual_nodes: vec![],
            combine_method: None,
        }
    }

    pub(super) fn parse(mut self, source: &str) -> Result<CoxeterDiagram> {
        // Node that the next edge starts from.
        let mut prev: Option<usize> = None;
        // Explicit edge waiting for its destination node.
        let mut pending_edge: Option<(EdgeLabel, Span)> = None;

        loop {
            let to = self.parse_node_slot()?;
            if let (Some(from), Some((label, span))) = (prev, pending_edge.take()) {
                self.edges.push(ParsedEdge {
                    from,
                    to,
                    label,
                    span,
                });
            }
            prev = Some(to);

            match self.parse_edge_slot()? {
                EdgeSlot::End => break,
                EdgeSlot::Implicit => (),
                EdgeSlot::Explicit(label, span) => pending_edge = Some((label, span)),
            }
        }

        self.finish(source)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.char_count, |&(i, _)| i)
    }
    fn next_if(&mut self, f: impl FnOnce(char) -> bool) -> Option<(usize, char)> {
        self.chars.next_if(|&(_, c)| f(c))
    }

    /// Parses a node group or virtual node and returns its index.
    fn parse_node_slot(&mut self) -> Result<usize> {
        let start = self.pos();
        match self.peek() {
            None => Err(DiagramSyntaxError::new(
                SyntaxErrorKind::MissingNode,
                Span::from(start..start),
            )),

            // A diagram must start with a real node.
            Some('*') if self.node_groups.is_empty() => {
                Err(self.invalid_character(Expected::Node))
            }
            Some('*') => {
                self.chars.next();
                let letter_pos = self.pos();
                match self.next_if(|c| c.is_ascii_lowercase()) {
                    Some((_, letter)) => {
                        let index = (letter as u8 - b'a') as usize;
                        self.virtual_nodes.push(VirtualNode {
                            letter,
                            index,
                            span: Span::from(start..letter_pos + 1),
                        });
                        Ok(index)
                    }
                    None => Err(self.invalid_character(Expected::VirtualNodeLetter)),
                }
            }

            Some(c) if NodeType::from_char(c).is_some() => {
                let mut nodes = vec![];
                while let Some((_, c)) = self.next_if(|c| NodeType::from_char(c).is_some()) {
                    nodes.extend(NodeType::from_char(c));
                }
                let span = Span::from(start..self.pos());

                if let Some(first) = self.node_groups.first()
                    && first.nodes.len() != nodes.len()
                {
                    return Err(DiagramSyntaxError::new(
                        SyntaxErrorKind::GroupSizeMismatch {
                            expected: first.nodes.len(),
                            found: nodes.len(),
                        },
                        span,
                    ));
                }

                self.node_groups.push(NodeGroup { nodes });
                Ok(self.node_groups.len() - 1)
            }

            Some(_) => Err(self.invalid_character(Expected::Node)),
        }
    }

    fn parse_edge_slot(&mut self) -> Result<EdgeSlot> {
        match self.peek() {
            None => Ok(EdgeSlot::End),

            Some('&') => {
                self.parse_lace_suffix()?;
                Ok(EdgeSlot::End)
            }

            Some(c) if c.is_whitespace() => {
                while self.next_if(char::is_whitespace).is_some() {}
                match self.peek() {
                    None => Ok(EdgeSlot::End),
                    Some('&') => {
                        self.parse_lace_suffix()?;
                        Ok(EdgeSlot::End)
                    }
                    Some(_) => Ok(EdgeSlot::Implicit),
                }
            }

            Some(c) if c.is_ascii_digit() => {
                let start = self.pos();
                let num = self.parse_digits();
                let den = match self.next_if(|c| c == '/') {
                    Some(_) => Some(self.parse_digits()),
                    None => None,
                };
                let span = Span::from(start..self.pos());

                let malformed = || {
                    let text = match &den {
                        Some(den) => format!("{num}/{den}"),
                        None => num.clone(),
                    };
                    DiagramSyntaxError::new(SyntaxErrorKind::MalformedInteger { text }, span)
                };

                let num = parse_small_int(&num).ok_or_else(malformed)?;
                let den = match &den {
                    Some(den) => parse_small_int(den).ok_or_else(malformed)?,
                    None => 1,
                };
                if num < 2 || den < 1 || den >= num {
                    return Err(malformed());
                }

                Ok(EdgeSlot::Explicit(EdgeLabel { num, den }, span))
            }

            Some(_) => Err(self.invalid_character(Expected::Edge)),
        }
    }

    fn parse_digits(&mut self) -> String {
        let mut s = String::new();
        while let Some((_, c)) = self.next_if(|c| c.is_ascii_digit()) {
            s.push(c);
        }
        s
    }

    /// Parses a lace suffix, which must run to the end of the diagram.
    fn parse_lace_suffix(&mut self) -> Result<()> {
        let start = self.pos();
        let suffix: String = self.chars.by_ref().map(|(_, c)| c).collect();
        let span = Span::from(start..self.char_count);
        self.combine_method = Some(match suffix.as_str() {
            "&#x" => CombineMethod::LacePrism,
            "&#xt" => CombineMethod::LaceTower,
            "&#m" => CombineMethod::LaceTegum,
            "&#xr" => CombineMethod::LaceRing,
            _ => {
                return Err(DiagramSyntaxError::new(
                    SyntaxErrorKind::InvalidLaceSuffix { suffix },
                    span,
                ));
            }
        });
        Ok(())
    }

    fn invalid_character(&mut self, expected: Expected) -> DiagramSyntaxError {
        let pos = self.pos();
        match self.peek() {
            Some(found) => DiagramSyntaxError::new(
                SyntaxErrorKind::InvalidCharacter { found, expected },
                Span::single(pos),
            ),
            None => DiagramSyntaxError::new(SyntaxErrorKind::MissingNode, Span::from(pos..pos)),
        }
    }

    fn finish(self, source: &str) -> Result<CoxeterDiagram> {
        let node_count = self.node_groups.len();
        let group_size = self.node_groups.first().map_or(0, |g| g.nodes.len());

        for v in &self.virtual_nodes {
            if v.index >= node_count {
                return Err(DiagramSyntaxError::new(
                    SyntaxErrorKind::VirtualNodeOutOfRange {
                        letter: v.letter,
                        index: v.index,
                        node_count,
                    },
                    v.span,
                ));
            }
        }

        let mut labels = vec![vec![EdgeLabel::ORTHOGONAL; node_count]; node_count];
        let mut explicit = vec![vec![false; node_count]; node_count];
        for i in 0..node_count {
            labels[i][i] = EdgeLabel::IDENTITY;
        }
        for edge in &self.edges {
            let (i, j) = (edge.from, edge.to);
            if i == j {
                return Err(DiagramSyntaxError::new(
                    SyntaxErrorKind::SelfLoop { node: i },
                    edge.span,
                ));
            }
            if explicit[i][j] && labels[i][j] != edge.label {
                return Err(DiagramSyntaxError::new(
                    SyntaxErrorKind::ConflictingEdge {
                        i: i.min(j),
                        j: i.max(j),
                        first: labels[i][j],
                        second: edge.label,
                    },
                    edge.span,
                ));
            }
            labels[i][j] = edge.label;
            labels[j][i] = edge.label;
            explicit[i][j] = true;
            explicit[j][i] = true;
        }

        let combine_method = match self.combine_method {
            Some(method) => method,
            None if group_size > 1 => CombineMethod::Compound,
            None => CombineMethod::None,
        };

        let subpolytopes = (0..group_size)
            .map(|k| Subpolytope {
                nodes: self
                    .node_groups
                    .iter()
                    .map(|group| NodeInfo::from(group.nodes[k]))
                    .collect(),
            })
            .collect();

        log::trace!("parsed diagram {source:?} with {node_count} node(s)");

        Ok(CoxeterDiagram {
            source: source.to_string(),
            edge_labels: labels,
            combine_method,
            subpolytopes,
        })
    }
}

/// Contents of an edge slot.
enum EdgeSlot {
    /// End of the diagram.
    End,
    /// Whitespace, which adds no edge.
    Implicit,
    /// Explicit edge label.
    Explicit(EdgeLabel, Span),
}

/// Parses a one- or two-digit integer.
fn parse_small_int(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 {
        return None;
    }
    s.parse().ok()
}
