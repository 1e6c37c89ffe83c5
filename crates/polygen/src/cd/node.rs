//! Node symbols and their canonical edge lengths.

use polymath::Float;

/// Type of node that can appear in a Coxeter diagram.
///
/// See <https://polytope.miraheze.org/wiki/Coxeter_diagram> for a description
/// of each symbol.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeType {
    /// Character used to write the node.
    pub symbol: char,
    /// Length of the edges generated by the node's mirror, or zero if the
    /// mirror is inactive.
    pub edge_length: Float,
    /// Whether the node denotes a snub (alternated) node.
    pub snub: bool,
    /// Whether the node denotes a dual node.
    pub dual: bool,
}

impl NodeType {
    const fn new(symbol: char, edge_length: Float) -> Self {
        Self {
            symbol,
            edge_length,
            snub: false,
            dual: false,
        }
    }
    const fn snub(self) -> Self {
        Self { snub: true, ..self }
    }
    const fn dual(self) -> Self {
        Self { dual: true, ..self }
    }

    /// Returns the node type for a character, or `None` if the character is not
    /// a node symbol.
    pub fn from_char(c: char) -> Option<&'static NodeType> {
        NODE_TYPES.iter().find(|node| node.symbol == c)
    }

    /// Returns whether the node's mirror generates edges.
    pub fn is_active(&self) -> bool {
        self.edge_length != 0.0
    }

    /// Returns the distance from the mirror to the initial vertex: half the
    /// edge length.
    pub fn offset(&self) -> Float {
        self.edge_length / 2.0
    }
}

/// Every node symbol, in the order they are usually listed.
#[rustfmt::skip]
pub const NODE_TYPES: [NodeType; 20] = [
    NodeType::new('o', 0.0),
    NodeType::new('v', 0.618_033_988_749_894_9),        // (sqrt(5) - 1) / 2
    NodeType::new('x', 1.0),
    NodeType::new('s', 1.0).snub(),
    NodeType::new('m', 1.0).dual(),
    NodeType::new('p', std::f64::consts::SQRT_2).dual(),
    NodeType::new('q', std::f64::consts::SQRT_2),
    NodeType::new('f', 1.618_033_988_749_895),          // (sqrt(5) + 1) / 2
    NodeType::new('h', 1.732_050_807_568_877_2),        // sqrt(3)
    NodeType::new('k', 1.847_759_065_022_573_5),        // sqrt(2 + sqrt(2))
    NodeType::new('u', 2.0),
    NodeType::new('w', 2.414_213_562_373_095),          // sqrt(2) + 1
    NodeType::new('F', 2.618_033_988_749_895),          // (sqrt(5) + 3) / 2
    NodeType::new('Q', 2.828_427_124_746_190_3),        // 2 sqrt(2)
    NodeType::new('d', 3.0),
    NodeType::new('V', 3.236_067_977_499_79),           // sqrt(5) + 1
    NodeType::new('U', 3.414_213_562_373_095),          // sqrt(2) + 2
    NodeType::new('A', 1.809_016_994_374_947_5),        // (sqrt(5) + 1) / 4 + 1
    NodeType::new('X', 3.828_427_124_746_190_3),        // 2 sqrt(2) + 1
    NodeType::new('B', 4.236_067_977_499_79),           // sqrt(5) + 2
];
