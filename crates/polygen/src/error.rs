use crate::cd::{CombineMethod, DiagramSyntaxError, EdgeLabel};
use crate::coset::CosetError;

/// Result type for polytope generation.
pub type PolygenResult<T, E = PolygenError> = Result<T, E>;

/// Error generating a polytope.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum PolygenError {
    #[error("syntax error: {0}")]
    Syntax(#[from] DiagramSyntaxError),
    #[error("unsupported: {0}")]
    Unsupported(#[from] UnsupportedFeatureError),
    #[error(transparent)]
    Coset(#[from] CosetError),
    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

/// Diagram that parses successfully but describes something the assembler
/// does not build.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UnsupportedFeatureError {
    #[error("{0} polytopes are not supported")]
    CombineMethod(CombineMethod),
    #[error("dual node at index {index} is not supported")]
    DualNode { index: usize },
    #[error("snub node at index {index} is not supported")]
    SnubNode { index: usize },
    #[error("fractional edge {label} between nodes {i} and {j} is not supported")]
    FractionalSymmetry { i: usize, j: usize, label: EdgeLabel },
    #[error("{ndim}-dimensional polytopes are not supported (expected {min} to {max} dimensions)")]
    Dimension { ndim: usize, min: usize, max: usize },
}

/// Mirror arrangement that cannot be placed in Euclidean space.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum MirrorError {
    #[error(
        "mirrors are not realizable in Euclidean space \
         (mirror {index} would have squared length {remainder})"
    )]
    Unrealizable { index: usize, remainder: f64 },
    #[error("mirror normals are linearly dependent")]
    Singular,
    #[error("expected {expected} offsets but got {found}")]
    OffsetCount { expected: usize, found: usize },
}
