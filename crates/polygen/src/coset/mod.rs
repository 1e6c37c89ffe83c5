//! Todd-Coxeter coset enumeration.
//!
//! Given a group presentation (generators and relator words) and a list of
//! words generating a subgroup, [`CosetEnumeration`] builds the table of right
//! cosets of the subgroup using the Hasselgrove-Leech-Trotter strategy.

mod family;
mod table;
mod word;

pub use family::CoxeterFamily;
pub use table::{CosetEnumeration, CosetTable};
pub use word::{Alphabet, Word, coxeter_relations};

use crate::ti::{CosetId, GeneratorId, IndexOverflow};

/// Result type for coset enumeration.
pub type CosetResult<T, E = CosetError> = Result<T, E>;

/// Error during coset enumeration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CosetError {
    #[error("duplicate generator symbol {0:?}")]
    DuplicateSymbol(char),
    #[error(
        "generator symbol {0:?} must be a lowercase ASCII letter \
         when generators are not self-inverse"
    )]
    BadSymbol(char),
    #[error("too many generators ({0})")]
    TooManyGenerators(usize),
    #[error("unknown generator symbol {symbol:?} in word {word:?}")]
    UnknownSymbol { symbol: char, word: String },
    #[error(
        "coset enumeration exceeded {max_iterations} iterations \
         with {coset_count} live cosets"
    )]
    IterationLimitExceeded {
        max_iterations: usize,
        coset_count: usize,
    },
    #[error("coset table invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
    #[error(transparent)]
    IndexOverflow(#[from] IndexOverflow),
}

/// Internal inconsistency in a coset table.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum InvariantViolation {
    #[error("coset {coset} has no entry for generator {generator}")]
    UndefinedEntry { coset: CosetId, generator: GeneratorId },
    #[error("coset {coset} refers to dead coset {target}")]
    DeadReference { coset: CosetId, target: CosetId },
    #[error("coset {0} is not reachable from the initial coset")]
    Unreachable(CosetId),
    #[error("coset {coset} is out of range for table of {len} cosets")]
    CosetOutOfRange { coset: CosetId, len: usize },
    #[error("generator {0} is out of range")]
    GeneratorOutOfRange(GeneratorId),
}
