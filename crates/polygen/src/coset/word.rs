use std::fmt;

use itertools::Itertools;
use smallvec::SmallVec;

use super::{CosetError, CosetResult};
use crate::ti::{GeneratorId, TypedIndex};

/// Sequence of generators, applied left to right.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Word(pub SmallVec<[GeneratorId; 16]>);

impl Word {
    /// The empty word, which represents the identity.
    pub const EMPTY: Self = Self(SmallVec::new_const());

    /// Constructs a new word.
    pub fn new(generators: impl IntoIterator<Item = GeneratorId>) -> Self {
        Self::from_iter(generators)
    }

    /// Constructs the word `abab...` of length `len`.
    pub fn alternating(a: GeneratorId, b: GeneratorId, len: usize) -> Self {
        [a, b].into_iter().cycle().take(len).collect()
    }

    /// Returns the number of generators in the word.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the word is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns an iterator over the generators in the word.
    pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = GeneratorId> {
        self.0.iter().copied()
    }

    /// Appends a generator to the end of the word.
    pub fn push(&mut self, generator: GeneratorId) {
        self.0.push(generator);
    }

    /// Returns the word with its generators in reverse order, which is its
    /// inverse when every generator is self-inverse.
    #[must_use]
    pub fn reversed(&self) -> Self {
        self.iter().rev().collect()
    }

    /// Returns the concatenation of two words.
    #[must_use]
    pub fn then(&self, other: &Word) -> Self {
        self.iter().chain(other.iter()).collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().map(|g| g.0).join(", "))
    }
}

impl FromIterator<GeneratorId> for Word {
    fn from_iter<T: IntoIterator<Item = GeneratorId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns the relator words of a Coxeter group: `(gi gj)^C[i][j]` for every
/// pair of generators `i < j`.
pub fn coxeter_relations(coxeter_matrix: &[Vec<usize>]) -> Vec<Word> {
    let n = coxeter_matrix.len();
    (0..n)
        .tuple_combinations()
        .map(|(i, j)| {
            Word::alternating(
                GeneratorId(i as u8),
                GeneratorId(j as u8),
                2 * coxeter_matrix[i][j],
            )
        })
        .collect()
}

/// Set of generator symbols.
///
/// If generators are self-inverse, then each generator occupies one column of
/// the coset table. Otherwise each generator occupies two columns: the even
/// column for the generator and the odd column for its inverse. Inverses are
/// written in uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    self_inverse: bool,
}

impl Alphabet {
    /// Constructs an alphabet from a string of unique symbols.
    pub fn new(symbols: &str, self_inverse: bool) -> CosetResult<Self> {
        let symbols = symbols.chars().filter(|c| !c.is_whitespace()).collect_vec();
        for (i, &c) in symbols.iter().enumerate() {
            if symbols[..i].contains(&c) {
                return Err(CosetError::DuplicateSymbol(c));
            }
            if !self_inverse && !c.is_ascii_lowercase() {
                return Err(CosetError::BadSymbol(c));
            }
        }

        let ret = Self {
            symbols,
            self_inverse,
        };
        GeneratorId::try_from_index(ret.column_count())?;
        Ok(ret)
    }

    /// Constructs the alphabet `abc...` of self-inverse generators for a
    /// Coxeter group with `n` generators.
    pub fn coxeter(n: usize) -> CosetResult<Self> {
        let symbols: String = ('a'..='z').take(n).collect();
        if symbols.len() < n {
            return Err(CosetError::TooManyGenerators(n));
        }
        Self::new(&symbols, true)
    }

    /// Returns the sub-alphabet containing only the given generators, in the
    /// given order.
    pub fn restrict(&self, generators: &[usize]) -> CosetResult<Self> {
        let symbols: String = generators
            .iter()
            .map(|&i| self.symbols.get(i).copied())
            .collect::<Option<_>>()
            .ok_or(CosetError::TooManyGenerators(generators.len()))?;
        Self::new(&symbols, self.self_inverse)
    }

    /// Returns the number of generators, not counting inverses.
    pub fn generator_count(&self) -> usize {
        self.symbols.len()
    }
    /// Returns the number of columns in a coset table over this alphabet.
    pub fn column_count(&self) -> usize {
        match self.self_inverse {
            true => self.symbols.len(),
            false => self.symbols.len() * 2,
        }
    }
    /// Returns whether every generator is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        self.self_inverse
    }

    /// Returns the column for the `i`th generator.
    pub fn generator(&self, i: usize) -> GeneratorId {
        match self.self_inverse {
            true => GeneratorId(i as u8),
            false => GeneratorId(i as u8 * 2),
        }
    }
    /// Returns the column for the inverse of a generator.
    pub fn inverse(&self, g: GeneratorId) -> GeneratorId {
        match self.self_inverse {
            true => g,
            false => GeneratorId(g.0 ^ 1),
        }
    }
    /// Returns whether a column is a generator rather than an inverse.
    pub fn is_forward(&self, g: GeneratorId) -> bool {
        self.self_inverse || g.0 % 2 == 0
    }

    /// Returns the symbol for a column.
    pub fn symbol(&self, g: GeneratorId) -> Option<char> {
        if self.self_inverse {
            self.symbols.get(g.to_index()).copied()
        } else {
            let c = self.symbols.get(g.to_index() / 2).copied()?;
            Some(match self.is_forward(g) {
                true => c,
                false => c.to_ascii_uppercase(),
            })
        }
    }

    /// Parses a word. Whitespace is ignored.
    pub fn parse_word(&self, s: &str) -> CosetResult<Word> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                if let Some(i) = self.symbols.iter().position(|&sym| sym == c) {
                    Ok(self.generator(i))
                } else if let Some(i) = (!self.self_inverse)
                    .then(|| self.symbols.iter().position(|&sym| sym.to_ascii_uppercase() == c))
                    .flatten()
                {
                    Ok(self.inverse(self.generator(i)))
                } else {
                    Err(CosetError::UnknownSymbol {
                        symbol: c,
                        word: s.to_string(),
                    })
                }
            })
            .collect()
    }

    /// Formats a word using the symbols of the alphabet.
    pub fn format_word(&self, word: &Word) -> String {
        word.iter()
            .map(|g| self.symbol(g).unwrap_or('?'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_alphabet_self_inverse() {
        let alphabet = Alphabet::new("abc", true).unwrap();
        assert_eq!(alphabet.column_count(), 3);
        let w = alphabet.parse_word("ab ca").unwrap();
        assert_eq!(w, Word::new([0, 1, 2, 0].map(GeneratorId)));
        assert_eq!(alphabet.format_word(&w), "abca");
        assert_eq!(alphabet.format_word(&w.reversed()), "acba");
        assert!(matches!(
            alphabet.parse_word("abd"),
            Err(CosetError::UnknownSymbol { symbol: 'd', .. }),
        ));
        assert!(alphabet.parse_word("A").is_err());
    }

    #[test]
    fn test_alphabet_with_inverses() {
        let alphabet = Alphabet::new("ab", false).unwrap();
        assert_eq!(alphabet.column_count(), 4);
        let w = alphabet.parse_word("aBA").unwrap();
        assert_eq!(w, Word::new([0, 3, 1].map(GeneratorId)));
        assert_eq!(alphabet.format_word(&w), "aBA");
        assert_eq!(alphabet.inverse(GeneratorId(2)), GeneratorId(3));
        assert!(alphabet.is_forward(GeneratorId(2)));
        assert!(!alphabet.is_forward(GeneratorId(3)));

        assert_eq!(Alphabet::new("aB", false), Err(CosetError::BadSymbol('B')));
    }

    #[test]
    fn test_alphabet_errors() {
        assert_eq!(Alphabet::new("aba", true), Err(CosetError::DuplicateSymbol('a')));
        assert_eq!(Alphabet::coxeter(27), Err(CosetError::TooManyGenerators(27)));
        let alphabet = Alphabet::coxeter(4).unwrap();
        assert_eq!(alphabet.format_word(&alphabet.parse_word("dcba").unwrap()), "dcba");
        let sub = alphabet.restrict(&[1, 3]).unwrap();
        assert_eq!(sub.format_word(&Word::new([0, 1].map(GeneratorId))), "bd");
    }

    #[test]
    fn test_coxeter_relations() {
        let alphabet = Alphabet::coxeter(3).unwrap();
        let relations = coxeter_relations(&[vec![1, 4, 2], vec![4, 1, 3], vec![2, 3, 1]]);
        let relations = relations.iter().map(|w| alphabet.format_word(w)).collect_vec();
        assert_eq!(relations, ["abababab", "acac", "bcbcbc"]);
        assert_eq!(
            Word::alternating(GeneratorId(1), GeneratorId(0), 3),
            Word::new([1, 0, 1].map(GeneratorId)),
        );
        assert_eq!(Word::alternating(GeneratorId(1), GeneratorId(0), 3).to_string(), "[1, 0, 1]");
        assert_eq!(Word::EMPTY.to_string(), "[]");
    }
}
