use std::collections::VecDeque;
use std::fmt;

use super::{Alphabet, CosetError, CosetResult, InvariantViolation, Word};
use crate::ti::{CosetId, GeneratorId, TypedIndex};

/// Liveness of a coset during enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CosetState {
    Alive,
    /// Coset has been identified with a smaller coset.
    MergedInto(CosetId),
}

/// Coset table under construction.
///
/// Rows are cosets and columns are generators (see [`Alphabet`]). Entries are
/// stored in a flat array in row-major order.
#[derive(Debug, Clone)]
pub struct CosetEnumeration {
    alphabet: Alphabet,
    relations: Vec<Word>,
    subgroup: Vec<Word>,

    table: Vec<Option<CosetId>>,
    states: Vec<CosetState>,
    /// Dead cosets whose entries have not yet been moved to their
    /// representative.
    queue: VecDeque<CosetId>,
}

impl CosetEnumeration {
    /// Constructs a coset enumeration with a single coset, which represents
    /// the subgroup generated by `subgroup`.
    pub fn new(alphabet: Alphabet, relations: Vec<Word>, subgroup: Vec<Word>) -> CosetResult<Self> {
        let columns = alphabet.column_count();
        for word in relations.iter().chain(&subgroup) {
            if let Some(g) = word.iter().find(|g| g.to_index() >= columns) {
                return Err(InvariantViolation::GeneratorOutOfRange(g).into());
            }
        }

        Ok(Self {
            alphabet,
            relations,
            subgroup,

            table: vec![None; columns],
            states: vec![CosetState::Alive],
            queue: VecDeque::new(),
        })
    }

    /// Constructs a coset enumeration from strings. Each character of
    /// `alphabet` is a generator. If `self_inverse` is false, then uppercase
    /// letters in words denote inverses.
    pub fn from_strings(
        alphabet: &str,
        relations: &[&str],
        subgroup: &[&str],
        self_inverse: bool,
    ) -> CosetResult<Self> {
        let alphabet = Alphabet::new(alphabet, self_inverse)?;
        let parse_all = |words: &[&str]| -> CosetResult<Vec<Word>> {
            words.iter().map(|w| alphabet.parse_word(w)).collect()
        };
        let relations = parse_all(relations)?;
        let subgroup = parse_all(subgroup)?;
        Self::new(alphabet, relations, subgroup)
    }

    /// Runs coset enumeration to completion, processing at most
    /// `max_iterations` live cosets.
    pub fn solve(mut self, max_iterations: usize) -> CosetResult<CosetTable> {
        log::debug!(
            "enumerating cosets over {} generator(s) with {} relation(s) and {} subgroup generator(s)",
            self.alphabet.generator_count(),
            self.relations.len(),
            self.subgroup.len(),
        );

        let relations = std::mem::take(&mut self.relations);
        let subgroup = std::mem::take(&mut self.subgroup);

        for word in &subgroup {
            self.scan_and_fill(CosetId::INIT, word)?;
        }

        let mut iterations = 0;
        let mut index = 0;
        while index < self.states.len() {
            let coset = CosetId::try_from_index(index)?;
            index += 1;
            if !self.is_alive(coset) {
                continue;
            }

            if iterations >= max_iterations {
                return Err(CosetError::IterationLimitExceeded {
                    max_iterations,
                    coset_count: self.live_count(),
                });
            }
            iterations += 1;

            for word in &relations {
                self.scan_and_fill(coset, word)?;
                if !self.is_alive(coset) {
                    break;
                }
            }

            if self.is_alive(coset) {
                for g in GeneratorId::iter(self.columns()) {
                    if self.entry(coset, g).is_none() {
                        self.define(coset, g)?;
                    }
                }
            }
        }

        log::debug!(
            "coset enumeration finished after {iterations} iteration(s) with {} of {} coset(s) alive",
            self.live_count(),
            self.states.len(),
        );

        self.compress()
    }

    fn columns(&self) -> usize {
        self.alphabet.column_count()
    }
    fn live_count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&s| s == CosetState::Alive)
            .count()
    }
    fn is_alive(&self, coset: CosetId) -> bool {
        self.states[coset.to_index()] == CosetState::Alive
    }

    fn entry(&self, coset: CosetId, g: GeneratorId) -> Option<CosetId> {
        self.table[coset.to_index() * self.columns() + g.to_index()]
    }
    fn set_entry(&mut self, coset: CosetId, g: GeneratorId, value: Option<CosetId>) {
        let i = coset.to_index() * self.columns() + g.to_index();
        self.table[i] = value;
    }

    /// Adds a new coset `coset * g`.
    fn define(&mut self, coset: CosetId, g: GeneratorId) -> CosetResult<CosetId> {
        let new = CosetId::try_from_index(self.states.len())?;
        self.states.push(CosetState::Alive);
        self.table.extend(std::iter::repeat_n(None, self.columns()));
        self.deduce(coset, g, new);
        Ok(new)
    }

    /// Records that `a * g = b`.
    fn deduce(&mut self, a: CosetId, g: GeneratorId, b: CosetId) {
        self.set_entry(a, g, Some(b));
        self.set_entry(b, self.alphabet.inverse(g), Some(a));
    }

    /// Scans `coset * word` from both ends, defining new cosets until the
    /// word closes up.
    fn scan_and_fill(&mut self, coset: CosetId, word: &Word) -> CosetResult<()> {
        let word = &word.0;
        if word.is_empty() {
            return Ok(());
        }

        let mut f = coset;
        let mut b = coset;
        // `word[i..j]` is the part not yet traced.
        let mut i = 0;
        let mut j = word.len();

        loop {
            while i < j
                && let Some(next) = self.entry(f, word[i])
            {
                f = next;
                i += 1;
            }
            if i == j {
                self.coincidence(f, b);
                return Ok(());
            }

            while j > i
                && let Some(prev) = self.entry(b, self.alphabet.inverse(word[j - 1]))
            {
                b = prev;
                j -= 1;
            }
            if j == i {
                self.coincidence(f, b);
                return Ok(());
            }
            if j == i + 1 {
                self.deduce(f, word[i], b);
                return Ok(());
            }

            self.define(f, word[i])?;
        }
    }

    /// Returns the live coset that `coset` has been merged into, compressing
    /// the path along the way.
    fn rep(&mut self, coset: CosetId) -> CosetId {
        let mut root = coset;
        while let CosetState::MergedInto(parent) = self.states[root.to_index()] {
            root = parent;
        }

        let mut c = coset;
        while let CosetState::MergedInto(parent) = self.states[c.to_index()] {
            self.states[c.to_index()] = CosetState::MergedInto(root);
            c = parent;
        }

        root
    }

    /// Marks the larger of two cosets as dead.
    fn merge(&mut self, a: CosetId, b: CosetId) {
        let a = self.rep(a);
        let b = self.rep(b);
        if a == b {
            return;
        }
        let (keep, lose) = (std::cmp::min(a, b), std::cmp::max(a, b));
        log::trace!("merging coset {lose} into {keep}");
        self.states[lose.to_index()] = CosetState::MergedInto(keep);
        self.queue.push_back(lose);
    }

    /// Identifies two cosets and processes every consequence of doing so.
    fn coincidence(&mut self, a: CosetId, b: CosetId) {
        self.merge(a, b);

        while let Some(dead) = self.queue.pop_front() {
            for g in GeneratorId::iter(self.columns()) {
                let Some(target) = self.entry(dead, g) else {
                    continue;
                };
                let g_inv = self.alphabet.inverse(g);
                self.set_entry(target, g_inv, None);

                let mu = self.rep(dead);
                let nu = self.rep(target);
                if let Some(existing) = self.entry(mu, g) {
                    self.merge(nu, existing);
                } else if let Some(existing) = self.entry(nu, g_inv) {
                    self.merge(mu, existing);
                } else {
                    self.set_entry(mu, g, Some(nu));
                    self.set_entry(nu, g_inv, Some(mu));
                }
            }
        }
    }

    /// Renumbers live cosets consecutively and drops dead ones.
    fn compress(self) -> CosetResult<CosetTable> {
        let columns = self.columns();

        let mut new_ids = vec![None; self.states.len()];
        let mut len = 0;
        for (old, state) in self.states.iter().enumerate() {
            if *state == CosetState::Alive {
                new_ids[old] = Some(CosetId::try_from_index(len)?);
                len += 1;
            }
        }

        let mut table = Vec::with_capacity(len * columns);
        for (old, new) in new_ids.iter().enumerate() {
            let Some(new) = *new else { continue };
            for g in GeneratorId::iter(columns) {
                let target = self.table[old * columns + g.to_index()]
                    .ok_or(InvariantViolation::UndefinedEntry { coset: new, generator: g })?;
                let target = new_ids[target.to_index()].ok_or(InvariantViolation::DeadReference {
                    coset: new,
                    target,
                })?;
                table.push(target);
            }
        }

        CosetTable::new(self.alphabet, table, len)
    }
}

/// Complete coset table.
///
/// Every entry is defined, and `table[table[c][g]][g⁻¹] = c` for every coset
/// `c` and generator `g`.
#[derive(Clone)]
pub struct CosetTable {
    alphabet: Alphabet,
    table: Vec<CosetId>,
    len: usize,
    /// Shortest word leading from the initial coset to each coset.
    representatives: Vec<Word>,
}

impl fmt::Debug for CosetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosetTable")
            .field("alphabet", &self.alphabet)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl CosetTable {
    fn new(alphabet: Alphabet, table: Vec<CosetId>, len: usize) -> CosetResult<Self> {
        let columns = alphabet.column_count();

        // Breadth-first search, following only generators (not inverses).
        let mut representatives: Vec<Option<Word>> = vec![None; len];
        representatives[0] = Some(Word::EMPTY);
        let mut queue = VecDeque::from([CosetId::INIT]);
        while let Some(coset) = queue.pop_front() {
            let word = representatives[coset.to_index()].clone().unwrap_or_default();
            for g in GeneratorId::iter(columns).filter(|&g| alphabet.is_forward(g)) {
                let target = table[coset.to_index() * columns + g.to_index()];
                if representatives[target.to_index()].is_none() {
                    let mut new_word = word.clone();
                    new_word.push(g);
                    representatives[target.to_index()] = Some(new_word);
                    queue.push_back(target);
                }
            }
        }

        let representatives = representatives
            .into_iter()
            .enumerate()
            .map(|(i, word)| word.ok_or(InvariantViolation::Unreachable(CosetId(i as u32))))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            alphabet,
            table,
            len,
            representatives,
        })
    }

    /// Returns the number of cosets, which is the index of the subgroup.
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns `false`. A coset table always contains the initial coset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Returns the alphabet of the table.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    /// Returns an iterator over all cosets.
    pub fn cosets(&self) -> impl Iterator<Item = CosetId> {
        CosetId::iter(self.len)
    }

    /// Returns `coset * g`, or `None` if either is out of range.
    pub fn get_entry(&self, coset: CosetId, g: GeneratorId) -> Option<CosetId> {
        let columns = self.alphabet.column_count();
        if coset.to_index() >= self.len || g.to_index() >= columns {
            return None;
        }
        Some(self.table[coset.to_index() * columns + g.to_index()])
    }

    /// Returns `coset * word`.
    pub fn apply_word(&self, coset: CosetId, word: &Word) -> CosetResult<CosetId> {
        if coset.to_index() >= self.len {
            return Err(InvariantViolation::CosetOutOfRange {
                coset,
                len: self.len,
            }
            .into());
        }
        word.iter().try_fold(coset, |c, g| {
            self.get_entry(c, g)
                .ok_or(InvariantViolation::GeneratorOutOfRange(g).into())
        })
    }

    /// Returns the shortest word leading from the initial coset to each coset.
    /// The word for the initial coset is empty.
    pub fn representatives(&self) -> &[Word] {
        &self.representatives
    }
    /// Returns the representative of each coset as a string.
    pub fn representative_strings(&self) -> Vec<String> {
        self.representatives
            .iter()
            .map(|w| self.alphabet.format_word(w))
            .collect()
    }

    /// Returns the rows of the table, one entry per column.
    pub fn rows(&self) -> impl '_ + Iterator<Item = &[CosetId]> {
        self.table.chunks(self.alphabet.column_count().max(1)).take(self.len)
    }
}
