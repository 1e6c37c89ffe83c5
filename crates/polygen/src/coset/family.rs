use std::fmt;

use super::{Alphabet, CosetResult, Word, coxeter_relations};

/// Irreducible [finite Coxeter group](https://w.wiki/7PLd).
///
/// See also: [Coxeter-Dynkin diagram](https://w.wiki/7PLe)
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoxeterFamily {
    A(u8),
    B(u8),
    D(u8),
    E6,
    E7,
    E8,
    F4,
    G2,
    H2,
    H3,
    H4,
    I(u8),
}

impl fmt::Display for CoxeterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoxeterFamily::A(n) => write!(f, "A{n}"),
            CoxeterFamily::B(n) => write!(f, "B{n}"),
            CoxeterFamily::D(n) => write!(f, "D{n}"),
            CoxeterFamily::E6 => write!(f, "E6"),
            CoxeterFamily::E7 => write!(f, "E7"),
            CoxeterFamily::E8 => write!(f, "E8"),
            CoxeterFamily::F4 => write!(f, "F4"),
            CoxeterFamily::G2 => write!(f, "G2"),
            CoxeterFamily::H2 => write!(f, "H2"),
            CoxeterFamily::H3 => write!(f, "H3"),
            CoxeterFamily::H4 => write!(f, "H4"),
            CoxeterFamily::I(n) => write!(f, "I2({n})"),
        }
    }
}

impl CoxeterFamily {
    /// Returns the number of generators for the group.
    pub fn generator_count(self) -> usize {
        match self {
            CoxeterFamily::A(n) | CoxeterFamily::B(n) | CoxeterFamily::D(n) => n as usize,
            CoxeterFamily::E6 => 6,
            CoxeterFamily::E7 => 7,
            CoxeterFamily::E8 => 8,
            CoxeterFamily::F4 | CoxeterFamily::H4 => 4,
            CoxeterFamily::H3 => 3,
            CoxeterFamily::G2 | CoxeterFamily::H2 | CoxeterFamily::I(_) => 2,
        }
    }

    /// Returns an element of the group's [Coxeter matrix](https://w.wiki/7SNw).
    /// Indices out of range are treated as unconnected nodes.
    pub fn coxeter_matrix_element(self, i: usize, j: usize) -> usize {
        let (i, j) = (std::cmp::min(i, j), std::cmp::max(i, j));
        if i == j {
            return 1;
        }
        if j >= self.generator_count() {
            return 2;
        }

        match self {
            // Linear diagrams
            CoxeterFamily::A(_) if j == 1 => 3,
            CoxeterFamily::B(_) if j == 1 => 4,
            CoxeterFamily::H2 | CoxeterFamily::H3 | CoxeterFamily::H4 if j == 1 => 5,

            // Branched diagrams
            CoxeterFamily::D(_) if i == 0 && j == 2 => 3,
            CoxeterFamily::E6 | CoxeterFamily::E7 | CoxeterFamily::E8 if i == 0 && j == 3 => 3,

            CoxeterFamily::F4 if j == 1 => 3,
            CoxeterFamily::F4 if i == 1 && j == 2 => 4,

            CoxeterFamily::G2 => 6,
            CoxeterFamily::I(n) => n as usize,

            _ if i > 0 && i + 1 == j => 3,
            _ => 2,
        }
    }

    /// Returns the group's Coxeter matrix.
    pub fn coxeter_matrix(self) -> Vec<Vec<usize>> {
        let n = self.generator_count();
        (0..n)
            .map(|i| (0..n).map(|j| self.coxeter_matrix_element(i, j)).collect())
            .collect()
    }

    /// Returns the number of elements in the group, or `None` if it does not
    /// fit in a `u64`.
    pub fn order(self) -> Option<u64> {
        let factorial = |n: u64| (1..=n).try_fold(1_u64, u64::checked_mul);
        let power_of_two = |n: u8| 1_u64.checked_shl(n as u32);
        match self {
            CoxeterFamily::A(n) => factorial(n as u64 + 1),
            CoxeterFamily::B(n) => power_of_two(n)?.checked_mul(factorial(n as u64)?),
            CoxeterFamily::D(n) => {
                power_of_two(n.saturating_sub(1))?.checked_mul(factorial(n as u64)?)
            }
            CoxeterFamily::E6 => Some(51_840),
            CoxeterFamily::E7 => Some(2_903_040),
            CoxeterFamily::E8 => Some(696_729_600),
            CoxeterFamily::F4 => Some(1152),
            CoxeterFamily::G2 => Some(12),
            CoxeterFamily::H2 => Some(10),
            CoxeterFamily::H3 => Some(120),
            CoxeterFamily::H4 => Some(14_400),
            CoxeterFamily::I(n) => Some(2 * n as u64),
        }
    }

    /// Returns a Coxeter diagram for the group with every node unringed.
    pub fn diagram(self) -> String {
        let chain = |edges: &[usize]| {
            let mut s = "o".to_string();
            for m in edges {
                s += &format!("{m}o");
            }
            s
        };
        let n = self.generator_count();
        match self {
            // Node 0 attaches to node 2; nodes 1.. form a chain.
            CoxeterFamily::D(_) => format!("o3*c {}", chain(&vec![3; n.saturating_sub(2)])),
            // Node 0 attaches to node 3; nodes 1.. form a chain.
            CoxeterFamily::E6 | CoxeterFamily::E7 | CoxeterFamily::E8 => {
                format!("o3*d {}", chain(&vec![3; n - 2]))
            }
            _ => chain(
                &(1..n)
                    .map(|j| self.coxeter_matrix_element(j - 1, j))
                    .collect::<Vec<_>>(),
            ),
        }
    }

    /// Returns a presentation of the group: its alphabet of self-inverse
    /// generators and its relator words.
    pub fn presentation(self) -> CosetResult<(Alphabet, Vec<Word>)> {
        let alphabet = Alphabet::coxeter(self.generator_count())?;
        Ok((alphabet, coxeter_relations(&self.coxeter_matrix())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coset::CosetEnumeration;

    #[test]
    fn test_coxeter_family_orders() {
        #[track_caller]
        fn assert_group_order(g: CoxeterFamily, expected_order: u64) {
            assert_eq!(g.order(), Some(expected_order));
            let (alphabet, relations) = g.presentation().unwrap();
            let table = CosetEnumeration::new(alphabet, relations, vec![])
                .unwrap()
                .solve(1_000_000)
                .unwrap();
            assert_eq!(table.len() as u64, expected_order, "order of {g}");
        }

        assert_group_order(CoxeterFamily::A(1), 2);
        assert_group_order(CoxeterFamily::A(2), 6);
        assert_group_order(CoxeterFamily::A(3), 24);
        assert_group_order(CoxeterFamily::A(4), 120);
        assert_group_order(CoxeterFamily::A(5), 720);

        assert_group_order(CoxeterFamily::B(2), 8);
        assert_group_order(CoxeterFamily::B(3), 48);
        assert_group_order(CoxeterFamily::B(4), 384);

        assert_group_order(CoxeterFamily::D(4), 192);
        assert_group_order(CoxeterFamily::D(5), 1920);

        assert_group_order(CoxeterFamily::F4, 1152);

        assert_group_order(CoxeterFamily::G2, 12);
        assert_group_order(CoxeterFamily::I(7), 14);

        assert_group_order(CoxeterFamily::H2, 10);
        assert_group_order(CoxeterFamily::H3, 120);
        assert_group_order(CoxeterFamily::H4, 14_400);
    }

    #[test]
    fn test_coxeter_family_order_overflow() {
        assert_eq!(CoxeterFamily::A(19).order(), Some(2_432_902_008_176_640_000));
        assert_eq!(CoxeterFamily::A(20).order(), None);
        assert_eq!(CoxeterFamily::B(20).order(), None);
        assert_eq!(CoxeterFamily::B(64).order(), None);
        assert_eq!(CoxeterFamily::D(65).order(), None);
        assert_eq!(CoxeterFamily::D(255).order(), None);
        assert_eq!(CoxeterFamily::I(255).order(), Some(510));
    }

    #[test]
    fn test_coxeter_family_diagrams() {
        assert_eq!(CoxeterFamily::A(3).diagram(), "o3o3o");
        assert_eq!(CoxeterFamily::B(4).diagram(), "o4o3o3o");
        assert_eq!(CoxeterFamily::H3.diagram(), "o5o3o");
        assert_eq!(CoxeterFamily::F4.diagram(), "o3o4o3o");
        assert_eq!(CoxeterFamily::I(7).diagram(), "o7o");
        assert_eq!(CoxeterFamily::D(4).diagram(), "o3*c o3o3o");
        assert_eq!(CoxeterFamily::E6.diagram(), "o3*d o3o3o3o3o");
        assert_eq!(CoxeterFamily::D(5).to_string(), "D5");
    }
}
