use std::collections::BTreeMap;

use polymath::prelude::*;

/// Polytope generated from a Coxeter diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Polytope {
    /// Vertex positions, with one component per mirror.
    pub vertices: Vec<Vector>,
    /// Pairs of vertex indices.
    pub edges: Vec<[usize; 2]>,
    /// Lists of vertex indices, in order around each face.
    pub faces: Vec<Vec<usize>>,
    /// Lists of face indices, for 4D polytopes only.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cells: Option<Vec<Vec<usize>>>,
}

/// Element counts and face shapes of a polytope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PolytopeSummary {
    /// Number of dimensions.
    pub ndim: u8,
    /// Number of vertices, edges, faces, and cells.
    pub element_counts: [usize; 4],
    /// Number of faces with each vertex count.
    pub face_sizes: BTreeMap<usize, usize>,
}

impl Polytope {
    /// Returns the number of dimensions of the space containing the polytope.
    pub fn ndim(&self) -> u8 {
        self.vertices.iter().map(|v| v.ndim()).max().unwrap_or(0)
    }

    /// Returns the number of vertices, edges, faces, and cells.
    pub fn element_counts(&self) -> [usize; 4] {
        [
            self.vertices.len(),
            self.edges.len(),
            self.faces.len(),
            self.cells.as_ref().map_or(0, |cells| cells.len()),
        ]
    }

    /// Returns the minimum and maximum edge length, or `None` if there are no
    /// edges.
    pub fn edge_lengths(&self) -> Option<(Float, Float)> {
        self.edges
            .iter()
            .map(|&[a, b]| (&self.vertices[a] - &self.vertices[b]).mag())
            .fold(None, |acc, len| match acc {
                None => Some((len, len)),
                Some((min, max)) => Some((min.min(len), max.max(len))),
            })
    }

    /// Returns the number of faces with each vertex count.
    pub fn face_sizes(&self) -> BTreeMap<usize, usize> {
        let mut ret = BTreeMap::new();
        for face in &self.faces {
            *ret.entry(face.len()).or_default() += 1;
        }
        ret
    }

    /// Returns the vertices padded or truncated to `ndim` dimensions.
    pub fn padded_vertices(&self, ndim: u8) -> Vec<Vector> {
        self.vertices
            .iter()
            .map(|v| v.iter().take(ndim as usize).collect::<Vector>().pad(ndim))
            .collect()
    }

    /// Returns a summary of the polytope.
    pub fn summary(&self) -> PolytopeSummary {
        PolytopeSummary {
            ndim: self.ndim(),
            element_counts: self.element_counts(),
            face_sizes: self.face_sizes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use polymath::{assert_approx_eq, vector};
    use pretty_assertions::assert_eq;

    use super::*;

    fn unit_square() -> Polytope {
        Polytope {
            vertices: vec![
                vector![0.0, 0.0],
                vector![1.0, 0.0],
                vector![1.0, 1.0],
                vector![0.0, 1.0],
            ],
            edges: vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            faces: vec![vec![0, 1, 2, 3]],
            cells: None,
        }
    }

    #[test]
    fn test_polytope_summary() {
        let square = unit_square();
        assert_eq!(square.ndim(), 2);
        assert_eq!(square.element_counts(), [4, 4, 1, 0]);
        assert_eq!(square.face_sizes(), BTreeMap::from([(4, 1)]));
        let (min, max) = square.edge_lengths().unwrap();
        assert_approx_eq!(min, 1.0);
        assert_approx_eq!(max, 1.0);
        assert_eq!(square.summary().element_counts, [4, 4, 1, 0]);
    }

    #[test]
    fn test_padded_vertices() {
        let square = unit_square();
        assert_eq!(square.padded_vertices(3)[2], vector![1.0, 1.0, 0.0]);
        assert_eq!(square.padded_vertices(1)[2], vector![1.0]);
    }
}
