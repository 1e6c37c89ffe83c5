//! Polytope assembly.
//!
//! Every element of a uniform polytope is the image of a seed element under
//! the symmetry group. The seed vertex is placed using the mirrors, and the
//! other elements of each type are found by enumerating the cosets of the
//! seed's stabilizer.

use itertools::Itertools;
use polymath::prelude::*;

use crate::cd::{CombineMethod, CoxeterDiagram};
use crate::coset::{Alphabet, CosetEnumeration, CosetTable, Word, coxeter_relations};
use crate::mirrors::{place_initial_vertex, place_mirrors};
use crate::ti::{CosetId, TypedIndex};
use crate::{PolygenConfig, PolygenResult, Polytope, UnsupportedFeatureError};

/// Generates the polytope described by a Coxeter diagram, using the default
/// configuration.
///
/// ```
/// let cube = polygen::polygen("x4o3o").unwrap();
/// assert_eq!(cube.element_counts(), [8, 12, 6, 0]);
/// ```
pub fn polygen(diagram: &str) -> PolygenResult<Polytope> {
    polygen_with_config(diagram, &PolygenConfig::default())
}

/// Generates the polytope described by a Coxeter diagram.
pub fn polygen_with_config(diagram: &str, config: &PolygenConfig) -> PolygenResult<Polytope> {
    let description = CoxeterDiagram::parse(diagram)?;
    build_polytope(&description, config)
}

/// Generates the polytope described by a parsed Coxeter diagram.
pub fn build_polytope(
    description: &CoxeterDiagram,
    config: &PolygenConfig,
) -> PolygenResult<Polytope> {
    check_supported(description, config)?;
    Assembler::new(description, config)?.assemble()
}

/// Returns an error if the diagram describes something that cannot be
/// generated with the given configuration.
pub fn check_supported(
    description: &CoxeterDiagram,
    config: &PolygenConfig,
) -> Result<(), UnsupportedFeatureError> {
    let combine_method = description.combine_method();
    if combine_method != CombineMethod::None {
        return Err(UnsupportedFeatureError::CombineMethod(combine_method));
    }

    let ndim = description.node_count();
    if !(config.min_ndim..=config.max_ndim).contains(&ndim) {
        return Err(UnsupportedFeatureError::Dimension {
            ndim,
            min: config.min_ndim,
            max: config.max_ndim,
        });
    }

    for subpolytope in description.subpolytopes() {
        for (index, node) in subpolytope.nodes.iter().enumerate() {
            if node.dual {
                return Err(UnsupportedFeatureError::DualNode { index });
            }
            if node.snub {
                return Err(UnsupportedFeatureError::SnubNode { index });
            }
        }
    }

    if !config.allow_fractional
        && let Some((i, j)) = (0..ndim)
            .tuple_combinations()
            .find(|&(i, j)| description.edge_label(i, j).is_fractional())
    {
        return Err(UnsupportedFeatureError::FractionalSymmetry {
            i,
            j,
            label: description.edge_label(i, j),
        });
    }

    Ok(())
}

/// Faces generated by one pair of mirrors.
struct FaceOrbit {
    mirrors: [usize; 2],
    /// Index of the first face of this orbit in the list of all faces.
    offset: usize,
    table: CosetTable,
}

struct Assembler<'a> {
    config: &'a PolygenConfig,
    ndim: usize,
    coxeter_matrix: Vec<Vec<usize>>,
    active: Vec<bool>,
    normals: Vec<Vector>,
    initial_vertex: Vector,
    alphabet: Alphabet,
    relations: Vec<Word>,
}

impl<'a> Assembler<'a> {
    fn new(description: &CoxeterDiagram, config: &'a PolygenConfig) -> PolygenResult<Self> {
        let ndim = description.node_count();
        let (offsets, active) = match description.subpolytopes().first() {
            Some(subpolytope) => (subpolytope.offsets(), subpolytope.active_mirrors()),
            None => (vec![0.0; ndim], vec![false; ndim]),
        };

        let coxeter_matrix = description.coxeter_matrix();
        let normals = place_mirrors(&description.symmetry_matrix())?;
        let initial_vertex = place_initial_vertex(&normals, &offsets)?;
        let relations = coxeter_relations(&coxeter_matrix);

        Ok(Self {
            config,
            ndim,
            coxeter_matrix,
            active,
            normals,
            initial_vertex,
            alphabet: Alphabet::coxeter(ndim)?,
            relations,
        })
    }

    fn is_orthogonal(&self, i: usize, j: usize) -> bool {
        self.coxeter_matrix[i][j] == 2
    }

    /// Returns the mirrors generating the stabilizer of the seed element
    /// generated by `mirrors`. These are the mirrors themselves plus every
    /// inactive mirror orthogonal to all of them.
    fn stabilizer(&self, mirrors: &[usize]) -> Vec<usize> {
        (0..self.ndim)
            .filter(|&k| {
                mirrors.contains(&k)
                    || (!self.active[k] && mirrors.iter().all(|&m| self.is_orthogonal(k, m)))
            })
            .collect()
    }

    /// Returns whether a set of mirrors generates an element, which is when
    /// every connected component of its diagram contains an active mirror.
    fn is_admissible(&self, mirrors: &[usize]) -> bool {
        mirrors.iter().all(|&start| {
            let mut component = vec![start];
            let mut stack = vec![start];
            while let Some(m) = stack.pop() {
                for &other in mirrors {
                    if !component.contains(&other) && !self.is_orthogonal(m, other) {
                        component.push(other);
                        stack.push(other);
                    }
                }
            }
            component.iter().any(|&m| self.active[m])
        })
    }

    /// Enumerates the cosets of the subgroup generated by `mirrors`.
    fn enumerate(&self, element: &str, mirrors: &[usize]) -> PolygenResult<CosetTable> {
        let subgroup = mirrors
            .iter()
            .map(|&k| Word::new([self.alphabet.generator(k)]))
            .collect();
        let table = CosetEnumeration::new(self.alphabet.clone(), self.relations.clone(), subgroup)?
            .solve(self.config.max_iterations)?;
        log::debug!(
            "{element} orbit with stabilizer {mirrors:?} has {} element(s)",
            table.len(),
        );
        Ok(table)
    }

    fn assemble(self) -> PolygenResult<Polytope> {
        let vertex_table = self.enumerate("vertex", &self.stabilizer(&[]))?;
        let vertices = vertex_table
            .representatives()
            .iter()
            .map(|word| {
                let mut v = self.initial_vertex.clone();
                for g in word.iter() {
                    v.reflect_in_place(&self.normals[g.to_index()]);
                }
                v
            })
            .collect_vec();

        let mut edges = vec![];
        for i in (0..self.ndim).filter(|&i| self.active[i]) {
            let generator = Word::new([self.alphabet.generator(i)]);
            let seed = [
                CosetId::INIT,
                vertex_table.apply_word(CosetId::INIT, &generator)?,
            ];
            let edge_table = self.enumerate("edge", &self.stabilizer(&[i]))?;
            for word in edge_table.representatives() {
                let a = vertex_table.apply_word(seed[0], word)?;
                let b = vertex_table.apply_word(seed[1], word)?;
                edges.push([a.to_index(), b.to_index()]);
            }
        }

        let mut faces = vec![];
        let mut face_orbits = vec![];
        for (i, j) in (0..self.ndim).tuple_combinations() {
            if !self.is_admissible(&[i, j]) {
                continue;
            }
            let seed = self.seed_face(&vertex_table, i, j)?;
            let face_table = self.enumerate("face", &self.stabilizer(&[i, j]))?;
            let offset = faces.len();
            for word in face_table.representatives() {
                let mut face = Vec::with_capacity(seed.len());
                for &vertex in &seed {
                    face.push(vertex_table.apply_word(vertex, word)?.to_index());
                }
                faces.push(face);
            }
            face_orbits.push(FaceOrbit {
                mirrors: [i, j],
                offset,
                table: face_table,
            });
        }

        if self.ndim == 3 && self.config.orient_faces {
            orient_faces(&vertices, &mut faces);
        }

        let cells = match self.ndim {
            4 => Some(self.cells(&face_orbits)?),
            _ => None,
        };

        Ok(Polytope {
            vertices,
            edges,
            faces,
            cells,
        })
    }

    /// Returns the vertices of the face generated by mirrors `i` and `j` that
    /// contains the initial vertex, in order around the face.
    fn seed_face(
        &self,
        vertex_table: &CosetTable,
        i: usize,
        j: usize,
    ) -> PolygenResult<Vec<CosetId>> {
        let (gi, gj) = (self.alphabet.generator(i), self.alphabet.generator(j));
        let m = self.coxeter_matrix[i][j];

        let words = if self.active[i] && self.active[j] {
            (0..2 * m)
                .map(|k| Word::alternating(gi, gj, k).reversed())
                .collect_vec()
        } else {
            // Rotate the initial vertex, which lies on the inactive mirror.
            let (ga, gb) = if self.active[i] { (gi, gj) } else { (gj, gi) };
            (0..m)
                .map(|k| Word::alternating(gb, ga, 2 * k))
                .collect_vec()
        };

        let mut seed = Vec::with_capacity(words.len());
        for word in &words {
            seed.push(vertex_table.apply_word(CosetId::INIT, word)?);
        }
        Ok(seed)
    }

    fn cells(&self, face_orbits: &[FaceOrbit]) -> PolygenResult<Vec<Vec<usize>>> {
        let mut cells = vec![];
        for (i, j, k) in (0..self.ndim).tuple_combinations() {
            let triple = [i, j, k];
            if !self.is_admissible(&triple) {
                continue;
            }

            let mut seed = vec![];
            for orbit in face_orbits {
                if orbit.mirrors.iter().all(|m| triple.contains(m)) {
                    for face in self.seed_cell_faces(&triple, orbit)? {
                        seed.push((orbit, face));
                    }
                }
            }

            let cell_table = self.enumerate("cell", &self.stabilizer(&triple))?;
            for word in cell_table.representatives() {
                let mut cell = Vec::with_capacity(seed.len());
                for &(orbit, face) in &seed {
                    cell.push(orbit.offset + orbit.table.apply_word(face, word)?.to_index());
                }
                cells.push(cell);
            }
        }
        Ok(cells)
    }

    /// Returns the faces from `orbit` that belong to the cell generated by
    /// `triple` containing the initial vertex.
    fn seed_cell_faces(
        &self,
        triple: &[usize; 3],
        orbit: &FaceOrbit,
    ) -> PolygenResult<Vec<CosetId>> {
        let alphabet = self.alphabet.restrict(triple)?;
        let coxeter_matrix = triple
            .iter()
            .map(|&a| triple.iter().map(|&b| self.coxeter_matrix[a][b]).collect())
            .collect_vec();
        let relations = coxeter_relations(&coxeter_matrix);
        let subgroup = self
            .stabilizer(&orbit.mirrors)
            .into_iter()
            .filter_map(|m| triple.iter().position(|&t| t == m))
            .map(|local| Word::new([alphabet.generator(local)]))
            .collect();

        let table = CosetEnumeration::new(alphabet, relations, subgroup)?
            .solve(self.config.max_iterations)?;

        let mut faces = Vec::with_capacity(table.len());
        for local_word in table.representatives() {
            let word: Word = local_word
                .iter()
                .map(|g| self.alphabet.generator(triple[g.to_index()]))
                .collect();
            faces.push(orbit.table.apply_word(CosetId::INIT, &word)?);
        }
        Ok(faces)
    }
}

/// Orients each face counterclockwise when seen from outside the polyhedron,
/// which is centered at the origin.
fn orient_faces(vertices: &[Vector], faces: &mut [Vec<usize>]) {
    for face in faces {
        let [Some(a), Some(b), Some(c)] = [0, 1, 2].map(|k| face.get(k).map(|&v| &vertices[v]))
        else {
            continue;
        };
        let centroid = face.iter().map(|&v| &vertices[v]).sum::<Vector>() / face.len() as Float;
        let normal = (b - a).cross_product_3d(c - b);
        if normal.dot(&centroid) < 0.0 {
            face.reverse();
        }
    }
}
