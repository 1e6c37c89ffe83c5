//! Mirror placement and initial vertex solver.

use itertools::Itertools;
use polymath::prelude::*;

use crate::MirrorError;

/// Returns unit normal vectors for a set of mirrors, where mirrors `i` and `j`
/// meet at an angle of `π / symmetry_matrix[i][j]`.
///
/// Every normal has one component per mirror.
pub fn place_mirrors(symmetry_matrix: &[Vec<Float>]) -> Result<Vec<Vector>, MirrorError> {
    let n = symmetry_matrix.len();
    let mirror_dot =
        |i: usize, j: usize| -(std::f64::consts::PI as Float / symmetry_matrix[i][j]).cos();

    let mut normals: Vec<Vector> = vec![];
    // The normals form a lower triangular matrix `L` with `L Lᵀ` equal to the
    // Gram matrix of the normals. This is a Cholesky decomposition, computed
    // using the Cholesky–Banachiewicz algorithm.
    // https://en.wikipedia.org/wiki/Cholesky_decomposition#Computation
    for i in 0..n {
        let mut normal = Vector::zero(n as u8);
        for j in 0..=i {
            let row = if j == i { &normal } else { &normals[j] };
            let sum: Float = (0..j as u8).map(|k| normal[k] * row[k]).sum();

            if i == j {
                let remainder = 1.0 - sum;
                if remainder <= EPSILON {
                    return Err(MirrorError::Unrealizable {
                        index: i,
                        remainder,
                    });
                }
                normal[j as u8] = remainder.sqrt();
            } else {
                normal[j as u8] = (mirror_dot(i, j) - sum) / normals[j][j as u8];
            }
        }
        normals.push(normal);
    }

    log::trace!("placed {n} mirrors: {}", normals.iter().join(", "));

    Ok(normals)
}

/// Returns the point whose signed distance from mirror `i` is `offsets[i]`.
pub fn place_initial_vertex(normals: &[Vector], offsets: &[Float]) -> Result<Vector, MirrorError> {
    if normals.len() != offsets.len() {
        return Err(MirrorError::OffsetCount {
            expected: normals.len(),
            found: offsets.len(),
        });
    }
    Matrix::from_rows(normals)
        .solve(offsets)
        .ok_or(MirrorError::Singular)
}

#[cfg(test)]
mod tests {
    use polymath::assert_approx_eq;

    use super::*;

    fn matrix(rows: &[&[Float]]) -> Vec<Vec<Float>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_mirror_angles() {
        let s = matrix(&[&[1.0, 4.0, 2.0], &[4.0, 1.0, 3.0], &[2.0, 3.0, 1.0]]);
        let normals = place_mirrors(&s).unwrap();
        for i in 0..3 {
            assert_approx_eq!(normals[i].mag(), 1.0);
            for j in 0..3 {
                let expected = -(std::f64::consts::PI / s[i][j]).cos();
                assert_approx_eq!(normals[i].dot(&normals[j]), expected);
            }
        }
        // Lower triangular.
        assert_eq!(normals[0].get(1), 0.0);
        assert_eq!(normals[1].get(2), 0.0);
    }

    #[test]
    fn test_fractional_mirror_angles() {
        let s = matrix(&[&[1.0, 2.5, 2.0], &[2.5, 1.0, 3.0], &[2.0, 3.0, 1.0]]);
        let normals = place_mirrors(&s).unwrap();
        assert_approx_eq!(normals[0].dot(&normals[1]), -(std::f64::consts::PI / 2.5).cos());
    }

    #[test]
    fn test_unrealizable_mirrors() {
        // Euclidean tiling.
        let s = matrix(&[&[1.0, 4.0, 2.0], &[4.0, 1.0, 4.0], &[2.0, 4.0, 1.0]]);
        assert!(matches!(
            place_mirrors(&s),
            Err(MirrorError::Unrealizable { index: 2, .. }),
        ));
        // Hyperbolic tiling.
        let s = matrix(&[&[1.0, 7.0, 2.0], &[7.0, 1.0, 3.0], &[2.0, 3.0, 1.0]]);
        assert!(place_mirrors(&s).is_err());
    }

    #[test]
    fn test_initial_vertex() {
        let s = matrix(&[&[1.0, 4.0, 2.0], &[4.0, 1.0, 3.0], &[2.0, 3.0, 1.0]]);
        let normals = place_mirrors(&s).unwrap();
        let offsets = [0.5, 0.0, 0.0];
        let v = place_initial_vertex(&normals, &offsets).unwrap();
        for (n, offset) in normals.iter().zip(offsets) {
            assert_approx_eq!(n.dot(&v), offset);
        }
        // Reflecting across the active mirror gives a vertex at distance 1.
        assert_approx_eq!((v.reflect_across(&normals[0]) - &v).mag(), 1.0);

        assert_eq!(
            place_initial_vertex(&normals, &[0.5]),
            Err(MirrorError::OffsetCount {
                expected: 3,
                found: 1,
            }),
        );
    }
}
