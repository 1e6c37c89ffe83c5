//! N-dimensional vectors.

use std::fmt;
use std::iter::Sum;
use std::ops::{Div, Index, IndexMut, Sub};

use approx::AbsDiffEq;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::{EPSILON, Float};

/// Constructs a [`Vector`] with the same syntax as `vec![]`.
#[macro_export]
macro_rules! vector {
    [$($tok:tt)*] => {
        $crate::Vector($crate::smallvec::smallvec![$($tok)*])
    };
}

/// N-dimensional vector. Missing components are zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vector(pub SmallVec<[Float; 4]>);

/// Anything that can be read as a vector. Missing components are zero.
pub trait VectorRef: Sized + fmt::Debug {
    /// Returns the number of stored components.
    fn ndim(&self) -> u8;

    /// Returns a component, or zero if `idx` is out of range.
    fn get(&self, idx: u8) -> Float;

    /// Returns an iterator over the stored components.
    fn iter(&self) -> impl '_ + Iterator<Item = Float> {
        (0..self.ndim()).map(move |i| self.get(i))
    }

    /// Returns the dot product of two vectors.
    fn dot(&self, rhs: impl VectorRef) -> Float {
        (0..std::cmp::min(self.ndim(), rhs.ndim()))
            .map(|i| self.get(i) * rhs.get(i))
            .sum()
    }

    /// Returns the cross product of the first three components of two
    /// vectors.
    fn cross_product_3d(&self, rhs: impl VectorRef) -> Vector {
        let [x1, y1, z1] = [0, 1, 2].map(|i| self.get(i));
        let [x2, y2, z2] = [0, 1, 2].map(|i| rhs.get(i));
        vector![y1 * z2 - z1 * y2, z1 * x2 - x1 * z2, x1 * y2 - y1 * x2]
    }

    /// Returns a copy padded with zeros to at least `ndim` components.
    #[must_use]
    fn pad(&self, ndim: u8) -> Vector {
        self.iter().pad_using(ndim as usize, |_| 0.0).collect()
    }

    /// Returns the Euclidean length.
    fn mag(&self) -> Float {
        self.dot(self).sqrt()
    }

    /// Returns the mirror image across the hyperplane through the origin
    /// perpendicular to the unit vector `normal`.
    #[must_use]
    fn reflect_across(&self, normal: impl VectorRef) -> Vector {
        let mut ret: Vector = self.iter().collect();
        ret.reflect_in_place(normal);
        ret
    }
}

impl VectorRef for Vector {
    fn ndim(&self) -> u8 {
        self.0.len() as u8
    }

    fn get(&self, idx: u8) -> Float {
        self.0.get(idx as usize).copied().unwrap_or(0.0)
    }
}

impl VectorRef for &[Float] {
    fn ndim(&self) -> u8 {
        self.len().try_into().unwrap_or(u8::MAX)
    }

    fn get(&self, idx: u8) -> Float {
        <[Float]>::get(self, idx as usize).copied().unwrap_or(0.0)
    }
}

impl<V: VectorRef> VectorRef for &'_ V {
    fn ndim(&self) -> u8 {
        V::ndim(self)
    }

    fn get(&self, idx: u8) -> Float {
        V::get(self, idx)
    }
}

impl Vector {
    /// Returns the zero vector with `ndim` components.
    pub fn zero(ndim: u8) -> Self {
        Self(smallvec::smallvec![0.0; ndim as usize])
    }

    /// Reflects the vector in place across the hyperplane through the origin
    /// perpendicular to the unit vector `normal`, computing `v - 2(v·n)n`.
    pub fn reflect_in_place(&mut self, normal: impl VectorRef) {
        let scale = 2.0 * self.dot(&normal);
        if self.ndim() < normal.ndim() {
            self.0.resize(normal.ndim() as usize, 0.0);
        }
        for (x, n) in self.0.iter_mut().zip(normal.iter()) {
            *x -= scale * n;
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}
impl IndexMut<u8> for Vector {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

impl<V: VectorRef> Sub<V> for Vector {
    type Output = Vector;

    fn sub(self, rhs: V) -> Self::Output {
        &self - rhs
    }
}
impl<V: VectorRef> Sub<V> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: V) -> Self::Output {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim).map(|i| self.get(i) - rhs.get(i)).collect()
    }
}

impl Div<Float> for Vector {
    type Output = Vector;

    fn div(mut self, rhs: Float) -> Self::Output {
        for x in &mut self.0 {
            *x /= rhs;
        }
        self
    }
}

impl<V: VectorRef> Sum<V> for Vector {
    fn sum<I: Iterator<Item = V>>(iter: I) -> Self {
        let mut ret = Vector::default();
        for v in iter {
            if ret.ndim() < v.ndim() {
                ret.0.resize(v.ndim() as usize, 0.0);
            }
            for (x, y) in ret.0.iter_mut().zip(v.iter()) {
                *x += y;
            }
        }
        ret
    }
}

impl FromIterator<Float> for Vector {
    fn from_iter<T: IntoIterator<Item = Float>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let ndim = std::cmp::max(self.ndim(), other.ndim());
        (0..ndim).all(|i| self.get(i).abs_diff_eq(&other.get(i), epsilon))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_vector_sub_pads_with_zeros() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0];
        assert_eq!(&v1 - &v2, vector![6.0, 2.0, -10.0]);
        assert_eq!(v2 - v1, vector![-6.0, -2.0, 10.0]);
    }

    #[test]
    fn test_vector_products() {
        assert_eq!(vector![1.0, 2.0, 3.0].dot(vector![4.0, -5.0]), -6.0);
        assert_eq!(
            vector![1.0, 0.0, 0.0].cross_product_3d(vector![0.0, 1.0]),
            vector![0.0, 0.0, 1.0],
        );
        assert_eq!(vector![3.0, 4.0].mag(), 5.0);
    }

    #[test]
    fn test_vector_reflect() {
        let v = vector![2.0, 3.0];
        assert_approx_eq!(v.reflect_across(vector![0.0, 1.0]), vector![2.0, -3.0]);

        // A reflection is its own inverse and flips the normal component.
        let n = vector![1.0, 1.0, 1.0] / 3.0_f64.sqrt();
        let mut v = vector![0.5, -2.0];
        let original = v.clone();
        v.reflect_in_place(&n);
        assert_eq!(v.ndim(), 3);
        assert_approx_eq!(v.dot(&n), -original.dot(&n));
        v.reflect_in_place(&n);
        assert_approx_eq!(v, original);
    }

    #[test]
    fn test_vector_pad_and_sum() {
        assert_eq!(vector![1.0, 2.0].pad(4), vector![1.0, 2.0, 0.0, 0.0]);
        let total: Vector = [vector![1.0], vector![0.0, 2.0], vector![0.0, 0.0, 3.0]]
            .iter()
            .sum();
        assert_eq!(total / 2.0, vector![0.5, 1.0, 1.5]);
        assert_eq!(Vector::zero(2), vector![0.0, 0.0]);
    }
}
