//! Typed indices.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

/// Defines one or more structs that are simple wrappers around primitive
/// unsigned integer types and implements `TypedIndex` on them.
macro_rules! typed_index_struct {
    (
        $(
            $(#[$attr:meta])*
            $struct_vis:vis struct $struct_name:ident($inner_vis:vis $inner_type:ty);
        )+
    ) => {
        $(
            $(#[$attr])*
            #[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
            #[repr(transparent)]
            $struct_vis struct $struct_name($inner_vis $inner_type);

            impl ::std::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "#{:?}", self.0)
                }
            }
            impl ::std::fmt::Display for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "#{}", self.0)
                }
            }

            impl $crate::ti::TypedIndex for $struct_name {
                const MAX: Self = Self(typed_index_struct!(@conservative_max($inner_type)));
                const MAX_INDEX: usize = typed_index_struct!(@conservative_max($inner_type)) as usize;
                const TYPE_NAME: &'static str = stringify!($struct_name);

                fn to_index(self) -> usize {
                    self.0 as usize
                }

                fn try_from_index(index: usize) -> Result<Self, $crate::ti::IndexOverflow> {
                    match index.try_into() {
                        Ok(i) if i <= Self::MAX.0 => Ok(Self(i)),
                        _ => Err($crate::ti::IndexOverflow::new::<Self>()),
                    }
                }
            }
        )+
    };

    (@ conservative_max ($inner_type:ty)) => {
        // max value for the type, but subtract 1 if it's larger than a u16
        // (so overflow is less likely with `usize`)
        <$inner_type>::MAX - (<$inner_type>::MAX as usize > u16::MAX as usize) as $inner_type
    };
}

/// Typed index.
///
/// This is a wrapper around a primitive unsigned integer. Instead of
/// implementing this trait manually, use the macro `typed_index_struct!`.
pub trait TypedIndex:
    'static
    + fmt::Debug
    + fmt::Display
    + Default
    + Copy
    + Clone
    + PartialEq
    + Eq
    + std::hash::Hash
    + PartialOrd
    + Ord
    + Send
    + Sync
{
    /// Maximum value for the type.
    const MAX: Self;
    /// Maximum index representable by the type.
    const MAX_INDEX: usize;
    /// User-friendly type name.
    const TYPE_NAME: &'static str;

    /// Returns the index as a `usize`.
    fn to_index(self) -> usize;

    /// Returns an index from a `usize`, or an error if it does not fit.
    fn try_from_index(index: usize) -> Result<Self, IndexOverflow>;

    /// Returns an iterator over all indexes up to `count` (exclusive). If
    /// `count` exceeds the maximum value, then the iterator stops before
    /// reaching the maximum value.
    fn iter(count: usize) -> TypedIndexIter<Self> {
        let count = std::cmp::min(count, Self::MAX_INDEX + 1);
        TypedIndexIter {
            range: 0..count,
            _phantom: PhantomData,
        }
    }
}

/// Iterator over all indexes up to a certain value. See [`TypedIndex::iter()`].
#[derive(Debug, Default, Clone)]
pub struct TypedIndexIter<I> {
    range: Range<usize>,
    _phantom: PhantomData<fn() -> I>,
}

impl<I: TypedIndex> Iterator for TypedIndexIter<I> {
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        // `TypedIndex::iter()` clips the range to `MAX_INDEX`.
        self.range.next().and_then(|i| I::try_from_index(i).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<I: TypedIndex> ExactSizeIterator for TypedIndexIter<I> {}

/// Error when a [`TypedIndex`] exceeds its maximum value.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("exceeded maximum {type_name} count of {max_value}")]
pub struct IndexOverflow {
    /// Name of the indexing type.
    pub type_name: &'static str,
    /// Maximum allowed index for the indexing type.
    pub max_value: usize,
}

impl IndexOverflow {
    /// Constructs a new overflow error for the type `I`.
    pub fn new<I: TypedIndex>() -> Self {
        Self {
            type_name: I::TYPE_NAME,
            max_value: I::MAX_INDEX,
        }
    }
}

typed_index_struct! {
    /// Index of a coset in a coset table.
    pub struct CosetId(pub u32);
    /// Index of a generator (or, for generators that are not self-inverse, a
    /// generator or its inverse) in a coset table.
    pub struct GeneratorId(pub u8);
}

impl CosetId {
    /// Coset of the subgroup itself.
    pub const INIT: Self = Self(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_index_overflow() {
        assert_eq!(GeneratorId::try_from_index(255), Ok(GeneratorId(255)));
        assert_eq!(
            GeneratorId::try_from_index(256),
            Err(IndexOverflow::new::<GeneratorId>()),
        );
        assert_eq!(CosetId::MAX_INDEX, u32::MAX as usize - 1);
        assert!(CosetId::try_from_index(u32::MAX as usize).is_err());
        assert_eq!(GeneratorId::iter(3).collect::<Vec<_>>(), [0, 1, 2].map(GeneratorId));
        assert_eq!(CosetId(7).to_string(), "#7");
    }
}
