/// Limits and options for polytope generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolygenConfig {
    /// Maximum number of live cosets processed by each coset enumeration.
    pub max_iterations: usize,

    /// Minimum number of nodes in a diagram.
    pub min_ndim: usize,
    /// Maximum number of nodes in a diagram.
    pub max_ndim: usize,

    /// Whether to accept diagrams with fractional edges, such as `x5/2o3o`.
    ///
    /// Mirrors are placed using the fractional angles, while relator words
    /// use only the numerators.
    pub allow_fractional: bool,

    /// Whether to orient the faces of 3D polytopes counterclockwise when seen
    /// from outside.
    pub orient_faces: bool,
}

impl Default for PolygenConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PolygenConfig {
    /// Polyhedra only, with no fractional edges.
    pub const BASE_3D: Self = Self {
        max_ndim: 3,
        min_ndim: 3,
        ..Self::DEFAULT
    };

    /// Polygons, polyhedra, and polychora, with no fractional edges.
    pub const DEFAULT: Self = Self {
        max_iterations: 1_000_000,
        min_ndim: 2,
        max_ndim: 4,
        allow_fractional: false,
        orient_faces: true,
    };

    /// Same as [`Self::DEFAULT`], but also accepts fractional edges.
    pub const EXTENDED: Self = Self {
        allow_fractional: true,
        ..Self::DEFAULT
    };
}
