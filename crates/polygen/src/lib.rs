//! Uniform polytope generation from Coxeter diagrams.
//!
//! A diagram such as `x4o3o` is parsed into a [`CoxeterDiagram`], its mirrors
//! are placed in space, and the vertices, edges, faces, and cells of the
//! polytope are found as orbits of seed elements using Todd-Coxeter coset
//! enumeration.
//!
//! ```
//! let tesseract = polygen::polygen("x4o3o3o").unwrap();
//! assert_eq!(tesseract.element_counts(), [16, 32, 24, 8]);
//! ```

mod assemble;
pub mod cd;
mod config;
pub mod coset;
mod error;
pub mod mirrors;
mod polytope;
pub mod ti;

pub use assemble::{build_polytope, check_supported, polygen, polygen_with_config};
pub use cd::{CoxeterDiagram, DiagramSyntaxError, PolytopeDescription, parse};
pub use config::PolygenConfig;
pub use coset::{CosetEnumeration, CosetError, CosetTable};
pub use error::{MirrorError, PolygenError, PolygenResult, UnsupportedFeatureError};
pub use polytope::{Polytope, PolytopeSummary};
