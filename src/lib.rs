// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Half-edge topology for planar geographic data.
//!
//! Points, line segments and bounded regions are stored in a single
//! [`Mesh`](data::Mesh) arena. Arbitrary application data can be attached to
//! any point, edge, half-edge or face while the planar subdivision stays
//! navigable.
//!
//! ```rust
//! # use geodcel::data::*;
//! # use geodcel::Error;
//! let mut mesh = Mesh::new();
//! let p0 = mesh.add_point(GeoPoint::new([0.0, 0.0], 0.0));
//! let p1 = mesh.add_point(GeoPoint::new([1.0, 0.0], 0.0));
//! let p2 = mesh.add_point(GeoPoint::new([0.0, 1.0], 0.0));
//! let e1 = mesh.add_edge(p0, p1);
//! let e2 = mesh.add_edge(p1, p2);
//! let e3 = mesh.add_edge(p2, p0);
//! mesh.join(e1, e2);
//! mesh.join(e2, e3);
//! mesh.join(e3, e1);
//!
//! let inside = mesh.add_face(e1.half_edge(0))?;
//! assert_eq!(mesh.face(inside).half_edges().count(), 3);
//! # Ok::<(), Error>(())
//! ```

pub mod data;

use crate::data::HalfEdgeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The half-edge handle does not belong to the mesh.
  UnknownHalfEdge(HalfEdgeId),
  /// Following `next` from the half-edge never returns to it.
  OpenBoundary(HalfEdgeId),
  /// `next` and `prev` disagree at the half-edge.
  BrokenChain(HalfEdgeId),
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::UnknownHalfEdge(he) => write!(f, "Unknown half-edge: {:?}", he),
      Error::OpenBoundary(he) => write!(f, "Open boundary starting at {:?}", he),
      Error::BrokenChain(he) => write!(f, "Broken next/prev chain at {:?}", he),
    }
  }
}

impl std::error::Error for Error {}

#[cfg(test)]
pub mod testing;
