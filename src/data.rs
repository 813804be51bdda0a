mod attributes;
mod geo_point;
pub mod mesh;

pub use attributes::*;
pub use geo_point::GeoPoint;

#[doc(inline)]
pub use crate::data::mesh::{
  Edge, EdgeEntry, EdgeId, Face, FaceEntry, FaceId, HalfEdge, HalfEdgeEntry, HalfEdgeId, Mesh,
  PointId, Splice,
};
