use claims::debug_assert_ok;
use std::ops::{Index, IndexMut};
use tracing::{debug, warn};

use crate::data::{Attributed, AttributedMut, Attributes, GeoPoint};
use crate::Error;

mod view;
pub use view::*;

///////////////////////////////////////////////////////////////////////////////
// Handles

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointId(pub usize);

impl std::fmt::Debug for PointId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "PointId({})", self.0)
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub usize);

impl std::fmt::Debug for EdgeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "EdgeId({})", self.0)
  }
}

impl EdgeId {
  /// The half-edge leaving `endpoints[nth]`.
  ///
  /// # Panics
  ///
  /// Panics if `nth` is not 0 or 1.
  pub fn half_edge(self, nth: usize) -> HalfEdgeId {
    assert!(nth < 2, "an edge has two half-edges, got index {}", nth);
    HalfEdgeId(self.0 * 2 + nth)
  }
}

// Half-edges of edge `e` are `2e` (leaving endpoints[0]) and `2e + 1`
// (leaving endpoints[1]).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfEdgeId(pub usize);

impl std::fmt::Debug for HalfEdgeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "HalfEdgeId({})", self.0)
  }
}

impl HalfEdgeId {
  pub fn twin(self) -> HalfEdgeId {
    HalfEdgeId(self.0 ^ 1)
  }

  pub fn parent(self) -> EdgeId {
    EdgeId(self.0 >> 1)
  }

  /// Which endpoint of the parent edge this half-edge leaves from.
  pub fn side(self) -> usize {
    self.0 & 1
  }

  fn mutate(self, mesh: &mut Mesh) -> &mut HalfEdgeEntry {
    &mut mesh.half_edges[self.0]
  }

  fn read(self, mesh: &Mesh) -> &HalfEdgeEntry {
    &mesh.half_edges[self.0]
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceId(pub usize);

impl std::fmt::Debug for FaceId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "FaceId({})", self.0)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Records

/// Directed half of an edge.
///
/// The coordinates are copied from the origin point when the edge is built;
/// moving the point afterwards does not move the half-edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfEdgeEntry {
  position: [f64; 2],
  altitude: f64,
  next: HalfEdgeId,
  prev: HalfEdgeId,
  face: Option<FaceId>,
  attributes: Attributes,
}

impl HalfEdgeEntry {
  fn new(origin: &GeoPoint, twin: HalfEdgeId) -> HalfEdgeEntry {
    HalfEdgeEntry {
      position: origin.position(),
      altitude: origin.altitude(),
      next: twin,
      prev: twin,
      face: None,
      attributes: Attributes::new(),
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEntry {
  endpoints: [PointId; 2],
  attributes: Attributes,
}

// TODO: holes need one representative per boundary loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceEntry {
  boundary: HalfEdgeId,
  attributes: Attributes,
}

macro_rules! attributed {
  ( $ty:ty ) => {
    impl Attributed for $ty {
      fn attributes(&self) -> &Attributes {
        &self.attributes
      }
    }

    impl AttributedMut for $ty {
      fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
      }
    }
  };
}

attributed!(HalfEdgeEntry);
attributed!(EdgeEntry);
attributed!(FaceEntry);

///////////////////////////////////////////////////////////////////////////////
// Splice

/// Outcome of [`Mesh::join`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Splice {
  /// The edges share no endpoint. Nothing was modified.
  Disjoint,
  /// Number of shared endpoints that were spliced (1 or 2).
  Joined(usize),
}

impl Splice {
  pub fn is_joined(self) -> bool {
    matches!(self, Splice::Joined(_))
  }
}

///////////////////////////////////////////////////////////////////////////////
// Mesh

/// Arena holding points and the half-edge topology built over them.
///
/// Every handle is an index into this arena and stays valid for the lifetime
/// of the mesh. Handles from a different mesh are not detected.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
  points: Vec<GeoPoint>,
  edges: Vec<EdgeEntry>,         // Edge indexed
  half_edges: Vec<HalfEdgeEntry>, // HalfEdge indexed
  faces: Vec<FaceEntry>,         // Face indexed
}

impl Mesh {
  pub fn new() -> Mesh {
    Mesh::default()
  }

  pub fn add_point(&mut self, point: GeoPoint) -> PointId {
    let id = PointId(self.points.len());
    self.points.push(point);
    id
  }

  /// Adds a line segment between two points. `p0 == p1` is allowed.
  ///
  /// The two new half-edges are twins of each other and form a closed cycle
  /// of length two.
  ///
  /// # Panics
  ///
  /// Panics if either point is not part of the mesh.
  pub fn add_edge(&mut self, p0: PointId, p1: PointId) -> EdgeId {
    let id = EdgeId(self.edges.len());
    let h0 = id.half_edge(0);
    let h1 = id.half_edge(1);
    let entry0 = HalfEdgeEntry::new(&self[p0], h1);
    let entry1 = HalfEdgeEntry::new(&self[p1], h0);
    self.half_edges.push(entry0);
    self.half_edges.push(entry1);
    self.edges.push(EdgeEntry {
      endpoints: [p0, p1],
      attributes: Attributes::new(),
    });
    debug_assert_ok!(self.check_links(h0));
    debug_assert_ok!(self.check_links(h1));
    id
  }

  /// Splices `other` into the boundary chains of `this` at every endpoint the
  /// two edges share.
  ///
  /// For each shared point, the half-edge of `other` arriving at the point is
  /// linked in front of the half-edge of `this` leaving it, and the half-edge
  /// of `other` leaving the point is linked behind the half-edge of `this`
  /// that used to arrive there. The spliced-in half-edges take over the face
  /// of the half-edge they are linked to.
  ///
  /// Edges are compared by point handle, not by coordinates. If no endpoint
  /// is shared a warning is logged and [`Splice::Disjoint`] is returned.
  ///
  /// ```rust
  /// # use geodcel::data::*;
  /// let mut mesh = Mesh::new();
  /// let p = [[1.3, 1.4], [0.0, 1.6], [-1.3, 1.4]].map(|xy| mesh.add_point(xy.into()));
  /// let e0 = mesh.add_edge(p[0], p[1]);
  /// let e1 = mesh.add_edge(p[1], p[2]);
  ///
  /// assert_eq!(mesh.join(e0, e1), Splice::Joined(1));
  /// assert_eq!(mesh.half_edge(e0.half_edge(0)).next(), e1.half_edge(0));
  /// ```
  ///
  /// # Panics
  ///
  /// Panics if either edge is not part of the mesh.
  pub fn join(&mut self, this: EdgeId, other: EdgeId) -> Splice {
    let ours = self[this].endpoints;
    let theirs = self[other].endpoints;

    let mut spliced = 0;
    for (k, point) in ours.iter().enumerate() {
      let v = match theirs.iter().position(|p| p == point) {
        Some(v) => v,
        None => continue,
      };
      let out_edge = this.half_edge(k);
      let in_edge = out_edge.read(self).prev;
      let new_out = other.half_edge(v);
      let new_in = new_out.twin();

      let out_face = out_edge.read(self).face;
      out_edge.mutate(self).prev = new_in;
      let entry = new_in.mutate(self);
      entry.next = out_edge;
      entry.face = out_face;

      let in_face = in_edge.read(self).face;
      in_edge.mutate(self).next = new_out;
      let entry = new_out.mutate(self);
      entry.prev = in_edge;
      entry.face = in_face;

      spliced += 1;
    }

    if spliced == 0 {
      warn!(
        ?this,
        ?other,
        "join did not splice the edges: zero common endpoints"
      );
      Splice::Disjoint
    } else {
      Splice::Joined(spliced)
    }
  }

  /// Creates a face bounded by the cycle through `representative` and claims
  /// every half-edge on that cycle.
  ///
  /// The cycle is walked before anything is written, so a failed call leaves
  /// the mesh untouched.
  ///
  /// # Errors
  ///
  /// * [`Error::UnknownHalfEdge`] if `representative` is not in the mesh.
  /// * [`Error::OpenBoundary`] if following `next` never returns to
  ///   `representative`.
  pub fn add_face(&mut self, representative: HalfEdgeId) -> Result<FaceId, Error> {
    if representative.0 >= self.half_edges.len() {
      return Err(Error::UnknownHalfEdge(representative));
    }
    let boundary = self.closed_cycle(representative)?;

    let face = FaceId(self.faces.len());
    self.faces.push(FaceEntry {
      boundary: representative,
      attributes: Attributes::new(),
    });
    for &he in &boundary {
      he.mutate(self).face = Some(face);
    }
    debug!(?face, len = boundary.len(), "claimed boundary cycle");
    Ok(face)
  }

  /// Removes every `face` back-reference that still names `face`. The face
  /// record itself is kept so other handles stay valid.
  pub fn clear_face(&mut self, face: FaceId) -> usize {
    let mut cleared = 0;
    for entry in self.half_edges.iter_mut() {
      if entry.face == Some(face) {
        entry.face = None;
        cleared += 1;
      }
    }
    debug!(?face, cleared, "cleared face references");
    cleared
  }

  /// Checks that `next` and `prev` are inverse to each other everywhere.
  /// Twin symmetry holds by construction and is not checked.
  pub fn validate(&self) -> Result<(), Error> {
    self.half_edges().try_for_each(|he| self.check_links(he))
  }

  fn check_links(&self, he: HalfEdgeId) -> Result<(), Error> {
    let entry = he.read(self);
    if entry.next.read(self).prev != he || entry.prev.read(self).next != he {
      return Err(Error::BrokenChain(he));
    }
    Ok(())
  }

  // Any closed cycle visits each half-edge at most once.
  fn closed_cycle(&self, start: HalfEdgeId) -> Result<Vec<HalfEdgeId>, Error> {
    let mut out = vec![start];
    let mut at = start.read(self).next;
    while at != start {
      if out.len() >= self.half_edges.len() {
        return Err(Error::OpenBoundary(start));
      }
      out.push(at);
      at = at.read(self).next;
    }
    Ok(out)
  }

  /// The half-edges reached by following `next` from `start`, stopping
  /// before `start` comes around again. An open chain is cut off after
  /// [`half_edge_count`](Mesh::half_edge_count) steps.
  pub fn cycle(&self, start: HalfEdgeId) -> impl Iterator<Item = HalfEdge<'_>> {
    view::iter_finite(self.half_edge(start), |he| he.next()).take(self.half_edges.len())
  }

  ///////////////////////////////////////////////////////////////////////////
  // Accessors

  pub fn point(&self, id: PointId) -> &GeoPoint {
    &self.points[id.0]
  }

  pub fn point_mut(&mut self, id: PointId) -> &mut GeoPoint {
    &mut self.points[id.0]
  }

  pub fn half_edge(&self, he: HalfEdgeId) -> HalfEdge<'_> {
    HalfEdge {
      mesh: self,
      index: he,
    }
  }

  pub fn edge(&self, edge: EdgeId) -> Edge<'_> {
    Edge {
      mesh: self,
      index: edge,
    }
  }

  pub fn face(&self, face: FaceId) -> Face<'_> {
    Face {
      mesh: self,
      index: face,
    }
  }

  pub fn half_edge_mut(&mut self, he: HalfEdgeId) -> &mut HalfEdgeEntry {
    he.mutate(self)
  }

  pub fn edge_mut(&mut self, edge: EdgeId) -> &mut EdgeEntry {
    &mut self.edges[edge.0]
  }

  pub fn face_mut(&mut self, face: FaceId) -> &mut FaceEntry {
    &mut self.faces[face.0]
  }

  pub fn point_count(&self) -> usize {
    self.points.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  pub fn half_edge_count(&self) -> usize {
    self.half_edges.len()
  }

  pub fn face_count(&self) -> usize {
    self.faces.len()
  }

  pub fn points(&self) -> impl Iterator<Item = PointId> {
    (0..self.points.len()).map(PointId)
  }

  pub fn edges(&self) -> impl Iterator<Item = EdgeId> {
    (0..self.edges.len()).map(EdgeId)
  }

  pub fn half_edges(&self) -> impl Iterator<Item = HalfEdgeId> {
    (0..self.half_edges.len()).map(HalfEdgeId)
  }

  pub fn faces(&self) -> impl Iterator<Item = FaceId> {
    (0..self.faces.len()).map(FaceId)
  }
}

impl Index<PointId> for Mesh {
  type Output = GeoPoint;
  fn index(&self, id: PointId) -> &GeoPoint {
    self.point(id)
  }
}

impl IndexMut<PointId> for Mesh {
  fn index_mut(&mut self, id: PointId) -> &mut GeoPoint {
    self.point_mut(id)
  }
}

impl Index<EdgeId> for Mesh {
  type Output = EdgeEntry;
  fn index(&self, id: EdgeId) -> &EdgeEntry {
    &self.edges[id.0]
  }
}

impl Index<FaceId> for Mesh {
  type Output = FaceEntry;
  fn index(&self, id: FaceId) -> &FaceEntry {
    &self.faces[id.0]
  }
}

impl Index<HalfEdgeId> for Mesh {
  type Output = HalfEdgeEntry;
  fn index(&self, id: HalfEdgeId) -> &HalfEdgeEntry {
    id.read(self)
  }
}
