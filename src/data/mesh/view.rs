use super::{EdgeId, FaceId, HalfEdgeId, Mesh, PointId};
use crate::data::{Attributed, Attributes, GeoPoint};

///////////////////////////////////////////////////////////////////////////////
// HalfEdge

#[derive(Clone, Copy)]
pub struct HalfEdge<'a> {
  pub(super) mesh: &'a Mesh,
  pub(super) index: HalfEdgeId,
}

impl<'a> PartialEq<HalfEdgeId> for HalfEdge<'a> {
  fn eq(&self, other: &HalfEdgeId) -> bool {
    self.index == *other
  }
}

impl<'a> PartialEq for HalfEdge<'a> {
  fn eq(&self, other: &HalfEdge<'a>) -> bool {
    self.index == other.index
  }
}

impl std::fmt::Debug for HalfEdge<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "{:?}", self.index)
  }
}

impl<'a> HalfEdge<'a> {
  pub fn half_edge_id(self) -> HalfEdgeId {
    self.index
  }

  pub fn next(self) -> HalfEdge<'a> {
    self.mesh.half_edge(self.index.read(self.mesh).next)
  }

  pub fn prev(self) -> HalfEdge<'a> {
    self.mesh.half_edge(self.index.read(self.mesh).prev)
  }

  pub fn twin(self) -> HalfEdge<'a> {
    self.mesh.half_edge(self.index.twin())
  }

  pub fn parent(self) -> EdgeId {
    self.index.parent()
  }

  pub fn edge(self) -> Edge<'a> {
    self.mesh.edge(self.parent())
  }

  /// The face currently claiming this half-edge, if any.
  pub fn face(self) -> Option<FaceId> {
    self.index.read(self.mesh).face
  }

  /// The point this half-edge leaves from.
  pub fn origin(self) -> PointId {
    self.edge().endpoints()[self.index.side()]
  }

  /// The point this half-edge arrives at.
  pub fn destination(self) -> PointId {
    self.twin().origin()
  }

  pub fn position(self) -> [f64; 2] {
    self.index.read(self.mesh).position
  }

  pub fn altitude(self) -> f64 {
    self.index.read(self.mesh).altitude
  }
}

impl Attributed for HalfEdge<'_> {
  fn attributes(&self) -> &Attributes {
    &self.index.read(self.mesh).attributes
  }
}

///////////////////////////////////////////////////////////////////////////////
// Edge

#[derive(Clone, Copy)]
pub struct Edge<'a> {
  pub(super) mesh: &'a Mesh,
  pub(super) index: EdgeId,
}

impl<'a> PartialEq<EdgeId> for Edge<'a> {
  fn eq(&self, other: &EdgeId) -> bool {
    self.index == *other
  }
}

impl<'a> PartialEq for Edge<'a> {
  fn eq(&self, other: &Edge<'a>) -> bool {
    self.index == other.index
  }
}

impl std::fmt::Debug for Edge<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "{:?}", self.index)
  }
}

impl<'a> Edge<'a> {
  pub fn edge_id(self) -> EdgeId {
    self.index
  }

  pub fn endpoints(self) -> [PointId; 2] {
    self.mesh[self.index].endpoints
  }

  pub fn points(self) -> [&'a GeoPoint; 2] {
    let [p0, p1] = self.endpoints();
    [self.mesh.point(p0), self.mesh.point(p1)]
  }

  /// `[leaving endpoints[0], leaving endpoints[1]]`
  pub fn half_edges(self) -> [HalfEdge<'a>; 2] {
    [
      self.mesh.half_edge(self.index.half_edge(0)),
      self.mesh.half_edge(self.index.half_edge(1)),
    ]
  }

  pub fn is_degenerate(self) -> bool {
    let [p0, p1] = self.endpoints();
    p0 == p1
  }
}

impl Attributed for Edge<'_> {
  fn attributes(&self) -> &Attributes {
    &self.mesh[self.index].attributes
  }
}

///////////////////////////////////////////////////////////////////////////////
// Face

#[derive(Copy, Clone)]
pub struct Face<'a> {
  pub(super) mesh: &'a Mesh,
  pub(super) index: FaceId,
}

impl<'a> PartialEq<FaceId> for Face<'a> {
  fn eq(&self, other: &FaceId) -> bool {
    self.index == *other
  }
}

impl<'a> PartialEq for Face<'a> {
  fn eq(&self, other: &Face<'a>) -> bool {
    self.index == other.index
  }
}

impl std::fmt::Debug for Face<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "{:?}", self.index)
  }
}

impl<'a> Face<'a> {
  pub fn face_id(self) -> FaceId {
    self.index
  }

  /// The half-edge the face was built from.
  pub fn half_edge(self) -> HalfEdge<'a> {
    self.mesh.half_edge(self.mesh[self.index].boundary)
  }

  /// The current boundary cycle, starting at [`half_edge`](Face::half_edge).
  ///
  /// ```rust
  /// # use geodcel::data::*;
  /// # use geodcel::Error;
  /// let mut mesh = Mesh::new();
  /// let p = [[0, 0], [1, 0], [1, 1], [0, 1]].map(|xy| mesh.add_point(xy.into()));
  /// let e = [(0, 1), (1, 2), (2, 3), (3, 0)].map(|(a, b): (usize, usize)| mesh.add_edge(p[a], p[b]));
  /// for i in 0..4 {
  ///   mesh.join(e[i], e[(i + 1) % 4]);
  /// }
  /// let square = mesh.add_face(e[0].half_edge(0))?;
  /// let mut boundary = mesh.face(square).boundary();
  ///
  /// assert_eq!(boundary.next(), Some(p[0]));
  /// assert_eq!(boundary.next(), Some(p[1]));
  /// assert_eq!(boundary.next(), Some(p[2]));
  /// assert_eq!(boundary.next(), Some(p[3]));
  /// assert_eq!(boundary.next(), None);
  /// # Ok::<(), Error>(())
  /// ```
  pub fn half_edges(self) -> impl Iterator<Item = HalfEdge<'a>> {
    self.mesh.cycle(self.mesh[self.index].boundary)
  }

  /// Origins of the boundary half-edges, in order.
  pub fn boundary(self) -> impl Iterator<Item = PointId> + 'a {
    self.half_edges().map(|he| he.origin())
  }
}

impl Attributed for Face<'_> {
  fn attributes(&self) -> &Attributes {
    &self.mesh[self.index].attributes
  }
}

///////////////////////////////////////////////////////////////////////////////
// misc

pub(super) fn iter_finite<T>(begin: T, next: fn(T) -> T) -> impl Iterator<Item = T>
where
  T: PartialEq + Copy,
{
  let mut done = false;
  let mut at = begin;
  std::iter::from_fn(move || {
    if done {
      return None;
    }
    let this = at;
    at = next(at);
    if at == begin {
      done = true;
    }
    Some(this)
  })
}
