// This module contains strategies and fixtures for:
//  * points
//  * attribute values
//  * closed rings of edges
//  * counting emitted warnings
// A Strategy is a way to generate a shrinkable value.
use crate::data::{Datum, EdgeId, GeoPoint, Mesh};

use core::ops::Range;
use ordered_float::OrderedFloat;
use proptest::array::uniform2;
use proptest::collection::*;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

///////////////////////////////////////////////////////////////////////////////
// Arbitrary points

// Finite coordinates only. NaN would make position comparisons meaningless.
pub fn any_coord() -> impl Strategy<Value = f64> + Clone {
  -1e9..1e9_f64
}

pub fn any_point() -> impl Strategy<Value = GeoPoint> {
  (uniform2(any_coord()), any_coord()).prop_map(|(xy, z)| GeoPoint::new(xy, z))
}

///////////////////////////////////////////////////////////////////////////////
// Arbitrary data

pub fn any_datum() -> impl Strategy<Value = Datum> {
  prop_oneof![
    any::<bool>().prop_map(Datum::Bool),
    any::<i64>().prop_map(Datum::Integer),
    any::<f64>().prop_map(|f| Datum::Number(OrderedFloat(f))),
    ".*".prop_map(Datum::Text),
    vec(any::<u8>(), 0..32).prop_map(Datum::Blob),
  ]
}

///////////////////////////////////////////////////////////////////////////////
// Rings

pub fn ring_points(len: Range<usize>) -> impl Strategy<Value = Vec<GeoPoint>> {
  vec(any_point(), len)
}

// Edge `i` runs from point `i` to point `i + 1` and is joined to edge `i + 1`.
// The forward half-edges form one closed cycle, the backward ones another.
pub fn ring(points: Vec<GeoPoint>) -> (Mesh, Vec<EdgeId>) {
  let mut mesh = Mesh::new();
  let ids: Vec<_> = points.into_iter().map(|pt| mesh.add_point(pt)).collect();
  let n = ids.len();
  let edges: Vec<EdgeId> = (0..n)
    .map(|i| mesh.add_edge(ids[i], ids[(i + 1) % n]))
    .collect();
  for i in 0..n {
    mesh.join(edges[i], edges[(i + 1) % n]);
  }
  (mesh, edges)
}

pub fn triangle() -> (Mesh, Vec<EdgeId>) {
  ring(vec![
    GeoPoint::new([0.0, 0.0], 0.0),
    GeoPoint::new([1.0, 0.0], 0.0),
    GeoPoint::new([0.0, 1.0], 0.0),
  ])
}

///////////////////////////////////////////////////////////////////////////////
// Log capture

#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    if *event.metadata().level() == Level::WARN {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }
}

// The subscriber is scoped to the current thread, so parallel tests do not
// see each other's events.
pub fn count_warnings<F: FnOnce()>(f: F) -> usize {
  let counter = WarnCounter::default();
  let subscriber = tracing_subscriber::registry().with(counter.clone());
  tracing::subscriber::with_default(subscriber, f);
  counter.0.load(Ordering::SeqCst)
}
