use array_init::array_init;
use num_traits::AsPrimitive;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use super::{Attributed, AttributedMut, Attributes};

/// A geographic location with metadata attached to it.
///
/// `position` is the projection onto the surface, `altitude` the vertical
/// coordinate (positive above the surface, negative below).
///
/// ```rust
/// # use geodcel::data::*;
/// let mut point = GeoPoint::new([5.01, 3.01], -1.0);
/// point.set_position([6, 12]);
/// point.set_attribute("color", "purple");
///
/// assert_eq!(point.position(), [6.0, 12.0]);
/// assert_eq!(point.altitude(), -1.0);
/// assert_eq!(point.attribute("color").and_then(Datum::as_str), Some("purple"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
  position: [f64; 2],
  altitude: f64,
  attributes: Attributes,
}

// Random sampling.
impl Distribution<GeoPoint> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GeoPoint {
    GeoPoint::new(array_init(|_| rng.gen::<f64>()), rng.gen())
  }
}

impl GeoPoint {
  pub fn new<T: AsPrimitive<f64>>(position: [T; 2], altitude: f64) -> GeoPoint {
    GeoPoint {
      position: array_init(|i| position[i].as_()),
      altitude,
      attributes: Attributes::new(),
    }
  }

  pub fn position(&self) -> [f64; 2] {
    self.position
  }

  /// Replaces both surface coordinates.
  pub fn set_position<T: AsPrimitive<f64>>(&mut self, position: [T; 2]) {
    self.position = array_init(|i| position[i].as_());
  }

  pub fn altitude(&self) -> f64 {
    self.altitude
  }

  pub fn set_altitude(&mut self, altitude: f64) {
    self.altitude = altitude;
  }

  pub fn x_coord(&self) -> f64 {
    self.position[0]
  }

  pub fn y_coord(&self) -> f64 {
    self.position[1]
  }
}

impl<T: AsPrimitive<f64>> From<[T; 2]> for GeoPoint {
  fn from(position: [T; 2]) -> GeoPoint {
    GeoPoint::new(position, 0.0)
  }
}

impl Attributed for GeoPoint {
  fn attributes(&self) -> &Attributes {
    &self.attributes
  }
}

impl AttributedMut for GeoPoint {
  fn attributes_mut(&mut self) -> &mut Attributes {
    &mut self.attributes
  }
}
