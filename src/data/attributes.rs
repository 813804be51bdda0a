use ordered_float::OrderedFloat;
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;

///////////////////////////////////////////////////////////////////////////////
// Datum

/// A single piece of caller-defined metadata.
///
/// Floats are wrapped in [`OrderedFloat`] so that every datum can be compared,
/// ordered and hashed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Datum {
  Bool(bool),
  Integer(i64),
  Number(OrderedFloat<f64>),
  Text(String),
  Blob(Vec<u8>),
}

impl Datum {
  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Datum::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Datum::Integer(i) => Some(*i),
      _ => None,
    }
  }

  /// Integers are widened, everything else is `None`.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Datum::Number(n) => Some(n.into_inner()),
      Datum::Integer(i) => Some(*i as f64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Datum::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bytes(&self) -> Option<&[u8]> {
    match self {
      Datum::Blob(b) => Some(b),
      _ => None,
    }
  }
}

impl fmt::Display for Datum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Datum::Bool(b) => write!(f, "{}", b),
      Datum::Integer(i) => write!(f, "{}", i),
      Datum::Number(n) => write!(f, "{}", n),
      Datum::Text(s) => write!(f, "{:?}", s),
      Datum::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
  }
}

impl From<bool> for Datum {
  fn from(b: bool) -> Datum {
    Datum::Bool(b)
  }
}

impl From<i32> for Datum {
  fn from(i: i32) -> Datum {
    Datum::Integer(i.into())
  }
}

impl From<i64> for Datum {
  fn from(i: i64) -> Datum {
    Datum::Integer(i)
  }
}

impl From<u32> for Datum {
  fn from(i: u32) -> Datum {
    Datum::Integer(i.into())
  }
}

impl From<f32> for Datum {
  fn from(n: f32) -> Datum {
    Datum::Number(OrderedFloat(n.into()))
  }
}

impl From<f64> for Datum {
  fn from(n: f64) -> Datum {
    Datum::Number(OrderedFloat(n))
  }
}

impl From<OrderedFloat<f64>> for Datum {
  fn from(n: OrderedFloat<f64>) -> Datum {
    Datum::Number(n)
  }
}

impl<'a> From<&'a str> for Datum {
  fn from(s: &'a str) -> Datum {
    Datum::Text(s.to_owned())
  }
}

impl From<String> for Datum {
  fn from(s: String) -> Datum {
    Datum::Text(s)
  }
}

impl<'a> From<&'a [u8]> for Datum {
  fn from(b: &'a [u8]) -> Datum {
    Datum::Blob(b.to_vec())
  }
}

impl From<Vec<u8>> for Datum {
  fn from(b: Vec<u8>) -> Datum {
    Datum::Blob(b)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Attributes

/// Open key/value store attached to points, edges, half-edges and faces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
  map: HashMap<String, Datum>,
}

impl Attributes {
  pub fn new() -> Attributes {
    Attributes::default()
  }

  pub fn get(&self, key: &str) -> Option<&Datum> {
    self.map.get(key)
  }

  /// Returns the value previously stored under `key`.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Datum>) -> Option<Datum> {
    self.map.insert(key.into(), value.into())
  }

  pub fn remove(&mut self, key: &str) -> Option<Datum> {
    self.map.remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.map.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Datum)> + '_ {
    self.map.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl<'a> IntoIterator for &'a Attributes {
  type Item = (&'a String, &'a Datum);
  type IntoIter = hash_map::Iter<'a, String, Datum>;
  fn into_iter(self) -> Self::IntoIter {
    self.map.iter()
  }
}

impl<K: Into<String>, V: Into<Datum>> FromIterator<(K, V)> for Attributes {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Attributes {
    Attributes {
      map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}

///////////////////////////////////////////////////////////////////////////////
// Capabilities

/// Read access to an attached attribute store.
pub trait Attributed {
  fn attributes(&self) -> &Attributes;

  /// `None` when the key was never set.
  fn attribute(&self, key: &str) -> Option<&Datum> {
    self.attributes().get(key)
  }
}

/// Write access to an attached attribute store.
pub trait AttributedMut: Attributed {
  fn attributes_mut(&mut self) -> &mut Attributes;

  fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Datum>) -> Option<Datum> {
    self.attributes_mut().insert(key, value)
  }

  fn remove_attribute(&mut self, key: &str) -> Option<Datum> {
    self.attributes_mut().remove(key)
  }
}

impl Attributed for Attributes {
  fn attributes(&self) -> &Attributes {
    self
  }
}

impl AttributedMut for Attributes {
  fn attributes_mut(&mut self) -> &mut Attributes {
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use test_strategy::proptest;

  #[test]
  fn absent_key_is_none() {
    let attrs = Attributes::new();
    assert_eq!(attrs.attribute("color"), None);
    assert!(attrs.is_empty());
  }

  #[test]
  fn overwrite_returns_previous() {
    let mut attrs = Attributes::new();
    assert_eq!(attrs.set_attribute("color", "purple"), None);
    assert_eq!(
      attrs.set_attribute("color", "firebrick"),
      Some(Datum::from("purple"))
    );
    assert_eq!(attrs.attribute("color").and_then(Datum::as_str), Some("firebrick"));
    assert_eq!(attrs.len(), 1);
  }

  #[test]
  fn typed_accessors() {
    let attrs: Attributes = vec![
      ("temperature", Datum::from(390.25)),
      ("count", Datum::from(3)),
      ("wet", Datum::from(true)),
      ("raw", Datum::from(vec![1_u8, 2, 3])),
    ]
    .into_iter()
    .collect();
    assert_eq!(attrs.get("temperature").and_then(Datum::as_f64), Some(390.25));
    assert_eq!(attrs.get("count").and_then(Datum::as_i64), Some(3));
    assert_eq!(attrs.get("count").and_then(Datum::as_f64), Some(3.0));
    assert_eq!(attrs.get("wet").and_then(Datum::as_bool), Some(true));
    assert_eq!(attrs.get("raw").and_then(Datum::as_bytes), Some(&[1_u8, 2, 3][..]));
    assert_eq!(attrs.get("wet").and_then(Datum::as_str), None);
  }

  #[test]
  fn remove_attribute() {
    let mut attrs = Attributes::new();
    attrs.set_attribute("k", 1);
    assert_eq!(attrs.remove_attribute("k"), Some(Datum::Integer(1)));
    assert!(!attrs.contains_key("k"));
  }

  #[proptest]
  fn set_then_get(key: String, #[strategy(any_datum())] value: Datum) {
    let mut attrs = Attributes::new();
    attrs.set_attribute(key.clone(), value.clone());
    assert_eq!(attrs.attribute(&key), Some(&value));
  }
}
