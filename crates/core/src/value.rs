//! Handle-bearing form of a decoded script result.

use crate::element::ElementHandle;

/// A decoded script value with every element reference adopted into an
/// [`ElementHandle`] of the issuing session.
///
/// This is what [`Session::evaluate`](crate::Session::evaluate) returns:
/// the same shape as the wire-level `ScriptResult`, except that opaque
/// element ids have become live handles.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
	Null,
	Bool(bool),
	Number(f64),
	Text(String),
	Element(ElementHandle),
	List(Vec<ScriptValue>),
}

impl ScriptValue {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_element(&self) -> Option<&ElementHandle> {
		match self {
			Self::Element(handle) => Some(handle),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[ScriptValue]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}
}
