//! Typed decoding of raw script replies.

use cefd_protocol::script::ELEMENT_MARKER_KEY;
use serde_json::Value;

use crate::error::{Error, Result};

/// The decoded, typed form of one script evaluation reply.
///
/// `Number` unifies every remote numeric representation (32/64-bit
/// integers, single/double floats) into one logical value; 64-bit
/// integers beyond 2^53 lose precision crossing the JSON channel, which
/// is accepted rather than silently truncated further down. Callers that
/// need an integer truncate toward zero at the point of use via
/// [`as_int`](Self::as_int).
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptResult {
	/// Remote `null`/`undefined`: a successful evaluation with no value.
	None,
	Bool(bool),
	Number(f64),
	Text(String),
	/// A DOM node registered in the remote table, by entry id.
	ElementRef(u32),
	/// An ordered collection of any of the above.
	List(Vec<ScriptResult>),
}

impl ScriptResult {
	/// Decodes one marshalled reply value, exhaustively.
	///
	/// Anything that does not fit a recognized variant fails with
	/// [`Error::UnsupportedResultType`]; shape is never guessed from a
	/// failed cast.
	pub fn decode(raw: &Value) -> Result<Self> {
		match raw {
			Value::Null => Ok(Self::None),
			Value::Bool(b) => Ok(Self::Bool(*b)),
			Value::Number(n) => n
				.as_f64()
				.map(Self::Number)
				.ok_or_else(|| Error::UnsupportedResultType(format!("unrepresentable number: {n}"))),
			Value::String(s) => Ok(Self::Text(s.clone())),
			Value::Array(items) => items
				.iter()
				.map(Self::decode)
				.collect::<Result<Vec<_>>>()
				.map(Self::List),
			Value::Object(map) => match map.get(ELEMENT_MARKER_KEY).and_then(Value::as_u64) {
				Some(id) if map.len() == 1 => Ok(Self::ElementRef(id as u32)),
				_ => Err(Error::UnsupportedResultType(format!(
					"unrecognized object shape: {raw}"
				))),
			},
		}
	}

	/// Variant name, for error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Bool(_) => "bool",
			Self::Number(_) => "number",
			Self::Text(_) => "text",
			Self::ElementRef(_) => "element",
			Self::List(_) => "list",
		}
	}

	fn mismatch(&self, wanted: &'static str) -> Error {
		Error::UnsupportedResultType(format!("expected {wanted}, got {}", self.kind()))
	}

	pub fn as_bool(&self) -> Result<bool> {
		match self {
			Self::Bool(b) => Ok(*b),
			other => Err(other.mismatch("bool")),
		}
	}

	pub fn as_number(&self) -> Result<f64> {
		match self {
			Self::Number(n) => Ok(*n),
			other => Err(other.mismatch("number")),
		}
	}

	/// Numeric value truncated toward zero, regardless of the remote
	/// representation it arrived in.
	pub fn as_int(&self) -> Result<i32> {
		Ok(self.as_number()? as i32)
	}

	pub fn as_text(&self) -> Result<&str> {
		match self {
			Self::Text(s) => Ok(s),
			other => Err(other.mismatch("text")),
		}
	}

	/// Text, or `None` for a valueless reply. Anything else is a shape
	/// mismatch.
	pub fn as_optional_text(&self) -> Result<Option<String>> {
		match self {
			Self::None => Ok(None),
			Self::Text(s) => Ok(Some(s.clone())),
			other => Err(other.mismatch("text or none")),
		}
	}

	pub fn as_element_ref(&self) -> Result<u32> {
		match self {
			Self::ElementRef(id) => Ok(*id),
			other => Err(other.mismatch("element")),
		}
	}

	/// Asserts the valueless reply that action scripts produce.
	pub fn as_unit(&self) -> Result<()> {
		match self {
			Self::None => Ok(()),
			other => Err(other.mismatch("none")),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn decodes_every_primitive_shape() {
		assert_eq!(ScriptResult::decode(&json!(null)).unwrap(), ScriptResult::None);
		assert_eq!(
			ScriptResult::decode(&json!(true)).unwrap(),
			ScriptResult::Bool(true)
		);
		assert_eq!(
			ScriptResult::decode(&json!(12)).unwrap(),
			ScriptResult::Number(12.0)
		);
		assert_eq!(
			ScriptResult::decode(&json!(12.5)).unwrap(),
			ScriptResult::Number(12.5)
		);
		assert_eq!(
			ScriptResult::decode(&json!("hi")).unwrap(),
			ScriptResult::Text("hi".into())
		);
	}

	#[test]
	fn decodes_element_markers() {
		let raw = json!({ "__cefDriverElementId": 3 });
		assert_eq!(
			ScriptResult::decode(&raw).unwrap(),
			ScriptResult::ElementRef(3)
		);
	}

	#[test]
	fn decodes_nested_lists() {
		let raw = json!([null, 1, "x", { "__cefDriverElementId": 0 }]);
		let decoded = ScriptResult::decode(&raw).unwrap();
		assert_eq!(
			decoded,
			ScriptResult::List(vec![
				ScriptResult::None,
				ScriptResult::Number(1.0),
				ScriptResult::Text("x".into()),
				ScriptResult::ElementRef(0),
			])
		);
	}

	#[test]
	fn rejects_unrecognized_objects() {
		let err = ScriptResult::decode(&json!({ "a": 1 })).unwrap_err();
		assert!(matches!(err, Error::UnsupportedResultType(_)));

		// The marker key alone is not enough if extra fields ride along.
		let err = ScriptResult::decode(&json!({ "__cefDriverElementId": 1, "x": 2 })).unwrap_err();
		assert!(matches!(err, Error::UnsupportedResultType(_)));
	}

	#[test]
	fn as_int_truncates_toward_zero() {
		assert_eq!(ScriptResult::Number(12.9).as_int().unwrap(), 12);
		assert_eq!(ScriptResult::Number(-3.7).as_int().unwrap(), -3);
		assert_eq!(ScriptResult::Number(40.0).as_int().unwrap(), 40);
	}

	#[test]
	fn shape_mismatches_name_both_sides() {
		let err = ScriptResult::Text("yes".into()).as_bool().unwrap_err();
		let text = err.to_string();
		assert!(text.contains("expected bool"));
		assert!(text.contains("got text"));
	}

	#[test]
	fn optional_text_treats_none_as_absent() {
		assert_eq!(ScriptResult::None.as_optional_text().unwrap(), None);
		assert_eq!(
			ScriptResult::Text("v".into()).as_optional_text().unwrap(),
			Some("v".into())
		);
		assert!(ScriptResult::Bool(true).as_optional_text().is_err());
	}
}
