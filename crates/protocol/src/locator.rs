//! Locator model and wire-string parsing.
//!
//! External callers supply locators as a single wire string
//! `"<StrategyTag>:<value>"`. Parsing happens exactly once at this
//! boundary; past it the driver only ever sees the closed [`Strategy`]
//! enumeration, never free-form prefix matching. An unrecognized tag is
//! rejected here, before any script text exists.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A locator wire string that is malformed or names an unknown strategy.
///
/// Raised by [`Locator::from_str`] before any round trip to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locator: {wire:?}")]
pub struct UnsupportedLocatorError {
	/// The wire string that failed to parse.
	pub wire: String,
}

/// Element lookup strategy.
///
/// Closed set: every variant maps to exactly one DOM query in the
/// compiler, and the wire tags below are the only ones accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
	/// Exact `id` attribute match.
	Id,
	/// Exact `name` attribute match.
	Name,
	/// Substring class match (`getElementsByClassName` semantics).
	ClassNameContains,
	/// Raw CSS selector, passed to the native selector engine verbatim.
	CssSelector,
	/// Tag-name query.
	TagName,
	/// XPath expression, evaluated relative to the context node.
	XPath,
}

impl Strategy {
	/// Wire tag exactly as external callers spell it.
	pub fn wire_tag(self) -> &'static str {
		match self {
			Self::Id => "Id",
			Self::Name => "Name",
			Self::ClassNameContains => "ClassName[Contains]",
			Self::CssSelector => "CssSelector",
			Self::TagName => "TagName",
			Self::XPath => "XPath",
		}
	}

	fn from_wire_tag(tag: &str) -> Option<Self> {
		match tag {
			"Id" => Some(Self::Id),
			"Name" => Some(Self::Name),
			"ClassName[Contains]" => Some(Self::ClassNameContains),
			"CssSelector" => Some(Self::CssSelector),
			"TagName" => Some(Self::TagName),
			"XPath" => Some(Self::XPath),
			_ => None,
		}
	}
}

/// A strategy + value pair identifying elements to find.
///
/// Immutable once constructed. The value is stored exactly as given
/// (wire parsing trims surrounding whitespace, as the original wire
/// format allows `"Id: login"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
	strategy: Strategy,
	value: String,
}

impl Locator {
	/// Creates a locator from an already-validated strategy and value.
	pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
		Self {
			strategy,
			value: value.into(),
		}
	}

	/// The lookup strategy.
	pub fn strategy(&self) -> Strategy {
		self.strategy
	}

	/// The strategy-specific value (selector, attribute value, expression).
	pub fn value(&self) -> &str {
		&self.value
	}
}

impl FromStr for Locator {
	type Err = UnsupportedLocatorError;

	fn from_str(wire: &str) -> Result<Self, Self::Err> {
		let reject = || UnsupportedLocatorError {
			wire: wire.to_string(),
		};
		let (tag, value) = wire.split_once(':').ok_or_else(reject)?;
		let strategy = Strategy::from_wire_tag(tag).ok_or_else(reject)?;
		Ok(Self {
			strategy,
			value: value.trim().to_string(),
		})
	}
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.strategy.wire_tag(), self.value)
	}
}
