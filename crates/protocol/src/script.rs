//! JavaScript generation for every round trip the driver makes.
//!
//! Three families of text live here:
//!
//! - the locator compiler ([`compile`]), turning a [`Locator`] plus a
//!   [`SearchRoot`] into a `return`-terminated script body;
//! - per-operation script builders for element state reads, element
//!   actions, and session-level navigation;
//! - the remote plumbing: the idempotent helper [`BOOTSTRAP`] and the
//!   evaluation envelope ([`wrap`]) that marshals results and separates a
//!   remote throw from a successful `null`.
//!
//! Script bodies follow one wire contract: local declarations are allowed
//! and the body terminates with `return <value>;`. [`wrap`] turns a body
//! into a single self-contained expression suitable for the host's
//! evaluate-one-expression channel.
//!
//! Every caller-supplied value is routed through [`escape`] before being
//! embedded in a string literal. A quote or backslash in a locator value
//! must not be able to terminate the literal early or smuggle in extra
//! statements; this is a hard contract of the compiler, not a nicety.

use crate::locator::{Locator, Strategy};

/// Remote helper namespace installed by [`BOOTSTRAP`].
pub const HELPER_NAMESPACE: &str = "window.__cefDriver";

/// Key marking a marshalled element reference in an evaluation reply.
pub const ELEMENT_MARKER_KEY: &str = "__cefDriverElementId";

/// Idempotent installer for the remote half of the element registry.
///
/// The entry table is a plain array living in the document's window, so it
/// is discarded together with the document on navigation. `entryId` assigns
/// lazily and monotonically: a node keeps the index it got the first time
/// it was returned from any query, which is what makes element identity
/// referentially stable within one document.
pub const BOOTSTRAP: &str = r#"window.__cefDriver = window.__cefDriver || (function () {
	var entries = [];
	return {
		entryId: function (node) {
			var index = entries.indexOf(node);
			if (index < 0) {
				index = entries.length;
				entries.push(node);
			}
			return index;
		},
		getElementByEntryId: function (id) {
			return entries[id];
		},
		getElementsByXPath: function (expression, context) {
			var result = document.evaluate(expression, context || document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
			var nodes = [];
			for (var i = 0; i < result.snapshotLength; i++) {
				nodes.push(result.snapshotItem(i));
			}
			return nodes;
		}
	};
})();"#;

/// Search context for compiled locator scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchRoot {
	/// Search from the document root.
	Document,
	/// Search relative to a previously registered element.
	Element(u32),
}

/// Escapes `value` for embedding inside a JavaScript string literal.
///
/// Handles both quote kinds, so the result is safe in single- and
/// double-quoted literals alike.
pub fn escape(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for ch in value.chars() {
		match ch {
			'\\' => out.push_str("\\\\"),
			'\'' => out.push_str("\\'"),
			'"' => out.push_str("\\\""),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			_ => out.push(ch),
		}
	}
	out
}

fn context_decl(root: SearchRoot) -> String {
	match root {
		SearchRoot::Document => "const context = document;".to_string(),
		SearchRoot::Element(id) => {
			format!("const context = {HELPER_NAMESPACE}.getElementByEntryId({id});")
		}
	}
}

/// Compiles a locator into a `return`-terminated script body.
///
/// Singular scripts (`plural == false`) return the first match or the
/// DOM's no-match value (`null`/`undefined`), never a thrown error for
/// zero matches. Plural scripts return an ordered sequence, empty when
/// nothing matches.
pub fn compile(root: SearchRoot, locator: &Locator, plural: bool) -> String {
	let value = escape(locator.value());
	let query = match (locator.strategy(), plural) {
		(Strategy::Id, false) => format!("context.querySelector('[id=\"{value}\"]')"),
		(Strategy::Id, true) => format!("context.querySelectorAll('[id=\"{value}\"]')"),
		(Strategy::Name, false) => format!("context.querySelector('[name=\"{value}\"]')"),
		(Strategy::Name, true) => format!("context.querySelectorAll('[name=\"{value}\"]')"),
		(Strategy::ClassNameContains, false) => {
			format!("context.getElementsByClassName('{value}')[0]")
		}
		(Strategy::ClassNameContains, true) => {
			format!("context.getElementsByClassName('{value}')")
		}
		(Strategy::CssSelector, false) => format!("context.querySelector('{value}')"),
		(Strategy::CssSelector, true) => format!("context.querySelectorAll('{value}')"),
		(Strategy::TagName, false) => format!("context.getElementsByTagName('{value}')[0]"),
		(Strategy::TagName, true) => format!("context.getElementsByTagName('{value}')"),
		(Strategy::XPath, false) => {
			format!("{HELPER_NAMESPACE}.getElementsByXPath('{value}', context)[0]")
		}
		(Strategy::XPath, true) => {
			format!("{HELPER_NAMESPACE}.getElementsByXPath('{value}', context)")
		}
	};
	format!("{}\nreturn {query};", context_decl(root))
}

fn element_decl(id: u32) -> String {
	format!("const element = {HELPER_NAMESPACE}.getElementByEntryId({id});")
}

/// Tag name, as the DOM reports it (uppercase for HTML documents).
pub fn get_tag_name(id: u32) -> String {
	format!("{}\nreturn element.tagName;", element_decl(id))
}

/// Rendered markup of the element's contents.
pub fn get_inner_html(id: u32) -> String {
	format!("{}\nreturn element.innerHTML;", element_decl(id))
}

pub fn get_disabled(id: u32) -> String {
	format!("{}\nreturn element.disabled === true;", element_decl(id))
}

/// Checked state for checkboxes/radios, selected state for options.
pub fn get_selected(id: u32) -> String {
	format!(
		"{}\nreturn element.checked === true || element.selected === true;",
		element_decl(id)
	)
}

pub fn get_rect_x(id: u32) -> String {
	format!("{}\nreturn element.getBoundingClientRect().x;", element_decl(id))
}

pub fn get_rect_y(id: u32) -> String {
	format!("{}\nreturn element.getBoundingClientRect().y;", element_decl(id))
}

pub fn get_rect_width(id: u32) -> String {
	format!(
		"{}\nreturn element.getBoundingClientRect().width;",
		element_decl(id)
	)
}

pub fn get_rect_height(id: u32) -> String {
	format!(
		"{}\nreturn element.getBoundingClientRect().height;",
		element_decl(id)
	)
}

/// Style-level visibility; does not account for occlusion by other nodes.
pub fn get_displayed(id: u32) -> String {
	format!(
		"{}\nconst style = window.getComputedStyle(element);\nreturn style.display !== 'none' && style.visibility !== 'hidden';",
		element_decl(id)
	)
}

pub fn focus(id: u32) -> String {
	format!("{}\nelement.focus();\nreturn null;", element_decl(id))
}

pub fn set_attribute(id: u32, name: &str, value: &str) -> String {
	format!(
		"{}\nelement.setAttribute('{}', '{}');\nreturn null;",
		element_decl(id),
		escape(name),
		escape(value)
	)
}

/// Attribute read; absent attributes come back as `null`.
pub fn get_attribute(id: u32, name: &str) -> String {
	format!(
		"{}\nreturn element.getAttribute('{}');",
		element_decl(id),
		escape(name)
	)
}

/// Computed style read; unknown properties come back as `null` rather than
/// the DOM's empty string, so the caller can distinguish "absent".
pub fn get_css_value(id: u32, name: &str) -> String {
	format!(
		"{}\nconst value = window.getComputedStyle(element).getPropertyValue('{}');\nreturn value === '' ? null : value;",
		element_decl(id),
		escape(name)
	)
}

/// Property read, stringified remotely; absent properties come back `null`.
pub fn get_property(id: u32, name: &str) -> String {
	format!(
		"{}\nconst value = element['{}'];\nreturn value === null || value === undefined ? null : String(value);",
		element_decl(id),
		escape(name)
	)
}

/// Native submit: a form submits itself, anything else submits its owning
/// form.
pub fn submit(id: u32) -> String {
	format!(
		"{}\nif (typeof element.submit === 'function') {{ element.submit(); }} else if (element.form) {{ element.form.submit(); }}\nreturn null;",
		element_decl(id)
	)
}

pub fn current_url() -> &'static str {
	"return window.location.href;"
}

pub fn title() -> &'static str {
	"return document.title;"
}

pub fn page_source() -> &'static str {
	"return document.documentElement.outerHTML;"
}

pub fn navigate_to(url: &str) -> String {
	format!("window.location.href = '{}';\nreturn null;", escape(url))
}

pub fn history_back() -> &'static str {
	"window.history.back();\nreturn null;"
}

pub fn history_forward() -> &'static str {
	"window.history.forward();\nreturn null;"
}

pub fn reload() -> &'static str {
	"window.location.reload();\nreturn null;"
}

/// Wraps a `return`-terminated script body into one self-contained
/// expression.
///
/// The wrapper (re)installs [`BOOTSTRAP`], runs the body inside a
/// function, marshals the produced value (DOM nodes become
/// `{"__cefDriverElementId": n}` markers via the remote table, node
/// collections become arrays), and folds any thrown error into
/// `{ok: false, error}` so the bridge can tell a remote failure apart
/// from a successful `null`.
pub fn wrap(body: &str) -> String {
	format!(
		r#"(function () {{
{BOOTSTRAP}
	var driver = {HELPER_NAMESPACE};
	function marshal(value) {{
		if (value === null || value === undefined) {{ return null; }}
		var kind = typeof value;
		if (kind === 'boolean' || kind === 'number' || kind === 'string') {{ return value; }}
		if (value instanceof Element) {{ return {{ '{ELEMENT_MARKER_KEY}': driver.entryId(value) }}; }}
		if (value instanceof NodeList || value instanceof HTMLCollection || Array.isArray(value)) {{
			return Array.prototype.slice.call(value).map(function (item) {{ return marshal(item); }});
		}}
		return value;
	}}
	try {{
		var result = (function () {{
{body}
		}})();
		return {{ ok: true, value: marshal(result) }};
	}} catch (err) {{
		return {{ ok: false, error: err && err.message !== undefined ? String(err.message) : String(err) }};
	}}
}})()"#
	)
}
