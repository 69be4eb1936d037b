//! Element-level facade over one registered DOM node.

use std::fmt;

use cefd_protocol::{Locator, MouseButton, Point, SearchRoot, Size, script};
use cefd_runtime::{Result, ScriptResult};

use crate::registry::EntryId;
use crate::session::Session;

/// Handle over one DOM node registered in the remote table.
///
/// Identity is the (entry id, epoch) pair: two handles are equal only if
/// both match, and every operation on a handle issued before the most
/// recent navigation fails with [`Error::StaleElement`], even when the
/// new document happens to hand the same numeric id to an unrelated node.
/// Handles are cheap to clone and only meaningful inside the session that
/// issued them.
///
/// [`Error::StaleElement`]: cefd_runtime::Error::StaleElement
#[derive(Clone)]
pub struct ElementHandle {
	session: Session,
	entry: EntryId,
}

impl ElementHandle {
	pub(crate) fn new(session: Session, entry: EntryId) -> Self {
		Self { session, entry }
	}

	/// Runs an element-scoped script body after the staleness check.
	async fn run(&self, body: &str) -> Result<ScriptResult> {
		self.session.ensure_current(self.entry)?;
		self.session.bridge().execute(body).await
	}

	/// Lowercased tag name.
	pub async fn tag_name(&self) -> Result<String> {
		let result = self.run(&script::get_tag_name(self.entry.id)).await?;
		Ok(result.as_text()?.to_lowercase())
	}

	/// Rendered markup of the element's contents.
	pub async fn text(&self) -> Result<String> {
		let result = self.run(&script::get_inner_html(self.entry.id)).await?;
		Ok(result.as_text()?.to_string())
	}

	/// `true` unless the element carries the `disabled` state.
	pub async fn enabled(&self) -> Result<bool> {
		let disabled = self.run(&script::get_disabled(self.entry.id)).await?;
		Ok(!disabled.as_bool()?)
	}

	/// Checked state for checkboxes/radios, selected state for options.
	pub async fn selected(&self) -> Result<bool> {
		self.run(&script::get_selected(self.entry.id)).await?.as_bool()
	}

	/// Top-left corner of the bounding rectangle, truncated toward zero.
	pub async fn location(&self) -> Result<Point> {
		let x = self.run(&script::get_rect_x(self.entry.id)).await?.as_int()?;
		let y = self.run(&script::get_rect_y(self.entry.id)).await?.as_int()?;
		Ok(Point::new(x, y))
	}

	/// Bounding rectangle dimensions, truncated toward zero.
	pub async fn size(&self) -> Result<Size> {
		let width = self
			.run(&script::get_rect_width(self.entry.id))
			.await?
			.as_int()?;
		let height = self
			.run(&script::get_rect_height(self.entry.id))
			.await?
			.as_int()?;
		Ok(Size::new(width, height))
	}

	/// Style-level visibility. Occlusion by other nodes is not checked.
	pub async fn displayed(&self) -> Result<bool> {
		self.run(&script::get_displayed(self.entry.id)).await?.as_bool()
	}

	/// Empties the element's `value` attribute.
	pub async fn clear(&self) -> Result<()> {
		self.run(&script::set_attribute(self.entry.id, "value", ""))
			.await?
			.as_unit()
	}

	/// Focuses the element, then delegates a physical left click at the
	/// center of its bounding rectangle.
	///
	/// The click point is top-left plus half the width and height, each
	/// truncated toward zero. Whether that point is actually visible is
	/// not checked: a covered or scrolled-out element receives the click
	/// at the wrong visual target.
	pub async fn click(&self) -> Result<()> {
		self.run(&script::focus(self.entry.id)).await?.as_unit()?;
		let origin = self.location().await?;
		let size = self.size().await?;
		let target = origin.offset(size.width / 2, size.height / 2);
		self.session
			.input()
			.click_at(MouseButton::Left, target)
			.await
	}

	/// Attribute value, or `None` when the attribute is absent.
	pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
		self.run(&script::get_attribute(self.entry.id, name))
			.await?
			.as_optional_text()
	}

	/// Computed style value, or `None` when the property is unknown.
	pub async fn get_css_value(&self, name: &str) -> Result<Option<String>> {
		self.run(&script::get_css_value(self.entry.id, name))
			.await?
			.as_optional_text()
	}

	/// Property value stringified remotely, or `None` when absent.
	pub async fn get_property(&self, name: &str) -> Result<Option<String>> {
		self.run(&script::get_property(self.entry.id, name))
			.await?
			.as_optional_text()
	}

	/// Focuses the element, then sends raw keystrokes through the input
	/// collaborator.
	///
	/// Keystrokes land on whatever holds host-window-level input focus;
	/// they are not scoped per-character to this node.
	pub async fn send_keys(&self, text: &str) -> Result<()> {
		self.run(&script::focus(self.entry.id)).await?.as_unit()?;
		let input = self.session.input();
		input.focus_window().await?;
		input.send_keystrokes(text).await
	}

	/// Triggers the element's native submit behavior.
	pub async fn submit(&self) -> Result<()> {
		self.run(&script::submit(self.entry.id)).await?.as_unit()
	}

	/// Finds the first descendant matching `locator`.
	///
	/// Zero matches fail with [`Error::NoSuchElement`].
	///
	/// [`Error::NoSuchElement`]: cefd_runtime::Error::NoSuchElement
	pub async fn find_element(&self, locator: &Locator) -> Result<ElementHandle> {
		self.session.ensure_current(self.entry)?;
		self.session
			.find_in(SearchRoot::Element(self.entry.id), locator)
			.await
	}

	/// Finds every descendant matching `locator`, in document order.
	///
	/// Zero matches yield an empty vector, never an error.
	pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>> {
		self.session.ensure_current(self.entry)?;
		self.session
			.find_all_in(SearchRoot::Element(self.entry.id), locator)
			.await
	}
}

impl PartialEq for ElementHandle {
	fn eq(&self, other: &Self) -> bool {
		self.entry == other.entry
	}
}

impl Eq for ElementHandle {}

impl fmt::Debug for ElementHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementHandle")
			.field("id", &self.entry.id)
			.field("epoch", &self.entry.epoch)
			.finish()
	}
}
