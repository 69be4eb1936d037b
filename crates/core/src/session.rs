//! Top-level facade over one browser-document attachment.

use std::fmt;
use std::sync::Arc;

use cefd_protocol::{Locator, SearchRoot, script};
use cefd_runtime::{
	Error, InputSynthesizer, Result, ScriptBridge, ScriptHost, ScriptResult,
};
use parking_lot::{Mutex, RwLock};

use crate::element::ElementHandle;
use crate::registry::{ElementRegistry, EntryId};
use crate::value::ScriptValue;

/// The automation-facing handle over one browser-document attachment.
///
/// Owns the script bridge, the element registry, and navigation state.
/// Cloning is cheap and shares the same session. The session moves
/// `Created → Ready ⇄ Navigating → Ready`: the navigation methods issue
/// their script, and the epoch increments exactly when the call
/// completes; that edge is what turns every previously issued
/// [`ElementHandle`] stale. Teardown of the host attachment is the
/// embedding's responsibility.
///
/// All operations are strictly serialized request/response calls: the
/// bridge admits one evaluation at a time and queues the rest, so two
/// evaluations never overlap against the same document state.
#[derive(Clone)]
pub struct Session {
	inner: Arc<SessionInner>,
}

struct SessionInner {
	bridge: ScriptBridge,
	input: Arc<dyn InputSynthesizer>,
	registry: Mutex<ElementRegistry>,
	url: RwLock<String>,
}

impl Session {
	/// Creates a session over an already-attached document.
	pub fn new(host: Arc<dyn ScriptHost>, input: Arc<dyn InputSynthesizer>) -> Self {
		Self {
			inner: Arc::new(SessionInner {
				bridge: ScriptBridge::new(host),
				input,
				registry: Mutex::new(ElementRegistry::default()),
				url: RwLock::new("about:blank".to_string()),
			}),
		}
	}

	pub(crate) fn bridge(&self) -> &ScriptBridge {
		&self.inner.bridge
	}

	pub(crate) fn input(&self) -> &dyn InputSynthesizer {
		self.inner.input.as_ref()
	}

	pub(crate) fn ensure_current(&self, entry: EntryId) -> Result<()> {
		self.inner.registry.lock().check_current(entry)
	}

	fn adopt(&self, id: u32) -> ElementHandle {
		let entry = self.inner.registry.lock().adopt(id);
		tracing::trace!(target: "cefd", id = entry.id, epoch = entry.epoch, "adopted element");
		ElementHandle::new(self.clone(), entry)
	}

	fn to_value(&self, result: ScriptResult) -> ScriptValue {
		match result {
			ScriptResult::None => ScriptValue::Null,
			ScriptResult::Bool(b) => ScriptValue::Bool(b),
			ScriptResult::Number(n) => ScriptValue::Number(n),
			ScriptResult::Text(s) => ScriptValue::Text(s),
			ScriptResult::ElementRef(id) => ScriptValue::Element(self.adopt(id)),
			ScriptResult::List(items) => {
				ScriptValue::List(items.into_iter().map(|item| self.to_value(item)).collect())
			}
		}
	}

	/// Evaluates a `return`-terminated script body in the document.
	///
	/// Element references in the reply are adopted into handles of the
	/// current epoch; a remote throw surfaces as
	/// [`Error::ScriptExecution`], never as a `Null` value.
	pub async fn evaluate(&self, body: &str) -> Result<ScriptValue> {
		let result = self.inner.bridge.execute(body).await?;
		Ok(self.to_value(result))
	}

	/// Finds the first element matching `locator`, searching from the
	/// document root.
	///
	/// Zero matches fail with [`Error::NoSuchElement`].
	pub async fn find_element(&self, locator: &Locator) -> Result<ElementHandle> {
		self.find_in(SearchRoot::Document, locator).await
	}

	/// Finds every element matching `locator` in document order, searching
	/// from the document root.
	///
	/// Zero matches yield an empty vector, never an error.
	pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>> {
		self.find_all_in(SearchRoot::Document, locator).await
	}

	pub(crate) async fn find_in(
		&self,
		root: SearchRoot,
		locator: &Locator,
	) -> Result<ElementHandle> {
		let body = script::compile(root, locator, false);
		match self.inner.bridge.execute(&body).await? {
			ScriptResult::ElementRef(id) => Ok(self.adopt(id)),
			ScriptResult::None => Err(Error::NoSuchElement(locator.to_string())),
			other => Err(Error::UnsupportedResultType(format!(
				"expected element, got {}",
				other.kind()
			))),
		}
	}

	pub(crate) async fn find_all_in(
		&self,
		root: SearchRoot,
		locator: &Locator,
	) -> Result<Vec<ElementHandle>> {
		let body = script::compile(root, locator, true);
		match self.inner.bridge.execute(&body).await? {
			ScriptResult::List(items) => items
				.into_iter()
				.map(|item| match item {
					ScriptResult::ElementRef(id) => Ok(self.adopt(id)),
					other => Err(Error::UnsupportedResultType(format!(
						"expected element in match list, got {}",
						other.kind()
					))),
				})
				.collect(),
			other => Err(Error::UnsupportedResultType(format!(
				"expected match list, got {}",
				other.kind()
			))),
		}
	}

	/// Last URL observed after a completed navigation, `about:blank`
	/// before the first one.
	pub fn url(&self) -> String {
		self.inner.url.read().clone()
	}

	/// Navigates to `url`.
	///
	/// Completes when the transport reports the document ready; at that
	/// point every previously issued handle is stale.
	pub async fn goto(&self, url: &str) -> Result<()> {
		self.navigate(&script::navigate_to(url)).await
	}

	/// Navigates one step back in history.
	pub async fn back(&self) -> Result<()> {
		self.navigate(script::history_back()).await
	}

	/// Navigates one step forward in history.
	pub async fn forward(&self) -> Result<()> {
		self.navigate(script::history_forward()).await
	}

	/// Reloads the current document.
	pub async fn refresh(&self) -> Result<()> {
		self.navigate(script::reload()).await
	}

	async fn navigate(&self, body: &str) -> Result<()> {
		self.inner.bridge.execute(body).await?.as_unit()?;
		let epoch = self.inner.registry.lock().advance_epoch();

		// First evaluation against the fresh document; also refreshes the
		// cached URL.
		let landed = self.inner.bridge.execute(script::current_url()).await?;
		let landed = landed.as_text()?.to_string();
		*self.inner.url.write() = landed.clone();
		tracing::debug!(target: "cefd", url = %landed, epoch, "navigation complete");
		Ok(())
	}

	/// Document title.
	pub async fn title(&self) -> Result<String> {
		let result = self.inner.bridge.execute(script::title()).await?;
		Ok(result.as_text()?.to_string())
	}

	/// Full serialized markup of the current document.
	pub async fn page_source(&self) -> Result<String> {
		let result = self.inner.bridge.execute(script::page_source()).await?;
		Ok(result.as_text()?.to_string())
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("url", &self.url())
			.field("epoch", &self.inner.registry.lock().current_epoch())
			.finish()
	}
}
