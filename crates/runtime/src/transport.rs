//! Collaborator seams: the script channel and physical input synthesis.
//!
//! The driver core never talks to the host process directly; it consumes
//! these two traits. Implementations live with the embedding (process
//! attach, window handles, OS input APIs) and are out of scope here.

use async_trait::async_trait;
use cefd_protocol::{MouseButton, Point};
use serde_json::Value;

use crate::error::Result;

/// The transport primitive beneath the bridge: evaluate one script
/// expression in the hosted document and hand back its serialized value.
///
/// Implementations own process attachment and any deadline enforcement;
/// the driver itself imposes no timeout, so an `execute_script` that never
/// resolves parks the calling operation. The call must not resolve until
/// the document has settled any navigation the script initiated; the
/// session treats "the call returned" as "the navigation completed".
#[async_trait]
pub trait ScriptHost: Send + Sync {
	async fn execute_script(&self, script: &str) -> Result<Value>;
}

/// Physical input synthesis against the host window.
///
/// Clicks and keystrokes go through the operating system, not the DOM, so
/// they land on whatever is visually at the target, and the driver does not
/// check occlusion first.
#[async_trait]
pub trait InputSynthesizer: Send + Sync {
	/// Brings the host window to the foreground.
	async fn focus_window(&self) -> Result<()>;

	/// Presses and releases `button` at an absolute screen point.
	async fn click_at(&self, button: MouseButton, point: Point) -> Result<()>;

	/// Sends raw keystrokes to whatever currently holds input focus.
	async fn send_keystrokes(&self, text: &str) -> Result<()>;
}
