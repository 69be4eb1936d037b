//! The serialized script-evaluation channel.

use std::sync::Arc;

use cefd_protocol::script;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::result::ScriptResult;
use crate::transport::ScriptHost;

/// Request/response channel to the remote document.
///
/// Exactly one evaluation is in flight at any time: concurrent callers
/// queue behind the internal lock in arrival order and are never
/// dispatched against the document simultaneously. No timeout or
/// cancellation exists at this layer; a reply that never arrives parks
/// the caller until the underlying [`ScriptHost`] gives up on its own
/// terms.
pub struct ScriptBridge {
	host: Arc<dyn ScriptHost>,
	in_flight: Mutex<()>,
}

impl ScriptBridge {
	pub fn new(host: Arc<dyn ScriptHost>) -> Self {
		Self {
			host,
			in_flight: Mutex::new(()),
		}
	}

	/// Evaluates a `return`-terminated script body and decodes the single
	/// reply.
	///
	/// The body is wrapped into the protocol envelope first, so a remote
	/// throw comes back as [`Error::ScriptExecution`] and is never
	/// conflated with a successful evaluation that returned
	/// [`ScriptResult::None`].
	pub async fn execute(&self, body: &str) -> Result<ScriptResult> {
		let wrapped = script::wrap(body);
		let raw = {
			let _guard = self.in_flight.lock().await;
			tracing::trace!(target: "cefd", script = body, "evaluating");
			self.host.execute_script(&wrapped).await?
		};
		decode_envelope(&raw)
	}
}

impl std::fmt::Debug for ScriptBridge {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ScriptBridge").finish_non_exhaustive()
	}
}

/// Splits remote success from remote throw before value decoding.
fn decode_envelope(raw: &Value) -> Result<ScriptResult> {
	let Value::Object(map) = raw else {
		return Err(Error::Transport(format!(
			"malformed evaluation envelope: {raw}"
		)));
	};
	match map.get("ok").and_then(Value::as_bool) {
		Some(true) => ScriptResult::decode(map.get("value").unwrap_or(&Value::Null)),
		Some(false) => Err(Error::ScriptExecution(
			map.get("error")
				.and_then(Value::as_str)
				.unwrap_or("unknown remote error")
				.to_string(),
		)),
		None => Err(Error::Transport(format!(
			"malformed evaluation envelope: {raw}"
		))),
	}
}
