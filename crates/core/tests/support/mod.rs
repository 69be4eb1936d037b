//! Test doubles for the collaborator seams.
#![allow(dead_code)] // not every test binary exercises every double

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cefd::{Error, InputSynthesizer, MouseButton, Point, Result, ScriptHost, Session};
use cefd_protocol::script::ELEMENT_MARKER_KEY;
use serde_json::{Value, json};

/// Scripted host: pops one canned reply per evaluation and records every
/// script it was handed.
#[derive(Default)]
pub struct StubHost {
	replies: Mutex<VecDeque<Value>>,
	scripts: Mutex<Vec<String>>,
}

impl StubHost {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Queues a successful evaluation reply.
	pub fn push_ok(&self, value: Value) {
		self.push_raw(json!({ "ok": true, "value": value }));
	}

	/// Queues a remote-throw reply.
	pub fn push_err(&self, message: &str) {
		self.push_raw(json!({ "ok": false, "error": message }));
	}

	pub fn push_raw(&self, raw: Value) {
		self.replies.lock().unwrap().push_back(raw);
	}

	pub fn script_count(&self) -> usize {
		self.scripts.lock().unwrap().len()
	}

	pub fn scripts(&self) -> Vec<String> {
		self.scripts.lock().unwrap().clone()
	}
}

#[async_trait]
impl ScriptHost for StubHost {
	async fn execute_script(&self, script: &str) -> Result<Value> {
		self.scripts.lock().unwrap().push(script.to_string());
		self.replies
			.lock()
			.unwrap()
			.pop_front()
			.ok_or_else(|| Error::Transport("no scripted reply left".into()))
	}
}

/// Records synthesized input without touching any real window.
#[derive(Default)]
pub struct RecordingInput {
	events: Mutex<Vec<InputEvent>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
	FocusWindow,
	Click(MouseButton, Point),
	Keystrokes(String),
}

impl RecordingInput {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn events(&self) -> Vec<InputEvent> {
		self.events.lock().unwrap().clone()
	}
}

#[async_trait]
impl InputSynthesizer for RecordingInput {
	async fn focus_window(&self) -> Result<()> {
		self.events.lock().unwrap().push(InputEvent::FocusWindow);
		Ok(())
	}

	async fn click_at(&self, button: MouseButton, point: Point) -> Result<()> {
		self.events
			.lock()
			.unwrap()
			.push(InputEvent::Click(button, point));
		Ok(())
	}

	async fn send_keystrokes(&self, text: &str) -> Result<()> {
		self.events
			.lock()
			.unwrap()
			.push(InputEvent::Keystrokes(text.to_string()));
		Ok(())
	}
}

/// Builds the marshalled form of an element reference.
pub fn element_ref(id: u32) -> Value {
	json!({ (ELEMENT_MARKER_KEY): id })
}

/// A session wired to fresh test doubles.
pub fn new_session() -> (Session, Arc<StubHost>, Arc<RecordingInput>) {
	let host = StubHost::new();
	let input = RecordingInput::new();
	let session = Session::new(host.clone(), input.clone());
	(session, host, input)
}
