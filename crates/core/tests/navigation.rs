//! Session-level navigation, script evaluation, and document reads.

mod support;

use anyhow::Result;
use cefd::{Error, ScriptValue};
use serde_json::json;
use support::{element_ref, new_session};

#[tokio::test]
async fn goto_navigates_and_records_the_landed_url() -> Result<()> {
	let (session, host, _input) = new_session();
	assert_eq!(session.url(), "about:blank");

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/login?next=%2F"));
	session.goto("https://example.test/login?next=/").await?;

	assert_eq!(session.url(), "https://example.test/login?next=%2F");
	let scripts = host.scripts();
	assert!(scripts[0].contains("window.location.href = 'https://example.test/login?next=/'"));
	assert!(scripts[1].contains("return window.location.href;"));
	Ok(())
}

#[tokio::test]
async fn goto_escapes_hostile_urls() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/"));
	session.goto("https://example.test/?q='; alert(1); '").await?;

	assert!(!host.scripts()[0].contains("href = 'https://example.test/?q='; alert(1); ''"));
	assert!(host.scripts()[0].contains(r"\'; alert(1); \'"));
	Ok(())
}

#[tokio::test]
async fn history_operations_each_complete_one_navigation() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/a"));
	session.back().await?;
	assert_eq!(session.url(), "https://example.test/a");

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/b"));
	session.forward().await?;
	assert_eq!(session.url(), "https://example.test/b");

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/b"));
	session.refresh().await?;
	assert_eq!(session.url(), "https://example.test/b");

	let scripts = host.scripts();
	assert!(scripts[0].contains("window.history.back()"));
	assert!(scripts[2].contains("window.history.forward()"));
	assert!(scripts[4].contains("window.location.reload()"));
	Ok(())
}

#[tokio::test]
async fn title_and_page_source_read_the_document() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(json!("Controls for Test"));
	assert_eq!(session.title().await?, "Controls for Test");

	host.push_ok(json!("<html><body></body></html>"));
	assert_eq!(session.page_source().await?, "<html><body></body></html>");
	Ok(())
}

#[tokio::test]
async fn evaluate_adopts_element_references_into_handles() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(element_ref(0));
	let value = session.evaluate("return document.body;").await?;
	assert!(value.as_element().is_some());
	Ok(())
}

#[tokio::test]
async fn evaluate_decodes_mixed_lists() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(json!([null, true, 1.5, "x", element_ref(2)]));
	let value = session.evaluate("return window.__state;").await?;
	let items = value.as_list().unwrap();
	assert_eq!(items.len(), 5);
	assert!(items[0].is_null());
	assert_eq!(items[1].as_bool(), Some(true));
	assert_eq!(items[2].as_number(), Some(1.5));
	assert_eq!(items[3].as_text(), Some("x"));
	assert!(items[4].as_element().is_some());
	Ok(())
}

#[tokio::test]
async fn evaluate_distinguishes_no_value_from_remote_throw() {
	let (session, host, _input) = new_session();

	host.push_ok(json!(null));
	let value = session.evaluate("return undefined;").await.unwrap();
	assert_eq!(value, ScriptValue::Null);

	host.push_err("boom");
	let err = session.evaluate("throw new Error('boom');").await.unwrap_err();
	assert!(matches!(err, Error::ScriptExecution(message) if message == "boom"));
}

#[tokio::test]
async fn every_sent_script_is_a_self_contained_expression() -> Result<()> {
	let (session, host, _input) = new_session();

	host.push_ok(json!(null));
	host.push_ok(json!("https://example.test/"));
	session.goto("https://example.test/").await?;

	for script in host.scripts() {
		assert!(script.starts_with("(function"));
		assert!(script.ends_with("})()"));
		assert!(script.contains("window.__cefDriver"));
	}
	Ok(())
}
