//! Selenium-style driver core for embedded Chromium surfaces.
//!
//! An embedded browser control exposes no native automation API; the only
//! channel into it is "evaluate a script in the document, get one
//! serialized value back". This crate makes that stateless channel behave
//! like a stateful element-automation target: [`Session`] is the entry
//! point for script evaluation, navigation, and top-level element lookup,
//! and [`ElementHandle`] carries a stable element identity across round
//! trips, invalidated wholesale when the document is replaced.
//!
//! The embedding supplies two collaborators: a [`ScriptHost`] wrapping the
//! host process's script-evaluation primitive, and an [`InputSynthesizer`]
//! for physical clicks and keystrokes. Everything else (locator
//! compilation, result marshalling, element identity) happens in here and
//! in the `cefd-protocol`/`cefd-runtime` crates underneath.
//!
//! ```ignore
//! let session = Session::new(host, input);
//! session.goto("https://example.test/login").await?;
//! let user = session.find_element(&"Id:username".parse()?).await?;
//! user.send_keys("admin").await?;
//! session.find_element(&"CssSelector:button[type=submit]".parse()?).await?.click().await?;
//! ```

mod element;
mod registry;
mod session;
mod value;

pub use element::ElementHandle;
pub use session::Session;
pub use value::ScriptValue;

pub use cefd_protocol::{Locator, MouseButton, Point, Size, Strategy, UnsupportedLocatorError};
pub use cefd_runtime::{Error, InputSynthesizer, Result, ScriptHost, ScriptResult};
