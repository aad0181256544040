//! DOM layer for the popup
//!
//! The declarative element tree and [`MockDom`] are always available, so the
//! popup can be driven and inspected without a browser. The `wasm` feature
//! adds the content-script glue that mounts the same tree into the page.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::{init, start_content_script, start_quick_calc};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
