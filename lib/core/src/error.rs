//! Shared `Result` alias.
//!
//! Domain errors live next to the code that raises them (`SessionError` in
//! the conversation crate, `TransportError` and friends in the gateway).
//! Failures that cross a layer travel as a `rootcause::Report` so each layer
//! can attach its own context with `.context()`.

use rootcause::Report;

/// Result whose error is a [`Report`] over the context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
