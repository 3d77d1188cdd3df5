//! Shared plumbing for the ontochange client binaries.
//!
//! - [`config`]: the optional `ontochange.toml` file and its defaults
//! - [`logging`]: the tracing subscriber installed by every binary
//! - [`apply`]: the change-list application pipeline behind `ontochange-apply`

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod apply;
pub mod config;
pub mod logging;
