//! # klint
//!
//! Static-analysis driver for Kotlin sources.
//!
//! This is the facade crate that re-exports the core engine, the Kotlin
//! frontend and the built-in rules, and wires them together from a
//! [`Config`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use klint::{Config, Runner, SourceFile};
//!
//! let config = Config::from_file("klint.toml".as_ref())?;
//! let mut runner = Runner::from_config(&config)?;
//!
//! let sources = vec![SourceFile::read("src/main/kotlin/App.kt")?];
//! let status = runner.lint(&sources)?;
//! std::process::exit(status.code());
//! ```
//!
//! ## Suppression Comments
//!
//! ```kotlin
//! // klint: allow(too_many_parameters) reason="mirrors the REST payload"
//! fun create(a: Int, b: Int, c: Int, d: Int, e: Int, f: Int, g: Int, h: Int, i: Int, j: Int, k: Int) {}
//! ```

#![forbid(unsafe_code)]

pub use klint_core::*;

/// Tree-sitter Kotlin frontend.
pub mod kotlin {
    pub use klint_kotlin::*;
}

/// Built-in rules and the catalog.
pub mod rules {
    pub use klint_rules::*;
}

mod runner;

pub use runner::{execution, reporter_kind, Runner};
