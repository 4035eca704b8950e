//! # klint-kotlin
//!
//! Tree-sitter Kotlin frontend for klint.
//!
//! - [`KotlinParser`] implements [`klint_core::SourceParser`], parsing a
//!   batch of `.kt`/`.kts` files in parallel and reporting ERROR and MISSING
//!   nodes as diagnostics
//! - [`syntax`] holds node-walking helpers shared by the built-in rules

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod parser;
pub mod syntax;

pub use parser::KotlinParser;
