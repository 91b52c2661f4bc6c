//! Common utilities for the marten parser.
//!
//! This crate provides the shared infrastructure used by the parser's
//! consumers:
//! - **Document Loader** - reads complete markup text from files or URLs

pub mod loader;
