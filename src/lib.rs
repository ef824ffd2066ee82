//! Share links and hover type hints for an in-browser code playground.
//!
//! Two independent, stateless components:
//!
//! - [`share`] turns source text into a compressed, URL-safe fragment and
//!   back, with [`export`] deriving embed markup and fenced code blocks from it.
//! - [`hover`] extracts the most likely type name from hover markdown
//!   returned by a code-analysis service.

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod hover;
pub mod info;
pub mod share;
pub mod types;

pub use error::{DecodeError, Error};
pub use types::{HoverMatch, HoverRule, SharePayload, TypeName};
