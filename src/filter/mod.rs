//! Name filtering for debug loggers
//!
//! A debug specification is a comma-separated list of glob patterns that decides
//! which logger names are enabled. Only `*` is special; it matches any sequence of
//! characters, including none. Everything else is matched literally.
//!
//! # Syntax
//!
//! ```text
//! pattern              Enable names matching this glob
//! -pattern             Disable names matching this glob, even if included
//! a,b,-c               Patterns are separated by commas
//! ```
//!
//! # Examples
//!
//! ```text
//! server:*                     # Everything under the server namespace
//! *,-server:http               # Everything except the http logger
//! test:other,test:child*,-test:child2
//! ```
//!
//! A name is enabled when at least one include pattern matches it and no exclude
//! pattern does. Excludes never enable anything on their own.

pub mod error;
pub mod matcher;
pub mod parser;
pub mod table;

pub use error::FilterParseError;
pub use matcher::NameMatcher;
pub use parser::{SpecToken, tokenize};
pub use table::{FilterTable, Verdict};
