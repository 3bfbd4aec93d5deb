//! aep-links core library.
//!
//! Checks and repairs hyperlinks in AEP template documents (`*.md.j2`).
//!
//! High-level modules:
//! - `catalog`: Known AEP identifiers, read from numeric directory names.
//! - `extract`: Inline links, reference definitions, and self-reference pairs.
//! - `checks`: The link rules and the fixes they propose.
//! - `fix`: Line-level rewriting of documents.
//! - `lint`: Discovery, per-file checks, and the fix pass.
//! - `models`: Links, issues, fixes, and result structs.
//! - `config`: Effective settings from CLI flags and defaults.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod catalog;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fix;
pub mod lint;
pub mod models;
pub mod output;
pub mod utils;
