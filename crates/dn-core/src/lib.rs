//! dn-core: document model, path editing, and the interactive command
//! surface for the datanav editor.
//!
//! This crate focuses on a small, well-factored surface:
//! - `serde_json::Value` documents with mapping insertion order preserved
//! - segment-addressed resolve/replace with copy-then-swap semantics
//! - a total string-to-value inference function shared by literal mode,
//!   `cast`, and one-shot edits
//! - the Navigator session (document, working address, flags)
//! - the enumerated REPL command surface and its dispatch
//! - JSON/YAML load/save adapters and zip backups
//!
pub mod cast;
pub mod commands;
pub mod error;
pub mod fs;
pub mod navigator;
pub mod path;
pub mod value;

pub use cast::smart_cast;
pub use commands::{Command, Outcome, append_values, dispatch, remove_matching};
pub use error::{Error, Result};
pub use navigator::Navigator;
pub use path::{Address, replace, resolve};
pub use value::{Kind, kind_of, pretty};
