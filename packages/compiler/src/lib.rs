//! # Docsel edit compiler
//!
//! Compiles a resolved target and an [`EditIntent`] into the primitive,
//! index-addressed requests of a rich-document batch update.
//!
//! ```text
//! ResolvedTarget + EditIntent → compile_target → CompiledEdit { requests }
//! ```
//!
//! Nothing here performs I/O; submitting the requests is the caller's job.

pub mod compile;
pub mod error;
pub mod intent;
pub mod list;
pub mod preview;
pub mod requests;

pub use compile::{compile_target, CompiledEdit};
pub use error::{CompileError, CompileResult};
pub use intent::{EditIntent, InsertPosition, ObjectInsert, DEFAULT_TABLE_SIZE};
pub use list::{normalize_insert_text, normalize_list_text, ListFamily, NormalizedText};
pub use preview::{preview, DiffIntent, DiffPreview};
pub use requests::{ParagraphStyleUpdate, Request, TextStyleUpdate};
