//! # Docsel resolver
//!
//! Evaluates a parsed selector against a [`DocumentModel`] and collapses the
//! result into exactly one [`ResolvedTarget`]:
//!
//! ```text
//! under(heading("Setup")).match("npm", occurrence=2)
//!   -> textRange Setup :: npm
//! ```
//!
//! Every target carries conflict tags (`atomic:<id>`, `inline:<id>`) for the
//! edit compiler, and an optional guard is checked before the target is
//! returned.
//!
//! [`DocumentModel`]: docsel_model::DocumentModel

pub mod args;
pub mod conflicts;
pub mod error;
pub mod guard;
pub mod rank;
pub mod resolve;
pub mod selector;
pub mod summary;
pub mod target;

pub use conflicts::{detect_block_conflicts, detect_conflicts, Conflicts};
pub use error::{ResolveError, ResolveResult};
pub use guard::evaluate_guard;
pub use rank::rank_hints;
pub use resolve::{resolve_str, resolve_target, ResolveOptions};
pub use selector::Terminal;
pub use summary::{build_guard_expression, format_heading_path, format_target_summary};
pub use target::{ResolvedTarget, TargetContext, TargetKind, TargetSelection};
