//! classmerge - override-aware CSS class-name merging
//!
//! Combines conditional class inputs into one class string. Exact duplicates
//! are removed, and when two utilities from the same family apply under the
//! same variants the later one wins (`px-2 py-1 p-4` becomes `p-4`).
//!
//! ```
//! use classmerge::{class_map, cn};
//!
//! let disabled = false;
//! let merged = cn!(
//!     "px-2 py-1 text-red-500",
//!     disabled.then_some("opacity-50"),
//!     class_map! { "p-4" => true, "text-blue-500" => !disabled },
//! );
//! assert_eq!(merged, "p-4 text-blue-500");
//! ```

pub mod config;
pub mod input;
pub mod merger;

pub use classmerge_families::{
    ClassPattern, ClassifiedToken, FamilyConfig, FamilyDef, FamilyTable, TableError,
    UnmatchedReason, ValueKind,
};
pub use config::{ConfigError, EffectiveConfig};
pub use input::{ClassInput, ClassMap};
pub use merger::{merge, ClassMerger, Decision, ExplainOutput, Resolution};
