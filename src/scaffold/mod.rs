//! Scaffold engine: resolve package file mappings, then execute them.
//!
//! ```text
//! PackageRecord[] ──normalize──▶ MappingEntry[] ──resolve──▶ ResolvedCollection
//!                                                               │
//!                                            execute ◀──────────┘
//! ```
pub mod context;
pub mod execute;
pub mod file;
pub mod path;
pub mod resolve;

pub use context::{Locations, ScaffoldContext};
pub use execute::{ExecuteOpts, ScaffoldStats, execute};
pub use file::ScaffoldFile;
pub use path::{PathKind, ScaffoldFilePath};
pub use resolve::{PackageFiles, ResolvedCollection, resolve};
