//! Tag catalog for the UGA solar facility monitoring dashboard.
//!
//! The crate owns the declarative catalog the dashboard UI consumes —
//! facility header, module list, and per-module tag groups — along with
//! loading, queries, and shape verification for it.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod modules;
pub mod verify;

pub use catalog::{Catalog, CatalogFile, Facility, ModuleEntry, TagEntry, TagMatch};
pub use config::CatalogConfig;
pub use model::{CatalogError, ModuleKind, Tag, TagGroup};
pub use verify::{run_verification, VerificationReport, VerificationStatus};
