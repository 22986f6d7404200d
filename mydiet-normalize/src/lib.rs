//! mydiet-normalize: substitution indexer, plan reconciler, quantity rules and the conversion pipeline

pub mod indexer;
pub mod pipeline;
pub mod quantity;
pub mod reconciler;

pub use indexer::{CrossRefLookup, IndexedSubstitutions, index_substitutions, to_raw_groups};
pub use pipeline::{ConvertOptions, ConvertReport, convert, convert_value, convert_with_report};
pub use quantity::normalize_quantity;
pub use reconciler::{ReconciledPlan, convert_dish, reconcile_plan};
