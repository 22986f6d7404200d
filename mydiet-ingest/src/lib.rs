//! mydiet-ingest: raw diet records as produced by the extraction model, and lenient parsers for them.

pub mod lenient;
pub mod parser;
pub mod types;

pub use parser::{extract_json_block, parse_raw_file, parse_raw_str, parse_raw_value};
pub use types::{
    DishKind, RawDay, RawDietRecord, RawDish, RawIngredient, RawMeal, RawOption,
    RawSubstitutionGroup,
};
