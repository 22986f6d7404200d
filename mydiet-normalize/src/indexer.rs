//! Substitution indexer: builds the canonical CAD table and the
//! title -> code lookup used to backfill dishes that lost their code.

use mydiet_core::{SubstitutionGroup, SubstitutionOption, SubstitutionTable};
use mydiet_ingest::{RawOption, RawSubstitutionGroup};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::quantity::normalize_quantity;

/// Name given to an option the model left unnamed
pub const UNNAMED_OPTION: &str = "Alimento non specificato";

/// Lower-cased, trimmed dish title -> CAD code. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossRefLookup {
    codes: HashMap<String, i64>,
}

impl CrossRefLookup {
    fn key(title: &str) -> String {
        title.trim().to_lowercase()
    }

    /// Later registrations of the same title win. Blank titles are not keys.
    fn register(&mut self, title: &str, code: i64) {
        if title.trim().is_empty() {
            return;
        }
        if let Some(prev) = self.codes.insert(Self::key(title), code) {
            if prev != code {
                debug!(title, prev, code, "duplicate substitution title, keeping later code");
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<i64> {
        self.codes.get(&Self::key(title)).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Output of the indexer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedSubstitutions {
    pub table: SubstitutionTable,
    pub lookup: CrossRefLookup,
    /// Groups dropped for having no positive code
    pub skipped: usize,
}

fn convert_option(opt: &RawOption, normalize_qty: bool) -> SubstitutionOption {
    let qty = opt.quantity.clone().unwrap_or_default();
    SubstitutionOption {
        name: opt
            .name
            .clone()
            .unwrap_or_else(|| UNNAMED_OPTION.to_string()),
        qty: if normalize_qty { normalize_quantity(&qty) } else { qty },
    }
}

/// Index the raw substitution groups.
///
/// Groups with a missing or non-positive code are skipped: they can be
/// neither keyed nor referenced. A group whose code repeats replaces the
/// earlier one in place.
pub fn index_substitutions(
    groups: &[RawSubstitutionGroup],
    normalize_qty: bool,
) -> IndexedSubstitutions {
    let mut out = IndexedSubstitutions::default();

    for group in groups {
        let code = group.cross_ref_code.unwrap_or(0);
        let title = group.title.as_deref().unwrap_or("").trim();
        if code <= 0 {
            warn!(title, code, "substitution group without a CAD code, skipping");
            out.skipped += 1;
            continue;
        }

        out.lookup.register(title, code);

        let options = group
            .options
            .iter()
            .map(|opt| convert_option(opt, normalize_qty))
            .collect();
        out.table
            .insert(code.to_string(), SubstitutionGroup::new(title, options));
    }

    debug!(
        groups = out.table.len(),
        titles = out.lookup.len(),
        skipped = out.skipped,
        "indexed substitutions"
    );
    out
}

/// Express canonical groups as raw groups again, so a converted table can
/// be fed back through the indexer. Keys that are not positive integers
/// come back as code 0 and will be skipped on re-indexing.
pub fn to_raw_groups(table: &SubstitutionTable) -> Vec<RawSubstitutionGroup> {
    table
        .iter()
        .map(|(key, group)| RawSubstitutionGroup {
            cross_ref_code: Some(key.trim().parse().unwrap_or(0)),
            title: Some(group.name.clone()),
            options: group
                .options
                .iter()
                .map(|opt| RawOption {
                    name: Some(opt.name.clone()),
                    quantity: Some(opt.qty.clone()),
                })
                .collect(),
        })
        .collect()
}
