//! End-to-end conversion: raw model record -> canonical app diet.
//!
//! Substitutions are indexed first; the plan reconciler needs the finished
//! title lookup before any dish can be backfilled.

use mydiet_core::{AppDiet, order_meals};
use mydiet_ingest::{RawDietRecord, parse_raw_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::indexer::index_substitutions;
use crate::reconciler::reconcile_plan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Rewrite dish, ingredient and option quantities into "<n> <unit>"
    #[serde(default)]
    pub normalize_quantities: bool,
}

/// Counters describing what the conversion did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    pub days: usize,
    pub meal_slots: usize,
    pub dishes: usize,
    pub substitution_groups: usize,
    pub skipped_groups: usize,
    pub backfilled_codes: usize,
    pub merged_slots: usize,
}

/// Convert a raw record. An absent record yields an empty diet.
pub fn convert(raw: Option<&RawDietRecord>, opts: &ConvertOptions) -> AppDiet {
    convert_with_report(raw, opts).0
}

pub fn convert_with_report(raw: Option<&RawDietRecord>, opts: &ConvertOptions) -> (AppDiet, ConvertReport) {
    let Some(raw) = raw else {
        return (AppDiet::default(), ConvertReport::default());
    };

    let indexed = index_substitutions(&raw.substitution_table, opts.normalize_quantities);
    let reconciled = reconcile_plan(&raw.weekly_plan, &indexed.lookup, opts.normalize_quantities);

    let diet = AppDiet {
        plan: order_meals(reconciled.plan),
        substitutions: indexed.table,
    };

    let report = ConvertReport {
        days: diet.day_count(),
        meal_slots: diet.meal_slot_count(),
        dishes: diet.dish_count(),
        substitution_groups: diet.substitutions.len(),
        skipped_groups: indexed.skipped,
        backfilled_codes: reconciled.backfilled,
        merged_slots: reconciled.merged_slots,
    };
    info!(?report, "converted diet");

    (diet, report)
}

/// Convert straight from a JSON value. A value that is not a diet record
/// at all is logged and treated as absent.
pub fn convert_value(value: Option<Value>, opts: &ConvertOptions) -> AppDiet {
    let raw = match value.map(parse_raw_value) {
        Some(Ok(raw)) => raw,
        Some(Err(e)) => {
            warn!(error = %e, "unusable diet record, returning an empty diet");
            None
        }
        None => None,
    };
    convert(raw.as_ref(), opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_record_gives_empty_diet() {
        let (diet, report) = convert_with_report(None, &ConvertOptions::default());
        assert!(diet.plan.is_empty());
        assert!(diet.substitutions.is_empty());
        assert_eq!(report, ConvertReport::default());

        let v = serde_json::to_value(&diet).unwrap();
        assert!(v.get("plan").unwrap().is_object());
        assert!(v.get("substitutions").unwrap().is_object());
    }

    #[test]
    fn test_convert_value_with_garbage() {
        let diet = convert_value(Some(json!("non è una dieta")), &ConvertOptions::default());
        assert_eq!(diet, AppDiet::default());
        assert_eq!(convert_value(None, &ConvertOptions::default()), AppDiet::default());
    }

    #[test]
    fn test_report_counts() {
        let raw = parse_raw_value(json!({
            "piano_settimanale": [{
                "giorno": "Lunedì",
                "pasti": [
                    {"tipo_pasto": "Cena", "elenco_piatti": [{"nome_piatto": "Frutta", "cad_code": 0}]},
                    {"tipo_pasto": "cena", "elenco_piatti": [{"nome_piatto": "Pane", "cad_code": 0}]}
                ]
            }],
            "tabella_sostituzioni": [
                {"cad_code": 16, "titolo": "Frutta", "opzioni": []},
                {"cad_code": 0, "titolo": "Senza codice", "opzioni": []}
            ]
        }))
        .unwrap();

        let (diet, report) = convert_with_report(raw.as_ref(), &ConvertOptions::default());
        assert_eq!(report.days, 1);
        assert_eq!(report.meal_slots, 1);
        assert_eq!(report.dishes, 2);
        assert_eq!(report.substitution_groups, 1);
        assert_eq!(report.skipped_groups, 1);
        assert_eq!(report.backfilled_codes, 1);
        assert_eq!(report.merged_slots, 1);
        assert_eq!(diet.plan.get("Lunedì").unwrap().get("Cena").unwrap()[0].cad_code, 16);
    }
}
