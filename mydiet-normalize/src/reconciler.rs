//! Plan reconciler: canonical day/meal names, CAD backfill, merge of
//! meal slots that fold onto the same (day, meal) pair.

use mydiet_core::labels::{match_day_prefix, match_meal};
use mydiet_core::{Dish, Ingredient, WeeklyPlan, canonical_day, canonical_meal};
use mydiet_ingest::{DishKind, RawDay, RawDish};
use tracing::debug;

use crate::indexer::CrossRefLookup;
use crate::quantity::normalize_quantity;

/// Reconciled plan, meals still in encounter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledPlan {
    pub plan: WeeklyPlan,
    /// Dishes whose code came from the substitution lookup
    pub backfilled: usize,
    /// Raw meal entries appended to an already existing slot
    pub merged_slots: usize,
}

/// Convert one dish, filling a missing code from `lookup`.
/// Returns the dish and whether the code was backfilled.
pub fn convert_dish(raw: &RawDish, lookup: &CrossRefLookup, normalize_qty: bool) -> (Dish, bool) {
    let name = raw.dish_name.clone().unwrap_or_default();
    let qty_of = |q: &Option<String>| {
        let q = q.clone().unwrap_or_default();
        if normalize_qty { normalize_quantity(&q) } else { q }
    };

    let own_code = raw.cross_ref_code.unwrap_or(0);
    let (cad_code, backfilled) = if own_code != 0 {
        (own_code, false)
    } else {
        match lookup.get(&name) {
            Some(code) => (code, true),
            None => (0, false),
        }
    };

    let dish = Dish {
        qty: qty_of(&raw.total_qty),
        cad_code,
        is_composed: raw.kind == DishKind::Composed,
        ingredients: raw
            .ingredients
            .iter()
            .map(|ing| Ingredient {
                name: ing.name.clone().unwrap_or_default(),
                qty: qty_of(&ing.quantity),
            })
            .collect(),
        name,
    };
    (dish, backfilled)
}

/// Walk the raw week and build the canonical plan.
pub fn reconcile_plan(days: &[RawDay], lookup: &CrossRefLookup, normalize_qty: bool) -> ReconciledPlan {
    let mut out = ReconciledPlan::default();

    for raw_day in days {
        let day_label = raw_day.day_label.as_deref();
        let day_name = canonical_day(day_label);
        if day_label.and_then(match_day_prefix).is_none() {
            debug!(label = ?day_label, day = %day_name, "unrecognized day label");
        }

        let day = out.plan.get_or_insert_with(&day_name, Default::default);

        for raw_meal in &raw_day.meals {
            let meal_label = raw_meal.meal_type_label.as_deref();
            let meal_name = canonical_meal(meal_label);
            if meal_label.and_then(match_meal).is_none() {
                debug!(label = ?meal_label, meal = %meal_name, "unrecognized meal label");
            }

            let mut dishes = Vec::with_capacity(raw_meal.dishes.len());
            for raw_dish in &raw_meal.dishes {
                let (dish, backfilled) = convert_dish(raw_dish, lookup, normalize_qty);
                if backfilled {
                    debug!(dish = %dish.name, cad_code = dish.cad_code, "backfilled CAD code");
                    out.backfilled += 1;
                }
                dishes.push(dish);
            }

            match day.get_mut(&meal_name) {
                Some(existing) => {
                    debug!(day = %day_name, meal = %meal_name, added = dishes.len(), "merging meal slot");
                    existing.extend(dishes);
                    out.merged_slots += 1;
                }
                None => {
                    day.insert(meal_name, dishes);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::index_substitutions;
    use mydiet_ingest::{RawIngredient, RawMeal, RawSubstitutionGroup};

    fn dish(name: &str, code: Option<i64>) -> RawDish {
        RawDish {
            dish_name: Some(name.to_string()),
            cross_ref_code: code,
            ..RawDish::default()
        }
    }

    fn meal(label: &str, dishes: Vec<RawDish>) -> RawMeal {
        RawMeal {
            meal_type_label: Some(label.to_string()),
            dishes,
        }
    }

    fn day(label: &str, meals: Vec<RawMeal>) -> RawDay {
        RawDay {
            day_label: Some(label.to_string()),
            meals,
        }
    }

    fn lookup() -> CrossRefLookup {
        index_substitutions(
            &[RawSubstitutionGroup {
                cross_ref_code: Some(30),
                title: Some("Pasta al pomodoro".to_string()),
                options: vec![],
            }],
            false,
        )
        .lookup
    }

    #[test]
    fn test_backfill_from_lookup() {
        let (d, backfilled) = convert_dish(&dish("Pasta al pomodoro", Some(0)), &lookup(), false);
        assert_eq!(d.cad_code, 30);
        assert!(backfilled);

        let (d, backfilled) = convert_dish(&dish("pasta al pomodoro ", None), &lookup(), false);
        assert_eq!(d.cad_code, 30);
        assert!(backfilled);
    }

    #[test]
    fn test_existing_code_never_overridden() {
        let (d, backfilled) = convert_dish(&dish("Pasta al pomodoro", Some(1189)), &lookup(), false);
        assert_eq!(d.cad_code, 1189);
        assert!(!backfilled);
    }

    #[test]
    fn test_unknown_code_stays_zero() {
        let (d, _) = convert_dish(&dish("Tonno", None), &lookup(), false);
        assert_eq!(d.cad_code, 0);
    }

    #[test]
    fn test_null_fields_coerced() {
        let raw = RawDish {
            kind: DishKind::Composed,
            ingredients: vec![RawIngredient::default()],
            ..RawDish::default()
        };
        let (d, _) = convert_dish(&raw, &CrossRefLookup::default(), false);
        assert_eq!(d.name, "");
        assert_eq!(d.qty, "");
        assert!(d.is_composed);
        assert_eq!(d.ingredients, vec![Ingredient::default()]);
    }

    #[test]
    fn test_merge_same_meal_same_day() {
        let days = vec![day(
            "Lunedì",
            vec![
                meal("Spuntino mattina", vec![dish("Mela", None)]),
                meal("Pranzo", vec![dish("Riso", None)]),
                meal("spuntino", vec![dish("Noci", None), dish("Yogurt", None)]),
            ],
        )];
        let r = reconcile_plan(&days, &CrossRefLookup::default(), false);
        let monday = r.plan.get("Lunedì").unwrap();
        let names: Vec<_> = monday.get("Spuntino").unwrap().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Mela", "Noci", "Yogurt"]);
        assert_eq!(r.merged_slots, 1);
    }

    #[test]
    fn test_merge_across_raw_days() {
        let days = vec![
            day("LUNEDI", vec![meal("Merenda", vec![dish("Mela", None)])]),
            day("Monday", vec![meal("merenda", vec![dish("Pera", None)]), meal("Cena", vec![])]),
        ];
        let r = reconcile_plan(&days, &CrossRefLookup::default(), false);
        assert_eq!(r.plan.len(), 1);
        let monday = r.plan.get("Lunedì").unwrap();
        assert_eq!(monday.get("Merenda").unwrap().len(), 2);
        assert_eq!(monday.keys().collect::<Vec<_>>(), vec!["Merenda", "Cena"]);
    }

    #[test]
    fn test_missing_labels() {
        let days = vec![RawDay {
            day_label: None,
            meals: vec![RawMeal {
                meal_type_label: None,
                dishes: vec![dish("Acqua", None)],
            }],
        }];
        let r = reconcile_plan(&days, &CrossRefLookup::default(), false);
        assert_eq!(r.plan.get("Sconosciuto").unwrap().get("Altro").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_plan() {
        let r = reconcile_plan(&[], &lookup(), false);
        assert!(r.plan.is_empty());
        assert_eq!(r.backfilled, 0);
    }

    #[test]
    fn test_quantities_normalized_when_enabled() {
        let raw = RawDish {
            dish_name: Some("Pasta".to_string()),
            total_qty: Some("70 grammi".to_string()),
            ..RawDish::default()
        };
        let (d, _) = convert_dish(&raw, &CrossRefLookup::default(), true);
        assert_eq!(d.qty, "70 g");
        let (d, _) = convert_dish(&raw, &CrossRefLookup::default(), false);
        assert_eq!(d.qty, "70 grammi");
    }
}
