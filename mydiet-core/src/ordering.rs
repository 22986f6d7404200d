//! Meal order normalization: canonical meals first, in `MEAL_ORDER`,
//! then any other meal in first-seen order.

use crate::diet::{DayMeals, WeeklyPlan};
use crate::labels::MEAL_ORDER;

/// Reorder the meals of one day.
pub fn order_day(mut meals: DayMeals) -> DayMeals {
    let mut ordered = DayMeals::new();
    for name in MEAL_ORDER {
        if let Some(dishes) = meals.remove(name) {
            ordered.insert(name, dishes);
        }
    }
    // Whatever is left is outside the canonical set, still in encounter order
    for (name, dishes) in meals {
        ordered.insert(name, dishes);
    }
    ordered
}

/// Reorder the meals of every day. Day order is left untouched.
pub fn order_meals(plan: WeeklyPlan) -> WeeklyPlan {
    plan.into_iter()
        .map(|(day, meals)| (day, order_day(meals)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::Dish;

    fn meals(names: &[&str]) -> DayMeals {
        names
            .iter()
            .map(|n| (*n, vec![Dish::new(format!("piatto {n}"), "")]))
            .collect()
    }

    #[test]
    fn test_canonical_order() {
        let day = order_day(meals(&["Cena", "Colazione", "Merenda"]));
        assert_eq!(day.keys().collect::<Vec<_>>(), vec!["Colazione", "Merenda", "Cena"]);
        assert_eq!(day.get("Cena").unwrap()[0].name, "piatto Cena");
    }

    #[test]
    fn test_unknown_meals_appended_in_encounter_order() {
        let day = order_day(meals(&["Breakfast", "Cena", "Altro", "Spuntino Serale", "Pranzo"]));
        assert_eq!(
            day.keys().collect::<Vec<_>>(),
            vec!["Pranzo", "Cena", "Spuntino Serale", "Breakfast", "Altro"]
        );
    }

    #[test]
    fn test_order_meals_keeps_day_order() {
        let mut plan = WeeklyPlan::new();
        plan.insert("Martedì", meals(&["Cena", "Pranzo"]));
        plan.insert("Lunedì", meals(&["Merenda", "Seconda Colazione"]));

        let plan = order_meals(plan);
        assert_eq!(plan.keys().collect::<Vec<_>>(), vec!["Martedì", "Lunedì"]);
        assert_eq!(
            plan.get("Lunedì").unwrap().keys().collect::<Vec<_>>(),
            vec!["Seconda Colazione", "Merenda"]
        );
    }

    #[test]
    fn test_empty_plan() {
        assert!(order_meals(WeeklyPlan::new()).is_empty());
    }
}
