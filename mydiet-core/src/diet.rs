//! Canonical diet types handed to the client app.

use crate::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One constituent of a composed dish
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub qty: String,
}

/// A dish as it appears inside a meal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    /// Total quantity as written in the plan ("" when absent)
    pub qty: String,
    /// Substitution group code, 0 when unknown
    pub cad_code: i64,
    pub is_composed: bool,
    pub ingredients: Vec<Ingredient>,
}

impl Dish {
    pub fn new(name: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: qty.into(),
            ..Self::default()
        }
    }

    pub fn with_cad_code(mut self, cad_code: i64) -> Self {
        self.cad_code = cad_code;
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.is_composed = true;
        self.ingredients = ingredients;
        self
    }

    pub fn has_cad_code(&self) -> bool {
        self.cad_code != 0
    }
}

/// An interchangeable alternative inside a substitution group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionOption {
    pub name: String,
    pub qty: String,
}

/// A named set of interchangeable foods. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionGroup {
    pub name: String,
    pub options: Vec<SubstitutionOption>,
}

impl SubstitutionGroup {
    /// Build a group, falling back to a single option named after the group
    /// when `options` is empty.
    pub fn new(name: impl Into<String>, options: Vec<SubstitutionOption>) -> Self {
        let name = name.into();
        let options = if options.is_empty() {
            vec![SubstitutionOption {
                name: name.clone(),
                qty: String::new(),
            }]
        } else {
            options
        };
        Self { name, options }
    }
}

/// Meal name -> dishes, in canonical meal order once normalized
pub type DayMeals = OrderedMap<Vec<Dish>>;

/// Canonical day name -> meals
pub type WeeklyPlan = OrderedMap<DayMeals>;

/// Stringified CAD code -> group
pub type SubstitutionTable = OrderedMap<SubstitutionGroup>;

/// The complete converted diet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDiet {
    pub plan: WeeklyPlan,
    pub substitutions: SubstitutionTable,
}

impl AppDiet {
    pub fn day_count(&self) -> usize {
        self.plan.len()
    }

    pub fn meal_slot_count(&self) -> usize {
        self.plan.values().map(|day| day.len()).sum()
    }

    pub fn dish_count(&self) -> usize {
        self.plan
            .values()
            .flat_map(|day| day.values())
            .map(|dishes| dishes.len())
            .sum()
    }

    /// Group referenced by a dish, if its code is known and indexed
    pub fn substitutions_for(&self, dish: &Dish) -> Option<&SubstitutionGroup> {
        if !dish.has_cad_code() {
            return None;
        }
        self.substitutions.get(&dish.cad_code.to_string())
    }

    /// Every food name the diet allows: dishes, their ingredients, then
    /// substitution options. Case-insensitive dedup, first spelling wins.
    pub fn allowed_foods(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        let mut push = |name: &str| {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                out.push(name.to_string());
            }
        };

        for dish in self.plan.values().flat_map(|day| day.values()).flatten() {
            push(&dish.name);
            for ing in &dish.ingredients {
                push(&ing.name);
            }
        }
        for group in self.substitutions.values() {
            for opt in &group.options {
                push(&opt.name);
            }
        }

        out
    }
}
