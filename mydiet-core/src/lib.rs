//! mydiet-core: canonical diet types, label rules and meal ordering

pub mod diet;
pub mod labels;
pub mod ordered_map;
pub mod ordering;

pub use diet::{
    AppDiet, DayMeals, Dish, Ingredient, SubstitutionGroup, SubstitutionOption,
    SubstitutionTable, WeeklyPlan,
};
pub use labels::{MEAL_ORDER, OTHER_MEAL, UNKNOWN_DAY, canonical_day, canonical_meal};
pub use ordered_map::OrderedMap;
pub use ordering::{order_day, order_meals};
