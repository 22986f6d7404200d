//! Raw record emitted by the extraction model.
//!
//! Keys follow the Italian response schema the model is prompted with;
//! English aliases are accepted too, and when both appear the Italian key
//! wins. Every field may be missing or null.

use crate::lenient::{self, Fields};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Marker the model uses for a dish made of listed ingredients
pub const COMPOSED_MARKER: &str = "composto";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DishKind {
    #[default]
    #[serde(rename = "singolo")]
    Simple,
    #[serde(rename = "composto")]
    Composed,
}

impl DishKind {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(COMPOSED_MARKER) {
            DishKind::Composed
        } else {
            DishKind::Simple
        }
    }
}

impl<'de> Deserialize<'de> for DishKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = lenient::string_from_value(Value::deserialize(deserializer)?);
        Ok(label.as_deref().map(DishKind::from_label).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawIngredient {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "quantita")]
    pub quantity: Option<String>,
}

impl<'de> Deserialize<'de> for RawIngredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawIngredient {
            name: f.string(&["nome", "name"]),
            quantity: f.string(&["quantita", "quantity", "qty"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawDish {
    #[serde(rename = "nome_piatto")]
    pub dish_name: Option<String>,
    #[serde(rename = "quantita_totale")]
    pub total_qty: Option<String>,
    #[serde(rename = "cad_code")]
    pub cross_ref_code: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: DishKind,
    #[serde(rename = "ingredienti")]
    pub ingredients: Vec<RawIngredient>,
}

impl<'de> Deserialize<'de> for RawDish {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A bare string is the dish name alone
        let mut f = match Value::deserialize(deserializer)? {
            Value::Object(map) => Fields::new(map),
            Value::String(name) => {
                return Ok(RawDish {
                    dish_name: Some(name),
                    ..Default::default()
                });
            }
            other => return Err(D::Error::custom(format!("expected a dish, got {other}"))),
        };
        Ok(RawDish {
            dish_name: f.string(&["nome_piatto", "dish_name", "name"]),
            total_qty: f.string(&["quantita_totale", "total_qty"]),
            cross_ref_code: f.code(&["cad_code", "cross_ref_code"]),
            kind: f
                .string(&["tipo", "kind"])
                .as_deref()
                .map(DishKind::from_label)
                .unwrap_or_default(),
            ingredients: f.list(&["ingredienti", "ingredients"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawMeal {
    #[serde(rename = "tipo_pasto")]
    pub meal_type_label: Option<String>,
    #[serde(rename = "elenco_piatti")]
    pub dishes: Vec<RawDish>,
}

impl<'de> Deserialize<'de> for RawMeal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawMeal {
            meal_type_label: f.string(&["tipo_pasto", "meal_type", "meal_type_label"]),
            dishes: f.list(&["elenco_piatti", "dishes"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawDay {
    #[serde(rename = "giorno")]
    pub day_label: Option<String>,
    #[serde(rename = "pasti")]
    pub meals: Vec<RawMeal>,
}

impl<'de> Deserialize<'de> for RawDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawDay {
            day_label: f.string(&["giorno", "day", "day_label"]),
            meals: f.list(&["pasti", "meals"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawOption {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "quantita")]
    pub quantity: Option<String>,
}

impl<'de> Deserialize<'de> for RawOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawOption {
            name: f.string(&["nome", "name"]),
            quantity: f.string(&["quantita", "quantity", "qty"]),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSubstitutionGroup {
    #[serde(rename = "cad_code")]
    pub cross_ref_code: Option<i64>,
    #[serde(rename = "titolo")]
    pub title: Option<String>,
    #[serde(rename = "opzioni")]
    pub options: Vec<RawOption>,
}

impl<'de> Deserialize<'de> for RawSubstitutionGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawSubstitutionGroup {
            cross_ref_code: f.code(&["cad_code", "cross_ref_code"]),
            title: f.string(&["titolo", "title"]),
            options: f.list(&["opzioni", "options"]),
        })
    }
}

/// Top-level model output: the week plus the CAD substitution tables
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawDietRecord {
    #[serde(rename = "piano_settimanale")]
    pub weekly_plan: Vec<RawDay>,
    #[serde(rename = "tabella_sostituzioni")]
    pub substitution_table: Vec<RawSubstitutionGroup>,
}

impl<'de> Deserialize<'de> for RawDietRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut f = Fields::deserialize(deserializer)?;
        Ok(RawDietRecord {
            weekly_plan: f.list(&["piano_settimanale", "weekly_plan"]),
            substitution_table: f.list(&["tabella_sostituzioni", "substitution_table"]),
        })
    }
}
