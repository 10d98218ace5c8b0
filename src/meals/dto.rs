use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;
use crate::summary::MacroTotals;
use crate::validation::Violations;

use super::repo_types::{Meal, MealEntry};

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub date: String,
}

impl CreateMealRequest {
    /// Validates the payload and returns the parsed timestamp.
    pub fn validate(&self) -> Result<OffsetDateTime, ApiError> {
        parse_meal_date(&self.date)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub date: String,
}

impl UpdateMealRequest {
    pub fn validate(&self) -> Result<OffsetDateTime, ApiError> {
        parse_meal_date(&self.date)
    }
}

fn parse_meal_date(raw: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
        let mut v = Violations::new();
        v.add("date", "must be an ISO-8601 date-time string");
        ApiError::Validation(v)
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Meal> for MealResponse {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            date: m.date,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealWithEntries {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub entries: Vec<EntryResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub quantity: i32,
}

impl From<MealEntry> for EntryResponse {
    fn from(e: MealEntry) -> Self {
        Self {
            id: e.id,
            meal_id: e.meal_id,
            food_name: e.food_name,
            calories: e.calories,
            protein: e.protein,
            carbs: e.carbs,
            fat: e.fat,
            quantity: e.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl CreateEntryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        if self.food_name.is_empty() {
            v.add("foodName", "must be a non-empty string");
        }
        check_macro(&mut v, "calories", Some(self.calories));
        check_macro(&mut v, "protein", Some(self.protein));
        check_macro(&mut v, "carbs", Some(self.carbs));
        check_macro(&mut v, "fat", Some(self.fat));
        if self.quantity < 1 {
            v.add("quantity", "must be a positive integer");
        }
        v.finish()
    }
}

/// Partial update; only supplied fields are changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub quantity: Option<i32>,
}

impl UpdateEntryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        if let Some(name) = &self.food_name {
            if name.is_empty() {
                v.add("foodName", "must be a non-empty string");
            }
        }
        check_macro(&mut v, "calories", self.calories);
        check_macro(&mut v, "protein", self.protein);
        check_macro(&mut v, "carbs", self.carbs);
        check_macro(&mut v, "fat", self.fat);
        if let Some(q) = self.quantity {
            if q < 1 {
                v.add("quantity", "must be a positive integer");
            }
        }
        v.finish()
    }
}

fn check_macro(v: &mut Violations, field: &str, value: Option<f64>) {
    if let Some(value) = value {
        if !value.is_finite() || value < 0.0 {
            v.add(field, "must be a non-negative number");
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummaryResponse {
    pub meal_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(flatten)]
    pub totals: MacroTotals,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(v) => v.as_slice().iter().map(|x| x.field.clone()).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn meal_date_must_be_rfc3339() {
        let ok = CreateMealRequest {
            date: "2024-01-01T00:00:00Z".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateMealRequest {
            date: "yesterday".into(),
        };
        assert_eq!(fields(bad.validate().unwrap_err()), vec!["date"]);
    }

    #[test]
    fn entry_create_accepts_valid_payload_and_defaults_quantity() {
        let json = r#"{"foodName":"egg","calories":70,"protein":6,"carbs":1,"fat":5}"#;
        let req: CreateEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn entry_create_accumulates_all_violations() {
        let req = CreateEntryRequest {
            food_name: "".into(),
            calories: -1.0,
            protein: -0.5,
            carbs: 1.0,
            fat: 2.0,
            quantity: 0,
        };
        assert_eq!(
            fields(req.validate().unwrap_err()),
            vec!["foodName", "calories", "protein", "quantity"]
        );
    }

    #[test]
    fn entry_update_checks_only_supplied_fields() {
        let req = UpdateEntryRequest {
            food_name: None,
            calories: None,
            protein: Some(12.0),
            carbs: None,
            fat: None,
            quantity: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateEntryRequest {
            food_name: Some("".into()),
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            quantity: Some(-2),
        };
        assert_eq!(
            fields(req.validate().unwrap_err()),
            vec!["foodName", "quantity"]
        );
    }

    #[test]
    fn summary_response_flattens_totals() {
        let resp = MealSummaryResponse {
            meal_id: Uuid::new_v4(),
            date: OffsetDateTime::UNIX_EPOCH,
            totals: MacroTotals {
                calories: 140.0,
                protein: 12.0,
                carbs: 2.0,
                fat: 10.0,
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["calories"], 140.0);
        assert_eq!(json["protein"], 12.0);
        assert!(json.get("totals").is_none());
        assert!(json.get("mealId").is_some());
    }
}
