use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::Violations;

use super::repo_types::Goal;

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

impl GoalRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        check_target(&mut v, "calories", Some(self.calories));
        check_target(&mut v, "protein", Some(self.protein));
        check_target(&mut v, "carbs", Some(self.carbs));
        check_target(&mut v, "fat", Some(self.fat));
        v.finish()
    }
}

/// Partial update; only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
}

impl UpdateGoalRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        check_target(&mut v, "calories", self.calories);
        check_target(&mut v, "protein", self.protein);
        check_target(&mut v, "carbs", self.carbs);
        check_target(&mut v, "fat", self.fat);
        v.finish()
    }
}

fn check_target(v: &mut Violations, field: &str, value: Option<i32>) {
    if let Some(value) = value {
        if value < 1 {
            v.add(field, "must be a positive integer");
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            calories: g.calories,
            protein: g.protein,
            carbs: g.carbs,
            fat: g.fat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_targets_must_all_be_positive() {
        let req = GoalRequest {
            calories: 2000,
            protein: 150,
            carbs: 200,
            fat: 70,
        };
        assert!(req.validate().is_ok());

        let req = GoalRequest {
            calories: 0,
            protein: -1,
            carbs: 200,
            fat: 70,
        };
        match req.validate().unwrap_err() {
            ApiError::Validation(v) => {
                let fields: Vec<_> = v.as_slice().iter().map(|x| x.field.as_str()).collect();
                assert_eq!(fields, vec!["calories", "protein"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn partial_update_allows_any_subset() {
        let req = UpdateGoalRequest {
            calories: Some(1800),
            protein: None,
            carbs: None,
            fat: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateGoalRequest {
            calories: None,
            protein: Some(0),
            carbs: None,
            fat: None,
        };
        assert!(req.validate().is_err());
    }
}
