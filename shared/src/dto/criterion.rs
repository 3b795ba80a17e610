use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::form::FieldRule;

const WEIGHT_MESSAGE: &str = "Weight must be a number greater than 0 and at most 1";

/// A judging criterion with its share of the total score
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct CriterionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name is required and must be at most 100 characters"
    ))]
    pub name: String,

    /// Decimal weight in `(0, 1]`, kept as entered
    #[validate(custom(function = "validate_weight"))]
    pub weight: String,
}

impl CriterionDto {
    pub fn weight_value(&self) -> Option<f64> {
        self.weight.trim().parse().ok()
    }

    /// Form rule accepting exactly the weights `validate_weight` accepts
    pub fn weight_rule() -> FieldRule {
        FieldRule::Number {
            min: Some(0.0),
            exclusive_min: true,
            max: Some(1.0),
            message: Some(WEIGHT_MESSAGE.into()),
        }
    }
}

fn validate_weight(weight: &str) -> Result<(), ValidationError> {
    match weight.trim().parse::<f64>() {
        Ok(value) if value > 0.0 && value <= 1.0 => Ok(()),
        _ => {
            let mut err = ValidationError::new("weight");
            err.message = Some(WEIGHT_MESSAGE.into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0.5", true)]
    #[test_case("1", true)]
    #[test_case("0", false)]
    #[test_case("1.2", false)]
    #[test_case("half", false)]
    fn test_weight_validation(weight: &str, ok: bool) {
        let dto = CriterionDto {
            id: None,
            name: "Creativity".to_string(),
            weight: weight.to_string(),
        };
        assert_eq!(dto.validate().is_ok(), ok);
    }

    #[test_case("0" ; "zero")]
    #[test_case("0.0001" ; "just above zero")]
    #[test_case("1" ; "one")]
    #[test_case("1.0001" ; "just above one")]
    #[test_case("-0.5" ; "negative")]
    #[test_case("abc" ; "not a number")]
    fn test_weight_rule_agrees_with_dto(weight: &str) {
        use crate::form::{FieldDescriptor, FieldValue, FormValues};

        let field = FieldDescriptor::input("weight", "Weight").with_rule(CriterionDto::weight_rule());
        let mut values = FormValues::new();
        values.insert("weight".into(), FieldValue::text(weight));
        let form_ok = crate::form::validate::validate_field(&field, &[values], 0).is_ok();
        assert_eq!(form_ok, validate_weight(weight).is_ok());
    }
}
