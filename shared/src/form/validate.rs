use std::borrow::Borrow;

use thiserror::Error;

use super::dates;
use super::model::{FieldDescriptor, FieldKind, FieldRule};
use super::value::{FieldValue, FormValues};

/// Inline error shown under a field; `Display` is the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },

    #[error("{0}")]
    Rule(String),

    #[error("{label} is not a valid date")]
    InvalidDate { label: String },

    #[error("{label} must be one of the listed options")]
    UnknownOption { label: String },

    #[error("End date must not be before the start date")]
    EndBeforeStart,

    #[error("Start date must not be after the end date")]
    StartAfterEnd,

    #[error("Start date must not be before the end date of the previous item")]
    StartBeforePreviousEnd { previous: usize },
}

fn check_rule(field: &FieldDescriptor, rule: &FieldRule, text: &str) -> Result<(), FieldError> {
    let label = field.display_label();
    let fail = |message: &Option<String>, fallback: String| {
        Err(FieldError::Rule(message.clone().unwrap_or(fallback)))
    };

    match rule {
        FieldRule::MinLength { value, message } if text.chars().count() < *value => fail(
            message,
            format!("{} must be at least {} characters", label, value),
        ),
        FieldRule::MaxLength { value, message } if text.chars().count() > *value => fail(
            message,
            format!("{} must be at most {} characters", label, value),
        ),
        FieldRule::Pattern { pattern, message } if !pattern.is_match(text) => {
            fail(message, format!("{} has an invalid format", label))
        }
        FieldRule::Number {
            min,
            exclusive_min,
            max,
            message,
        } => {
            let above_min = |number: f64| match min {
                Some(min) if *exclusive_min => number > *min,
                Some(min) => number >= *min,
                None => true,
            };
            let in_range = text.trim().parse::<f64>().ok().filter(|number| {
                number.is_finite() && above_min(*number) && max.map_or(true, |max| *number <= max)
            });
            match in_range {
                Some(_) => Ok(()),
                None => {
                    let bounds = match (min, max, exclusive_min) {
                        (Some(min), Some(max), true) => {
                            format!(" greater than {} and at most {}", min, max)
                        }
                        (Some(min), Some(max), false) => format!(" between {} and {}", min, max),
                        (Some(min), None, true) => format!(" greater than {}", min),
                        (Some(min), None, false) => format!(" of at least {}", min),
                        (None, Some(max), _) => format!(" of at most {}", max),
                        (None, None, _) => String::new(),
                    };
                    fail(message, format!("{} must be a number{}", label, bounds))
                }
            }
        }
        _ => Ok(()),
    }
}

/// Validates one leaf field of item `index` against the whole batch.
///
/// Order: required, custom rules on non-empty text, unparseable dates, then
/// the `startDate` / `endDate` ordering rules.
pub fn validate_field<V: Borrow<FormValues>>(
    field: &FieldDescriptor,
    items: &[V],
    index: usize,
) -> Result<(), FieldError> {
    let value = items
        .get(index)
        .and_then(|values| values.borrow().get(&field.name))
        .cloned()
        .unwrap_or_default();

    if value.is_empty() {
        if field.required {
            return Err(FieldError::Required {
                label: field.display_label().to_string(),
            });
        }
        return Ok(());
    }

    if let FieldValue::Text(text) = &value {
        match &field.kind {
            FieldKind::DateTime { .. } => {
                return Err(FieldError::InvalidDate {
                    label: field.display_label().to_string(),
                });
            }
            FieldKind::Dropdown { options } if !options.iter().any(|o| o.value == *text) => {
                return Err(FieldError::UnknownOption {
                    label: field.display_label().to_string(),
                });
            }
            _ => {}
        }
        for rule in &field.rules {
            check_rule(field, rule, text)?;
        }
    }

    if field.kind.is_date_time() && dates::is_date_range_field(&field.name) {
        dates::validate_date_order(items, index, &field.name)?;
    }
    Ok(())
}
