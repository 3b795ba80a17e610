use std::borrow::Borrow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::FormModel;
use super::value::FormValues;
use crate::error::Result;

/// What the form hands to its submit callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Batch(Vec<FormValues>),
    Single(FormValues),
}

impl SubmissionPayload {
    pub fn is_batch(&self) -> bool {
        matches!(self, SubmissionPayload::Batch(_))
    }

    /// Payload objects in order; a single payload yields one.
    pub fn items(&self) -> Vec<&FormValues> {
        match self {
            SubmissionPayload::Single(values) => vec![values],
            SubmissionPayload::Batch(items) => items.iter().collect(),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Converts every payload object into a DTO and validates it.
    pub fn into_dtos<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Validate,
    {
        let items = match self {
            SubmissionPayload::Single(values) => vec![values],
            SubmissionPayload::Batch(items) => items,
        };
        items
            .into_iter()
            .map(|values| -> Result<T> {
                let dto: T = serde_json::from_value(serde_json::to_value(values)?)?;
                dto.validate()?;
                Ok(dto)
            })
            .collect()
    }
}

/// Projects one field-set onto the model's leaf fields; unset fields are omitted.
pub fn map_single(model: &FormModel, values: &FormValues) -> FormValues {
    model
        .leaf_fields()
        .filter_map(|field| {
            values
                .get(&field.name)
                .map(|value| (field.name.clone(), value.clone()))
        })
        .collect()
}

/// Maps every item in index order and drops the first `skip_count`.
pub fn map_batch<V: Borrow<FormValues>>(model: &FormModel, items: &[V], skip_count: usize) -> Vec<FormValues> {
    items
        .iter()
        .map(|values| map_single(model, values.borrow()))
        .skip(skip_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::model::FieldDescriptor;
    use crate::form::value::FieldValue;
    use pretty_assertions::assert_eq;

    fn model() -> FormModel {
        FormModel::new(
            "criterion",
            vec![
                FieldDescriptor::input("name", "Name"),
                FieldDescriptor::column(
                    vec![FieldDescriptor::input("weight", "Weight")],
                    vec![FieldDescriptor::input("maxScore", "Max score")],
                ),
            ],
        )
        .unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::text(*v)))
            .collect()
    }

    #[test]
    fn test_single_flattens_columns_and_drops_unknown_keys() {
        let mapped = map_single(
            &model(),
            &values(&[("name", "Impact"), ("weight", "0.3"), ("id", "criteria/9")]),
        );
        assert_eq!(mapped, values(&[("name", "Impact"), ("weight", "0.3")]));
    }

    #[test]
    fn test_batch_drops_skipped_prefix() {
        let items = vec![
            values(&[("name", "v0")]),
            values(&[("name", "v1")]),
            values(&[("name", "v2")]),
        ];
        let mapped = map_batch(&model(), &items, 1);
        assert_eq!(mapped, vec![values(&[("name", "v1")]), values(&[("name", "v2")])]);
    }

    #[test]
    fn test_payload_json_shapes() {
        let single = SubmissionPayload::Single(values(&[("name", "A")]));
        assert_eq!(single.to_json().unwrap(), serde_json::json!({"name": "A"}));

        let batch = SubmissionPayload::Batch(vec![values(&[("name", "A")])]);
        assert_eq!(batch.to_json().unwrap(), serde_json::json!([{"name": "A"}]));
        assert!(batch.is_batch());
        assert_eq!(batch.items().len(), 1);
    }
}
