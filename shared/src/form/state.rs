use std::borrow::Borrow;
use std::collections::BTreeMap;

use super::batch::{BatchConfig, BatchItems, FormMode};
use super::dates::{PickerConstraint, END_DATE, START_DATE};
use super::keys;
use super::model::FormModel;
use super::submission::{map_batch, map_single, SubmissionPayload};
use super::validate::{validate_field, FieldError};
use super::value::{FieldValue, FormValues};

/// Values a form starts from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InitialValues {
    #[default]
    None,
    /// One field-set; in batch mode it seeds item 0 unless its keys carry
    /// `_batch{i}` suffixes, in which case it is regrouped per item.
    Flat(FormValues),
    /// One field-set per batch item; the item count follows its length.
    Batch(Vec<FormValues>),
}

impl From<FormValues> for InitialValues {
    fn from(values: FormValues) -> Self {
        InitialValues::Flat(values)
    }
}

impl From<Vec<FormValues>> for InitialValues {
    fn from(items: Vec<FormValues>) -> Self {
        InitialValues::Batch(items)
    }
}

/// Values and inline errors of one batch item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemState {
    pub values: FormValues,
    pub errors: BTreeMap<String, FieldError>,
}

impl ItemState {
    fn with_values(values: FormValues) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }
}

impl Borrow<FormValues> for ItemState {
    fn borrow(&self) -> &FormValues {
        &self.values
    }
}

/// State of one rendered form: items, their values and errors, and whether a
/// submission is in flight. Every user action maps to one method here.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    model: FormModel,
    mode: FormMode,
    batch: Option<BatchConfig>,
    items: BatchItems<ItemState>,
    pending: bool,
}

impl FormState {
    /// Batch mode applies only when `batch` is enabled for `mode`.
    pub fn new(
        model: FormModel,
        mode: FormMode,
        initial: InitialValues,
        batch: Option<BatchConfig>,
    ) -> Self {
        let batch = batch.filter(|config| config.is_enabled_for(mode));

        let seeds = match (initial, &batch) {
            (InitialValues::None, _) => Vec::new(),
            (InitialValues::Flat(values), Some(config)) if keys::has_batch_keys(&values) => {
                keys::unflatten_batch(&values, config.max_items())
            }
            (InitialValues::Flat(values), _) => vec![values],
            (InitialValues::Batch(items), Some(_)) => items,
            (InitialValues::Batch(items), None) => items.into_iter().take(1).collect(),
        };

        let seeds: Vec<ItemState> = seeds
            .into_iter()
            .map(|values| ItemState::with_values(coerce_values(&model, values)))
            .collect();

        let items = match &batch {
            Some(config) => BatchItems::new(seeds, config.max_items(), config.skip_count()),
            None => BatchItems::new(seeds, 1, 0),
        };

        log::debug!(
            "Form '{}' opened in {:?} mode with {} item(s), batch {}",
            model.name(),
            mode,
            items.len(),
            if batch.is_some() { "on" } else { "off" }
        );

        Self {
            model,
            mode,
            batch,
            items,
            pending: false,
        }
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_batch(&self) -> bool {
        self.batch.is_some()
    }

    pub fn batch_count(&self) -> usize {
        self.items.len()
    }

    pub fn skip_count(&self) -> usize {
        self.items.skip_count()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_read_only(&self, index: usize) -> bool {
        self.items.is_read_only(index)
    }

    pub fn can_add(&self) -> bool {
        self.is_batch() && self.items.can_add()
    }

    pub fn can_remove(&self, index: usize) -> bool {
        self.is_batch() && self.items.can_remove(index)
    }

    pub fn values(&self, index: usize) -> Option<&FormValues> {
        self.items.get(index).map(|item| &item.values)
    }

    pub fn value(&self, index: usize, name: &str) -> Option<&FieldValue> {
        self.values(index).and_then(|values| values.get(name))
    }

    pub fn error(&self, index: usize, name: &str) -> Option<&FieldError> {
        self.items.get(index).and_then(|item| item.errors.get(name))
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|item| !item.errors.is_empty())
    }

    /// All current errors as `(index, field name, error)`.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &str, &FieldError)> {
        self.items.iter().enumerate().flat_map(|(index, item)| {
            item.errors
                .iter()
                .map(move |(name, error)| (index, name.as_str(), error))
        })
    }

    /// Every item's values under `name_batch{i}` keys.
    pub fn flat_values(&self) -> FormValues {
        let values: Vec<FormValues> = self.items.iter().map(|item| item.values.clone()).collect();
        keys::flatten_batch(&values)
    }

    pub fn add_item(&mut self) -> bool {
        if !self.is_batch() {
            return false;
        }
        let added = self.items.add();
        if added {
            log::debug!("Form '{}' added batch item {}", self.model.name(), self.items.len() - 1);
        }
        added
    }

    /// Removes item `index`; later items move down one index with their values.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if !self.is_batch() || self.items.remove(index).is_none() {
            return false;
        }
        log::debug!("Form '{}' removed batch item {}", self.model.name(), index);
        // The item now at `index` has a new predecessor.
        self.revalidate_if_set(index, START_DATE);
        true
    }

    /// Stores a value and re-checks the field plus the date fields that depend
    /// on it. Read-only items and unknown fields are left untouched.
    pub fn set_value(&mut self, index: usize, name: &str, value: FieldValue) -> bool {
        let Some(field) = self.model.field(name) else {
            log::warn!("Form '{}' has no field '{}'", self.model.name(), name);
            return false;
        };
        let value = value.coerce_for(&field.kind);

        let Some(item) = self.items.get_mut(index) else {
            log::warn!(
                "Form '{}' ignored a change to '{}' on item {} (read-only or missing)",
                self.model.name(),
                name,
                index
            );
            return false;
        };
        item.values.insert(name.to_string(), value);

        self.revalidate(index, name);
        match name {
            START_DATE => self.revalidate_if_set(index, END_DATE),
            END_DATE => {
                self.revalidate_if_set(index, START_DATE);
                self.revalidate_if_set(index + 1, START_DATE);
            }
            _ => {}
        }
        true
    }

    /// Validates every editable item; returns true when nothing failed.
    pub fn validate_all(&mut self) -> bool {
        let names: Vec<String> = self.model.leaf_fields().map(|f| f.name.clone()).collect();
        for index in self.items.skip_count()..self.items.len() {
            for name in &names {
                self.revalidate(index, name);
            }
        }
        !self.has_errors()
    }

    /// Starts a submission. Returns the payload when every field validates and
    /// no submission is pending; otherwise nothing is submitted.
    pub fn begin_submit(&mut self) -> Option<SubmissionPayload> {
        if self.pending {
            log::warn!("Form '{}' is already submitting", self.model.name());
            return None;
        }
        if !self.validate_all() {
            log::debug!(
                "Form '{}' blocked submission with {} error(s)",
                self.model.name(),
                self.errors().count()
            );
            return None;
        }

        let payload = match self.batch {
            Some(_) => SubmissionPayload::Batch(map_batch(
                &self.model,
                self.items.as_slice(),
                self.items.skip_count(),
            )),
            None => {
                let values = self.values(0).cloned().unwrap_or_default();
                SubmissionPayload::Single(map_single(&self.model, &values))
            }
        };
        self.pending = true;
        Some(payload)
    }

    /// Ends a submission whatever its outcome; entered values are kept.
    pub fn finish_submit(&mut self) {
        self.pending = false;
    }

    /// Picker restrictions for a date-time field of item `index`.
    pub fn picker_constraint(&self, index: usize, name: &str) -> Option<PickerConstraint> {
        let field = self.model.field(name)?;
        field
            .kind
            .is_date_time()
            .then(|| PickerConstraint::for_field(field, self.items.as_slice(), index))
    }

    fn revalidate(&mut self, index: usize, name: &str) {
        if self.items.is_read_only(index) {
            return;
        }
        let Some(field) = self.model.field(name) else {
            return;
        };
        let result = validate_field(field, self.items.as_slice(), index);
        if let Some(item) = self.items.get_mut(index) {
            match result {
                Ok(()) => {
                    item.errors.remove(name);
                }
                Err(error) => {
                    item.errors.insert(name.to_string(), error);
                }
            }
        }
    }

    // Dependent fields are only re-checked once the user has filled them.
    fn revalidate_if_set(&mut self, index: usize, name: &str) {
        let filled = self
            .value(index, name)
            .is_some_and(|value| !value.is_empty());
        if filled {
            self.revalidate(index, name);
        }
    }
}

fn coerce_values(model: &FormModel, values: FormValues) -> FormValues {
    values
        .into_iter()
        .map(|(name, value)| {
            let value = match model.field(&name) {
                Some(field) => value.coerce_for(&field.kind),
                None => value,
            };
            (name, value)
        })
        .collect()
}
