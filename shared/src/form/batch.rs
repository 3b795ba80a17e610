use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Whether the form creates new records or edits existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit,
}

/// Repeated field-set settings for a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBatchConfig")]
pub struct BatchConfig {
    enabled_for_modes: BTreeSet<FormMode>,
    max_items: usize,
    skip_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBatchConfig {
    enabled_for_modes: BTreeSet<FormMode>,
    max_items: usize,
    #[serde(default)]
    skip_count: usize,
}

impl TryFrom<RawBatchConfig> for BatchConfig {
    type Error = FormError;

    fn try_from(raw: RawBatchConfig) -> Result<Self> {
        BatchConfig::new(raw.enabled_for_modes, raw.max_items, raw.skip_count)
    }
}

impl BatchConfig {
    /// `max_items` must be at least one and leave room for an editable item
    /// after the `skip_count` read-only ones.
    pub fn new(
        modes: impl IntoIterator<Item = FormMode>,
        max_items: usize,
        skip_count: usize,
    ) -> Result<Self> {
        if max_items < 1 {
            return Err(FormError::InvalidBatchConfig(
                "maxItems must be at least 1".to_string(),
            ));
        }
        if skip_count >= max_items {
            return Err(FormError::InvalidBatchConfig(format!(
                "skipCount {} leaves no editable item within maxItems {}",
                skip_count, max_items
            )));
        }
        Ok(Self {
            enabled_for_modes: modes.into_iter().collect(),
            max_items,
            skip_count,
        })
    }

    pub fn for_create(max_items: usize) -> Result<Self> {
        Self::new([FormMode::Create], max_items, 0)
    }

    pub fn with_skip_count(self, skip_count: usize) -> Result<Self> {
        Self::new(self.enabled_for_modes, self.max_items, skip_count)
    }

    pub fn is_enabled_for(&self, mode: FormMode) -> bool {
        self.enabled_for_modes.contains(&mode)
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }
}

/// Ordered repeated items bounded by `[1, max_items]`, the first `skip_count`
/// of which are read-only.
///
/// Removing an item shifts every later item down one index, carrying its
/// contents along; nothing is dropped except the removed item itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItems<T> {
    items: Vec<T>,
    max_items: usize,
    skip_count: usize,
}

impl<T: Default> BatchItems<T> {
    /// Seeds the batch from existing items, clamped to `max_items`. An empty
    /// seed, or one holding only read-only items, gets a fresh trailing item.
    pub fn new(mut items: Vec<T>, max_items: usize, skip_count: usize) -> Self {
        debug_assert!(max_items >= 1, "batch needs room for one item");
        items.truncate(max_items);
        if items.is_empty() || (items.len() <= skip_count && items.len() < max_items) {
            items.push(T::default());
        }
        Self {
            items,
            max_items,
            skip_count,
        }
    }

    pub fn single(item: T) -> Self {
        Self::new(vec![item], 1, 0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    pub fn is_read_only(&self, index: usize) -> bool {
        index < self.skip_count
    }

    pub fn can_add(&self) -> bool {
        self.items.len() < self.max_items
    }

    pub fn can_remove(&self, index: usize) -> bool {
        self.items.len() > 1 && index >= self.skip_count && index < self.items.len()
    }

    /// Appends an empty item; returns false when the batch is full.
    pub fn add(&mut self) -> bool {
        if !self.can_add() {
            log::debug!("Batch already holds {} items, add ignored", self.max_items);
            return false;
        }
        self.items.push(T::default());
        true
    }

    /// Removes the item at `index`, reindexing the ones after it.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if !self.can_remove(index) {
            log::debug!(
                "Remove of batch item {} ignored (count {}, skip {})",
                index,
                self.items.len(),
                self.skip_count
            );
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access, refused for read-only items.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_read_only(index) {
            return None;
        }
        self.items.get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Items that are submitted, i.e. everything after the read-only prefix.
    pub fn editable(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().skip(self.skip_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn batch(values: &[&'static str], max: usize, skip: usize) -> BatchItems<&'static str> {
        BatchItems::new(values.to_vec(), max, skip)
    }

    #[test]
    fn test_remove_reindexes_later_items() {
        let mut items = batch(&["v0", "v1", "v2"], 5, 0);
        assert_eq!(items.remove(1), Some("v1"));
        assert_eq!(items.as_slice(), &["v0", "v2"]);
    }

    #[test]
    fn test_add_is_noop_at_max() {
        let mut items = batch(&["v0", "v1"], 2, 0);
        assert!(!items.can_add());
        assert!(!items.add());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_remove_is_noop_on_last_item() {
        let mut items = batch(&["v0"], 3, 0);
        assert_eq!(items.remove(0), None);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove_is_noop_for_skipped_items() {
        let mut items = batch(&["v0", "v1", "v2"], 5, 1);
        assert!(!items.can_remove(0));
        assert_eq!(items.remove(0), None);
        assert_eq!(items.as_slice(), &["v0", "v1", "v2"]);
        assert!(items.get_mut(0).is_none());
        assert!(items.get_mut(1).is_some());
    }

    #[test]
    fn test_seed_is_clamped_and_padded() {
        let clamped = batch(&["a", "b", "c"], 2, 0);
        assert_eq!(clamped.as_slice(), &["a", "b"]);

        let empty = batch(&[], 3, 0);
        assert_eq!(empty.len(), 1);

        let only_existing = batch(&["existing"], 3, 1);
        assert_eq!(only_existing.as_slice(), &["existing", ""]);
    }

    #[test]
    fn test_config_rejects_bad_bounds() {
        assert!(BatchConfig::for_create(0).is_err());
        assert!(BatchConfig::new([FormMode::Create], 2, 2).is_err());
        let config = BatchConfig::new([FormMode::Create, FormMode::Edit], 4, 1).unwrap();
        assert!(config.is_enabled_for(FormMode::Edit));
        assert_eq!(config.skip_count(), 1);
    }

    #[test]
    fn test_config_from_json() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"enabledForModes": ["create"], "maxItems": 3}"#).unwrap();
        assert!(config.is_enabled_for(FormMode::Create));
        assert!(!config.is_enabled_for(FormMode::Edit));
        assert_eq!(config.max_items(), 3);
        assert!(serde_json::from_str::<BatchConfig>(r#"{"enabledForModes": [], "maxItems": 0}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_remove_keeps_every_other_value(len in 2usize..8, pick in 0usize..8) {
            let index = pick % len;
            let values: Vec<usize> = (0..len).collect();
            let mut items = BatchItems::new(values.clone(), 8, 0);
            let removed = items.remove(index);
            prop_assert_eq!(removed, Some(index));
            let mut expected = values;
            expected.remove(index);
            prop_assert_eq!(items.as_slice(), expected.as_slice());
        }

        #[test]
        fn prop_count_stays_in_bounds(ops in proptest::collection::vec(any::<(bool, u8)>(), 0..40)) {
            let mut items: BatchItems<u8> = BatchItems::new(vec![1, 2], 5, 1);
            for (add, at) in ops {
                if add {
                    items.add();
                } else {
                    items.remove(at as usize % 6);
                }
                prop_assert!(items.len() >= 1 && items.len() <= 5);
                prop_assert_eq!(items.get(0), Some(&1));
            }
        }
    }
}
