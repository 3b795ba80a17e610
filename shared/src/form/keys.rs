//! Suffix-keyed flat form values (`startDate_batch2`), used only where values
//! cross into the DOM or arrive from callers that still speak the flat shape.

use super::value::{FieldValue, FormValues};

const BATCH_SUFFIX: &str = "_batch";

pub fn batch_key(name: &str, index: usize) -> String {
    format!("{}{}{}", name, BATCH_SUFFIX, index)
}

/// Splits `name_batch{i}` into its field name and index.
pub fn split_batch_key(key: &str) -> Option<(&str, usize)> {
    let at = key.rfind(BATCH_SUFFIX)?;
    let digits = &key[at + BATCH_SUFFIX.len()..];
    if at == 0 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|index| (&key[..at], index))
}

pub fn has_batch_keys(values: &FormValues) -> bool {
    values.keys().any(|key| split_batch_key(key).is_some())
}

/// Flattens per-item values into one suffix-keyed map.
pub fn flatten_batch(items: &[FormValues]) -> FormValues {
    items
        .iter()
        .enumerate()
        .flat_map(|(index, values)| {
            values
                .iter()
                .map(move |(name, value)| (batch_key(name, index), value.clone()))
        })
        .collect()
}

/// Regroups a suffix-keyed map into per-item values. Keys without a suffix
/// belong to item 0; the result always holds at least one item. Keys whose
/// index is `max_items` or above are dropped.
pub fn unflatten_batch(flat: &FormValues, max_items: usize) -> Vec<FormValues> {
    let max_items = max_items.max(1);
    let indexed = flat.iter().filter_map(|(key, value)| {
        let (name, index) = split_batch_key(key).unwrap_or((key.as_str(), 0));
        if index >= max_items {
            log::warn!("Dropping '{}': batch index {} is past the limit of {}", key, index, max_items);
            return None;
        }
        Some((name, index, value))
    });

    let mut items: Vec<FormValues> = vec![FormValues::new()];
    for (name, index, value) in indexed {
        if items.len() <= index {
            items.resize_with(index + 1, FormValues::new);
        }
        items[index].insert(name.to_string(), value.clone());
    }
    items
}

/// Reads one item's value out of a suffix-keyed map.
pub fn batch_value<'a>(flat: &'a FormValues, name: &str, index: usize) -> Option<&'a FieldValue> {
    flat.get(&batch_key(name, index))
}
