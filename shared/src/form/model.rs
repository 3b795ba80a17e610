use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FormError, Result};

/// Display format used by date-time pickers when a field does not override it.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "DD/MM/YYYY HH:mm";

/// One selectable entry of a dropdown field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub text: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// A compiled regular expression carried by a `pattern` rule.
///
/// Serialized as its source string; an invalid expression fails deserialization.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(Self)
            .map_err(|e| FormError::Validation(format!("Invalid pattern '{}': {}", source, e)))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Custom validation rule attached to a field, checked after the required check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FieldRule {
    MinLength {
        value: usize,
        #[serde(default)]
        message: Option<String>,
    },
    MaxLength {
        value: usize,
        #[serde(default)]
        message: Option<String>,
    },
    Pattern {
        pattern: Pattern,
        #[serde(default)]
        message: Option<String>,
    },
    /// The value must parse as a decimal number within the optional bounds.
    /// `max` is inclusive; `min` is too unless `exclusive_min` is set.
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        exclusive_min: bool,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        message: Option<String>,
    },
}

/// The two sub-sequences of a column layout node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnItems {
    pub left: Vec<FieldDescriptor>,
    pub right: Vec<FieldDescriptor>,
}

impl ColumnItems {
    pub fn new(left: Vec<FieldDescriptor>, right: Vec<FieldDescriptor>) -> Self {
        Self { left, right }
    }

    /// Splits a flat sequence in half; the left column takes the extra field on odd lengths.
    pub fn split(mut fields: Vec<FieldDescriptor>) -> Self {
        let right = fields.split_off(fields.len().div_ceil(2));
        Self { left: fields, right }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.left.iter().chain(self.right.iter())
    }
}

// Column items arrive either as a `[left, right]` pair or as one flat list.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawColumnItems {
    Split(Vec<Vec<FieldDescriptor>>),
    Flat(Vec<FieldDescriptor>),
}

impl Serialize for ColumnItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RawColumnItems::Split(vec![self.left.clone(), self.right.clone()]).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawColumnItems::deserialize(deserializer)? {
            RawColumnItems::Split(columns) if columns.is_empty() => Ok(Self::default()),
            RawColumnItems::Split(columns) if columns.len() == 2 => {
                let mut columns = columns.into_iter();
                let left = columns.next().unwrap_or_default();
                let right = columns.next().unwrap_or_default();
                Ok(Self { left, right })
            }
            RawColumnItems::Split(columns) => Err(serde::de::Error::custom(format!(
                "a column holds exactly two sub-sequences, found {}",
                columns.len()
            ))),
            RawColumnItems::Flat(fields) => Ok(Self::split(fields)),
        }
    }
}

/// Discriminant of a field descriptor plus the data only that kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Input,
    TextArea,
    Dropdown {
        #[serde(default)]
        options: Vec<DropdownOption>,
    },
    #[serde(rename_all = "camelCase")]
    DateTime {
        #[serde(default)]
        min_date: Option<NaiveDate>,
        #[serde(default)]
        max_date: Option<NaiveDate>,
        #[serde(default)]
        format: Option<String>,
    },
    Column {
        items: ColumnItems,
    },
}

impl FieldKind {
    pub fn is_date_time(&self) -> bool {
        matches!(self, FieldKind::DateTime { .. })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Input => "input",
            FieldKind::TextArea => "textArea",
            FieldKind::Dropdown { .. } => "dropdown",
            FieldKind::DateTime { .. } => "dateTime",
            FieldKind::Column { .. } => "column",
        };
        f.write_str(name)
    }
}

/// One form field or layout node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Payload key; layout columns may leave it empty
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FieldRule>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            required: false,
            placeholder: None,
            disabled: false,
            rules: Vec::new(),
            kind,
        }
    }

    pub fn input(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Input)
    }

    pub fn text_area(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::TextArea)
    }

    pub fn dropdown(name: &str, label: &str, options: Vec<DropdownOption>) -> Self {
        Self::with_kind(name, label, FieldKind::Dropdown { options })
    }

    pub fn date_time(name: &str, label: &str) -> Self {
        Self::with_kind(
            name,
            label,
            FieldKind::DateTime {
                min_date: None,
                max_date: None,
                format: None,
            },
        )
    }

    pub fn column(left: Vec<FieldDescriptor>, right: Vec<FieldDescriptor>) -> Self {
        Self::with_kind(
            "",
            "",
            FieldKind::Column {
                items: ColumnItems::new(left, right),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets absolute day bounds; ignored for anything but date-time fields.
    pub fn with_date_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        if let FieldKind::DateTime {
            min_date, max_date, ..
        } = &mut self.kind
        {
            *min_date = min;
            *max_date = max;
        }
        self
    }

    pub fn is_column(&self) -> bool {
        matches!(self.kind, FieldKind::Column { .. })
    }

    /// Display format of a date-time field, in `DD/MM/YYYY HH:mm` token style
    pub fn date_time_format(&self) -> &str {
        match &self.kind {
            FieldKind::DateTime {
                format: Some(format),
                ..
            } => format,
            _ => DEFAULT_DATE_TIME_FORMAT,
        }
    }

    /// Label used in messages, falling back to the field name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

fn leaves_of(field: &FieldDescriptor) -> Box<dyn Iterator<Item = &FieldDescriptor> + '_> {
    match &field.kind {
        FieldKind::Column { items } => Box::new(items.iter()),
        _ => Box::new(std::iter::once(field)),
    }
}

/// Declarative description of a form; immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFormModel")]
pub struct FormModel {
    name: String,
    fields: Vec<FieldDescriptor>,
}

#[derive(Deserialize)]
struct RawFormModel {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TryFrom<RawFormModel> for FormModel {
    type Error = FormError;

    fn try_from(raw: RawFormModel) -> Result<Self> {
        FormModel::new(raw.name, raw.fields)
    }
}

impl FormModel {
    /// Builds a model, rejecting nested columns, unnamed or duplicate fields
    /// and inverted date bounds.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self> {
        let model = Self {
            name: name.into(),
            fields,
        };
        model.check_structure()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: FormModel = serde_json::from_str(json)?;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Value-carrying fields in render order, column children flattened left then right.
    pub fn leaf_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().flat_map(leaves_of)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.leaf_fields().find(|field| field.name == name)
    }

    fn check_structure(&self) -> Result<()> {
        for field in &self.fields {
            if let FieldKind::Column { items } = &field.kind {
                if items.iter().any(FieldDescriptor::is_column) {
                    log::warn!("Form model '{}' nests a column inside a column", self.name);
                    return Err(FormError::structural(&self.name, "columns cannot be nested"));
                }
            }
        }

        let mut seen = HashSet::new();
        for field in self.leaf_fields() {
            if field.name.is_empty() {
                return Err(FormError::structural(
                    &self.name,
                    format!("a {} field has no name", field.kind),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::structural(
                    &self.name,
                    format!("duplicate field name '{}'", field.name),
                ));
            }
            if let FieldKind::DateTime {
                min_date: Some(min),
                max_date: Some(max),
                ..
            } = &field.kind
            {
                if min > max {
                    return Err(FormError::structural(
                        &self.name,
                        format!("field '{}' has minDate {} after maxDate {}", field.name, min, max),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn named(names: &[&str]) -> Vec<FieldDescriptor> {
        names.iter().map(|n| FieldDescriptor::input(n, n)).collect()
    }

    #[rstest]
    #[case(4, 2)]
    #[case(5, 3)]
    #[case(1, 1)]
    #[case(0, 0)]
    fn test_split_puts_first_half_left(#[case] total: usize, #[case] left: usize) {
        let names: Vec<String> = (0..total).map(|i| format!("f{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let items = ColumnItems::split(named(&refs));
        assert_eq!(items.left.len(), left);
        assert_eq!(items.right.len(), total - left);
        if total > 0 {
            assert_eq!(items.left[0].name, "f0");
        }
    }

    #[test]
    fn test_leaf_fields_flatten_columns_in_order() {
        let model = FormModel::new(
            "phase",
            vec![
                FieldDescriptor::input("name", "Name"),
                FieldDescriptor::column(named(&["startDate"]), named(&["endDate"])),
                FieldDescriptor::text_area("description", "Description"),
            ],
        )
        .unwrap();
        let names: Vec<&str> = model.leaf_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "startDate", "endDate", "description"]);
    }

    #[test]
    fn test_nested_column_is_rejected() {
        let inner = FieldDescriptor::column(named(&["a"]), named(&["b"]));
        let result = FormModel::new("bad", vec![FieldDescriptor::column(vec![inner], vec![])]);
        assert!(matches!(result, Err(FormError::Structural { .. })));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = FormModel::new(
            "bad",
            vec![
                FieldDescriptor::input("name", "Name"),
                FieldDescriptor::column(named(&["name"]), vec![]),
            ],
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate field name 'name'"));
    }

    #[test]
    fn test_inverted_date_bounds_are_rejected() {
        let field = FieldDescriptor::date_time("startDate", "Start").with_date_bounds(
            NaiveDate::from_ymd_opt(2024, 5, 2),
            NaiveDate::from_ymd_opt(2024, 5, 1),
        );
        assert!(FormModel::new("bad", vec![field]).is_err());
    }

    #[test]
    fn test_model_from_json_with_flat_column() {
        let json = r#"{
            "name": "phase",
            "fields": [
                {"type": "input", "name": "name", "label": "Name", "required": true},
                {"type": "column", "items": [
                    {"type": "dateTime", "name": "startDate", "label": "Start", "minDate": "2024-01-01"},
                    {"type": "dateTime", "name": "endDate", "label": "End"}
                ]},
                {"type": "dropdown", "name": "kind", "label": "Kind",
                 "options": [{"value": "online", "text": "Online"}]}
            ]
        }"#;
        let model = FormModel::from_json(json).unwrap();
        assert_eq!(model.name(), "phase");
        assert!(model.fields()[0].required);
        match &model.fields()[1].kind {
            FieldKind::Column { items } => {
                assert_eq!(items.left[0].name, "startDate");
                assert_eq!(items.right[0].name, "endDate");
                assert_eq!(
                    items.left[0].kind,
                    FieldKind::DateTime {
                        min_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                        max_date: None,
                        format: None,
                    }
                );
            }
            other => panic!("expected column, got {}", other),
        }
    }

    #[test]
    fn test_model_from_json_rejects_three_column_sequences() {
        let json = r#"{"name": "bad", "fields": [
            {"type": "column", "items": [[], [], []]}
        ]}"#;
        assert!(FormModel::from_json(json).is_err());
    }

    #[test]
    fn test_model_from_json_rejects_invalid_pattern() {
        let json = r#"{"name": "bad", "fields": [
            {"type": "input", "name": "code", "rules": [{"rule": "pattern", "pattern": "("}]}
        ]}"#;
        assert!(FormModel::from_json(json).is_err());
    }

    #[test]
    fn test_date_time_format_defaults() {
        let field = FieldDescriptor::date_time("startDate", "Start");
        assert_eq!(field.date_time_format(), DEFAULT_DATE_TIME_FORMAT);
        assert_eq!(FieldDescriptor::input("x", "").display_label(), "x");
    }
}
