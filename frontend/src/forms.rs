//! Form models used by the portal pages and the conversions between their
//! DTOs and form values.

use crate::config::Config;
use shared::form::{FieldRule, END_DATE, START_DATE};
use shared::{
    BatchConfig, CriterionDto, FieldDescriptor, FieldValue, FormMode, FormModel, FormValues,
    PhaseDto, Result,
};

pub fn phase_form_model() -> Result<FormModel> {
    FormModel::new(
        "hackathon-phases",
        vec![
            FieldDescriptor::input("name", "Phase name")
                .required()
                .with_placeholder("e.g. Ideation")
                .with_rule(FieldRule::MaxLength {
                    value: 200,
                    message: None,
                }),
            FieldDescriptor::text_area("description", "Description").with_rule(
                FieldRule::MaxLength {
                    value: 4000,
                    message: None,
                },
            ),
            FieldDescriptor::column(
                vec![FieldDescriptor::date_time(START_DATE, "Start").required()],
                vec![FieldDescriptor::date_time(END_DATE, "End").required()],
            ),
        ],
    )
}

/// Existing phases come first as read-only items; room is always left for at
/// least one new phase.
pub fn phase_batch_config(existing: usize) -> Result<BatchConfig> {
    let max_items = Config::max_phases_per_batch().max(existing + 1);
    BatchConfig::new([FormMode::Create], max_items, existing)
}

pub fn phase_values(phase: &PhaseDto) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name".into(), FieldValue::text(&phase.name));
    if let Some(description) = &phase.description {
        values.insert("description".into(), FieldValue::text(description));
    }
    values.insert(START_DATE.into(), phase.start_date.into());
    values.insert(END_DATE.into(), phase.end_date.into());
    values
}

pub fn criterion_form_model() -> Result<FormModel> {
    FormModel::new(
        "judging-criterion",
        vec![
            FieldDescriptor::input("name", "Criterion").required().with_rule(
                FieldRule::MaxLength {
                    value: 100,
                    message: None,
                },
            ),
            FieldDescriptor::input("weight", "Weight")
                .required()
                .with_placeholder("0.25")
                .with_rule(CriterionDto::weight_rule()),
        ],
    )
}

pub fn criterion_values(criterion: &CriterionDto) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name".into(), FieldValue::text(&criterion.name));
    values.insert("weight".into(), FieldValue::text(&criterion.weight));
    values
}
