use chrono::NaiveDate;
use frontend::components::dynamic_form::field_dom_id;
use frontend::flatpickr::{has_seconds, to_flatpickr_format};
use frontend::forms::{
    criterion_form_model, criterion_values, phase_batch_config, phase_form_model, phase_values,
};
use frontend::pages::home::dashboard_sections;
use pretty_assertions::assert_eq;
use shared::form::{END_DATE, START_DATE};
use shared::{CriterionDto, FieldValue, FormMode, FormState, InitialValues, PhaseDto, Role};
use test_case::test_case;

fn phase(name: &str, start_day: u32, end_day: u32) -> PhaseDto {
    let at = |day| {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    };
    PhaseDto {
        id: Some(format!("phase/{}", name)),
        name: name.to_string(),
        description: None,
        start_date: at(start_day),
        end_date: at(end_day),
    }
}

#[test_case("DD/MM/YYYY HH:mm", "d/m/Y H:i" ; "default format")]
#[test_case("YYYY-MM-DD HH:mm:ss", "Y-m-d H:i:S" ; "with seconds")]
#[test_case("DD.MM.YYYY at HH:mm", "d.m.Y \\a\\t H:i" ; "escapes literal letters")]
fn test_flatpickr_format(display: &str, expected: &str) {
    assert_eq!(to_flatpickr_format(display), expected);
}

#[test]
fn test_has_seconds() {
    assert!(has_seconds("YYYY-MM-DD HH:mm:ss"));
    assert!(!has_seconds("DD/MM/YYYY HH:mm"));
}

#[test]
fn test_dom_ids_carry_batch_suffix() {
    assert_eq!(
        field_dom_id("hackathon-phases", START_DATE, Some(2)),
        "hackathon-phases-startDate_batch2"
    );
    assert_eq!(field_dom_id("judging-criterion", "weight", None), "judging-criterion-weight");
}

#[test]
fn test_existing_phases_become_read_only_prefix() {
    let existing = vec![phase("ideation", 1, 3), phase("build", 3, 10)];
    let config = phase_batch_config(existing.len()).unwrap();
    assert_eq!(config.skip_count(), 2);
    assert!(config.max_items() > 2);

    let initial = existing.iter().map(phase_values).collect::<Vec<_>>();
    let mut state = FormState::new(
        phase_form_model().unwrap(),
        FormMode::Create,
        InitialValues::Batch(initial),
        Some(config),
    );
    // One empty editable item follows the existing ones.
    assert_eq!(state.batch_count(), 3);
    assert!(state.is_read_only(1));
    assert!(!state.is_read_only(2));
    assert!(!state.remove_item(0));

    assert!(state.set_value(2, "name", FieldValue::text("judging")));
    assert!(state.set_value(2, START_DATE, FieldValue::text("10/03/2025 09:00")));
    assert!(state.set_value(2, END_DATE, FieldValue::text("12/03/2025 17:00")));

    let phases: Vec<PhaseDto> = state.begin_submit().unwrap().into_dtos().unwrap();
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].name, "judging");
    assert_eq!(phases[0].start_date, existing[1].end_date);
}

#[test]
fn test_phase_overlapping_existing_blocks_submit() {
    let existing = vec![phase("ideation", 1, 5)];
    let mut state = FormState::new(
        phase_form_model().unwrap(),
        FormMode::Create,
        InitialValues::Batch(existing.iter().map(phase_values).collect()),
        Some(phase_batch_config(1).unwrap()),
    );
    assert_eq!(state.batch_count(), 2);
    state.set_value(1, "name", FieldValue::text("build"));
    state.set_value(1, START_DATE, FieldValue::text("04/03/2025 09:00"));
    state.set_value(1, END_DATE, FieldValue::text("08/03/2025 09:00"));

    assert_eq!(state.begin_submit(), None);
    assert!(state.error(1, START_DATE).is_some());
}

#[test]
fn test_criterion_edit_is_single_field_set() {
    let criterion = CriterionDto {
        id: Some("criteria/1".into()),
        name: "Creativity".into(),
        weight: "0.5".into(),
    };
    let mut state = FormState::new(
        criterion_form_model().unwrap(),
        FormMode::Edit,
        InitialValues::Flat(criterion_values(&criterion)),
        Some(shared::BatchConfig::for_create(5).unwrap()),
    );
    assert!(!state.is_batch());
    assert!(!state.add_item());

    state.set_value(0, "weight", FieldValue::text("1.5"));
    assert_eq!(state.begin_submit(), None);
    assert_eq!(
        state.error(0, "weight").map(|e| e.to_string()),
        Some("Weight must be a number greater than 0 and at most 1".to_string())
    );

    // Zero is rejected by the form, not left for the request to fail on.
    state.set_value(0, "weight", FieldValue::text("0"));
    assert_eq!(state.begin_submit(), None);
    state.set_value(0, "weight", FieldValue::text("0.25"));
    assert!(state.begin_submit().is_some());
}

#[test_case(&[Role::Admin], &["phases", "criteria"] ; "admin sees everything")]
#[test_case(&[Role::Partner], &["phases"] ; "partner")]
#[test_case(&[Role::Judge, Role::Mentor], &["criteria"] ; "judge")]
#[test_case(&[Role::Student], &[] ; "student")]
fn test_dashboard_sections(roles: &[Role], expected: &[&str]) {
    assert_eq!(dashboard_sections(roles), expected.to_vec());
}
