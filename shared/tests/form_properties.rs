use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared::form::{END_DATE, START_DATE};
use shared::{
    BatchConfig, FieldDescriptor, FieldValue, FormMode, FormModel, FormState, FormValues,
    PhaseDto, SubmissionPayload,
};
use test_log::test;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn phase_model() -> FormModel {
    FormModel::from_json(
        r#"{
            "name": "hackathon-phases",
            "fields": [
                {"type": "input", "name": "name", "label": "Phase name"},
                {"type": "column", "items": [
                    {"type": "dateTime", "name": "startDate", "label": "Start", "required": true},
                    {"type": "dateTime", "name": "endDate", "label": "End", "required": true}
                ]}
            ]
        }"#,
    )
    .unwrap()
}

fn dates_model() -> FormModel {
    FormModel::new(
        "dates",
        vec![
            FieldDescriptor::date_time(START_DATE, "Start").required(),
            FieldDescriptor::date_time(END_DATE, "End").required(),
        ],
    )
    .unwrap()
}

fn named(name: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name".into(), FieldValue::text(name));
    values
}

fn window(name: &str, start: NaiveDateTime, end: NaiveDateTime) -> FormValues {
    let mut values = named(name);
    values.insert(START_DATE.into(), FieldValue::DateTime(start));
    values.insert(END_DATE.into(), FieldValue::DateTime(end));
    values
}

fn create_batch(model: FormModel, items: Vec<FormValues>, max: usize, skip: usize) -> FormState {
    let config = BatchConfig::new([FormMode::Create], max, skip).unwrap();
    FormState::new(model, FormMode::Create, items.into(), Some(config))
}

#[test]
fn test_reindex_on_remove() {
    let v0 = window("v0", at(1, 9), at(2, 9));
    let v1 = window("v1", at(3, 9), at(4, 9));
    let v2 = window("v2", at(5, 9), at(6, 9));
    let mut state = create_batch(phase_model(), vec![v0.clone(), v1, v2.clone()], 5, 0);

    assert!(state.remove_item(1));
    assert_eq!(state.batch_count(), 2);
    assert_eq!(state.values(0), Some(&v0));
    assert_eq!(state.values(1), Some(&v2));
    assert_eq!(state.values(2), None);
}

#[test]
fn test_skipped_items_never_reach_payload() {
    let v0 = window("v0", at(1, 9), at(2, 9));
    let v1 = window("v1", at(3, 9), at(4, 9));
    let v2 = window("v2", at(5, 9), at(6, 9));
    let mut state = create_batch(phase_model(), vec![v0, v1.clone(), v2.clone()], 5, 1);

    assert_eq!(state.begin_submit(), Some(SubmissionPayload::Batch(vec![v1, v2])));
}

#[test]
fn test_add_and_remove_bounds() {
    let mut state = create_batch(phase_model(), vec![named("a"), named("b")], 3, 1);
    assert!(state.add_item());
    assert_eq!(state.batch_count(), 3);
    assert!(!state.add_item());
    assert_eq!(state.batch_count(), 3);

    assert!(!state.remove_item(0));
    assert!(state.remove_item(2));
    assert!(state.remove_item(1));
    assert_eq!(state.batch_count(), 1);
    assert!(!state.remove_item(0));
    assert_eq!(state.batch_count(), 1);
}

#[test]
fn test_inverted_item_window_blocks_submit() {
    let mut state = create_batch(
        phase_model(),
        vec![window("a", at(1, 9), at(2, 9)), window("b", at(8, 9), at(7, 9))],
        3,
        0,
    );
    assert_eq!(state.begin_submit(), None);
    assert!(state.error(1, END_DATE).is_some());
    assert!(!state.is_pending());
}

#[test]
fn test_overlapping_items_block_submit() {
    let mut state = create_batch(
        phase_model(),
        vec![window("a", at(1, 9), at(4, 9)), window("b", at(3, 9), at(7, 9))],
        3,
        0,
    );
    assert_eq!(state.begin_submit(), None);
    assert!(state.error(1, START_DATE).is_some());
}

#[test]
fn test_non_batch_passthrough() {
    let model = FormModel::new(
        "criterion",
        vec![
            FieldDescriptor::input("name", "Name").required(),
            FieldDescriptor::input("weight", "Weight").required(),
        ],
    )
    .unwrap();
    let mut initial = FormValues::new();
    initial.insert("name".into(), FieldValue::text("Creativity"));
    initial.insert("weight".into(), FieldValue::text("0.5"));

    let mut state = FormState::new(model, FormMode::Edit, initial.clone().into(), None);
    let payload = state.begin_submit();
    assert_eq!(payload, Some(SubmissionPayload::Single(initial)));
    assert_eq!(
        payload.unwrap().to_json().unwrap(),
        serde_json::json!({"name": "Creativity", "weight": "0.5"})
    );
    // A second press while the first is in flight submits nothing.
    assert_eq!(state.begin_submit(), None);
}

#[test]
fn test_batch_payload_shape() {
    let (d1, d2, d3, d4) = (at(1, 9), at(2, 9), at(2, 9), at(5, 18));
    let mut state = create_batch(dates_model(), vec![], 4, 0);
    assert!(state.add_item());
    assert!(state.set_value(0, START_DATE, d1.into()));
    assert!(state.set_value(0, END_DATE, d2.into()));
    assert!(state.set_value(1, START_DATE, d3.into()));
    assert!(state.set_value(1, END_DATE, d4.into()));

    let expected = vec![
        [(START_DATE, d1), (END_DATE, d2)],
        [(START_DATE, d3), (END_DATE, d4)],
    ]
    .into_iter()
    .map(|pair| {
        pair.into_iter()
            .map(|(k, v)| (k.to_string(), FieldValue::DateTime(v)))
            .collect::<FormValues>()
    })
    .collect::<Vec<_>>();

    let payload = state.begin_submit().unwrap();
    assert_eq!(payload, SubmissionPayload::Batch(expected));

    let phases = serde_json::from_value::<Vec<serde_json::Value>>(payload.to_json().unwrap()).unwrap();
    assert_eq!(phases[1]["startDate"], "2025-02-02T09:00:00");
}

#[test]
fn test_identical_initial_values_give_identical_state() {
    let items = vec![window("a", at(1, 9), at(2, 9)), window("b", at(3, 9), at(4, 9))];
    let first = create_batch(phase_model(), items.clone(), 4, 1);
    let second = create_batch(phase_model(), items, 4, 1);
    assert_eq!(first, second);
    assert_eq!(first.flat_values(), second.flat_values());
}

#[test]
fn test_payload_feeds_phase_dtos() {
    let mut state = create_batch(
        phase_model(),
        vec![window("Ideation", at(1, 9), at(3, 18)), window("Build", at(3, 18), at(9, 18))],
        4,
        0,
    );
    let phases: Vec<PhaseDto> = state.begin_submit().unwrap().into_dtos().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[1].name, "Build");
    assert_eq!(phases[1].start_date, phases[0].end_date);
}

proptest! {
    #[test]
    fn prop_remove_never_loses_or_duplicates(count in 2usize..6, pick in 0usize..6) {
        let index = pick % count;
        let items: Vec<FormValues> = (0..count).map(|i| named(&format!("v{}", i))).collect();
        let mut state = create_batch(phase_model(), items.clone(), 6, 0);

        prop_assert!(state.remove_item(index));
        let mut expected = items;
        expected.remove(index);
        let actual: Vec<FormValues> = (0..state.batch_count())
            .map(|i| state.values(i).cloned().unwrap_or_default())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_skip_prefix_never_submitted(count in 2usize..6, skip in 1usize..5) {
        let skip = skip.min(count - 1);
        let items: Vec<FormValues> = (0..count)
            .map(|i| window(&format!("v{}", i), at(1 + 2 * i as u32, 9), at(2 + 2 * i as u32, 9)))
            .collect();
        let mut state = create_batch(phase_model(), items.clone(), 6, skip);

        let payload = state.begin_submit();
        prop_assert_eq!(payload, Some(SubmissionPayload::Batch(items[skip..].to_vec())));
    }
}
