use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A scheduled phase of a hackathon (ideation, build, judging, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_phase_window"))]
pub struct PhaseDto {
    /// Backend document ID, absent until the phase is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Name is required and must be at most 200 characters"
    ))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4000, message = "Description must be at most 4000 characters"))]
    pub description: Option<String>,

    pub start_date: NaiveDateTime,

    pub end_date: NaiveDateTime,
}

fn validate_phase_window(phase: &PhaseDto) -> Result<(), ValidationError> {
    if phase.end_date < phase.start_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("End date must not be before the start date".into());
        return Err(err);
    }
    Ok(())
}

/// Several phases created in one request, in schedule order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_phase_sequence"))]
pub struct CreatePhasesRequest {
    #[validate]
    pub phases: Vec<PhaseDto>,
}

fn validate_phase_sequence(request: &CreatePhasesRequest) -> Result<(), ValidationError> {
    if request.phases.is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("At least one phase is required".into());
        return Err(err);
    }
    let overlapping = request
        .phases
        .windows(2)
        .any(|pair| pair[1].start_date < pair[0].end_date);
    if overlapping {
        let mut err = ValidationError::new("overlap");
        err.message = Some("Each phase must start after the previous one ends".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn phase(name: &str, start: u32, end: u32) -> PhaseDto {
        PhaseDto {
            id: None,
            name: name.to_string(),
            description: None,
            start_date: at(start),
            end_date: at(end),
        }
    }

    #[test]
    fn test_phase_validation() {
        assert!(phase("Build", 1, 3).validate().is_ok());
        assert!(phase("", 1, 3).validate().is_err());
        assert!(phase("Build", 3, 1).validate().is_err());
    }

    #[test]
    fn test_phase_sequence_rejects_overlap() {
        let ok = CreatePhasesRequest {
            phases: vec![phase("Ideation", 1, 3), phase("Build", 3, 9)],
        };
        assert!(ok.validate().is_ok());

        let overlapping = CreatePhasesRequest {
            phases: vec![phase("Ideation", 1, 4), phase("Build", 3, 9)],
        };
        assert!(overlapping.validate().is_err());

        let empty = CreatePhasesRequest { phases: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_phase_json_uses_camel_case() {
        let json = serde_json::to_value(phase("Build", 1, 3)).unwrap();
        assert_eq!(json["startDate"], "2024-11-01T09:00:00");
        assert!(json.get("id").is_none());
    }
}
