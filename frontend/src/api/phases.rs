use crate::api::api_url;
use crate::api::utils::{authenticated_get, authenticated_post, parse_response};
use log::debug;
use shared::{CreatePhasesRequest, PhaseDto};

fn phases_url(hackathon_id: &str) -> String {
    let id = hackathon_id.strip_prefix("hackathon/").unwrap_or(hackathon_id);
    api_url(&format!("/api/hackathons/{}/phases", urlencoding::encode(id)))
}

pub async fn list_phases(hackathon_id: &str) -> Result<Vec<PhaseDto>, String> {
    debug!("Fetching phases for hackathon {}", hackathon_id);

    let response = authenticated_get(&phases_url(hackathon_id))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch phases: {}", e))?;

    let phases: Vec<PhaseDto> = parse_response(response, "phases").await?;
    debug!("Found {} existing phases", phases.len());
    Ok(phases)
}

/// Creates several phases in one request, in schedule order.
pub async fn create_phases(hackathon_id: &str, phases: Vec<PhaseDto>) -> Result<Vec<PhaseDto>, String> {
    debug!("Creating {} phases for hackathon {}", phases.len(), hackathon_id);

    let request = CreatePhasesRequest { phases };
    let response = authenticated_post(&phases_url(hackathon_id))
        .json(&request)
        .map_err(|e| format!("Failed to serialize phases: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to create phases: {}", e))?;

    parse_response(response, "created phases").await
}
