use crate::api::api_url;
use crate::api::utils::{authenticated_get, authenticated_put, parse_response};
use log::debug;
use shared::CriterionDto;

fn criterion_url(id: &str) -> String {
    let id = id.strip_prefix("criteria/").unwrap_or(id);
    api_url(&format!("/api/criteria/{}", urlencoding::encode(id)))
}

pub async fn get_criterion(id: &str) -> Result<CriterionDto, String> {
    debug!("Fetching criterion {}", id);

    let response = authenticated_get(&criterion_url(id))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch criterion: {}", e))?;

    parse_response(response, "criterion").await
}

pub async fn update_criterion(id: &str, criterion: CriterionDto) -> Result<CriterionDto, String> {
    debug!("Updating criterion {}", id);

    let response = authenticated_put(&criterion_url(id))
        .json(&criterion)
        .map_err(|e| format!("Failed to serialize criterion: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to update criterion: {}", e))?;

    let updated: CriterionDto = parse_response(response, "updated criterion").await?;
    debug!("Criterion {} saved", updated.name);
    Ok(updated)
}
