use crate::api::api_url;
use crate::api::utils::{authenticated_get, authenticated_post, parse_response};
use gloo_net::http::Request;
use log::debug;
use shared::{LoginRequest, LoginResponse, UserDto};

pub async fn login(email: &str, password: &str) -> Result<LoginResponse, String> {
    debug!("Attempting login for user: {}", email);

    let login_request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = Request::post(&api_url("/api/auth/login"))
        .json(&login_request)
        .map_err(|e| format!("Failed to serialize login request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send login request: {}", e))?;

    let login: LoginResponse = parse_response(response, "login").await?;
    debug!("Logged in as {} with roles {:?}", login.user.email, login.user.roles);
    Ok(login)
}

pub async fn logout() -> Result<(), String> {
    let response = authenticated_post(&api_url("/api/auth/logout"))
        .send()
        .await
        .map_err(|e| format!("Failed to send logout request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed with status {}", response.status()));
    }
    Ok(())
}

/// Loads the signed-in user and their roles.
pub async fn get_current_user() -> Result<UserDto, String> {
    let response = authenticated_get(&api_url("/api/auth/me"))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch current user: {}", e))?;

    parse_response(response, "current user").await
}
