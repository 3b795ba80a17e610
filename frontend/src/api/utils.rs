use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::Storage;
use serde::de::DeserializeOwned;
use shared::ErrorResponse;

pub const SESSION_KEY: &str = "session_id";

/// Creates a request with Authorization header from localStorage
pub fn authenticated_request(method: &str, url: &str) -> RequestBuilder {
    let mut req = match method.to_uppercase().as_str() {
        "GET" => Request::get(url),
        "POST" => Request::post(url),
        "PUT" => Request::put(url),
        "DELETE" => Request::delete(url),
        "PATCH" => Request::patch(url),
        _ => Request::get(url),
    };

    if let Ok(session_id) = gloo_storage::LocalStorage::get::<String>(SESSION_KEY) {
        req = req.header("Authorization", &format!("Bearer {}", session_id));
    }

    req
}

pub fn authenticated_get(url: &str) -> RequestBuilder {
    authenticated_request("GET", url)
}

pub fn authenticated_post(url: &str) -> RequestBuilder {
    authenticated_request("POST", url)
}

pub fn authenticated_put(url: &str) -> RequestBuilder {
    authenticated_request("PUT", url)
}

/// Turns a response into `T`, or into the backend's error message.
pub async fn parse_response<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|_| format!("Request for {} failed with status {}", what, status))?;
        return Err(error.error);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse {} response: {}", what, e))
}
