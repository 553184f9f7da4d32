//! Blocking HTTP client for the ticklist server API.
//!
//! Errors carry the server-reported message from the `{"error": ...}`
//! body shape whenever one is available.

use serde_json::{json, Value};
use ticklist_core::{Task, TaskId};

/// Thin wrapper over `reqwest::blocking` bound to a server base URL.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn list(&self) -> Result<Vec<Task>, String> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .send()
            .map_err(|err| err.to_string())?;
        decode(response)
    }

    pub fn create(&self, title: &str) -> Result<Task, String> {
        let response = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(&json!({ "title": title }))
            .send()
            .map_err(|err| err.to_string())?;
        decode(response)
    }

    pub fn rename(&self, id: &TaskId, title: &str) -> Result<Task, String> {
        let response = self
            .client
            .patch(format!("{}/todos/{id}", self.base_url))
            .json(&json!({ "title": title }))
            .send()
            .map_err(|err| err.to_string())?;
        decode(response)
    }

    pub fn toggle(&self, id: &TaskId) -> Result<Task, String> {
        let response = self
            .client
            .post(format!("{}/todos/{id}/toggle", self.base_url))
            .send()
            .map_err(|err| err.to_string())?;
        decode(response)
    }

    pub fn delete(&self, id: &TaskId) -> Result<(), String> {
        let response = self
            .client
            .delete(format!("{}/todos/{id}", self.base_url))
            .send()
            .map_err(|err| err.to_string())?;
        decode::<Value>(response).map(|_| ())
    }

    pub fn health(&self) -> Result<String, String> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .map_err(|err| err.to_string())?;
        let body: Value = decode(response)?;
        Ok(body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string())
    }
}

/// Decodes a success body, or surfaces the server-reported error
/// message for failure statuses.
fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, String> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().map_err(|err| err.to_string());
    }

    let message = response
        .json::<Value>()
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("server returned {status}"));
    Err(message)
}
