//! Request builder and response parser for the `/client` resource.
//!
//! Update and delete succeed with 204 and no body, so their parse methods
//! return `()`. Callers that need the updated record issue a follow-up get.

use serde::de::DeserializeOwned;

use crate::error::{error_message, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Client, ClientPatch, NewClient};

#[derive(Debug, Clone)]
pub struct ClientApi {
    base_url: String,
}

impl ClientApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/client", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/client/{id}", self.base_url)
    }

    fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: serde::Serialize>(
        method: HttpMethod,
        path: String,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_list_clients(&self) -> HttpRequest {
        Self::bodyless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_client(&self, id: i64) -> HttpRequest {
        Self::bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_client(&self, input: &NewClient) -> Result<HttpRequest, ApiError> {
        Self::with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_client(&self, id: i64, patch: &ClientPatch) -> Result<HttpRequest, ApiError> {
        Self::with_json(HttpMethod::Put, self.item_url(id), patch)
    }

    pub fn build_delete_client(&self, id: i64) -> HttpRequest {
        Self::bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_clients(&self, response: HttpResponse) -> Result<Vec<Client>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_client(&self, response: HttpResponse) -> Result<Client, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_client(&self, response: HttpResponse) -> Result<Client, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_client(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_delete_client(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound {
            message: error_message(&response.body),
        }),
        422 => Err(ApiError::Validation {
            message: error_message(&response.body),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ClientApi {
        ClientApi::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_clients_produces_correct_request() {
        let req = api().build_list_clients();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/client");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_client_uses_item_path() {
        let req = api().build_get_client(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/client/42");
    }

    #[test]
    fn build_create_client_omits_absent_fields() {
        let req = api().build_create_client(&NewClient::named("Maria")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Maria"}));
    }

    #[test]
    fn build_update_client_sends_only_set_fields() {
        let patch = ClientPatch {
            tax_id: Some("123".to_string()),
            ..ClientPatch::default()
        };
        let req = api().build_update_client(1, &patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/client/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"taxId": "123"}));
    }

    #[test]
    fn build_delete_client_has_no_body() {
        let req = api().build_delete_client(7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_client_reads_camel_case() {
        let client = api()
            .parse_get_client(response(
                200,
                r#"{"id":1,"name":"Maria","email":null,"taxId":"123"}"#,
            ))
            .unwrap();
        assert_eq!(client.id, 1);
        assert_eq!(client.tax_id.as_deref(), Some("123"));
        assert!(client.email.is_none());
    }

    #[test]
    fn parse_get_client_not_found_carries_server_message() {
        let err = api()
            .parse_get_client(response(
                404,
                r#"{"error":{"code":"NOT_FOUND","message":"client 9 not found"}}"#,
            ))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "client 9 not found"));
    }

    #[test]
    fn parse_create_client_validation_failure() {
        let err = api()
            .parse_create_client(response(
                422,
                r#"{"error":{"code":"VALIDATION_FAILED","message":"name is required and must not be blank"}}"#,
            ))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn parse_create_client_wrong_status() {
        let err = api()
            .parse_create_client(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_client_expects_no_content() {
        assert!(api().parse_update_client(response(204, "")).is_ok());
        let err = api().parse_update_client(response(200, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 200, .. }));
    }

    #[test]
    fn parse_delete_client_not_found_with_plain_body() {
        let err = api().parse_delete_client(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message.is_empty()));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = ClientApi::new("http://localhost:3000/").build_list_clients();
        assert_eq!(req.path, "http://localhost:3000/client");
    }

    #[test]
    fn parse_list_clients_bad_json() {
        let err = api().parse_list_clients(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
