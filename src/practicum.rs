/// Client for the homework-review API.
///
/// One GET per poll: `Authorization: OAuth <token>` header, `from_date`
/// query parameter as a lower bound on the update time.
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::message::Homework;

pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.settings.endpoint.clone(),
            token: config.practicum_token.clone(),
        }
    }

    /// Fetches the raw status listing for homeworks updated since
    /// `from_date`; the current time is used when no timestamp is given.
    ///
    /// Returns the decoded body on HTTP 200. A failed request maps to
    /// `Transport`; any other status maps to `UnexpectedStatus` carrying the
    /// status, body and headers.
    pub async fn get_homeworks(&self, from_date: Option<i64>) -> Result<Value> {
        let from_date = from_date.unwrap_or_else(|| Utc::now().timestamp());
        tracing::info!("requesting homework statuses since {}", from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                status,
                body,
                headers,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Validates the response shape and extracts the typed homework list.
pub fn check_response(response: &Value) -> Result<Vec<Homework>> {
    let object = response.as_object().ok_or(Error::NotAnObject)?;
    let homeworks = object.get("homeworks").ok_or(Error::MissingHomeworks)?;
    let entries = homeworks.as_array().ok_or(Error::HomeworksNotAList)?;

    entries
        .iter()
        .map(|entry| serde_json::from_value(entry.clone()).map_err(Error::BadHomework))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn test_config(endpoint: String) -> Config {
        Config {
            practicum_token: "token123".to_string(),
            telegram_token: "telegram".to_string(),
            telegram_chat_id: "42".to_string(),
            settings: Settings {
                endpoint,
                ..Settings::default()
            },
        }
    }

    #[tokio::test]
    async fn get_homeworks_sends_auth_and_from_date() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/statuses"),
                request::headers(contains(("authorization", "OAuth token123"))),
                request::query(url_decoded(contains(("from_date", "0")))),
            ])
            .respond_with(json_encoded(json!({
                "homeworks": [{"homework_name": "hw1", "status": "approved"}],
                "current_date": 1,
            }))),
        );

        let config = test_config(server.url("/statuses").to_string());
        let client = PracticumClient::new(&config);

        let body = client.get_homeworks(Some(0)).await.unwrap();
        assert_eq!(body["homeworks"][0]["homework_name"], "hw1");
    }

    #[tokio::test]
    async fn get_homeworks_non_200_is_a_protocol_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/statuses"))
                .respond_with(status_code(500).body("maintenance")),
        );

        let config = test_config(server.url("/statuses").to_string());
        let client = PracticumClient::new(&config);

        match client.get_homeworks(Some(0)).await {
            Err(Error::UnexpectedStatus { status, body, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_homeworks_connection_failure_is_a_transport_error() {
        // Nothing listens on port 1.
        let config = test_config("http://127.0.0.1:1/statuses".to_string());
        let client = PracticumClient::new(&config);

        assert!(matches!(
            client.get_homeworks(Some(0)).await,
            Err(Error::Transport(_))
        ));
    }

    #[test]
    fn check_response_rejects_non_object() {
        assert!(matches!(
            check_response(&json!(["not", "an", "object"])),
            Err(Error::NotAnObject)
        ));
    }

    #[test]
    fn check_response_rejects_missing_key() {
        assert!(matches!(
            check_response(&json!({"current_date": 1})),
            Err(Error::MissingHomeworks)
        ));
    }

    #[test]
    fn check_response_rejects_non_list() {
        assert!(matches!(
            check_response(&json!({"homeworks": "not-a-list"})),
            Err(Error::HomeworksNotAList)
        ));
    }

    #[test]
    fn check_response_rejects_malformed_entry() {
        let response = json!({"homeworks": [{"homework_name": "hw1"}]});
        assert!(matches!(
            check_response(&response),
            Err(Error::BadHomework(_))
        ));
    }

    #[test]
    fn check_response_returns_entries() {
        let response = json!({
            "homeworks": [
                {"homework_name": "hw1", "status": "approved", "data": {"grade": 5}},
                {"homework_name": "hw2", "status": "reviewing"},
            ],
            "current_date": 1,
        });

        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0].homework_name, "hw1");
        assert_eq!(homeworks[0].status, "approved");
        assert_eq!(homeworks[0].data, Some(json!({"grade": 5})));
        assert_eq!(homeworks[1].homework_name, "hw2");
        assert_eq!(homeworks[1].data, None);
    }
}
