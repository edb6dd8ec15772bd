//! Proposal-allocations client.
//!
//! Experiment (RB) numbers come from the allocations GraphQL endpoint.
//! Reference numbers arrive as strings in the proposal records, so the
//! parser accepts both string and numeric forms.

use std::time::Duration;

use async_trait::async_trait;
use facility_auth_access::{AllocationsError, AllocationsService};
use facility_auth_tokens::UserNumber;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AllocationsConfig;

const ALLOCATIONS_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the proposal-allocations GraphQL endpoint.
#[derive(Clone)]
pub struct AllocationsClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl AllocationsClient {
    /// Creates a client over a shared HTTP connection pool.
    #[must_use]
    pub fn new(http: reqwest::Client, config: AllocationsConfig) -> Self {
        Self {
            http,
            url: config.url,
            api_key: config.api_key,
        }
    }
}

fn proposals_query(user_number: UserNumber) -> String {
    format!(
        r#"{{
  proposals(
    filter: {{un: "{user_number}", facilities: ["ISIS"], includeWithdrawn: false}}
  ) {{
    referenceNumber
  }}
}}"#
    )
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ProposalsData>,
}

#[derive(Debug, Deserialize)]
struct ProposalsData {
    proposals: Vec<Proposal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Proposal {
    reference_number: Value,
}

fn parse_reference(value: &Value) -> Result<i64, AllocationsError> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| {
            AllocationsError::MalformedResponse {
                reason: format!("reference number {number} is not an integer"),
            }
        }),
        Value::String(text) => {
            text.parse()
                .map_err(|_| AllocationsError::MalformedResponse {
                    reason: format!("reference number '{text}' is not an integer"),
                })
        }
        other => Err(AllocationsError::MalformedResponse {
            reason: format!("unexpected reference number value: {other}"),
        }),
    }
}

#[async_trait]
impl AllocationsService for AllocationsClient {
    async fn experiments_for(&self, user_number: UserNumber) -> Result<Vec<i64>, AllocationsError> {
        tracing::info!(user_number = %user_number, "fetching experiments for user number");

        let response = self
            .http
            .post(&self.url)
            // The upstream expects this spelling.
            .header("Authorisation", format!("token {}", self.api_key))
            .timeout(ALLOCATIONS_TIMEOUT)
            .json(&serde_json::json!({"query": proposals_query(user_number)}))
            .send()
            .await
            .map_err(|err| AllocationsError::Transport {
                reason: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AllocationsError::Transport {
                reason: format!("unexpected status {}", response.status()),
            });
        }

        let body: GraphqlResponse =
            response
                .json()
                .await
                .map_err(|err| AllocationsError::MalformedResponse {
                    reason: err.to_string(),
                })?;

        let data = body.data.ok_or_else(|| AllocationsError::MalformedResponse {
            reason: "response carried no data".to_string(),
        })?;

        data.proposals
            .iter()
            .map(|proposal| parse_reference(&proposal.reference_number))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(url: String) -> AllocationsClient {
        AllocationsClient::new(
            reqwest::Client::new(),
            AllocationsConfig {
                url,
                api_key: "allocations-key".to_string(),
            },
        )
    }

    #[test]
    fn parse_reference_accepts_strings_and_numbers() {
        assert_eq!(parse_reference(&Value::String("1818".to_string())).unwrap(), 1818);
        assert_eq!(parse_reference(&serde_json::json!(1919)).unwrap(), 1919);
    }

    #[test]
    fn parse_reference_rejects_non_numeric_values() {
        assert!(parse_reference(&Value::String("RB-1818".to_string())).is_err());
        assert!(parse_reference(&serde_json::json!(null)).is_err());
    }

    #[test]
    fn proposals_query_embeds_the_user_number() {
        let query = proposals_query(UserNumber::new(1234));
        assert!(query.contains(r#"un: "1234""#));
        assert!(query.contains("referenceNumber"));
    }

    #[tokio::test]
    async fn experiments_parses_reference_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header_matcher("Authorisation", "token allocations-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "proposals": [
                        {"referenceNumber": "1818"},
                        {"referenceNumber": "1919"},
                    ]
                }
            })))
            .mount(&server)
            .await;

        let experiments = client(format!("{}/graphql", server.uri()))
            .experiments_for(UserNumber::new(1234))
            .await
            .expect("experiments");

        assert_eq!(experiments, vec![1818, 1919]);
    }

    #[tokio::test]
    async fn experiments_rejects_a_response_without_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"errors": [{"message": "boom"}]})),
            )
            .mount(&server)
            .await;

        let result = client(format!("{}/graphql", server.uri()))
            .experiments_for(UserNumber::new(1234))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AllocationsError::MalformedResponse { .. }
        ));
    }

    #[tokio::test]
    async fn experiments_reports_non_success_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let result = client(format!("{}/graphql", server.uri()))
            .experiments_for(UserNumber::new(1234))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AllocationsError::Transport { .. }
        ));
    }
}
