use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

const GATEWAY_BASE: &str = "https://gateway.thegraph.com/api";

/// Transport seam over the subgraph, stubbed in service tests.
///
/// `query` returns the `data` payload of a successful response. Both HTTP and
/// GraphQL-level failures are normalized into [`ApiError::Transport`], logged
/// once with the offending document and variables, and propagated. No retry
/// happens at this layer.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    async fn query(&self, document: &str, variables: Value) -> Result<Value, ApiError>;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// POSTs GraphQL documents to one fixed gateway endpoint.
///
/// The endpoint is templated with the API key, whose absence is a
/// configuration error raised on first use rather than at startup.
pub struct SubgraphClient {
    api_key: Option<String>,
    subgraph_id: String,
    http: Client,
}

impl SubgraphClient {
    pub fn new(api_key: Option<String>, subgraph_id: String) -> Self {
        Self {
            api_key,
            subgraph_id,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> Result<String, ApiError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            ApiError::Configuration(
                "GRAPH_API_KEY is required in environment variables".to_string(),
            )
        })?;

        Ok(format!(
            "{GATEWAY_BASE}/{key}/subgraphs/id/{}",
            self.subgraph_id
        ))
    }
}

#[async_trait]
impl GraphTransport for SubgraphClient {
    async fn query(&self, document: &str, variables: Value) -> Result<Value, ApiError> {
        let endpoint = self.endpoint()?;
        let body = serde_json::json!({ "query": document, "variables": variables });

        let response = self.http.post(&endpoint).json(&body).send().await.map_err(|e| {
            error!("subgraph request failed: {e}; query: {document}; variables: {variables}");
            ApiError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("subgraph returned {status}: {text}; query: {document}; variables: {variables}");
            return Err(ApiError::Transport {
                status: Some(status.as_u16()),
                message: format!("{} {}", status.as_u16(), text),
            });
        }

        let parsed: GraphQlResponse = response.json().await.map_err(|e| {
            error!("malformed subgraph response: {e}; query: {document}; variables: {variables}");
            ApiError::Transport {
                status: None,
                message: format!("malformed subgraph response: {e}"),
            }
        })?;

        if let Some(first) = parsed.errors.as_ref().and_then(|errors| errors.first()) {
            error!(
                "subgraph query rejected: {}; query: {document}; variables: {variables}",
                first.message
            );
            return Err(ApiError::Transport {
                status: None,
                message: first.message.clone(),
            });
        }

        Ok(parsed.data.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_api_key_is_a_configuration_error() {
        let client = SubgraphClient::new(None, "subgraph-id".to_string());

        let result = client
            .query(crate::subgraph::queries::TOP_POOLS, json!({ "startTime": 0 }))
            .await;

        match result {
            Err(ApiError::Configuration(message)) => assert!(message.contains("GRAPH_API_KEY")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_is_templated_with_key_and_subgraph_id() {
        let client = SubgraphClient::new(Some("test-key".to_string()), "sub-id".to_string());

        assert_eq!(
            client.endpoint().unwrap(),
            "https://gateway.thegraph.com/api/test-key/subgraphs/id/sub-id"
        );
    }

    #[test]
    fn graphql_errors_deserialize_with_first_message() {
        let parsed: GraphQlResponse = serde_json::from_value(json!({
            "errors": [
                { "message": "pool not found" },
                { "message": "secondary" }
            ]
        }))
        .unwrap();

        let errors = parsed.errors.unwrap();
        assert_eq!(errors[0].message, "pool not found");
        assert!(parsed.data.is_none());
    }
}
