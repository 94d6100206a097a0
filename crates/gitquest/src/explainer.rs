//! AI explainer boundary.
//!
//! The engine only depends on the request/response contract: a query
//! plus an optional context hint (typically the current step title) in,
//! an explanation out. Prompting and model selection live entirely
//! behind the [`Explainer`] implementation. Failures are folded into a
//! success/failure outcome and never crash or block the reducer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A request for an explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRequest {
    /// The concept, command, or troubleshooting question to explain.
    pub query: String,
    /// Optional context hint, e.g. the current tutorial step title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ExplainRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A successful explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub explanation: String,
}

/// An explanation backend.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, request: ExplainRequest) -> Result<Explanation>;
}

/// Outcome of an explanation request as shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainOutcome {
    pub success: bool,
    pub message: String,
}

/// Ask `explainer` for an explanation, folding any failure into an
/// unsuccessful outcome with a displayable message.
pub async fn get_explanation(explainer: &dyn Explainer, request: ExplainRequest) -> ExplainOutcome {
    match explainer.explain(request).await {
        Ok(explanation) => ExplainOutcome {
            success: true,
            message: explanation.explanation,
        },
        Err(err) => {
            tracing::warn!(error = %err, "explanation request failed");
            ExplainOutcome {
                success: false,
                message: "Failed to get explanation from AI.".to_string(),
            }
        }
    }
}

/// HTTP explainer client: posts the request as JSON to a configured
/// endpoint and expects an [`Explanation`] back.
#[cfg(feature = "http_client")]
pub struct HttpExplainer {
    endpoint: String,
    client: reqwest::Client,
}

#[cfg(feature = "http_client")]
impl HttpExplainer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http_client")]
#[async_trait]
impl Explainer for HttpExplainer {
    async fn explain(&self, request: ExplainRequest) -> Result<Explanation> {
        use crate::error::Error;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Explainer(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Explainer(e.to_string()))?;
        response
            .json::<Explanation>()
            .await
            .map_err(|e| Error::Explainer(e.to_string()))
    }
}
