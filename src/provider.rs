//! Answer-provider contracts and HTTP-backed implementations.
//!
//! The judge only ever sees the two result types below; how an answer was
//! produced (vector store, graph database, fixture) is the provider's
//! business. The bundled implementations talk to HTTP services that front
//! the actual RAG pipeline and the Neo4j text-to-Cypher pipeline.

use crate::config::ProviderConfig;
use crate::error::{BenchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Marker answer used when the free-text provider produced nothing usable.
pub const NO_ANSWER_MARKER: &str = "No answer could be produced for this question.";

/// Result from the free-text (RAG) provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// The generated answer (may be a fallback string, never absent).
    pub answer: String,
    /// Identifiers of the retrieved documents, in retrieval order.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Wall time the provider spent answering.
    #[serde(default)]
    pub elapsed_secs: f64,
}

impl RagAnswer {
    /// Degraded answer used when the provider timed out or errored.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            answer: format!("{} ({})", NO_ANSWER_MARKER, reason),
            sources: Vec::new(),
            elapsed_secs: 0.0,
        }
    }
}

/// Result from the structured-query (Knowledge Graph) provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphAnswer {
    /// The answer assembled from query results.
    pub answer: String,
    /// The Cypher query the provider generated for the question.
    #[serde(default)]
    pub generated_query: String,
    /// Number of rows the query returned.
    #[serde(default)]
    pub result_count: u64,
    /// False when the question could not be translated into a query or the
    /// query failed to execute. An expected outcome, not a fault.
    pub success: bool,
    /// Wall time the provider spent answering.
    #[serde(default)]
    pub elapsed_secs: f64,
}

impl GraphAnswer {
    /// Degraded answer used when the provider timed out or errored.
    pub fn failed(reason: &str) -> Self {
        Self {
            answer: reason.to_string(),
            generated_query: String::new(),
            result_count: 0,
            success: false,
            elapsed_secs: 0.0,
        }
    }
}

/// A responder that answers via retrieval-plus-generation.
#[async_trait]
pub trait FreeTextProvider: Send + Sync {
    /// Answer a question. "No answer found" is reported through the marker
    /// answer text, never as an error.
    async fn answer(&self, question: &str) -> Result<RagAnswer>;
}

/// A responder that answers by translating the question into a database
/// query and executing it.
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Answer a question. Translation or execution failure is reported via
    /// `success = false`, never as an error.
    async fn answer(&self, question: &str) -> Result<GraphAnswer>;
}

#[derive(Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

/// HTTP-backed free-text provider.
#[derive(Clone)]
pub struct HttpRagProvider {
    client: Client,
    url: String,
}

impl HttpRagProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FreeTextProvider for HttpRagProvider {
    async fn answer(&self, question: &str) -> Result<RagAnswer> {
        post_question(&self.client, &self.url, "rag", question).await
    }
}

/// HTTP-backed structured-query provider.
#[derive(Clone)]
pub struct HttpGraphProvider {
    client: Client,
    url: String,
}

impl HttpGraphProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl StructuredProvider for HttpGraphProvider {
    async fn answer(&self, question: &str) -> Result<GraphAnswer> {
        post_question(&self.client, &self.url, "kg", question).await
    }
}

async fn post_question<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    provider: &'static str,
    question: &str,
) -> Result<T> {
    let response = client
        .post(url)
        .json(&QuestionRequest { question })
        .send()
        .await
        .map_err(|e| BenchError::provider(provider, e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BenchError::provider(provider, e.to_string()))?;

    if !status.is_success() {
        return Err(BenchError::provider(
            provider,
            format!("HTTP {}: {}", status, body),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| BenchError::provider(provider, format!("invalid response body: {}", e)))
}

/// Build both providers from configuration.
pub fn from_config(config: &ProviderConfig) -> (HttpRagProvider, HttpGraphProvider) {
    (
        HttpRagProvider::new(&config.rag_url),
        HttpGraphProvider::new(&config.kg_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_answer_wire_format() {
        let json = r#"{"answer": "Alice, Bob", "sources": ["doc1", "doc2"], "elapsed_secs": 1.2}"#;
        let answer: RagAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.answer, "Alice, Bob");
        assert_eq!(answer.sources, vec!["doc1", "doc2"]);
        assert!((answer.elapsed_secs - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rag_answer_optional_fields() {
        let json = r#"{"answer": "Nothing relevant found."}"#;
        let answer: RagAnswer = serde_json::from_str(json).unwrap();
        assert!(answer.sources.is_empty());
        assert_eq!(answer.elapsed_secs, 0.0);
    }

    #[test]
    fn test_graph_answer_wire_format() {
        let json = r#"{
            "answer": "Alice, Bob, Carol",
            "generated_query": "MATCH (e)-[:COAUTHOR]-(c) RETURN c",
            "result_count": 3,
            "success": true,
            "elapsed_secs": 0.4
        }"#;
        let answer: GraphAnswer = serde_json::from_str(json).unwrap();
        assert!(answer.success);
        assert_eq!(answer.result_count, 3);
        assert!(answer.generated_query.starts_with("MATCH"));
    }

    #[test]
    fn test_degraded_constructors() {
        let rag = RagAnswer::unavailable("timed out after 60s");
        assert!(rag.answer.starts_with(NO_ANSWER_MARKER));
        assert!(rag.sources.is_empty());

        let graph = GraphAnswer::failed("timed out after 60s");
        assert!(!graph.success);
        assert_eq!(graph.result_count, 0);
    }
}
