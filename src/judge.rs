//! LLM-as-Judge for comparing the two answer paths.
//!
//! One call per question: the judge takes the RAG answer and the Knowledge
//! Graph answer, asks the judging model for a structured comparison, and
//! parses a [`Verdict`] out of it. The judge never fails: provider
//! failures, model errors, and unparsable responses all come back as
//! degraded verdicts so a batch always completes.

use crate::error::Result;
use crate::llm::{LlmClient, Prompts};
use crate::provider::{GraphAnswer, RagAnswer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed reasoning used when the structured query path failed outright.
pub const QUERY_FAILED_REASON: &str = "Knowledge Graph query failed";

/// Failure marker for a judge response that was not valid JSON.
pub const PARSE_FAILURE_MARKER: &str = "judge response was not valid JSON";

/// Which system won a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// System A: retrieval-augmented generation.
    Rag,
    /// System B: knowledge graph with text-to-Cypher.
    Graph,
    Tie,
    /// The judge did not produce a usable decision.
    Unknown,
}

/// The judge's confidence in its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
    Unspecified,
}

/// A pair of per-system scores for one criterion, each in [1, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub rag: Option<u8>,
    pub graph: Option<u8>,
}

/// Scores for the three numerically rated criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub accuracy: ScorePair,
    pub completeness: ScorePair,
    pub precision: ScorePair,
}

/// The structured comparison output for one question.
///
/// Immutable once produced. A verdict with `failure` set is degraded but
/// still a complete, reportable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub question: String,
    pub winner: Winner,
    pub confidence: Confidence,
    pub scores: Scores,
    pub reasoning: String,
    pub strengths_rag: Vec<String>,
    pub strengths_graph: Vec<String>,
    pub weaknesses_rag: Vec<String>,
    pub weaknesses_graph: Vec<String>,
    pub recommendation: String,
    /// Set when the judging model failed or its response could not be
    /// parsed. `None` for clean verdicts, including the fast path.
    pub failure: Option<String>,
}

impl Verdict {
    fn degraded(question: &str, reasoning: String, failure: String) -> Self {
        Self {
            question: question.to_string(),
            winner: Winner::Unknown,
            confidence: Confidence::Unspecified,
            scores: Scores::default(),
            reasoning,
            strengths_rag: Vec::new(),
            strengths_graph: Vec::new(),
            weaknesses_rag: Vec::new(),
            weaknesses_graph: Vec::new(),
            recommendation: String::new(),
            failure: Some(failure),
        }
    }

    /// Fixed verdict for a failed structured query: the free-text answer
    /// wins by default and the judging model is never consulted.
    fn query_failed(question: &str) -> Self {
        Self {
            question: question.to_string(),
            winner: Winner::Rag,
            confidence: Confidence::Unspecified,
            scores: Scores::default(),
            reasoning: QUERY_FAILED_REASON.to_string(),
            strengths_rag: Vec::new(),
            strengths_graph: Vec::new(),
            weaknesses_rag: Vec::new(),
            weaknesses_graph: Vec::new(),
            recommendation: String::new(),
            failure: None,
        }
    }
}

/// Backend capable of answering a judgment prompt.
///
/// Abstracted so tests can stub the judging model and count invocations.
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String>;
}

#[async_trait]
impl JudgeBackend for LlmClient {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        LlmClient::complete(self, system, user).await
    }
}

/// Comparative judge over the two answer paths.
pub struct Judge<B: JudgeBackend> {
    backend: B,
}

impl<B: JudgeBackend> Judge<B> {
    /// Create a new judge with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Judge one question given both providers' answers.
    ///
    /// Always returns a verdict. If the structured query failed, the fixed
    /// fast-path verdict is returned without contacting the judging model.
    pub async fn judge(&self, question: &str, rag: &RagAnswer, graph: &GraphAnswer) -> Verdict {
        if !graph.success {
            debug!(question, "structured query failed, skipping judgment call");
            return Verdict::query_failed(question);
        }

        let prompt = build_prompt(question, rag, graph);

        let response = match self
            .backend
            .complete(Some(Prompts::system_judge()), &prompt)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(question, error = %e, "judge invocation failed");
                return Verdict::degraded(
                    question,
                    String::new(),
                    format!("judge invocation failed: {}", e),
                );
            }
        };

        match parse_judgment(question, &response) {
            Some(verdict) => verdict,
            None => {
                warn!(question, "judge response was not parsable");
                Verdict::degraded(question, response, PARSE_FAILURE_MARKER.to_string())
            }
        }
    }
}

fn build_prompt(question: &str, rag: &RagAnswer, graph: &GraphAnswer) -> String {
    Prompts::judgment()
        .replace("{question}", question)
        .replace("{rag_answer}", &rag.answer)
        .replace("{rag_source_count}", &rag.sources.len().to_string())
        .replace("{rag_time}", &format!("{:.2}", rag.elapsed_secs))
        .replace("{kg_query}", &graph.generated_query)
        .replace("{kg_answer}", &graph.answer)
        .replace("{kg_result_count}", &graph.result_count.to_string())
        .replace("{kg_time}", &format!("{:.2}", graph.elapsed_secs))
}

/// Wire schema the judging model is asked to produce. Every field is
/// optional: a missing field leaves the verdict field unset rather than
/// failing the whole parse. Unknown fields are ignored.
#[derive(Deserialize)]
struct RawJudgment {
    winner: Option<String>,
    confidence: Option<String>,
    accuracy_score_a: Option<i64>,
    accuracy_score_b: Option<i64>,
    completeness_score_a: Option<i64>,
    completeness_score_b: Option<i64>,
    precision_score_a: Option<i64>,
    precision_score_b: Option<i64>,
    reasoning: Option<String>,
    #[serde(default)]
    strengths_a: Vec<String>,
    #[serde(default)]
    strengths_b: Vec<String>,
    #[serde(default)]
    weaknesses_a: Vec<String>,
    #[serde(default)]
    weaknesses_b: Vec<String>,
    recommendation: Option<String>,
}

fn parse_judgment(question: &str, response: &str) -> Option<Verdict> {
    let json_str = extract_json(response);
    let raw: RawJudgment = serde_json::from_str(&json_str).ok()?;

    let winner = match raw.winner.as_deref().map(str::to_uppercase).as_deref() {
        Some("A") | Some("RAG") => Winner::Rag,
        Some("B") | Some("KG") | Some("GRAPH") => Winner::Graph,
        Some("TIE") => Winner::Tie,
        _ => Winner::Unknown,
    };

    let confidence = match raw.confidence.as_deref().map(str::to_lowercase).as_deref() {
        Some("high") => Confidence::High,
        Some("medium") => Confidence::Medium,
        Some("low") => Confidence::Low,
        _ => Confidence::Unspecified,
    };

    let clamp = |score: Option<i64>| score.map(|s| s.clamp(1, 10) as u8);

    Some(Verdict {
        question: question.to_string(),
        winner,
        confidence,
        scores: Scores {
            accuracy: ScorePair {
                rag: clamp(raw.accuracy_score_a),
                graph: clamp(raw.accuracy_score_b),
            },
            completeness: ScorePair {
                rag: clamp(raw.completeness_score_a),
                graph: clamp(raw.completeness_score_b),
            },
            precision: ScorePair {
                rag: clamp(raw.precision_score_a),
                graph: clamp(raw.precision_score_b),
            },
        },
        reasoning: raw.reasoning.unwrap_or_default(),
        strengths_rag: raw.strengths_a,
        strengths_graph: raw.strengths_b,
        weaknesses_rag: raw.weaknesses_a,
        weaknesses_graph: raw.weaknesses_b,
        recommendation: raw.recommendation.unwrap_or_default(),
        failure: None,
    })
}

/// Strip incidental markdown fences around the judgment JSON.
fn extract_json(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```json") {
        if let Some(end) = response.rfind("```") {
            let start = "```json".len();
            if end > start {
                return response[start..end].trim().to_string();
            }
        }
    }

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map(|n| n + 1).unwrap_or(3);
            if end > start {
                return response[start..end].trim().to_string();
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}
