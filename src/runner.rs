//! Batch runner: drives a question set through both providers and the
//! judge, folding verdicts into a per-category report.
//!
//! Per-question failures become degraded verdicts counted as failures; the
//! batch always completes and covers every input question exactly once.

use crate::catalog::{Category, Question};
use crate::error::Result;
use crate::judge::{Judge, JudgeBackend, Verdict, Winner};
use crate::provider::{FreeTextProvider, GraphAnswer, RagAnswer, StructuredProvider};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Win/loss counts for one category (or the whole run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub questions: usize,
    pub rag_wins: usize,
    pub graph_wins: usize,
    pub ties: usize,
    pub failures: usize,
}

impl Tally {
    fn record(&mut self, verdict: &Verdict) {
        self.questions += 1;
        if verdict.failure.is_some() {
            self.failures += 1;
            return;
        }
        match verdict.winner {
            Winner::Rag => self.rag_wins += 1,
            Winner::Graph => self.graph_wins += 1,
            Winner::Tie => self.ties += 1,
            Winner::Unknown => self.failures += 1,
        }
    }
}

/// One judged question in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub category: Category,
    pub verdict: Verdict,
}

/// Aggregated results of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-category tallies, in category order.
    pub per_category: BTreeMap<Category, Tally>,
    /// Tally across all categories.
    pub overall: Tally,
    /// Every verdict produced, in completion order.
    pub entries: Vec<BatchEntry>,
    /// Total wall time for the batch (seconds).
    pub total_time_secs: f64,
}

impl BatchReport {
    /// Fold one verdict into the report. Folding is commutative: any order
    /// of the same verdicts yields identical tallies.
    pub fn fold(&mut self, category: Category, verdict: Verdict) {
        self.per_category.entry(category).or_default().record(&verdict);
        self.overall.record(&verdict);
        self.entries.push(BatchEntry { category, verdict });
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let pct = |n: usize| {
            if self.overall.questions > 0 {
                n as f64 / self.overall.questions as f64 * 100.0
            } else {
                0.0
            }
        };

        println!("\n========== RAG vs Knowledge Graph ==========");
        println!("Total questions: {}", self.overall.questions);
        println!("---------------------------------------------");
        println!(
            "RAG wins:   {:>3} ({:.1}%)",
            self.overall.rag_wins,
            pct(self.overall.rag_wins)
        );
        println!(
            "Graph wins: {:>3} ({:.1}%)",
            self.overall.graph_wins,
            pct(self.overall.graph_wins)
        );
        println!(
            "Ties:       {:>3} ({:.1}%)",
            self.overall.ties,
            pct(self.overall.ties)
        );
        println!(
            "Failures:   {:>3} ({:.1}%)",
            self.overall.failures,
            pct(self.overall.failures)
        );
        println!("---------------------------------------------");
        println!(
            "{:<28} {:>4} {:>4} {:>5} {:>4} {:>5}",
            "Category", "N", "RAG", "Graph", "Tie", "Fail"
        );
        for (category, tally) in &self.per_category {
            println!(
                "{:<28} {:>4} {:>4} {:>5} {:>4} {:>5}",
                category.label(),
                tally.questions,
                tally.rag_wins,
                tally.graph_wins,
                tally.ties,
                tally.failures
            );
        }
        println!("---------------------------------------------");
        println!("Total time: {:.1}s", self.total_time_secs);
        println!("=============================================\n");
    }

    /// Save the full report (tallies plus every verdict) as JSON.
    pub fn save_json(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| crate::error::BenchError::io(path, e))?;
        Ok(())
    }
}

/// Batch runner wiring the two providers to the judge.
pub struct BatchRunner<R, G, B>
where
    R: FreeTextProvider,
    G: StructuredProvider,
    B: JudgeBackend,
{
    rag: R,
    graph: G,
    judge: Judge<B>,
    timeout: Duration,
    verbose: bool,
}

impl<R, G, B> BatchRunner<R, G, B>
where
    R: FreeTextProvider,
    G: StructuredProvider,
    B: JudgeBackend,
{
    /// Create a runner with a per-provider-call time budget.
    pub fn new(rag: R, graph: G, judge: Judge<B>, timeout: Duration) -> Self {
        Self {
            rag,
            graph,
            judge,
            timeout,
            verbose: false,
        }
    }

    /// Enable per-question progress output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the batch. Every question yields exactly one report entry; the
    /// run never aborts on a degraded verdict.
    pub async fn run(&self, questions: &[Question]) -> BatchReport {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for (idx, question) in questions.iter().enumerate() {
            if self.verbose {
                println!(
                    "\n[{}/{}] {} ({})",
                    idx + 1,
                    questions.len(),
                    question.text,
                    question.category.label()
                );
            } else {
                print!(".");
                use std::io::Write;
                std::io::stdout().flush().ok();
            }

            let verdict = self.judge_question(question).await;

            if self.verbose {
                let winner = match verdict.winner {
                    Winner::Rag => "RAG",
                    Winner::Graph => "Knowledge Graph",
                    Winner::Tie => "Tie",
                    Winner::Unknown => "Unknown",
                };
                println!("  Winner: {}", winner);
                if let Some(failure) = &verdict.failure {
                    println!("  Degraded: {}", failure);
                }
            }

            report.fold(question.category, verdict);
        }

        if !self.verbose {
            println!(); // Newline after dots
        }

        report.total_time_secs = start.elapsed().as_secs_f64();
        report
    }

    /// Obtain both answers and judge a single question.
    pub async fn judge_question(&self, question: &Question) -> Verdict {
        let (rag, graph) = self.answers_for(&question.text).await;
        self.judge.judge(&question.text, &rag, &graph).await
    }

    /// Run both providers concurrently, each under the time budget.
    /// Failures and timeouts come back as degraded answers, never errors.
    pub async fn answers_for(&self, question: &str) -> (RagAnswer, GraphAnswer) {
        let secs = self.timeout.as_secs();

        let (rag_result, graph_result) = tokio::join!(
            tokio::time::timeout(self.timeout, self.rag.answer(question)),
            tokio::time::timeout(self.timeout, self.graph.answer(question)),
        );

        let rag = match rag_result {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(question, error = %e, "free-text provider failed");
                RagAnswer::unavailable(&format!("provider error: {}", e))
            }
            Err(_) => {
                let err = crate::error::BenchError::ProviderTimeout {
                    provider: "rag",
                    secs,
                };
                warn!(question, error = %err, "free-text provider timed out");
                RagAnswer::unavailable(&err.to_string())
            }
        };

        let graph = match graph_result {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(question, error = %e, "structured provider failed");
                GraphAnswer::failed(&format!("provider error: {}", e))
            }
            Err(_) => {
                let err = crate::error::BenchError::ProviderTimeout {
                    provider: "kg",
                    secs,
                };
                warn!(question, error = %err, "structured provider timed out");
                GraphAnswer::failed(&err.to_string())
            }
        };

        debug!(
            question,
            rag_elapsed = rag.elapsed_secs,
            graph_elapsed = graph.elapsed_secs,
            graph_success = graph.success,
            "both providers answered"
        );

        (rag, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::judge::{Confidence, Scores};
    use async_trait::async_trait;

    fn verdict_with(question: &str, winner: Winner, failure: Option<&str>) -> Verdict {
        Verdict {
            question: question.to_string(),
            winner,
            confidence: Confidence::Unspecified,
            scores: Scores::default(),
            reasoning: "test".to_string(),
            strengths_rag: Vec::new(),
            strengths_graph: Vec::new(),
            weaknesses_rag: Vec::new(),
            weaknesses_graph: Vec::new(),
            recommendation: String::new(),
            failure: failure.map(str::to_string),
        }
    }

    #[test]
    fn test_tally_counts_unknown_and_failures() {
        let mut tally = Tally::default();
        tally.record(&verdict_with("a", Winner::Rag, None));
        tally.record(&verdict_with("b", Winner::Graph, None));
        tally.record(&verdict_with("c", Winner::Tie, None));
        tally.record(&verdict_with("d", Winner::Unknown, None));
        tally.record(&verdict_with("e", Winner::Rag, Some("judge invocation failed: x")));

        assert_eq!(tally.questions, 5);
        assert_eq!(tally.rag_wins, 1);
        assert_eq!(tally.graph_wins, 1);
        assert_eq!(tally.ties, 1);
        assert_eq!(tally.failures, 2);
    }

    #[test]
    fn test_fold_is_commutative() {
        let verdicts = vec![
            (Category::Relationship, verdict_with("a", Winner::Graph, None)),
            (Category::Relationship, verdict_with("b", Winner::Rag, None)),
            (Category::Semantic, verdict_with("c", Winner::Rag, None)),
            (Category::Counting, verdict_with("d", Winner::Tie, None)),
            (Category::Counting, verdict_with("e", Winner::Unknown, None)),
        ];

        let mut forward = BatchReport::default();
        for (category, verdict) in verdicts.clone() {
            forward.fold(category, verdict);
        }

        let mut reversed = BatchReport::default();
        for (category, verdict) in verdicts.into_iter().rev() {
            reversed.fold(category, verdict);
        }

        assert_eq!(forward.per_category, reversed.per_category);
        assert_eq!(forward.overall, reversed.overall);
    }

    struct StubRag {
        fail: bool,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl FreeTextProvider for StubRag {
        async fn answer(&self, _question: &str) -> crate::error::Result<RagAnswer> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(BenchError::provider("rag", "connection refused"));
            }
            Ok(RagAnswer {
                answer: "Alice, Bob".to_string(),
                sources: vec!["doc1".to_string()],
                elapsed_secs: 0.1,
            })
        }
    }

    struct StubGraph {
        success: bool,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl StructuredProvider for StubGraph {
        async fn answer(&self, _question: &str) -> crate::error::Result<GraphAnswer> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(GraphAnswer {
                answer: "Alice, Bob, Carol".to_string(),
                generated_query: "MATCH (n) RETURN n".to_string(),
                result_count: 3,
                success: self.success,
                elapsed_secs: 0.05,
            })
        }
    }

    struct StubJudgeBackend {
        response: String,
    }

    #[async_trait]
    impl JudgeBackend for StubJudgeBackend {
        async fn complete(
            &self,
            _system: Option<&str>,
            _user: &str,
        ) -> crate::error::Result<String> {
            Ok(self.response.clone())
        }
    }

    fn runner(
        rag: StubRag,
        graph: StubGraph,
        response: &str,
        timeout: Duration,
    ) -> BatchRunner<StubRag, StubGraph, StubJudgeBackend> {
        BatchRunner::new(
            rag,
            graph,
            Judge::new(StubJudgeBackend {
                response: response.to_string(),
            }),
            timeout,
        )
    }

    fn question(text: &str, category: Category) -> Question {
        Question {
            text: text.to_string(),
            category,
        }
    }

    #[tokio::test]
    async fn test_run_covers_every_question() {
        let questions = vec![
            question("q1", Category::Relationship),
            question("q2", Category::Counting),
            question("q3", Category::Semantic),
        ];
        let runner = runner(
            StubRag { fail: false, delay: None },
            StubGraph { success: true, delay: None },
            r#"{"winner": "B", "confidence": "high"}"#,
            Duration::from_secs(5),
        );

        let report = runner.run(&questions).await;

        assert_eq!(report.overall.questions, questions.len());
        assert_eq!(report.overall.graph_wins, questions.len());
        assert_eq!(report.entries.len(), questions.len());
    }

    #[tokio::test]
    async fn test_graph_timeout_takes_fast_path() {
        let runner = runner(
            StubRag { fail: false, delay: None },
            StubGraph { success: true, delay: Some(Duration::from_millis(200)) },
            r#"{"winner": "B"}"#,
            Duration::from_millis(20),
        );

        let q = Question {
            text: "q".to_string(),
            category: Category::Relationship,
        };
        let verdict = runner.judge_question(&q).await;

        // Timed-out graph answer becomes success=false, so RAG wins by default.
        assert_eq!(verdict.winner, Winner::Rag);
        assert_eq!(verdict.reasoning, crate::judge::QUERY_FAILED_REASON);
    }

    #[tokio::test]
    async fn test_rag_provider_error_feeds_marker_forward() {
        let runner = runner(
            StubRag { fail: true, delay: None },
            StubGraph { success: true, delay: None },
            r#"{"winner": "B", "confidence": "high"}"#,
            Duration::from_secs(5),
        );

        let (rag, graph) = runner.answers_for("q").await;
        assert!(rag.answer.starts_with(crate::provider::NO_ANSWER_MARKER));
        assert!(graph.success);
    }

    #[tokio::test]
    async fn test_degraded_judgments_do_not_abort_the_batch() {
        let questions = vec![
            Question { text: "q1".to_string(), category: Category::Topic },
            Question { text: "q2".to_string(), category: Category::Topic },
        ];
        let runner = runner(
            StubRag { fail: false, delay: None },
            StubGraph { success: true, delay: None },
            "not json at all",
            Duration::from_secs(5),
        );

        let report = runner.run(&questions).await;

        assert_eq!(report.overall.questions, 2);
        assert_eq!(report.overall.failures, 2);
        assert!(report.entries.iter().all(|e| e.verdict.failure.is_some()));
    }

    #[test]
    fn test_report_round_trips_as_json() {
        let mut report = BatchReport::default();
        report.fold(
            Category::Relationship,
            verdict_with("q", Winner::Graph, None),
        );

        let json = serde_json::to_string(&report).unwrap();
        let parsed: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall, report.overall);
        assert_eq!(parsed.per_category, report.per_category);
    }
}
