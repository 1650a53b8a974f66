//! kg-rag-bench - RAG vs Knowledge-Graph question-answering benchmark.
//!
//! Runs a categorized catalog of evaluation questions through two
//! independent answer paths and has an LLM judge compare them:
//!
//! 1. A free-text (RAG) provider retrieves documents and generates an answer.
//! 2. A structured provider translates the question into a Cypher query and
//!    executes it against a knowledge graph.
//! 3. The judge scores both answers on fixed criteria and declares a winner
//!    per question; the batch runner tallies wins per category.
//!
//! # Quick Start
//!
//! ```no_run
//! use kg_rag_bench::{
//!     catalog,
//!     config::Config,
//!     judge::Judge,
//!     llm::LlmClient,
//!     provider,
//!     runner::BatchRunner,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!     config.validate()?;
//!     config.validate_providers()?;
//!
//!     // Wire up providers and judge
//!     let (rag, graph) = provider::from_config(&config.providers);
//!     let judge = Judge::new(LlmClient::new(config.llm));
//!     let timeout = Duration::from_secs(config.providers.timeout_secs);
//!
//!     // Run the quick benchmark set
//!     let questions = catalog::curated_set("quick")?;
//!     let runner = BatchRunner::new(rag, graph, judge, timeout);
//!     let report = runner.run(&questions).await;
//!
//!     report.print_summary();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **catalog**: fixed categorized question sets and curated subsets
//! - **provider**: the two answer-path contracts plus HTTP implementations
//! - **judge**: prompt construction, judging-model call, verdict parsing
//! - **runner**: batch orchestration and per-category win tallies
//! - **llm**: OpenAI-compatible API client with deterministic sampling

pub mod catalog;
pub mod config;
pub mod error;
pub mod judge;
pub mod llm;
pub mod provider;
pub mod runner;

// Re-export commonly used types
pub use catalog::{Category, Question};
pub use config::Config;
pub use error::{BenchError, Result};
pub use judge::{Judge, Verdict, Winner};
pub use llm::LlmClient;
pub use provider::{GraphAnswer, RagAnswer};
pub use runner::{BatchReport, BatchRunner};
