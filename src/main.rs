//! kg-rag-bench CLI
//!
//! Benchmark comparing RAG against Knowledge-Graph (Text-to-Cypher)
//! question answering with an LLM judge.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kg_rag_bench::{
    catalog::{self, Category, Question},
    config::Config,
    judge::Judge,
    llm::LlmClient,
    provider,
    runner::BatchRunner,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// RAG vs Knowledge Graph benchmark
#[derive(Parser)]
#[command(name = "kg-rag-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the question catalog and curated sets
    List,

    /// Run a benchmark over a curated set or a single category
    Run {
        /// Curated set name (quick, medium, diagnostic) or category name
        /// (relationship, counting, filtering, topic, semantic, multi-hop,
        /// temporal, comparison)
        set: String,

        /// Limit the number of questions
        #[arg(long)]
        max_questions: Option<usize>,

        /// Save the full report (tallies plus every verdict) to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-question progress output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare both answer paths on a single question and print the verdict
    Compare {
        /// The question to ask both systems
        question: String,

        /// Category to attribute the question to (default: semantic)
        #[arg(long, default_value = "semantic")]
        category: String,
    },

    /// Test judging-model connectivity
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Run {
            set,
            max_questions,
            output,
            verbose,
        } => cmd_run(set, max_questions, output, verbose).await,
        Commands::Compare { question, category } => cmd_compare(question, category).await,
        Commands::Test => cmd_test().await,
    }
}

fn cmd_list() -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("QUESTION CATALOG");
    println!("{}", "=".repeat(60));

    for (category, questions) in catalog::all_categories() {
        println!("\n{} ({})", category.label(), category.expectation());
        println!("  Total: {} questions", questions.len());
        println!("  Examples:");
        for q in questions.iter().take(2) {
            println!("    - {}", q.text);
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("CURATED SETS");
    println!("{}", "=".repeat(60));
    for name in catalog::SET_NAMES {
        let set = catalog::curated_set(name)?;
        println!("  {:<12} {} questions", name, set.len());
    }

    Ok(())
}

/// Resolve a run target: a curated-set name first, then a category name.
fn resolve_questions(set: &str) -> Result<Vec<Question>> {
    match catalog::curated_set(set) {
        Ok(questions) => Ok(questions),
        Err(e) => {
            if let Some(category) = Category::parse(set) {
                Ok(catalog::questions_in(category))
            } else {
                Err(e).context("not a curated set or category name")
            }
        }
    }
}

async fn cmd_run(
    set: String,
    max_questions: Option<usize>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut questions = resolve_questions(&set)?;
    if let Some(max) = max_questions {
        questions.truncate(max);
    }

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    config
        .validate_providers()
        .context("Invalid provider configuration")?;

    println!("Judging model: {}", config.llm.model);
    println!("Running '{}' ({} questions)...", set, questions.len());

    let (rag, graph) = provider::from_config(&config.providers);
    let judge = Judge::new(LlmClient::new(config.llm));
    let timeout = Duration::from_secs(config.providers.timeout_secs);

    let runner = BatchRunner::new(rag, graph, judge, timeout).verbose(verbose);
    let report = runner.run(&questions).await;

    report.print_summary();

    if let Some(path) = output {
        report
            .save_json(&path)
            .context("Failed to save report")?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

async fn cmd_compare(question: String, category: String) -> Result<()> {
    let category = Category::parse(&category)
        .with_context(|| format!("Unknown category '{}'", category))?;

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    config
        .validate_providers()
        .context("Invalid provider configuration")?;

    let (rag, graph) = provider::from_config(&config.providers);
    let judge = Judge::new(LlmClient::new(config.llm));
    let timeout = Duration::from_secs(config.providers.timeout_secs);
    let runner = BatchRunner::new(rag, graph, judge, timeout);

    println!("Question: {}", question);
    println!("{}", "─".repeat(60));

    let q = Question {
        text: question,
        category,
    };

    let (rag_answer, graph_answer) = runner.answers_for(&q.text).await;

    println!("\nRAG ({} sources, {:.2}s):", rag_answer.sources.len(), rag_answer.elapsed_secs);
    println!("  {}", rag_answer.answer);

    println!(
        "\nKnowledge Graph ({} results, {:.2}s, success: {}):",
        graph_answer.result_count, graph_answer.elapsed_secs, graph_answer.success
    );
    if !graph_answer.generated_query.is_empty() {
        println!("  Cypher: {}", graph_answer.generated_query);
    }
    println!("  {}", graph_answer.answer);

    let verdict = runner.judge_question(&q).await;

    println!("\n{}", "─".repeat(60));
    println!("Winner: {:?} (confidence: {:?})", verdict.winner, verdict.confidence);
    if let Some(rag_score) = verdict.scores.accuracy.rag {
        println!(
            "Accuracy: RAG {}/10, Graph {}/10",
            rag_score,
            verdict.scores.accuracy.graph.unwrap_or(0)
        );
    }
    if !verdict.reasoning.is_empty() {
        println!("Reasoning: {}", verdict.reasoning);
    }
    for (label, items) in [
        ("RAG strengths", &verdict.strengths_rag),
        ("Graph strengths", &verdict.strengths_graph),
        ("RAG weaknesses", &verdict.weaknesses_rag),
        ("Graph weaknesses", &verdict.weaknesses_graph),
    ] {
        if !items.is_empty() {
            println!("{}:", label);
            for item in items {
                println!("  - {}", item);
            }
        }
    }
    if !verdict.recommendation.is_empty() {
        println!("Recommendation: {}", verdict.recommendation);
    }
    if let Some(failure) = &verdict.failure {
        println!("Degraded verdict: {}", failure);
    }

    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("Testing judging-model connection...\n");

    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        &config.llm.api_key[..config.llm.api_key.len().min(8)]
    );
    println!();

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = LlmClient::new(config.llm);

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful!");
        }
        Err(e) => {
            println!("Connection failed: {}", e);
        }
    }

    Ok(())
}
