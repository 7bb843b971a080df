//! Legal assistant CLI
//!
//! Commands:
//!   lexrag-cli build --data-dir <dir>   Build the corpus index from text files
//!   lexrag-cli ask "<question>"         Run a question through the pipeline
//!   lexrag-cli eval                     Run the sample evaluation batch

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

use lexrag::config::LexRagConfig;
use lexrag::evaluation::{
    evaluate_response, format_aggregate_summary, format_evaluation_report, EvaluationRunner,
};
use lexrag::ingestion::DocumentChunker;
use lexrag::pipeline::{format_response, Orchestrator};
use lexrag::providers::{CompletionProvider, CorpusIndex, OllamaClient};
use lexrag::retrieval::LexicalIndex;

/// Queries used by the sample evaluation batch
const EVAL_QUERIES: [&str; 3] = [
    "What are the termination conditions?",
    "Explain the indemnification clause.",
    "Are there non-compete restrictions?",
];

#[derive(Parser)]
#[command(name = "lexrag-cli", about = "Legal document Q&A assistant", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the corpus index from a directory of .txt files
    Build {
        /// Directory holding source documents
        #[arg(long)]
        data_dir: PathBuf,
        /// Maximum number of documents to ingest
        #[arg(long)]
        max_docs: Option<usize>,
    },
    /// Ask a question against the built index
    Ask {
        /// The question to answer
        question: String,
    },
    /// Run the sample evaluation batch and print aggregate metrics
    Eval,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexrag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LexRagConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LexRagConfig::default(),
    };

    match cli.command {
        Command::Build { data_dir, max_docs } => build_index(&config, &data_dir, max_docs).await,
        Command::Ask { question } => ask(&config, &question).await,
        Command::Eval => run_evaluation(&config).await,
    }
}

async fn build_index(
    config: &LexRagConfig,
    data_dir: &Path,
    max_docs: Option<usize>,
) -> anyhow::Result<()> {
    let chunker = DocumentChunker::new(&config.chunking);
    let index = LexicalIndex::new();

    let mut documents = 0usize;
    let mut texts = Vec::new();
    let mut metadatas = Vec::new();

    for entry in WalkDir::new(data_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        if max_docs.is_some_and(|max| documents >= max) {
            break;
        }

        let path = entry.path();
        let source_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let chunks = chunker.chunk_document(&source_id, &content)?;
        tracing::info!("{}: {} chunks", source_id, chunks.len());

        for chunk in chunks {
            metadatas.push(chunk.metadata());
            texts.push(chunk.text);
        }
        documents += 1;
    }

    if documents == 0 {
        bail!("no .txt documents found under {}", data_dir.display());
    }

    let chunk_count = texts.len();
    index.add_texts(texts, metadatas).await?;
    index.save(&config.index.storage_dir).await?;

    println!(
        "Indexed {} chunks from {} documents into {}",
        chunk_count,
        documents,
        config.index.storage_dir.display()
    );
    Ok(())
}

async fn ask(config: &LexRagConfig, question: &str) -> anyhow::Result<()> {
    let orchestrator = load_orchestrator(config)?;

    let state = orchestrator.run(question).await?;
    println!("{}", format_response(&state));
    Ok(())
}

async fn run_evaluation(config: &LexRagConfig) -> anyhow::Result<()> {
    let orchestrator = load_orchestrator(config)?;
    let mut runner = EvaluationRunner::new();

    for (i, query) in EVAL_QUERIES.iter().enumerate() {
        println!("\n[{}/{}] Evaluating: {}", i + 1, EVAL_QUERIES.len(), query);

        let state = orchestrator.run(query).await?;
        let result = evaluate_response(
            query,
            &state.retrieved_documents,
            &state.reasoning_chain,
            &state.final_explanation,
            None,
        );

        println!("{}\n", format_evaluation_report(&result, true));
        runner.add_result(result);
    }

    println!("{}", format_aggregate_summary(&runner.aggregate()));
    Ok(())
}

fn load_orchestrator(config: &LexRagConfig) -> anyhow::Result<Orchestrator> {
    let index_dir = &config.index.storage_dir;
    if !LexicalIndex::exists(index_dir) {
        bail!(
            "no index found at {}; run `lexrag-cli build` first",
            index_dir.display()
        );
    }

    let index = LexicalIndex::load(index_dir)?;
    let provider: Arc<dyn CompletionProvider> = Arc::new(OllamaClient::new(&config.llm));
    let corpus: Arc<dyn CorpusIndex> = Arc::new(index);

    Ok(Orchestrator::new(Some(corpus), provider))
}
