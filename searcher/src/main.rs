use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use engine::{process_queries_with, DocId, Document, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct MatchOutput {
    id: DocId,
    words: Vec<String>,
    status: DocumentStatus,
}

#[derive(Parser)]
#[command(name = "searcher")]
#[command(about = "Rank documents against free-text queries with TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where documents come from and how they are indexed.
#[derive(Args)]
struct IndexArgs {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: PathBuf,
    /// Whitespace separated stop words, fixed before indexing
    #[arg(long, env = "SEARCHER_STOP_WORDS", default_value = "")]
    stop_words: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query per input line and print ranked hits as JSON lines
    Search {
        #[command(flatten)]
        index: IndexArgs,
        /// File with one query per line; stdin when omitted
        #[arg(long)]
        queries: Option<PathBuf>,
        /// Worker threads for the batch (0 = one per core)
        #[arg(long, env = "SEARCHER_THREADS", default_value_t = 0)]
        threads: usize,
        /// Only rank documents with this status
        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
    },
    /// Explain which query words a document matches
    Match {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Search { index, queries, threads, status } => {
            let server = build_server(&index.input, &index.stop_words)?;
            let queries = read_queries(queries.as_deref())?;
            run_search(&server, &queries, threads, status, &mut out)
        }
        Commands::Match { index, query, id } => {
            let server = build_server(&index.input, &index.stop_words)?;
            let (words, status) = server.match_document(&query, id)?;
            serde_json::to_writer(&mut out, &MatchOutput { id, words, status })?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn build_server(input: &Path, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::with_stop_words(stop_words).context("invalid stop words")?;
    for doc in load_documents(input)? {
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("failed to index document {}", doc.id))?;
    }
    tracing::info!(num_docs = server.document_count(), "indexed documents");
    Ok(server)
}

fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.into_iter().enumerate() {
                let doc: InputDoc = serde_json::from_value(v)
                    .with_context(|| format!("{}: document {i}", file.display()))?;
                docs.push(doc);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)
                .with_context(|| format!("{}: document 0", file.display()))?;
            docs.push(doc);
        }
        _ => tracing::warn!(file = %file.display(), "skipping file without document objects"),
    }
    Ok(())
}

fn read_queries(path: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("opening {}", p.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        queries.push(line);
    }
    Ok(queries)
}

fn run_search<W: Write>(
    server: &SearchServer,
    queries: &[String],
    threads: usize,
    status: DocumentStatus,
    out: &mut W,
) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let results = pool.install(|| process_queries_with(server, queries, &status));
    for (query, slot) in queries.iter().zip(results) {
        let line = match slot {
            Ok(hits) => QueryOutput { query, results: Some(hits), error: None },
            Err(e) => QueryOutput { query, results: None, error: Some(e.to_string()) },
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}
