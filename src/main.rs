use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use rapid_summarizer::{
    DocumentFormat, LanguageRegistry, ModelType, PlainTextExtractor, SummarizationResponse,
    Summarizer, SummarizerConfig, SummaryResult,
};

#[derive(Parser, Debug)]
#[command(name = "rapid-summarize", about = "Extractive document summarizer")]
struct Args {
    /// Input document (.txt or .md); reads stdin when omitted
    #[arg(short, long, conflicts_with = "directory")]
    input: Option<PathBuf>,

    /// Summarize every text document in a directory
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output file (or directory with --directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scoring model: textrank, tfidf or ensemble
    #[arg(short, long, default_value = "ensemble")]
    model: String,

    /// Target ratio of summary to source sentences (clamped to the configured bounds)
    #[arg(short, long)]
    ratio: Option<f64>,

    /// Document language
    #[arg(short, long, default_value = "english")]
    language: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run every model and print a comparison
    #[arg(long, conflicts_with = "directory")]
    benchmark: bool,

    /// Reference summary to score benchmark results against (ROUGE)
    #[arg(long, requires = "benchmark")]
    reference: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SummarizerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };
    let summarizer = Summarizer::new(Arc::new(LanguageRegistry::new()), config)?;
    let model: ModelType = args.model.parse()?;
    let extractor = PlainTextExtractor::new();

    if let Some(dir) = &args.directory {
        return summarize_directory(&summarizer, &extractor, dir, model, &args);
    }

    let text = match &args.input {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading document");
            extractor.extract_path(path)?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    if args.benchmark {
        let reference = match &args.reference {
            Some(path) => Some(extractor.extract_path(path)?),
            None => None,
        };
        let report = summarizer.benchmark(&text, args.ratio, &args.language, reference.as_deref())?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for entry in &report.entries {
                println!("--- {} ---", entry.model);
                println!("{}", entry.summary);
                print!(
                    "sentences: {}  words: {}  compression: {:.2}  time: {:.4}s",
                    entry.sentence_count,
                    entry.summary_length,
                    entry.compression_ratio,
                    entry.processing_time
                );
                match entry.rouge {
                    Some(r) => println!("  rouge-1: {:.3}  rouge-2: {:.3}", r.rouge_1, r.rouge_2),
                    None => println!(),
                }
            }
            if let Some(fastest) = report.fastest() {
                println!("\nfastest: {}", fastest.model);
            }
        }
        return Ok(());
    }

    tracing::info!(model = %model, language = %args.language, "generating summary");
    let result = summarizer.summarize(&text, model, args.ratio, &args.language)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &result.summary)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "summary saved");
    }

    print_result(&result, args.json)
}

fn print_result(result: &SummaryResult, json: bool) -> anyhow::Result<()> {
    if json {
        let response = SummarizationResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("--- SUMMARY ---");
        println!("{}", result.summary);
        println!("\n--- STATISTICS ---");
        println!("Original length: {} words", result.original_length);
        println!("Summary length: {} words", result.summary_length);
        println!("Compression ratio: {:.2}", result.compression_ratio);
    }
    Ok(())
}

fn summarize_directory(
    summarizer: &Summarizer,
    extractor: &PlainTextExtractor,
    dir: &Path,
    model: ModelType,
    args: &Args,
) -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && matches!(
                    DocumentFormat::from_path(path),
                    Ok(DocumentFormat::PlainText | DocumentFormat::Markdown)
                )
        })
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("no text documents found in {}", dir.display());
    }
    if let Some(out) = &args.output {
        std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    }

    let results: Vec<(PathBuf, anyhow::Result<SummaryResult>)> = files
        .into_par_iter()
        .map(|path| {
            let result = extractor
                .extract_path(&path)
                .and_then(|text| summarizer.summarize(&text, model, args.ratio, &args.language))
                .map_err(anyhow::Error::from);
            (path, result)
        })
        .collect();

    let mut processed = 0;
    for (path, result) in results {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match result {
            Ok(result) => {
                processed += 1;
                if let Some(out) = &args.output {
                    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                    let target = out.join(format!("{stem}_summary.txt"));
                    std::fs::write(&target, &result.summary)
                        .with_context(|| format!("writing {}", target.display()))?;
                }
                println!("--- {name} ---");
                if args.json {
                    let response = SummarizationResponse::from(&result);
                    println!("{}", serde_json::to_string(&response)?);
                } else {
                    println!("Original length: {} words", result.original_length);
                    println!("Summary length: {} words", result.summary_length);
                    println!("Compression ratio: {:.2}", result.compression_ratio);
                }
            }
            Err(err) => tracing::error!(file = %name, error = %err, "failed to summarize"),
        }
    }

    tracing::info!(processed, "directory done");
    Ok(())
}
