// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use file_qa::utils::logging::{Status, format_status};
use file_qa::{
    Config, DocumentParser, DocumentStore, FileOutcome, GroqChatClient, QaService,
    UploadHandler, UploadReport, UploadedFile, Validator,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "file_qa")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Ask questions about uploaded PDF, DOCX, PPTX, XLSX and CSV files", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DocumentArgs {
    /// Document to upload (repeatable)
    #[arg(short, long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Directory searched recursively for supported documents
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload documents and ask one question
    Ask {
        #[command(flatten)]
        documents: DocumentArgs,

        question: String,
    },

    /// Upload documents and summarize each of them
    Summarize {
        #[command(flatten)]
        documents: DocumentArgs,
    },

    /// Show keyword scores per document without calling the model
    Rank {
        #[command(flatten)]
        documents: DocumentArgs,

        question: String,
    },

    /// Print the text extracted from a single document
    Parse {
        file: PathBuf,

        #[arg(long, default_value_t = 2000)]
        max_chars: usize,
    },

    /// Interactive session: `:upload <paths>`, `:docs`, `:quit`, anything else is a question
    Chat {
        #[command(flatten)]
        documents: DocumentArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    file_qa::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            let mut config = Config::default_config();
            config.generation.resolve_api_key();
            config
        })
    };

    match cli.command {
        Commands::Ask {
            documents,
            question,
        } => {
            cmd_ask(&config, &documents, &question).await?;
        }
        Commands::Summarize { documents } => {
            cmd_ask(&config, &documents, "summarize").await?;
        }
        Commands::Rank {
            documents,
            question,
        } => {
            cmd_rank(&config, &documents, &question).await?;
        }
        Commands::Parse { file, max_chars } => {
            cmd_parse(&config, &file, max_chars)?;
        }
        Commands::Chat { documents } => {
            cmd_chat(&config, &documents).await?;
        }
    }

    Ok(())
}

fn build_service(config: &Config) -> Result<QaService> {
    let generator =
        GroqChatClient::from_config(&config.generation).context("Failed to create Groq client")?;

    if !generator.has_credentials() {
        warn!("No API key configured; answers will report a missing GROQ_API_KEY");
    }
    info!("Using model {}", generator.model());

    let uploader = UploadHandler::new(DocumentParser::new(config.upload.clone())).with_progress(true);

    Ok(QaService::new(
        Arc::new(DocumentStore::new()),
        Arc::new(generator),
        uploader,
    ))
}

fn collect_batch(config: &Config, documents: &DocumentArgs) -> Result<Vec<UploadedFile>> {
    let mut batch: Vec<UploadedFile> = documents
        .files
        .iter()
        .map(UploadedFile::from_path)
        .collect();

    if let Some(dir) = &documents.dir {
        Validator::validate_directory(dir)?;
        let parser = DocumentParser::new(config.upload.clone());

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && parser.allows(entry.path()) {
                batch.push(UploadedFile::from_path(entry.path()));
            }
        }
    }

    Ok(batch)
}

fn print_report(report: &UploadReport) {
    if report.batch_id.is_none() {
        println!("{}", format_status(Status::Warning, &report.to_string()));
        return;
    }

    for outcome in &report.outcomes {
        let line = outcome.to_string();
        match outcome {
            FileOutcome::Stored { .. } => println!("{}", format_status(Status::Success, &line)),
            FileOutcome::Failed { .. } => println!("{}", format_status(Status::Failure, &line)),
        }
    }
}

async fn upload(service: &QaService, config: &Config, documents: &DocumentArgs) -> Result<()> {
    let batch = collect_batch(config, documents)?;
    let report = service.upload(batch).await;
    print_report(&report);
    Ok(())
}

async fn cmd_ask(config: &Config, documents: &DocumentArgs, question: &str) -> Result<()> {
    let service = build_service(config)?;
    upload(&service, config, documents).await?;

    println!("\n{}", service.ask(question).await);
    Ok(())
}

async fn cmd_rank(config: &Config, documents: &DocumentArgs, question: &str) -> Result<()> {
    let service = build_service(config)?;
    upload(&service, config, documents).await?;

    let ranking = service.rank(question).await;
    println!("\nKeywords: {:?}", ranking.keywords);
    println!("{}", "=".repeat(60));
    for (id, score) in &ranking.scores {
        let marker = if ranking.selected.as_deref() == Some(id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {:>4}  {}", marker, score, id);
    }
    println!("{}", "=".repeat(60));

    match &ranking.selected {
        Some(id) => println!("{}", format_status(Status::Info, &format!("Selected: {}", id))),
        None => println!("{}", format_status(Status::Warning, file_qa::models::NO_RELEVANT_FILE)),
    }

    Ok(())
}

fn cmd_parse(config: &Config, file: &Path, max_chars: usize) -> Result<()> {
    let parser = DocumentParser::new(config.upload.clone());
    let text = parser
        .parse(file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    println!("{}", format_status(Status::Info, &format!("{} characters extracted", text.chars().count())));
    println!("{}", Validator::truncate_text(&text, max_chars));
    Ok(())
}

async fn cmd_chat(config: &Config, documents: &DocumentArgs) -> Result<()> {
    let service = build_service(config)?;

    if !documents.files.is_empty() || documents.dir.is_some() {
        upload(&service, config, documents).await?;
    }

    println!(
        "{}",
        format_status(Status::Info, "Type a question, `:upload <paths>`, `:docs` or `:quit`")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == ":quit" || line == ":exit" {
            break;
        }

        if line == ":docs" {
            let docs = service.store().read().await;
            if docs.is_empty() {
                println!("{}", format_status(Status::Warning, "No documents uploaded"));
            }
            for (id, doc) in docs.iter() {
                println!(
                    "  {} ({} chars, parsed {})",
                    id,
                    doc.text.chars().count(),
                    doc.parsed_at.format("%H:%M:%S")
                );
            }
            continue;
        }

        if let Some(paths) = upload_command(line) {
            let args = DocumentArgs {
                files: paths.split_whitespace().map(PathBuf::from).collect(),
                dir: None,
            };
            upload(&service, config, &args).await?;
            continue;
        }

        println!("{}\n", service.ask(line).await);
    }

    Ok(())
}

/// Paths following a `:upload` command word, or `None` for any other line.
fn upload_command(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(":upload")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_command_requires_word_boundary() {
        assert_eq!(upload_command(":upload a.pdf b.csv"), Some(" a.pdf b.csv"));
        assert_eq!(upload_command(":upload"), Some(""));
        assert_eq!(upload_command(":upload\tdeck.pptx"), Some("\tdeck.pptx"));
        assert_eq!(upload_command(":uploadfoo a.pdf"), None);
        assert_eq!(upload_command("what is in :upload"), None);
    }
}
