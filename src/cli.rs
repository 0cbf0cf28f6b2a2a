use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::api::research::DEFAULT_MAX_RESULTS;
use crate::api::{
    AnalyzeTextRequest, ApiClient, ChatRequest, ChatResponse, ImageAnalysisRequest, Language,
    MedicalAnalysis, ResearchRequest, ResearchResponse,
};
use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "medicare",
    version,
    about = "MediCare AI — medical assistant in your terminal"
)]
pub struct Cli {
    /// Backend base URL (overrides config and MEDICARE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Response language for this invocation: en or fr
    #[arg(long, global = true)]
    pub language: Option<Language>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the medical assistant (interactive when MESSAGE is omitted)
    Chat {
        message: Option<String>,
    },
    /// Analyze medical record text from a file, or stdin with "-"
    Analyze {
        input: String,
        /// Additional patient context
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Analyze a medical image (X-ray, prescription, lab report photo)
    Image {
        path: PathBuf,
        /// Only extract the text, skip the analysis
        #[arg(long)]
        extract_only: bool,
    },
    /// Extract text from a medical document image
    Extract {
        path: PathBuf,
    },
    /// Search recent medical literature
    Research {
        query: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },
    /// Set and persist the preferred response language
    Lang {
        #[arg(value_name = "LANGUAGE")]
        lang: Language,
    },
    /// Check that the backend is reachable
    Health,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_dir = AppConfig::config_dir();
    let mut config = AppConfig::load(&config_dir);

    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }
    let language = cli.language.unwrap_or(config.language);

    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Chat { message: Some(message) } => {
            let response = client
                .chat(&ChatRequest::new(message).language(language))
                .await?;
            render_chat(&response);
        }
        Command::Chat { message: None } => {
            chat_loop(&client, language).await?;
        }
        Command::Analyze { input, context } => {
            let text = read_text_input(&input)?;
            let analysis = client
                .analyze_text(
                    &AnalyzeTextRequest::new(text)
                        .context(context)
                        .language(language),
                )
                .await?;
            render_analysis(&analysis);
        }
        Command::Image { path, extract_only } => {
            let image = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let result = client
                .analyze_image(
                    ImageAnalysisRequest::new(image, file_name_of(&path))
                        .language(language)
                        .extract_text_only(extract_only),
                )
                .await?;

            if !result.extracted_text.is_empty() {
                println!("{}", "Extracted Text".bold());
                println!("{}\n", result.extracted_text);
            }
            if !extract_only {
                render_analysis(&result.analysis);
            }
        }
        Command::Extract { path } => {
            let image = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let result = client.extract_text(image, &file_name_of(&path)).await?;
            println!("{}", result.extracted_text);
            println!("{}", format!("[{}]", short_time(&result.timestamp)).dimmed());
        }
        Command::Research { query, max_results } => {
            let response = client
                .research(
                    &ResearchRequest::new(query)
                        .max_results(max_results)
                        .language(language),
                )
                .await?;
            render_research(&response);
        }
        Command::Lang { lang } => {
            // Persist only the preference; env and flag overrides stay transient.
            let mut stored = AppConfig::load_file(&config_dir);
            stored.language = lang;
            stored.save(&config_dir);
            println!("Language preference set to {}", lang.to_string().bold());
        }
        Command::Health => {
            let health = client.health().await?;
            println!(
                "{} backend at {} reports: {}",
                "ok".green().bold(),
                client.base_url(),
                health.status
            );
        }
    }

    Ok(())
}

/// Interactive chat, the terminal rendition of the chat tab.
async fn chat_loop(client: &ApiClient, language: Language) -> anyhow::Result<()> {
    println!("{}", "MediCare AI".green().bold());
    println!("Ask a medical question. Type 'exit' or press Ctrl-D to quit.");
    println!(
        "{}\n",
        "Not a doctor: always consult a qualified healthcare professional.".dimmed()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "you>".cyan().bold());
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        match client
            .chat(&ChatRequest::new(message).language(language))
            .await
        {
            Ok(response) => {
                println!();
                render_chat(&response);
                println!();
            }
            Err(err) => eprintln!("{} {}", "error:".red().bold(), err),
        }
    }

    Ok(())
}

fn read_text_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        io::read_to_string(io::stdin()).context("Failed to read from stdin")
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string()
}

/// Backend timestamps are RFC 3339; fall back to the raw string if not.
fn short_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn render_chat(response: &ChatResponse) {
    println!("{}", response.response);
    println!(
        "{}",
        format!(
            "[{} · {}]",
            response.language,
            short_time(&response.timestamp)
        )
        .dimmed()
    );
}

fn render_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", title.bold());
    for item in items {
        println!("  • {}", item);
    }
    println!();
}

fn render_analysis(analysis: &MedicalAnalysis) {
    println!("{}", "Summary".bold());
    println!("{}\n", analysis.summary);

    render_list("Key Findings", &analysis.key_findings);
    render_list("Recommendations", &analysis.recommendations);
    render_list("Next Steps", &analysis.next_steps);

    println!("{}", analysis.disclaimer.yellow());
    println!(
        "{}",
        format!(
            "[{} · {}]",
            analysis.language,
            short_time(&analysis.timestamp)
        )
        .dimmed()
    );
}

fn render_research(response: &ResearchResponse) {
    println!("{}\n", format!("Results for \"{}\"", response.query).bold());

    for (i, result) in response.results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title.bold());
        println!("   {}", result.url.blue().underline());
        println!("   {}", result.content);
        println!("   {}\n", format!("relevance {:.2}", result.score).dimmed());
    }

    if !response.summary.is_empty() {
        println!("{}", "Summary".bold());
        println!("{}", response.summary);
    }
    println!(
        "{}",
        format!("[{}]", short_time(&response.timestamp)).dimmed()
    );
}
