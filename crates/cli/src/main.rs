mod echo;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use precis_core::{
    ContentExtractor, DEFAULT_FETCH_TIMEOUT, DEFAULT_LANGUAGE, DEFAULT_MAX_WORDS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    ErrorKind, FetchConfig, PrecisError, ReadabilityConfig, SummaryConfig, resolve_api_key, summarize,
};
use tracing_subscriber::EnvFilter;

use crate::echo::{
    print_banner, print_error, print_extraction_details, print_heading, print_info, print_step, print_timing_summary,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fetch a web article, extract its readable text and summarize it with an LLM
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(version)]
#[command(about = "Summarize a web article with an LLM", long_about = None)]
struct Args {
    /// Article URL to fetch and summarize
    #[arg(value_name = "URL")]
    url: String,

    /// Approximate summary length in words
    #[arg(value_name = "MAX_WORDS", default_value_t = DEFAULT_MAX_WORDS)]
    max_words: u32,

    /// Language of the summary
    #[arg(short, long, default_value = DEFAULT_LANGUAGE, value_name = "LANGUAGE")]
    language: String,

    /// Chat model to use
    #[arg(short, long, default_value = DEFAULT_MODEL, value_name = "MODEL")]
    model: String,

    /// API key (default: $OPENAI_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Sampling temperature, 0.0 to 2.0
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE, value_name = "TEMP")]
    temperature: f32,

    /// HTTP timeout in seconds for fetching the page
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT, value_name = "SECS")]
    timeout: u64,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Also print the extracted article text
    #[arg(long)]
    show_text: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn summary_config(&self) -> precis_core::Result<SummaryConfig> {
        let mut builder = SummaryConfig::builder()
            .max_words(self.max_words)
            .language(&self.language)
            .model(&self.model)
            .temperature(self.temperature);

        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }

        builder.build()
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,precis=debug,precis_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// User-facing message for a failure, chosen by error kind
fn describe_error(err: &anyhow::Error) -> String {
    let Some(err) = err.downcast_ref::<PrecisError>() else {
        return format!("{:#}", err);
    };

    match err.kind() {
        ErrorKind::Transport => format!("Could not fetch the article: {}", err),
        ErrorKind::Http => format!("The article could not be retrieved: {}", err),
        ErrorKind::ContentNotFound => "No readable text found at this URL.".to_string(),
        ErrorKind::CredentialMissing => format!("OpenAI {}", err),
        ErrorKind::Provider => format!("Summarization failed: {}", err),
        ErrorKind::EmptyResponse => "The model returned an empty summary.".to_string(),
        ErrorKind::Config => err.to_string(),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let start = Instant::now();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = args.summary_config()?;
    resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;

    print_step(1, 2, "Fetching article...");
    if args.verbose {
        eprintln!("  {} {}", "URL:".dimmed(), args.url.bright_white().underline());
    }

    let fetch = FetchConfig { timeout: args.timeout, ..Default::default() };
    let extractor = ContentExtractor::with_config(fetch, ReadabilityConfig::default());
    let text = extractor.extract(&args.url).await?;
    let extracted_at = start.elapsed();

    if args.verbose {
        print_extraction_details(&text);
    }

    print_step(2, 2, "Summarizing...");
    if args.verbose {
        eprintln!("  {} {}", "Model:".dimmed(), config.model.bright_white());
        eprintln!("  {} {}\n", "Language:".dimmed(), config.language.bright_white());
    }

    let article = text.as_text();
    let summary = summarize(&article, &config).await?;
    let summarized_in = start.elapsed() - extracted_at;

    print_heading("Summary");
    println!("{}", summary);

    if args.show_text {
        print_heading("Article Text");
        println!("{}", article);
    }

    if args.verbose {
        print_timing_summary(start.elapsed(), &[("Extract", extracted_at), ("Summarize", summarized_in)]);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&describe_error(&err));
            ExitCode::FAILURE
        }
    }
}
