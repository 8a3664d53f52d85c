use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use nq_core::{ContentFetcher, NewsSearch, Result};
use nq_inference::Config;
use nq_news::{GnewsClient, PageFetcher};
use nq_pipeline::{NewsAssistant, PipelineConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inference backend to use. Available backends: groq (default), dummy
    #[arg(long, default_value = "groq")]
    model: String,
    /// Override the inference API base URL (any OpenAI-compatible endpoint)
    #[arg(long)]
    base_url: Option<String>,
    /// Articles to read in full per question
    #[arg(long, default_value_t = 3)]
    top_k: usize,
    /// Skip the rendered source list at the end of answers
    #[arg(long)]
    no_sources: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Interactive chat loop
    Chat,
    /// Answer a single question and exit
    Ask { question: String },
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

fn build_assistant(cli: &Cli) -> Result<NewsAssistant> {
    let config = Config {
        api_key: env::var("GROQ_API_KEY").ok(),
        base_url: cli.base_url.clone(),
        model_name: Some(cli.model.clone()),
        ..Default::default()
    };
    let model = nq_inference::create_model(Some(config))?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let news_api_key = env::var("GNEWS_API_KEY").unwrap_or_default();
    let search: Arc<dyn NewsSearch> = Arc::new(GnewsClient::new(news_api_key)?);
    let fetcher: Arc<dyn ContentFetcher> = Arc::new(PageFetcher::new()?);

    let pipeline_config = PipelineConfig {
        top_k: cli.top_k,
        include_sources: !cli.no_sources,
        ..Default::default()
    };

    Ok(NewsAssistant::new(model, search, fetcher, pipeline_config))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let assistant = build_assistant(&cli)?;

    match cli.command {
        Commands::Chat => run_chat_loop(assistant).await?,
        Commands::Ask { question } => {
            let response = assistant.answer_question(&question).await?;
            println!("{}", response.response);
        }
        Commands::Serve { port } => {
            let app = nq_web::create_app(nq_web::AppState { assistant });
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            info!("🌐 Server running on http://0.0.0.0:{}", port);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

async fn run_chat_loop(assistant: NewsAssistant) -> Result<()> {
    println!("📰 News assistant started. Type 'exit' to quit.");
    println!("{}", "-".repeat(60));

    let stdin = io::stdin();
    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        match assistant.answer_question(question).await {
            Ok(response) => println!("\n🤖 Bot: {}", response.response),
            Err(e) => println!("Bot: Error: {}", e),
        }
    }

    Ok(())
}
