use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_studio::domain::document::Document;
use voice_studio::domain::session::SpeechSession;
use voice_studio::domain::speech::{Gender, SynthesisRequest};
use voice_studio::error::AppError;
use voice_studio::infrastructure::config::{Config, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "voice-studio", about = "Turn text and documents into speech")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize speech from text or a document
    Speak {
        /// Text to read aloud
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Plain-text or PDF document to read aloud
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, default_value = "English")]
        language: String,

        #[arg(long, default_value = "Native")]
        accent: String,

        /// male or female
        #[arg(long, default_value = "female")]
        gender: Gender,

        #[arg(long, default_value = "Native")]
        tone: String,

        /// Directory to save synthesized_voice.wav into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List recent sessions, newest first
    History,
    /// Re-create the audio of a past session without calling the provider
    Replay {
        id: String,

        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Forget one past session
    Remove { id: String },
    /// Forget all past sessions
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        model = %config.gemini_model,
        history_dir = %config.history_dir.display(),
        has_credential = config.has_credential(),
        "Starting voice-studio"
    );

    let session = SpeechSession::from_config(&config).await?;
    let result = run(&session, args.command).await;
    session.close().await;

    if let Err(e) = result {
        tracing::error!(kind = e.kind(), error = %e, "Command failed");
        eprintln!("{}", e.render(config.log_format == LogFormat::Json));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(session: &SpeechSession, command: Command) -> Result<(), AppError> {
    match command {
        Command::Speak {
            text,
            file,
            language,
            accent,
            gender,
            tone,
            out,
        } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    let document = Document::from_path(&path).await.map_err(AppError::from)?;
                    session.extract(document).await?
                }
                (None, None) => return Err(AppError::DocumentRead("no text or file given".into())),
            };

            let request = SynthesisRequest::new(text, language, gender, accent, tone);
            let outcome = session.speak(&request).await?;
            if outcome.truncated {
                println!("Note: text was cut to the first 5000 characters.");
            }

            let path = session.save_current(&out).await?;
            println!("{}  {}", outcome.entry_id, path.display());
        }
        Command::History => {
            for entry in session.history().await {
                println!(
                    "{}  {}  {}/{}/{}/{}  {}",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.language,
                    entry.accent,
                    entry.gender,
                    entry.tone,
                    entry.text_excerpt.replace('\n', " ")
                );
            }
        }
        Command::Replay { id, out } => {
            session.replay(&id).await?;
            let path = session.save_current(&out).await?;
            println!("{}", path.display());
        }
        Command::Remove { id } => {
            if !session.remove(&id).await {
                println!("No session with id {}", id);
            }
        }
        Command::Clear => session.clear().await,
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_studio=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_studio=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
