use std::path::PathBuf;

use clap::Parser;
use history_review::{
    engine::QuizEngine,
    names,
    session::SessionStore,
    store::{QuestionStore, WrongBookStore},
    AppState,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file holding the question catalog.
    #[arg(long, env = "QUESTIONS_FILE", default_value = names::DEFAULT_QUESTIONS_FILE)]
    questions: PathBuf,

    /// JSON file the wrong-answer book is written to.
    #[arg(long, env = "WRONG_BOOK_FILE", default_value = names::DEFAULT_WRONG_BOOK_FILE)]
    wrong_book: PathBuf,

    /// The address to bind to.
    #[arg(short, long, env, default_value = names::DEFAULT_ADDRESS)]
    address: String,

    /// Mark the session cookie `Secure` (serve over HTTPS).
    #[arg(long, env)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tower_http=info,history_review=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let questions = QuestionStore::from_file(&args.questions);
    let count = questions.all().await?.len();
    tracing::info!("catalog {} holds {count} questions", args.questions.display());

    let engine = QuizEngine::new(
        questions,
        WrongBookStore::new(&args.wrong_book),
        SessionStore::new(),
    );
    let app = history_review::router(AppState {
        engine,
        secure_cookies: args.secure_cookies,
    });

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
