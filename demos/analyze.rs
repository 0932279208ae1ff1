use clap::Parser;
use postmood::{AnalysisController, Bucket, Client, Config, SubmitOutcome, ViewState, DEFAULT_COMMENT_LIMIT};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Show the sentiment analysis of a reddit post")]
struct Args {
    /// Full URL of the reddit post.
    url: String,

    /// Max number of top-level comments to analyze (1-500).
    #[arg(long, default_value_t = DEFAULT_COMMENT_LIMIT)]
    limit: u32,

    #[arg(long, env = "POSTMOOD_API_BASE")]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), postmood::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(api_base) = args.api_base {
        config = config.api_base(api_base);
    }

    let controller = AnalysisController::new(Client::new(config)?);
    match controller.submit(&args.url, args.limit).await {
        SubmitOutcome::Settled(ViewState::Success(view)) => {
            let post = view.post();
            println!("{} ({:?}, {:+.3})", post.title, view.post_bucket(), post.sentiment);
            println!(
                "score {} | {} comments on reddit, showing {} ({} hidden)",
                post.score,
                post.num_comments,
                post.top_comments.len(),
                view.hidden_comments()
            );

            for classified in view.comments() {
                let marker = match classified.bucket {
                    Bucket::Positive => "+",
                    Bucket::Negative => "-",
                    Bucket::Neutral => "=",
                };
                println!(
                    "[{}] {:+.3} u/{}: {}",
                    marker, classified.comment.sentiment, classified.comment.author, classified.comment.body
                );
            }

            let summary = view.summary();
            println!(
                "positive {} / negative {} / neutral {}",
                summary.positive, summary.negative, summary.neutral
            );
        }
        SubmitOutcome::Settled(ViewState::Failure(message)) => eprintln!("error: {}", message),
        other => eprintln!("nothing to show: {:?}", other),
    }

    Ok(())
}
