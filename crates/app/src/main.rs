use anyhow::Result;
use clap::Parser;
use overmoney_core::{ChatId, Money, UserId};
use overmoney_interpret::Interpreter;
use overmoney_suggest::{SubstringRecognizer, SuggestionQueue, SuggestionRequest};
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Outcome;

#[derive(Parser, Debug)]
#[command(name = "overmoney", about = "Turn expense chat messages into transactions")]
struct Cli {
    /// TOML file with the account's categories and keywords
    #[arg(long, value_name = "PATH")]
    vocabulary: Option<PathBuf>,

    /// Chat (account) the messages belong to
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    chat: i64,

    /// Sender of the messages
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    user: i64,

    /// Suggest categories for uncategorized transactions in the background
    #[arg(long)]
    suggest: bool,

    /// Messages to interpret; read from stdin, one per line, when omitted
    messages: Vec<String>,
}

const SUGGESTION_QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let vocabulary = commands::load_vocabulary(cli.vocabulary.as_deref())?;
    tracing::info!("Loaded {} categories", vocabulary.len());

    // ── Suggestion worker ───────────────────────────────────────────────────
    // Suggestions are printed as they arrive, after the transaction line they refer to.
    let (suggestion_tx, mut suggestion_rx) = mpsc::channel(SUGGESTION_QUEUE_CAPACITY);
    let queue = if cli.suggest {
        Some(SuggestionQueue::spawn(
            SubstringRecognizer,
            SUGGESTION_QUEUE_CAPACITY,
            suggestion_tx,
        ))
    } else {
        drop(suggestion_tx);
        None
    };
    let printer = tokio::spawn(async move {
        while let Some(suggestion) = suggestion_rx.recv().await {
            if let Some(outcome) = Outcome::from_suggestion(suggestion) {
                match outcome.render() {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("{e:#}"),
                }
            }
        }
    });

    // ── Messages ────────────────────────────────────────────────────────────
    let messages = if cli.messages.is_empty() {
        read_stdin_lines().await?
    } else {
        cli.messages
    };

    let sender = UserId(cli.user);
    let chat = ChatId(cli.chat);
    let mut total = Money::zero();
    let mut failed = 0usize;

    for text in &messages {
        let outcome = commands::interpret_line(text, sender, chat, chrono::Utc::now(), &vocabulary);
        println!("{}", outcome.render()?);

        match &outcome {
            Outcome::Ok {
                transaction_id,
                transaction,
            } => {
                match total.checked_add(transaction.amount) {
                    Some(sum) => total = sum,
                    None => tracing::warn!("Running total overflowed; skipping {}", transaction.amount),
                }
                if let Some(queue) = &queue {
                    if Interpreter::needs_suggestion(transaction, &vocabulary) {
                        let request = SuggestionRequest::new(*transaction_id, transaction, &vocabulary);
                        if let Err(e) = queue.dispatch(request) {
                            tracing::warn!("Suggestion for {transaction_id} dropped: {e}");
                        }
                    }
                }
            }
            Outcome::Error { .. } => failed += 1,
            Outcome::Suggested { .. } => {}
        }
    }

    if let Some(queue) = queue {
        queue.shutdown().await;
    }
    printer.await?;

    tracing::info!(
        "Interpreted {} of {} messages, total {}",
        messages.len() - failed,
        messages.len(),
        total
    );
    Ok(())
}

async fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut messages = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            messages.push(line);
        }
    }
    Ok(messages)
}
