//! Chat command implementation

use crate::cli::output;
use crate::cli::session::start;
use crate::cli::ChatArgs;
use crate::display::{BubbleKind, TranscriptEvent};
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Handle `strokewatch chat`. Returns whether the last exchange succeeded.
pub async fn run_chat(args: ChatArgs) -> anyhow::Result<bool> {
    if let Some(message) = &args.message {
        if message.trim().is_empty() {
            anyhow::bail!("message cannot be empty");
        }
    }

    let (_config, app) = start(&args.connection)?;
    let widget = app.chat;

    // Print bubbles as the transcript changes; the placeholder only makes
    // sense on a terminal.
    let show_typing = std::io::stdout().is_terminal();
    let mut events = widget.transcript().subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(TranscriptEvent::Appended(bubble)) => {
                    if bubble.kind != BubbleKind::Typing || show_typing {
                        println!("{}", output::format_bubble(&bubble));
                    }
                }
                Ok(TranscriptEvent::Removed(_)) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Transcript printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut succeeded = true;
    match args.message {
        Some(message) => {
            if let Some(exchange) = widget.send(&message).await {
                succeeded = exchange.outcome.is_success();
            }
        }
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Type a message and press Enter. /quit to leave.");
            }
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                if QUIT_COMMANDS.contains(&line) {
                    break;
                }
                if let Some(exchange) = widget.send(line).await {
                    succeeded = exchange.outcome.is_success();
                }
            }
        }
    }

    // Dropping the widget drops the transcript, which closes the channel.
    drop(widget);
    printer.await?;

    Ok(succeeded)
}
