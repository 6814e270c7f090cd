//! Ask command - relays one message from the terminal

use std::io::Write;

use clap::Args;
use futures::StreamExt;

use crate::infrastructure::services::ChatService;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message to send
    pub message: String,

    /// Print the answer word by word instead of all at once
    #[arg(long)]
    pub stream: bool,
}

/// Run a single relay and print the answer to stdout
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    super::init_logging(&config);

    if args.message.trim().is_empty() {
        anyhow::bail!("Message cannot be blank");
    }

    let service = crate::create_chat_service(&config)?;
    let mut stdout = std::io::stdout();

    if args.stream {
        stream_answer(&service, &args.message, &mut stdout).await
    } else {
        print_answer(&service, &args.message, &mut stdout).await
    }
}

async fn print_answer(
    service: &ChatService,
    message: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let result = service.send_single_message(message).await;

    match result.text() {
        Some(text) if result.is_success() => {
            writeln!(out, "{}", text)?;
            Ok(())
        }
        _ => anyhow::bail!(
            "{}",
            result.error().unwrap_or(crate::domain::chat::GENERATION_FAILED_MESSAGE)
        ),
    }
}

async fn stream_answer(
    service: &ChatService,
    message: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut stream = service.stream_message(message).await;

    while let Some(chunk) = stream.next().await {
        write!(out, "{}", chunk.as_str())?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
