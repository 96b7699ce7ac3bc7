pub mod catalog;
pub mod chunks;
pub mod pages;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::context::Context;

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    pages::META,
    catalog::META,
    chunks::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.trim();
    let Some(content) = content.strip_prefix(COMMAND_PREFIX) else {
        return Ok(());
    };

    let mut command_and_rest = content.trim().splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let arg1 = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned);
    let arg1 = arg1.as_deref();

    match cmd.as_str() {
        "pages" => pages::run(ctx, msg, arg1).await?,
        "catalog" => catalog::run(ctx, msg, arg1).await?,
        "chunks" => chunks::run(ctx, msg, arg1).await?,
        "help" => {
            ctx.http
                .create_message(msg.channel_id)
                .content(&help_text())
                .await?;
        }
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let handled = ctx.registry.handle_interaction(&interaction).await?;
    if !handled {
        debug!(interaction_id = interaction.id.get(), "unhandled interaction");
    }

    Ok(())
}

fn help_text() -> String {
    COMMANDS
        .iter()
        .map(|meta| format!("`{}` {}", meta.usage, meta.desc))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse an optional one-based page argument into a zero-based index.
pub(crate) fn parse_start_page(arg: Option<&str>) -> Option<usize> {
    match arg {
        None => Some(0),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|page| page.checked_sub(1)),
    }
}

/// Message sent when a start page is past the end.
pub(crate) fn out_of_range_message(requested: usize, total: usize) -> String {
    format!("Page {requested} does not exist. Available pages: 1-{total}.")
}
