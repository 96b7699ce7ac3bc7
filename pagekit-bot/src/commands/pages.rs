use pagekit_core::{Paginator, PaginatorError};
use pagekit_twilight::{ButtonControls, Session};
use twilight_model::gateway::payload::incoming::MessageCreate;

use super::{CommandMeta, out_of_range_message, parse_start_page};
use crate::context::Context;

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Browse text pages with buttons.",
    usage: "!pages [page]",
};

const PAGE_COUNT: usize = 8;

/// Button paginator over plain text pages, optionally opened at `[page]`.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(start) = parse_start_page(arg1) else {
        let usage = format!("Usage: `{}` (page starts at 1)", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let paginator = match Paginator::with_start(build_pages(), start) {
        Ok(paginator) => paginator,
        Err(PaginatorError::IndexOutOfRange { index, len }) => {
            let out = out_of_range_message(index + 1, len);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
        Err(source) => return Err(source.into()),
    };

    let session = Session::from_content(paginator, ctx.config.paginator.clone())
        .with_controls(ButtonControls::default())
        .with_access(ctx.access_for(msg.author.id.get()));

    ctx.registry.send(msg.channel_id, session).await?;

    Ok(())
}

fn build_pages() -> Vec<String> {
    (1..=PAGE_COUNT)
        .map(|index| format!("This is text page #{index}. Use the buttons below to move around."))
        .collect()
}
