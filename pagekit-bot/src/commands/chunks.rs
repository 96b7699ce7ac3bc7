use pagekit_core::Paginator;
use pagekit_twilight::{ButtonControls, ButtonSelectControls, SelectControls, Session};
use twilight_model::gateway::payload::incoming::MessageCreate;

use super::CommandMeta;
use crate::context::Context;

pub const META: CommandMeta = CommandMeta {
    name: "chunks",
    desc: "Browse a long list grouped into pages.",
    usage: "!chunks [per_page]",
};

const ITEM_COUNT: usize = 120;
const DEFAULT_PER_PAGE: usize = 4;

/// Buttons plus a grouped select menu over a long list split into chunks.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let per_page = match arg1 {
        None => DEFAULT_PER_PAGE,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(per_page) if (1..=ITEM_COUNT).contains(&per_page) => per_page,
            _ => {
                let out = format!("Usage: `{}` (1-{ITEM_COUNT} items per page)", META.usage);
                http.create_message(msg.channel_id).content(&out).await?;
                return Ok(());
            }
        },
    };

    let paginator = Paginator::chunked(build_items(), per_page)?;
    let controls = ButtonSelectControls {
        select: SelectControls::default(),
        buttons: ButtonControls::default(),
    };

    let session = Session::from_content(paginator, ctx.config.paginator.clone())
        .with_controls(controls)
        .with_access(ctx.access_for(msg.author.id.get()));

    ctx.registry.send(msg.channel_id, session).await?;

    Ok(())
}

fn build_items() -> Vec<String> {
    (1..=ITEM_COUNT)
        .map(|index| format!("Sample item #{index}"))
        .collect()
}
