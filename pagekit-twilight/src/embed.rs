use twilight_model::channel::message::embed::{Embed, EmbedFooter};
use twilight_util::builder::embed::EmbedBuilder;

/// Default embed color for embeds the paginator creates itself.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a validated page embed with consistent styling.
pub fn build_page_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
        .validate()?
        .build();

    Ok(embed)
}

/// Embed carrying only a title and/or description overlay.
pub(crate) fn overlay_embed(title: Option<&str>, description: Option<&str>) -> Embed {
    let mut builder = EmbedBuilder::new().color(DEFAULT_EMBED_COLOR);
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }

    builder.build()
}

/// Set the page string as the embed footer.
///
/// A footer of the form `note | Page x of y` keeps its note; any other
/// footer text becomes the note.
pub(crate) fn set_page_footer(embed: &mut Embed, page_string: &str) {
    let text = match embed.footer.as_ref().map(|footer| footer.text.as_str()) {
        Some(existing) if !existing.trim().is_empty() => {
            let note = existing.split('|').next().unwrap_or_default().trim();
            if note.is_empty() {
                page_string.to_owned()
            } else {
                format!("{note} | {page_string}")
            }
        }
        _ => page_string.to_owned(),
    };

    match embed.footer.as_mut() {
        Some(footer) => footer.text = text,
        None => {
            embed.footer = Some(EmbedFooter {
                icon_url: None,
                proxy_icon_url: None,
                text,
            });
        }
    }
}
