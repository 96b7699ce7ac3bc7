use pagekit_core::{Paginator, PaginatorError};
use pagekit_twilight::{SelectControls, Session, build_page_embed};
use twilight_model::{
    channel::message::embed::Embed, gateway::payload::incoming::MessageCreate,
};

use super::CommandMeta;
use crate::context::Context;

pub const META: CommandMeta = CommandMeta {
    name: "catalog",
    desc: "Browse named embed pages with a select menu.",
    usage: "!catalog [name]",
};

const ENTRIES: [(&str, &str); 5] = [
    ("Overview", "Everything in the catalog, one entry per page."),
    ("Buttons", "First, previous, next, last and stop controls."),
    ("Select menus", "Pick any page by name from a dropdown."),
    ("Jump modal", "Press the page indicator and type a number."),
    ("Timeouts", "Sessions end after a period without interaction."),
];

/// Select-menu paginator over keyed embeds, optionally opened at `[name]`.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let mut paginator = Paginator::keyed(build_entries()?)?;

    if let Some(name) = arg1 {
        match paginator.jump_to(name) {
            Ok(_) => {}
            Err(PaginatorError::UnknownKey(_)) => {
                let out = unknown_entry_message(name, paginator.collection().keys());
                http.create_message(msg.channel_id).content(&out).await?;
                return Ok(());
            }
            Err(source) => return Err(source.into()),
        }
    }

    let session = Session::from_content(paginator, ctx.config.paginator.clone())
        .with_controls(SelectControls::default().placeholder("Select an entry"))
        .with_access(ctx.access_for(msg.author.id.get()));

    ctx.registry.send(msg.channel_id, session).await?;

    Ok(())
}

fn build_entries() -> anyhow::Result<Vec<(&'static str, Embed)>> {
    ENTRIES
        .into_iter()
        .map(|(name, body)| Ok((name, build_page_embed(name, body)?)))
        .collect()
}

fn unknown_entry_message(name: &str, keys: Option<&[String]>) -> String {
    let available = keys.map(|keys| keys.join(", ")).unwrap_or_default();
    format!("No catalog entry named `{name}`. Available: {available}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_addressable_by_name() {
        let mut paginator = Paginator::keyed(build_entries().unwrap()).unwrap();
        paginator.jump_to("Jump modal").unwrap();
        assert_eq!(paginator.index(), 3);
        assert_eq!(paginator.current().title.as_deref(), Some("Jump modal"));
    }

    #[test]
    fn unknown_names_list_the_choices() {
        let keys = vec!["A".to_owned(), "B".to_owned()];
        assert_eq!(
            unknown_entry_message("C", Some(keys.as_slice())),
            "No catalog entry named `C`. Available: A, B."
        );
    }
}
