//! Page content shapes and rendering into message payloads.

use pagekit_core::{PageRenderer, PaginatorOptions, Position};
use twilight_model::channel::message::{component::Component, embed::Embed};

use crate::embed::{overlay_embed, set_page_footer};

/// One page as the host message understands it.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    /// Message content text.
    Text(String),
    /// A single embed.
    Embed(Embed),
    /// Explicit message fields.
    Message {
        content: Option<String>,
        embeds: Vec<Embed>,
    },
    /// Several units flattened onto the same page.
    Many(Vec<PageContent>),
}

impl From<String> for PageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Embed> for PageContent {
    fn from(embed: Embed) -> Self {
        Self::Embed(embed)
    }
}

/// Pages that [`ContentRenderer`] knows how to display.
pub trait ToPageContent {
    fn to_page_content(&self) -> PageContent;
}

impl ToPageContent for PageContent {
    fn to_page_content(&self) -> PageContent {
        self.clone()
    }
}

impl ToPageContent for String {
    fn to_page_content(&self) -> PageContent {
        PageContent::Text(self.clone())
    }
}

impl ToPageContent for &str {
    fn to_page_content(&self) -> PageContent {
        PageContent::Text((*self).to_owned())
    }
}

impl ToPageContent for Embed {
    fn to_page_content(&self) -> PageContent {
        PageContent::Embed(self.clone())
    }
}

impl<T: ToPageContent> ToPageContent for Vec<T> {
    fn to_page_content(&self) -> PageContent {
        PageContent::Many(self.iter().map(ToPageContent::to_page_content).collect())
    }
}

/// Everything needed to send or edit a paginator message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<Component>,
}

impl MessagePayload {
    /// Add a page's content; text joins existing text on a new line.
    pub fn push(&mut self, page: PageContent) {
        match page {
            PageContent::Text(text) => self.push_text(&text),
            PageContent::Embed(embed) => self.embeds.push(embed),
            PageContent::Message { content, embeds } => {
                if let Some(text) = content {
                    self.push_text(&text);
                }
                self.embeds.extend(embeds);
            }
            PageContent::Many(pages) => {
                for page in pages {
                    self.push(page);
                }
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.content.as_mut() {
            Some(content) => {
                content.push('\n');
                content.push_str(text);
            }
            None => self.content = Some(text.to_owned()),
        }
    }

    /// Attach `Page n of m`: to every embed footer when there are embeds,
    /// otherwise as the last content line.
    pub fn add_page_string(&mut self, position: Position) {
        let page_string = position.page_string();

        if !self.embeds.is_empty() {
            for embed in &mut self.embeds {
                set_page_footer(embed, &page_string);
            }
            return;
        }

        self.push_text(&page_string);
    }

    /// Apply a fixed title/description on top of the page.
    pub fn add_overlay(&mut self, title: Option<&str>, description: Option<&str>) {
        if title.is_none() && description.is_none() {
            return;
        }

        if let Some(content) = self.content.as_mut() {
            // Description above the bold title, both above the page.
            let mut header = String::new();
            if let Some(description) = description {
                header.push_str(description);
                header.push('\n');
            }
            if let Some(title) = title {
                header.push_str(&format!("**{title}**\n"));
            }
            content.insert_str(0, &header);
        } else if let Some(embed) = self.embeds.first_mut() {
            if let Some(title) = title {
                embed.title = Some(title.to_owned());
            }
            if let Some(description) = description {
                embed.description = Some(description.to_owned());
            }
        } else {
            self.embeds.push(overlay_embed(title, description));
        }
    }
}

/// Default renderer for pages that implement [`ToPageContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRenderer {
    pub add_page_string: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self {
            add_page_string: true,
            title: None,
            description: None,
        }
    }
}

impl ContentRenderer {
    pub fn from_options(options: &PaginatorOptions) -> Self {
        Self {
            add_page_string: options.add_page_string,
            title: options.title.clone(),
            description: options.description.clone(),
        }
    }
}

impl<P: ToPageContent> PageRenderer<P> for ContentRenderer {
    type Output = MessagePayload;

    fn render(&self, page: &P, position: Position) -> MessagePayload {
        let mut payload = MessagePayload::default();
        payload.push(page.to_page_content());
        payload.add_overlay(self.title.as_deref(), self.description.as_deref());

        if self.add_page_string {
            payload.add_page_string(position);
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use pagekit_core::Paginator;

    use super::*;
    use crate::embed::build_page_embed;

    fn at(index: usize, total: usize) -> Position {
        Position { index, total }
    }

    #[test]
    fn text_page_gets_page_string_line() {
        let payload = ContentRenderer::default().render(&"hello", at(0, 3));
        assert_eq!(payload.content.as_deref(), Some("hello\nPage 1 of 3"));
        assert!(payload.embeds.is_empty());
    }

    #[test]
    fn page_string_can_be_turned_off() {
        let renderer = ContentRenderer {
            add_page_string: false,
            ..ContentRenderer::default()
        };
        let payload = renderer.render(&"hello".to_owned(), at(1, 3));
        assert_eq!(payload.content.as_deref(), Some("hello"));
    }

    #[test]
    fn embed_page_gets_page_string_footer() {
        let embed = build_page_embed("Rules", "No spam.").unwrap();
        let payload = ContentRenderer::default().render(&embed, at(1, 2));
        assert_eq!(payload.content, None);
        assert_eq!(
            payload.embeds[0].footer.as_ref().map(|f| f.text.as_str()),
            Some("Page 2 of 2")
        );
    }

    #[test]
    fn sequences_flatten_onto_one_page() {
        let page = vec![
            PageContent::from("first"),
            PageContent::from(build_page_embed("e", "d").unwrap()),
            PageContent::Message {
                content: Some("second".to_owned()),
                embeds: Vec::new(),
            },
        ];
        let renderer = ContentRenderer {
            add_page_string: false,
            ..ContentRenderer::default()
        };
        let payload = renderer.render(&page, at(0, 1));
        assert_eq!(payload.content.as_deref(), Some("first\nsecond"));
        assert_eq!(payload.embeds.len(), 1);
    }

    #[test]
    fn overlay_prefixes_text_pages() {
        let renderer = ContentRenderer {
            add_page_string: true,
            title: Some("Catalog".to_owned()),
            description: Some("All items".to_owned()),
        };
        let payload = renderer.render(&"item", at(0, 2));
        assert_eq!(
            payload.content.as_deref(),
            Some("All items\n**Catalog**\nitem\nPage 1 of 2")
        );
    }

    #[test]
    fn overlay_sets_first_embed_fields() {
        let renderer = ContentRenderer {
            add_page_string: false,
            title: Some("Override".to_owned()),
            description: None,
        };
        let embed = build_page_embed("Original", "Body").unwrap();
        let payload = renderer.render(&embed, at(0, 1));
        assert_eq!(payload.embeds[0].title.as_deref(), Some("Override"));
        assert_eq!(payload.embeds[0].description.as_deref(), Some("Body"));
    }

    #[test]
    fn overlay_creates_embed_for_empty_pages() {
        let mut payload = MessagePayload::default();
        payload.add_overlay(Some("Only title"), None);
        assert_eq!(payload.embeds.len(), 1);
        assert_eq!(payload.embeds[0].title.as_deref(), Some("Only title"));
    }

    #[test]
    fn paginator_renders_through_content_renderer() {
        let mut paginator = Paginator::new(["a", "b", "c"]).unwrap();
        paginator.last();
        let payload = paginator.render(&ContentRenderer::default());
        assert_eq!(payload.content.as_deref(), Some("c\nPage 3 of 3"));
    }
}
