use digest_core::{normalize_url, PreviewRecord};
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::ExtractError;

/// Turns fetched markup into preview records and article text.
pub trait Extractor: Send + Sync {
    /// Previews in document order, collected eagerly; entries without title
    /// or link are skipped. [`HabrExtractor::listing`] offers a lazy pass.
    fn extract_previews(&self, html: &str, base_url: &Url) -> Vec<PreviewRecord>;

    /// Body text of the primary content container.
    fn extract_full_text(&self, html: &str) -> Result<String, ExtractError>;
}

/// CSS selectors describing a listing page and its article pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub entry: String,
    pub title_link: String,
    pub preview: String,
    pub date: String,
    /// Tried in order; the first container found wins.
    pub content: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            entry: "article".to_string(),
            title_link: "h2 a".to_string(),
            preview: "div.article-formatted-body".to_string(),
            date: "time".to_string(),
            content: vec![
                "div.tm-article-body".to_string(),
                "div.article-formatted-body".to_string(),
            ],
        }
    }
}

#[derive(Debug)]
struct CompiledLayout {
    entry: Selector,
    title_link: Selector,
    preview: Selector,
    date: Selector,
    content: Vec<Selector>,
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// Selector-driven extractor for Habr-style listings.
#[derive(Debug)]
pub struct HabrExtractor {
    layout: CompiledLayout,
}

impl HabrExtractor {
    pub fn new(layout: &PageLayout) -> Result<Self, ExtractError> {
        let content = layout
            .content
            .iter()
            .map(|selector| compile(selector))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            layout: CompiledLayout {
                entry: compile(&layout.entry)?,
                title_link: compile(&layout.title_link)?,
                preview: compile(&layout.preview)?,
                date: compile(&layout.date)?,
                content,
            },
        })
    }

    /// Parses a listing once; previews are then produced lazily.
    pub fn listing<'a>(&'a self, html: &str, base_url: &Url) -> ListingDocument<'a> {
        ListingDocument {
            document: Html::parse_document(html),
            layout: &self.layout,
            base_url: base_url.clone(),
        }
    }
}

impl Default for HabrExtractor {
    fn default() -> Self {
        Self::new(&PageLayout::default()).expect("built-in selectors are valid")
    }
}

impl Extractor for HabrExtractor {
    fn extract_previews(&self, html: &str, base_url: &Url) -> Vec<PreviewRecord> {
        self.listing(html, base_url).previews().collect()
    }

    fn extract_full_text(&self, html: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(html);
        self.layout
            .content
            .iter()
            .find_map(|selector| document.select(selector).next())
            .map(collect_text)
            .ok_or(ExtractError::NoContentContainer)
    }
}

pub struct ListingDocument<'a> {
    document: Html,
    layout: &'a CompiledLayout,
    base_url: Url,
}

impl ListingDocument<'_> {
    /// Single pass over the entries in document order.
    pub fn previews(&self) -> impl Iterator<Item = PreviewRecord> + '_ {
        self.document
            .select(&self.layout.entry)
            .filter_map(move |entry| self.preview_from(entry))
    }

    fn preview_from(&self, entry: ElementRef<'_>) -> Option<PreviewRecord> {
        let link = entry.select(&self.layout.title_link).next()?;
        let title = collect_text(link);
        if title.is_empty() {
            return None;
        }
        let url = normalize_url(link.value().attr("href")?, &self.base_url)?;
        let preview_text = entry
            .select(&self.layout.preview)
            .next()
            .map(collect_text)
            .unwrap_or_default();
        let published_at = entry
            .select(&self.layout.date)
            .next()
            .map(display_date)
            .unwrap_or_default();
        Some(PreviewRecord::new(title, url.as_str(), published_at, preview_text))
    }
}

/// The `title` attribute carries the human readable date; `datetime` and the
/// element text are fallbacks.
fn display_date(element: ElementRef<'_>) -> String {
    ["title", "datetime"]
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| collect_text(element))
}

/// Visible text under `element` with whitespace collapsed. Script-like
/// subtrees are skipped and block elements act as separators.
fn collect_text(element: ElementRef<'_>) -> String {
    let mut collector = TextCollector::default();
    for child in element.children() {
        collector.visit_node(child);
    }
    collector.finish()
}

#[derive(Default)]
struct TextCollector {
    builder: String,
    last_char: Option<char>,
}

impl TextCollector {
    fn visit_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.append_text(text),
            Node::Element(element) => match element.name().to_ascii_lowercase().as_str() {
                "script" | "style" | "noscript" | "template" | "iframe" => {}
                "br" | "hr" | "p" | "div" | "section" | "article" | "li" | "ul" | "ol"
                | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre" | "figure"
                | "figcaption" | "table" | "tr" | "td" | "th" => {
                    self.separate();
                    self.visit_children(node);
                    self.separate();
                }
                _ => self.visit_children(node),
            },
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.visit_node(child);
        }
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.separate();
            } else {
                self.builder.push(ch);
                self.last_char = Some(ch);
            }
        }
    }

    fn separate(&mut self) {
        if self.builder.is_empty() || self.last_char == Some(' ') {
            return;
        }
        self.builder.push(' ');
        self.last_char = Some(' ');
    }

    fn finish(self) -> String {
        self.builder.trim_end().to_string()
    }
}
