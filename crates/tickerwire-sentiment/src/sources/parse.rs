//! RSS 2.0, RSS 1.0 (RDF) and Atom parsing into [`FeedEntry`] values.

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SentimentError;
use crate::types::FeedEntry;

/// Entries parsed from one feed body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub entries: Vec<FeedEntry>,
    /// Items dropped for lacking a title or a link.
    pub invalid: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Summary,
    Content,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" | b"summary" => Some(Field::Summary),
            b"content" | b"content:encoded" => Some(Field::Content),
            _ => None,
        }
    }
}

#[derive(Default)]
struct PendingEntry {
    title: String,
    link: String,
    summary: String,
    content: String,
}

impl PendingEntry {
    fn push_text(&mut self, field: Field, text: &str) {
        let buf = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
        };
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(text);
    }

    fn finish(self) -> Option<FeedEntry> {
        let title = strip_html(&self.title);
        let link = self.link.trim().to_string();
        if title.is_empty() || link.is_empty() {
            return None;
        }
        let summary = [self.summary, self.content]
            .into_iter()
            .map(|s| strip_html(&s))
            .find(|s| !s.is_empty());
        Some(FeedEntry {
            title,
            link,
            summary,
        })
    }
}

/// Parse a feed body fetched from `url`.
///
/// Items without a title or link are counted in [`ParsedFeed::invalid`]
/// rather than failing the feed.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidFeed`] when the body is not RSS, RDF or
/// Atom, and [`SentimentError::Xml`] when the XML is malformed.
pub fn parse_feed(xml: &str, url: &str) -> Result<ParsedFeed, SentimentError> {
    if !looks_like_feed(xml) {
        return Err(SentimentError::InvalidFeed {
            url: url.to_string(),
            reason: "no rss, rdf or atom root element".to_string(),
        });
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedFeed::default();
    let mut pending: Option<PendingEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                if is_entry_tag(name.as_ref()) {
                    pending = Some(PendingEntry::default());
                    field = None;
                } else if let (Some(entry), None) = (pending.as_mut(), field) {
                    field = Field::from_tag(name.as_ref());
                    if field == Some(Field::Link) {
                        take_link_href(&e, entry);
                    }
                }
            }
            Event::Empty(e) => {
                if let (Some(entry), None) = (pending.as_mut(), field) {
                    if e.name().as_ref() == b"link" {
                        take_link_href(&e, entry);
                    }
                }
            }
            Event::End(e) => {
                let name = e.name();
                if is_entry_tag(name.as_ref()) {
                    field = None;
                    if let Some(entry) = pending.take() {
                        match entry.finish() {
                            Some(entry) => parsed.entries.push(entry),
                            None => parsed.invalid += 1,
                        }
                    }
                } else if field.is_some() && field == Field::from_tag(name.as_ref()) {
                    field = None;
                }
            }
            Event::Text(e) => {
                if let (Some(entry), Some(f)) = (pending.as_mut(), field) {
                    match e.unescape_with(resolve_html5_entity) {
                        Ok(text) => entry.push_text(f, &text),
                        Err(_) => entry.push_text(f, &String::from_utf8_lossy(e.as_ref())),
                    }
                }
            }
            Event::CData(e) => {
                if let (Some(entry), Some(f)) = (pending.as_mut(), field) {
                    entry.push_text(f, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if parsed.invalid > 0 {
        tracing::debug!(
            source = url,
            invalid = parsed.invalid,
            "dropped entries missing title or link"
        );
    }
    Ok(parsed)
}

fn is_entry_tag(name: &[u8]) -> bool {
    name == b"item" || name == b"entry"
}

/// Atom links carry the URL in `href`. Only the first alternate link counts.
fn take_link_href(e: &BytesStart<'_>, entry: &mut PendingEntry) {
    if !entry.link.is_empty() {
        return;
    }
    let mut href: Option<String> = None;
    let mut alternate = true;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"href" => href = attr.unescape_value().ok().map(|v| v.trim().to_string()),
            b"rel" => alternate = attr.value.as_ref() == b"alternate",
            _ => {}
        }
    }
    if let (Some(href), true) = (href, alternate) {
        entry.link = href;
    }
}

/// Cheap sniff for a syndication root element anywhere in the body.
pub(crate) fn looks_like_feed(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    ["<rss", "<feed", "<rdf"].iter().any(|tag| lower.contains(tag))
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
