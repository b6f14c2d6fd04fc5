//! Plain-text previews of markdown content

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};

/// Characters kept in list and search previews.
pub const EXCERPT_CHARS: usize = 200;

/// Flatten markdown into plain text.
///
/// Markup is dropped, block boundaries become single spaces and runs of
/// whitespace collapse.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();

    for event in MdParser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::Start(Tag::Item) => out.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text preview cut at `max_chars`, with `...` when shortened.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let text = plain_text(markdown);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
