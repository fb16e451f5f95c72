// PlantCare - core/markdown.rs
//
// Markdown article model. The service returns GitHub-flavoured markdown;
// this module turns it into a tree of blocks and styled spans that the UI
// layer can draw without knowing anything about markdown syntax.
//
// Raw HTML (block and inline) is dropped rather than shown as source.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::iter::Peekable;

/// Parser options shared by rendering and HTML export.
pub fn gfm_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Inline styling flags for a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// A run of text sharing one style and link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
            link: None,
        }
    }
}

/// One list item; `checked` is set for task-list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub blocks: Vec<Block>,
}

/// Block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    /// `start` is the first number of an ordered list, `None` for bullets.
    List { start: Option<u64>, items: Vec<ListItem> },
    CodeBlock { language: Option<String>, code: String },
    Quote(Vec<Block>),
    Table { header: Vec<Vec<Span>>, rows: Vec<Vec<Vec<Span>>> },
    Rule,
}

/// A parsed article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Parse GitHub-flavoured markdown.
    pub fn parse(markdown: &str) -> Self {
        let parser = Parser::new_ext(markdown, gfm_options());
        let mut builder = Builder {
            events: parser.peekable(),
            depth: StyleDepth::default(),
            links: Vec::new(),
            task_marker: None,
        };
        Self {
            blocks: builder.blocks(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of the first top-level heading, if any.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { spans, .. } => {
                let text = spans_text(spans);
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        })
    }
}

/// Concatenated text of a span run, without styling.
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

// =============================================================================
// Event-stream builder
// =============================================================================

/// Open-tag counters; the same style can nest (`**a **b** c**`).
#[derive(Debug, Default)]
struct StyleDepth {
    strong: u32,
    emphasis: u32,
    strikethrough: u32,
}

impl StyleDepth {
    fn style(&self, code: bool) -> SpanStyle {
        SpanStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            code,
        }
    }
}

struct Builder<I: Iterator> {
    events: Peekable<I>,
    depth: StyleDepth,
    links: Vec<String>,
    /// Task marker seen inside the item currently being built.
    task_marker: Option<bool>,
}

impl<'a, I: Iterator<Item = Event<'a>>> Builder<I> {
    /// Collect blocks until the enclosing container ends (its End event is
    /// consumed) or the stream runs out.
    fn blocks(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();

        loop {
            if self.peek_is_inline() {
                // Tight list items carry inline content with no paragraph.
                let spans = self.inlines();
                if !spans.is_empty() {
                    blocks.push(Block::Paragraph(spans));
                }
                continue;
            }

            let Some(event) = self.events.next() else {
                break;
            };

            match event {
                Event::End(_) => break,
                Event::Start(Tag::Paragraph) => {
                    let spans = self.inlines();
                    self.events.next();
                    if !spans.is_empty() {
                        blocks.push(Block::Paragraph(spans));
                    }
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    let spans = self.inlines();
                    self.events.next();
                    blocks.push(Block::Heading {
                        level: level as u8,
                        spans,
                    });
                }
                Event::Start(Tag::BlockQuote(_)) => {
                    let inner = self.blocks();
                    blocks.push(Block::Quote(inner));
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    let code = self.raw_text();
                    blocks.push(Block::CodeBlock { language, code });
                }
                Event::Start(Tag::List(start)) => {
                    let items = self.list_items();
                    blocks.push(Block::List { start, items });
                }
                Event::Start(Tag::Table(_)) => {
                    blocks.push(self.table());
                }
                Event::Rule => blocks.push(Block::Rule),
                Event::Start(_) => self.skip_container(),
                _ => {}
            }
        }

        blocks
    }

    /// Collect styled spans until the next event that is not inline content.
    /// The terminating event is left in the stream.
    fn inlines(&mut self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();

        while self.peek_is_inline() {
            let Some(event) = self.events.next() else {
                break;
            };
            match event {
                Event::Text(text) => self.push_text(&mut spans, &text, false),
                Event::Code(text) => self.push_text(&mut spans, &text, true),
                Event::SoftBreak => self.push_text(&mut spans, " ", false),
                Event::HardBreak => self.push_text(&mut spans, "\n", false),
                Event::FootnoteReference(label) => {
                    self.push_text(&mut spans, &format!("[{label}]"), false)
                }
                Event::TaskListMarker(checked) => self.task_marker = Some(checked),
                Event::Start(Tag::Emphasis) => self.depth.emphasis += 1,
                Event::End(TagEnd::Emphasis) => {
                    self.depth.emphasis = self.depth.emphasis.saturating_sub(1)
                }
                Event::Start(Tag::Strong) => self.depth.strong += 1,
                Event::End(TagEnd::Strong) => self.depth.strong = self.depth.strong.saturating_sub(1),
                Event::Start(Tag::Strikethrough) => self.depth.strikethrough += 1,
                Event::End(TagEnd::Strikethrough) => {
                    self.depth.strikethrough = self.depth.strikethrough.saturating_sub(1)
                }
                Event::Start(Tag::Link { dest_url, .. })
                | Event::Start(Tag::Image { dest_url, .. }) => {
                    self.links.push(dest_url.into_string())
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    self.links.pop();
                }
                _ => {}
            }
        }

        spans
    }

    fn peek_is_inline(&mut self) -> bool {
        matches!(
            self.events.peek(),
            Some(
                Event::Text(_)
                    | Event::Code(_)
                    | Event::SoftBreak
                    | Event::HardBreak
                    | Event::InlineHtml(_)
                    | Event::FootnoteReference(_)
                    | Event::TaskListMarker(_)
                    | Event::Start(
                        Tag::Emphasis
                            | Tag::Strong
                            | Tag::Strikethrough
                            | Tag::Link { .. }
                            | Tag::Image { .. }
                    )
                    | Event::End(
                        TagEnd::Emphasis
                            | TagEnd::Strong
                            | TagEnd::Strikethrough
                            | TagEnd::Link
                            | TagEnd::Image
                    )
            )
        )
    }

    fn push_text(&self, spans: &mut Vec<Span>, text: &str, code: bool) {
        let style = self.depth.style(code);
        let link = self.links.last().cloned();
        if let Some(last) = spans.last_mut() {
            if last.style == style && last.link == link {
                last.text.push_str(text);
                return;
            }
        }
        spans.push(Span {
            text: text.to_string(),
            style,
            link,
        });
    }

    fn list_items(&mut self) -> Vec<ListItem> {
        let mut items = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::Item) => {
                    let outer = self.task_marker.take();
                    let blocks = self.blocks();
                    let checked = self.task_marker.take();
                    self.task_marker = outer;
                    items.push(ListItem { checked, blocks });
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        items
    }

    fn table(&mut self) -> Block {
        let mut header = Vec::new();
        let mut rows = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableHead) => header = self.table_cells(),
                Event::Start(Tag::TableRow) => rows.push(self.table_cells()),
                Event::End(_) => break,
                _ => {}
            }
        }
        Block::Table { header, rows }
    }

    fn table_cells(&mut self) -> Vec<Vec<Span>> {
        let mut cells = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableCell) => {
                    cells.push(self.inlines());
                    self.events.next();
                }
                Event::End(_) => break,
                _ => {}
            }
        }
        cells
    }

    /// Concatenate text up to the matching End (consumed).
    fn raw_text(&mut self) -> String {
        let mut out = String::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Text(text) => out.push_str(&text),
                Event::End(_) => break,
                _ => {}
            }
        }
        out
    }

    /// Discard everything up to and including the End matching an
    /// already-consumed Start.
    fn skip_container(&mut self) {
        let mut depth = 1usize;
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong(text: &str) -> Span {
        Span {
            text: text.to_string(),
            style: SpanStyle {
                strong: true,
                ..SpanStyle::default()
            },
            link: None,
        }
    }

    #[test]
    fn test_heading_and_styled_paragraph() {
        let doc = Document::parse("# Aloe Vera\n\nWater **sparingly**.");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    spans: vec![Span::plain("Aloe Vera")],
                },
                Block::Paragraph(vec![
                    Span::plain("Water "),
                    strong("sparingly"),
                    Span::plain("."),
                ]),
            ]
        );
        assert_eq!(doc.title().as_deref(), Some("Aloe Vera"));
    }

    #[test]
    fn test_nested_strong_keeps_outer_style() {
        let doc = Document::parse("**a **b** c**");
        assert_eq!(doc.blocks, vec![Block::Paragraph(vec![strong("a b c")])]);
    }

    #[test]
    fn test_emphasis_inside_strong() {
        let doc = Document::parse("**bold *both* bold**");
        let Block::Paragraph(spans) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans.iter().all(|s| s.style.strong));
        assert_eq!(spans[1].text, "both");
        assert!(spans[1].style.emphasis);
        assert_eq!(spans[2], strong(" bold"));
    }

    #[test]
    fn test_soft_breaks_join_with_space() {
        let doc = Document::parse("Bright light\nbut not direct.");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph(vec![Span::plain(
                "Bright light but not direct."
            )])]
        );
    }

    #[test]
    fn test_tight_bullet_list() {
        let doc = Document::parse("- Sandy soil\n- Terracotta pot\n");
        assert_eq!(
            doc.blocks,
            vec![Block::List {
                start: None,
                items: vec![
                    ListItem {
                        checked: None,
                        blocks: vec![Block::Paragraph(vec![Span::plain("Sandy soil")])],
                    },
                    ListItem {
                        checked: None,
                        blocks: vec![Block::Paragraph(vec![Span::plain("Terracotta pot")])],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_ordered_list_start_and_nesting() {
        let doc = Document::parse("3. Water\n   - weekly\n4. Feed\n");
        let Block::List { start, items } = &doc.blocks[0] else {
            panic!("expected list, got {:?}", doc.blocks);
        };
        assert_eq!(*start, Some(3));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].blocks.len(), 2);
        assert!(matches!(items[0].blocks[1], Block::List { start: None, .. }));
    }

    #[test]
    fn test_task_list_markers() {
        let doc = Document::parse("- [x] Repot\n- [ ] Prune\n");
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0].checked, Some(true));
        assert_eq!(items[1].checked, Some(false));
        assert_eq!(
            items[1].blocks,
            vec![Block::Paragraph(vec![Span::plain("Prune")])]
        );
    }

    #[test]
    fn test_table() {
        let doc = Document::parse("| Need | Level |\n|---|---|\n| Light | High |\n| Water | Low |\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                header: vec![vec![Span::plain("Need")], vec![Span::plain("Level")]],
                rows: vec![
                    vec![vec![Span::plain("Light")], vec![Span::plain("High")]],
                    vec![vec![Span::plain("Water")], vec![Span::plain("Low")]],
                ],
            }]
        );
    }

    #[test]
    fn test_code_block_language_and_text() {
        let doc = Document::parse("```text\npH 6.0-7.0\n```\n");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                language: Some("text".to_string()),
                code: "pH 6.0-7.0\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_links_strikethrough_and_inline_code() {
        let doc = Document::parse("See [guide](https://example.org) ~~not~~ `NPK`");
        let Block::Paragraph(spans) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans[0], Span::plain("See "));
        assert_eq!(spans[1].text, "guide");
        assert_eq!(spans[1].link.as_deref(), Some("https://example.org"));
        assert!(spans.iter().any(|s| s.text == "not" && s.style.strikethrough));
        assert!(spans.iter().any(|s| s.text == "NPK" && s.style.code));
    }

    #[test]
    fn test_quote_rule_and_dropped_html() {
        let doc = Document::parse("> Keep away from pets.\n\n---\n\n<div>raw</div>\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Quote(vec![Block::Paragraph(vec![Span::plain(
                    "Keep away from pets."
                )])]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let doc = Document::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.title(), None);
    }
}
