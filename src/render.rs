//! Terminal rendering of weekly notes
//!
//! Notes are parsed with `pulldown_cmark` (strikethrough and task lists
//! enabled) and written back out as plain text. Markdown markers are dropped;
//! when color is on, `colored` styles stand in for them.

use colored::{ColoredString, Colorize};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::note::TODO_MARKER;

const RULE_WIDTH: usize = 40;

/// Renders Markdown text for a terminal
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// `color = false` emits plain text with Markdown markers removed
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, input: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut writer = Writer::new(self.color, input.len());
        for event in Parser::new_ext(input, options) {
            writer.event(event);
        }
        writer.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Heading(usize),
    Strong,
    Emphasis,
    Strikethrough,
    Code,
    CodeBlock,
    Link,
    Quote,
    Marker,
    Done,
}

impl Style {
    fn apply(self, s: ColoredString) -> ColoredString {
        match self {
            Style::Heading(1) => s.bold().underline(),
            Style::Heading(2) => s.bold().cyan(),
            Style::Heading(_) | Style::Strong => s.bold(),
            Style::Emphasis => s.italic(),
            Style::Strikethrough => s.strikethrough(),
            Style::Code => s.reversed(),
            Style::CodeBlock => s.green(),
            Style::Link => s.blue().underline(),
            Style::Quote | Style::Done => s.dimmed(),
            Style::Marker => s.bold().yellow(),
        }
    }
}

struct ListState {
    /// Next number of an ordered list
    next: Option<u64>,
    /// Current item is a checked task
    done: bool,
}

/// Event sink building the rendered text
struct Writer<'a> {
    color: bool,
    out: String,
    styles: Vec<Style>,
    lists: Vec<ListState>,
    link: Option<CowStr<'a>>,
    /// Bullet of the current item, written before its first text
    marker: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    at_line_start: bool,
    /// A blank line is owed before the next block
    gap: bool,
}

impl<'a> Writer<'a> {
    fn new(color: bool, capacity: usize) -> Self {
        Self {
            color,
            out: String::with_capacity(capacity),
            styles: Vec::new(),
            lists: Vec::new(),
            link: None,
            marker: None,
            quote_depth: 0,
            in_code_block: false,
            at_line_start: true,
            gap: false,
        }
    }

    fn event(&mut self, event: Event<'a>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                let marker = self.styles.is_empty()
                    && self.lists.is_empty()
                    && text.trim_end() == TODO_MARKER;
                if marker {
                    self.styled(Style::Marker, &text);
                } else {
                    self.write(&text);
                }
            }
            Event::Code(text) => self.styled(Style::Code, &text),
            Event::Html(html) | Event::InlineHtml(html) => self.write(&html),
            Event::SoftBreak | Event::HardBreak => self.end_line(),
            Event::Rule => {
                self.block_gap();
                self.styled(Style::Quote, &"─".repeat(RULE_WIDTH));
                self.end_line();
                self.gap = true;
            }
            Event::TaskListMarker(checked) => {
                let checkbox = if checked { "☑ " } else { "☐ " };
                if let Some(list) = self.lists.last_mut() {
                    list.done = checked;
                }
                if self.marker.is_some() {
                    self.marker = Some(checkbox.to_string());
                } else {
                    self.write(checkbox);
                }
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'a>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.block_gap();
                self.styles.push(Style::Heading(level as usize));
            }
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else if self.marker.is_none() {
                    self.end_line();
                }
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.flush_marker();
                    self.end_line();
                }
                self.lists.push(ListState {
                    next: start,
                    done: false,
                });
            }
            Tag::Item => {
                self.end_line();
                let bullet = match self.lists.last_mut() {
                    Some(list) => {
                        list.done = false;
                        match list.next.as_mut() {
                            Some(n) => {
                                let bullet = format!("{n}. ");
                                *n += 1;
                                bullet
                            }
                            None => "• ".to_string(),
                        }
                    }
                    None => "• ".to_string(),
                };
                self.marker = Some(bullet);
            }
            Tag::CodeBlock(_) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.flush_marker();
                    self.end_line();
                }
                self.in_code_block = true;
                self.styles.push(Style::CodeBlock);
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
                self.styles.push(Style::Quote);
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url);
                self.styles.push(Style::Link);
            }
            Tag::Strong => self.styles.push(Style::Strong),
            Tag::Emphasis => self.styles.push(Style::Emphasis),
            Tag::Strikethrough => self.styles.push(Style::Strikethrough),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.end_line();
                self.gap = true;
            }
            TagEnd::Paragraph => {
                self.end_line();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.end_line();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::Item => {
                self.flush_marker();
                self.end_line();
            }
            TagEnd::CodeBlock => {
                self.styles.pop();
                self.in_code_block = false;
                self.end_line();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::BlockQuote(_) => {
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.end_line();
                self.gap = true;
            }
            TagEnd::Link => {
                self.styles.pop();
                // In-document anchors carry no useful target.
                if let Some(url) = self.link.take()
                    && !url.starts_with('#')
                {
                    self.write(&format!(" ({url})"));
                }
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> String {
        self.end_line();
        self.out
    }

    fn styled(&mut self, style: Style, text: &str) {
        self.styles.push(style);
        self.write(text);
        self.styles.pop();
    }

    /// Append inline text, prefixing every new line with its indentation
    fn write(&mut self, text: &str) {
        for piece in text.split_inclusive('\n') {
            let (line, newline) = match piece.strip_suffix('\n') {
                Some(line) => (line, true),
                None => (piece, false),
            };
            if self.at_line_start && !(line.is_empty() && newline && self.in_code_block) {
                self.line_prefix();
            }
            let painted = self.paint(line);
            self.out.push_str(&painted);
            if newline {
                self.out.push('\n');
                self.at_line_start = true;
            } else if !line.is_empty() {
                self.at_line_start = false;
            }
        }
    }

    fn line_prefix(&mut self) {
        self.out.push_str(&"│ ".repeat(self.quote_depth));
        let depth = self.lists.len();
        match self.marker.take() {
            Some(bullet) => {
                self.out.push_str(&"  ".repeat(depth.saturating_sub(1)));
                self.out.push_str(&bullet);
            }
            None => self.out.push_str(&"  ".repeat(depth)),
        }
        if self.in_code_block {
            self.out.push_str("    ");
        }
        self.at_line_start = false;
    }

    /// Write a pending bullet for an item with no text of its own
    fn flush_marker(&mut self) {
        if self.marker.is_some() {
            self.line_prefix();
        }
    }

    fn end_line(&mut self) {
        if !self.at_line_start {
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    fn block_gap(&mut self) {
        self.end_line();
        if self.gap && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.gap = false;
    }

    fn paint(&self, text: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        let done = self.lists.last().is_some_and(|list| list.done);
        self.styles
            .iter()
            .copied()
            .chain(done.then_some(Style::Done))
            .fold(text.normal(), |s, style| style.apply(s))
            .to_string()
    }
}
