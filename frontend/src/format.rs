//! Line-oriented rendering of model replies.
//!
//! Replies are split into lines, each non-blank line is classified
//! ([`classify_line`]), and a second pass groups consecutive bullet items into
//! a single list ([`format_response`]). Inline `**bold**` runs are tokenized
//! into [`Fragment`]s. This is a deliberately small subset of markdown: no
//! escaping, no nested emphasis, no links, no code blocks, no wrapped items.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("numbered-line pattern is valid"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("emphasis pattern is valid"));

const BOLD_MARKER: &str = "**";
const BULLET_PREFIX: &str = "* ";

/// A run of inline text, emphasized or literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub emphasized: bool,
    pub text: String,
}

impl Fragment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self { emphasized: false, text: text.into() }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self { emphasized: true, text: text.into() }
    }
}

/// What a single non-blank line of a reply is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Whole line wrapped in `**`; carries the raw line, markers included.
    Heading(&'a str),
    /// `* item`; carries the text after the bullet.
    ListItem(&'a str),
    /// `1. step`; carries the whole line.
    NumberedLine(&'a str),
    Paragraph(&'a str),
}

/// Renderable block produced by [`format_response`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    List(Vec<Vec<Fragment>>),
    Numbered(Vec<Fragment>),
    Paragraph(Vec<Fragment>),
}

/// Classifies one line. Returns `None` for blank lines.
pub fn classify_line(line: &str) -> Option<LineKind<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let kind = if line.starts_with(BOLD_MARKER) && line.ends_with(BOLD_MARKER) {
        LineKind::Heading(line)
    } else if let Some(item) = trimmed.strip_prefix(BULLET_PREFIX) {
        // Item text comes from the trimmed line: indentation and trailing
        // whitespace never reach the rendered `<li>`.
        LineKind::ListItem(item)
    } else if NUMBERED_LINE.is_match(line) {
        LineKind::NumberedLine(line)
    } else {
        LineKind::Paragraph(line)
    };
    Some(kind)
}

/// Splits a line into literal and emphasized runs on `**...**` pairs.
///
/// Unpaired markers stay literal; empty literal runs are dropped.
pub fn tokenize_inline(line: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut cursor = 0;

    for found in EMPHASIS.find_iter(line) {
        push_literal(&mut fragments, &line[cursor..found.start()]);
        fragments.push(Fragment::emphasized(found.as_str().replace(BOLD_MARKER, "")));
        cursor = found.end();
    }
    push_literal(&mut fragments, &line[cursor..]);

    fragments
}

fn push_literal(fragments: &mut Vec<Fragment>, text: &str) {
    if !text.is_empty() {
        fragments.push(Fragment::literal(text));
    }
}

/// Formats a full reply into blocks.
///
/// Consecutive list items share one [`Block::List`]; any other non-blank line
/// closes it. Blank lines are skipped and leave an open list open.
pub fn format_response(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    for kind in text.lines().filter_map(classify_line) {
        match kind {
            LineKind::ListItem(item) => {
                let fragments = tokenize_inline(item);
                match blocks.last_mut() {
                    Some(Block::List(items)) => items.push(fragments),
                    _ => blocks.push(Block::List(vec![fragments])),
                }
            }
            LineKind::Heading(line) => blocks.push(Block::Heading(line.replace(BOLD_MARKER, ""))),
            LineKind::NumberedLine(line) => blocks.push(Block::Numbered(tokenize_inline(line))),
            LineKind::Paragraph(line) => blocks.push(Block::Paragraph(tokenize_inline(line))),
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_a_single_paragraph_fragment() {
        let blocks = format_response("Just some text.");
        assert_eq!(blocks, vec![Block::Paragraph(vec![Fragment::literal("Just some text.")])]);
    }

    #[test]
    fn inline_bold_at_line_start() {
        let blocks = format_response("**Hi** there");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Fragment::emphasized("Hi"),
                Fragment::literal(" there"),
            ])]
        );
    }

    #[test]
    fn consecutive_bullets_share_one_list() {
        let blocks = format_response("* a\n* b");
        assert_eq!(
            blocks,
            vec![Block::List(vec![
                vec![Fragment::literal("a")],
                vec![Fragment::literal("b")],
            ])]
        );
    }

    #[test]
    fn other_lines_close_an_open_list() {
        let blocks = format_response("* a\nbetween\n* b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::List(items) if items.len() == 1));
        assert!(matches!(&blocks[1], Block::Paragraph(_)));
        assert!(matches!(&blocks[2], Block::List(items) if items.len() == 1));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let blocks = format_response("first\n\n   \n* a\n\n* b\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[1], Block::List(items) if items.len() == 2));
    }

    #[test]
    fn whole_bold_line_is_a_heading() {
        assert_eq!(
            format_response("**Getting started**"),
            vec![Block::Heading("Getting started".to_string())]
        );
    }

    #[test]
    fn numbered_lines_keep_their_number() {
        let blocks = format_response("1. Install **Rust**\n10.\tShip it\n3.no space");
        assert_eq!(
            blocks,
            vec![
                Block::Numbered(vec![
                    Fragment::literal("1. Install "),
                    Fragment::emphasized("Rust"),
                ]),
                Block::Numbered(vec![Fragment::literal("10.\tShip it")]),
                Block::Paragraph(vec![Fragment::literal("3.no space")]),
            ]
        );
    }

    #[test]
    fn indented_bullets_and_bold_items() {
        let blocks = format_response("  * **Speed:** fast\n* plain");
        assert_eq!(
            blocks,
            vec![Block::List(vec![
                vec![Fragment::emphasized("Speed:"), Fragment::literal(" fast")],
                vec![Fragment::literal("plain")],
            ])]
        );
    }

    #[test]
    fn list_item_text_drops_surrounding_whitespace() {
        assert_eq!(classify_line("    * nested item   "), Some(LineKind::ListItem("nested item")));
        assert_eq!(
            format_response("\t* tabbed \r\n  * spaced  "),
            vec![Block::List(vec![
                vec![Fragment::literal("tabbed")],
                vec![Fragment::literal("spaced")],
            ])]
        );
    }

    #[test]
    fn classifier_tags_each_kind() {
        assert_eq!(classify_line("   "), None);
        assert_eq!(classify_line("**Title**"), Some(LineKind::Heading("**Title**")));
        assert_eq!(classify_line(" * item"), Some(LineKind::ListItem("item")));
        assert_eq!(classify_line("2. two"), Some(LineKind::NumberedLine("2. two")));
        assert_eq!(classify_line("*not a bullet"), Some(LineKind::Paragraph("*not a bullet")));
    }

    #[test]
    fn unpaired_markers_stay_literal() {
        assert_eq!(
            tokenize_inline("a **b** c **d"),
            vec![
                Fragment::literal("a "),
                Fragment::emphasized("b"),
                Fragment::literal(" c **d"),
            ]
        );
    }
}
