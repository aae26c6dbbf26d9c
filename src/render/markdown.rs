//! Renderer for the Markdown the coaching prompt asks the model to write.
//!
//! Supports `###`/`##` headings, ordered and unordered lists, pipe tables,
//! horizontal rules, paragraphs and inline bold/italic/code/links. There is no
//! nesting, so a single pass over the lines with a little state is enough.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));

/// Single asterisks with no asterisk inside
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").expect("valid regex"));

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

/// Only web and in-page targets become links
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(((?:https?://|/|#)[^)\s]*)\)").expect("valid regex")
});

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("valid regex"));

static SEPARATOR_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s:-]+$").expect("valid regex"));

static EMPTY_PARAGRAPHS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<p>\s*</p>\s*)+").expect("valid regex"));

static BREAK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br>\s*){3,}").expect("valid regex"));

static DOUBLE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br>\s*){2,}").expect("valid regex"));

/// What a blank line turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// Blank lines only end lists
    #[default]
    Skip,
    /// Blank lines also emit `<br>`, with runs collapsed to one
    LineBreak,
}

/// Converts model Markdown to an HTML fragment
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    blank_lines: BlankLines,
}

/// Render with the default (no line breaks) settings
pub fn render_markdown(text: &str) -> String {
    MarkdownRenderer::default().render(text)
}

impl MarkdownRenderer {
    pub fn new(blank_lines: BlankLines) -> Self {
        Self { blank_lines }
    }

    pub fn render(&self, text: &str) -> String {
        let mut state = RenderState::default();

        for line in text.split('\n') {
            state.line(line.trim(), self.blank_lines);
        }
        state.close_list();
        state.flush_table();

        let html = EMPTY_PARAGRAPHS_RE.replace_all(&state.html, "");
        let html = BREAK_RUN_RE.replace_all(&html, "<br>\n<br>\n");

        match self.blank_lines {
            BlankLines::Skip => html.into_owned(),
            BlankLines::LineBreak => DOUBLE_BREAK_RE.replace_all(&html, "<br>\n").into_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn open_tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "<ol>\n",
            ListKind::Unordered => "<ul>\n",
        }
    }

    fn close_tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "</ol>\n",
            ListKind::Unordered => "</ul>\n",
        }
    }
}

#[derive(Debug, Default)]
struct RenderState {
    html: String,
    list: Option<ListKind>,
    /// Buffered table rows, cells already formatted
    table: Vec<Vec<String>>,
}

impl RenderState {
    fn line(&mut self, line: &str, blank_lines: BlankLines) {
        if is_table_row(line) {
            self.close_list();
            let cells = split_cells(line);
            if !is_separator_row(&cells) {
                self.table
                    .push(cells.into_iter().map(inline).collect());
            }
            return;
        }

        self.flush_table();

        if let Some(title) = line.strip_prefix("### ") {
            self.close_list();
            self.push_element("h3", title);
        } else if let Some(title) = line.strip_prefix("## ") {
            self.close_list();
            self.push_element("h4", title);
        } else if line == "---" || line == "***" {
            self.close_list();
            self.html.push_str("<hr>\n");
        } else if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
            self.open_list(ListKind::Ordered);
            self.push_element("li", caps.get(1).map_or("", |m| m.as_str()));
        } else if let Some(item) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            self.open_list(ListKind::Unordered);
            self.push_element("li", item);
        } else if line.is_empty() {
            self.close_list();
            if blank_lines == BlankLines::LineBreak {
                self.html.push_str("<br>\n");
            }
        } else {
            self.close_list();
            self.push_element("p", line);
        }
    }

    fn push_element(&mut self, tag: &str, text: &str) {
        self.html
            .push_str(&format!("<{tag}>{}</{tag}>\n", inline(text.trim())));
    }

    fn open_list(&mut self, kind: ListKind) {
        if self.list == Some(kind) {
            return;
        }
        self.close_list();
        self.html.push_str(kind.open_tag());
        self.list = Some(kind);
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.html.push_str(kind.close_tag());
        }
    }

    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }

        let rows = std::mem::take(&mut self.table);

        self.html.push_str("<table>\n");
        for (index, row) in rows.iter().enumerate() {
            if index == 0 {
                self.html.push_str("<thead>\n<tr>");
                for cell in row {
                    self.html.push_str(&format!("<th>{}</th>", cell));
                }
                self.html.push_str("</tr>\n</thead>\n");
                if rows.len() > 1 {
                    self.html.push_str("<tbody>\n");
                }
                continue;
            }

            let class = if index % 2 == 0 { "row-even" } else { "row-odd" };
            self.html.push_str(&format!("<tr class=\"{}\">", class));
            for cell in row {
                self.html.push_str(&format!("<td>{}</td>", cell));
            }
            self.html.push_str("</tr>\n");
        }
        if rows.len() > 1 {
            self.html.push_str("</tbody>\n");
        }
        self.html.push_str("</table>\n");
    }
}

fn is_table_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

fn split_cells(line: &str) -> Vec<&str> {
    line[1..line.len() - 1].split('|').map(str::trim).collect()
}

fn is_separator_row(cells: &[&str]) -> bool {
    cells.iter().any(|cell| cell.contains('-'))
        && cells.iter().all(|cell| SEPARATOR_CELL_RE.is_match(cell))
}

/// Escape, then apply bold, italic, code and links in that order
fn inline(text: &str) -> String {
    let text = escape_html(text);
    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");
    let text = CODE_RE.replace_all(&text, "<code>$1</code>");
    let text = LINK_RE.replace_all(&text, r#"<a href="$2" target="_blank" rel="noopener">$1</a>"#);
    text.into_owned()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_list_paragraph() {
        let html = render_markdown("### Title\n- a\n- b\n\nEnd");

        assert_eq!(
            html,
            "<h3>Title</h3>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<p>End</p>\n"
        );
    }

    #[test]
    fn test_line_break_variant() {
        let renderer = MarkdownRenderer::new(BlankLines::LineBreak);

        assert_eq!(
            renderer.render("### Title\n- a\n- b\n\nEnd"),
            "<h3>Title</h3>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<br>\n<p>End</p>\n"
        );
        assert_eq!(
            renderer.render("a\n\n\n\nb"),
            "<p>a</p>\n<br>\n<p>b</p>\n"
        );
    }

    #[test]
    fn test_double_hash_is_level_four() {
        assert_eq!(render_markdown("## Sub"), "<h4>Sub</h4>\n");
        assert_eq!(render_markdown("#### Deep"), "<p>#### Deep</p>\n");
    }

    #[test]
    fn test_table_header_and_separator() {
        let html = render_markdown("|H1|H2|\n|--|--|\n|a|b|");

        assert_eq!(
            html,
            "<table>\n<thead>\n<tr><th>H1</th><th>H2</th></tr>\n</thead>\n<tbody>\n<tr class=\"row-odd\"><td>a</td><td>b</td></tr>\n</tbody>\n</table>\n"
        );
        assert_eq!(html.matches("<tr").count(), 2);
    }

    #[test]
    fn test_table_rows_alternate_and_close_on_text() {
        let html = render_markdown(
            "| Item | Why |\n| :--- | ---: |\n| **BKB** | magic |\n| Blink | `init` |\n| Pipe | team |\nAfter",
        );

        assert!(html.contains("<tr class=\"row-odd\"><td><strong>BKB</strong></td><td>magic</td></tr>"));
        assert!(html.contains("<tr class=\"row-even\"><td>Blink</td><td><code>init</code></td></tr>"));
        assert!(html.contains("<tr class=\"row-odd\"><td>Pipe</td><td>team</td></tr>"));
        assert!(html.ends_with("</table>\n<p>After</p>\n"));
    }

    #[test]
    fn test_list_kind_switch_closes_previous() {
        let html = render_markdown("1. first\n2. second\n* other\n- more");

        assert_eq!(
            html,
            "<ol>\n<li>first</li>\n<li>second</li>\n</ol>\n<ul>\n<li>other</li>\n<li>more</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_rules_and_end_of_input() {
        assert_eq!(
            render_markdown("- a\n---\n***\n- b"),
            "<ul>\n<li>a</li>\n</ul>\n<hr>\n<hr>\n<ul>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_inline_formatting() {
        let html = render_markdown(
            "**Bold** then *italic* with `code` and [docs](https://www.dota2.com/patches)",
        );

        assert_eq!(
            html,
            "<p><strong>Bold</strong> then <em>italic</em> with <code>code</code> and <a href=\"https://www.dota2.com/patches\" target=\"_blank\" rel=\"noopener\">docs</a></p>\n"
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            render_markdown("* **Core:** *Battle Fury*"),
            "<ul>\n<li><strong>Core:</strong> <em>Battle Fury</em></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(
            render_markdown("<script>alert(1)</script> & [x](javascript:alert(1))"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; [x](javascript:alert(1))</p>\n"
        );
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(
            render_markdown("### A\r\n- b\r\n"),
            "<h3>A</h3>\n<ul>\n<li>b</li>\n</ul>\n"
        );
    }
}
