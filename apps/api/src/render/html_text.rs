//! Flattens report HTML into styled text lines for the built-in PDF engine.
//!
//! Parsing is done by `scraper` (html5ever), so comments, attributes and entities
//! follow browser rules. Headings, paragraphs, lists, tables and line breaks shape
//! the output; everything else is reduced to its text.

use scraper::{ElementRef, Html, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub kind: LineKind,
    /// Empty text marks a paragraph gap.
    pub text: String,
}

/// Elements whose content never reaches the page.
const HIDDEN: &[&str] = &["head", "title", "style", "script", "template", "noscript"];

pub fn html_to_lines(html: &str) -> Vec<TextLine> {
    let document = Html::parse_document(html);
    let mut out = LineBuilder::default();
    walk(document.root_element(), &mut out);
    out.finish()
}

fn walk(element: ElementRef<'_>, out: &mut LineBuilder) {
    let name = element.value().name();
    if HIDDEN.contains(&name) {
        return;
    }

    open_element(name, out);
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_text(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    walk(child, out);
                }
            }
            _ => {}
        }
    }
    close_element(name, out);
}

fn open_element(name: &str, out: &mut LineBuilder) {
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            out.paragraph_break();
            out.heading = true;
        }
        "p" | "ul" | "ol" | "table" | "blockquote" | "pre" => out.paragraph_break(),
        "br" | "div" | "tr" | "hr" | "section" | "article" | "header" | "footer" => {
            out.line_break()
        }
        "li" => {
            out.line_break();
            out.push_text("- ");
        }
        "td" | "th" if !out.current.trim().is_empty() => out.push_text(" | "),
        _ => {}
    }
}

fn close_element(name: &str, out: &mut LineBuilder) {
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            out.paragraph_break();
            out.heading = false;
        }
        "p" | "ul" | "ol" | "table" | "blockquote" | "pre" => out.paragraph_break(),
        "div" | "tr" | "li" | "section" | "article" | "header" | "footer" => out.line_break(),
        _ => {}
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<TextLine>,
    current: String,
    heading: bool,
}

impl LineBuilder {
    /// Appends text, collapsing whitespace runs to a single space.
    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                if !self.current.is_empty() && !self.current.ends_with(' ') {
                    self.current.push(' ');
                }
            } else {
                self.current.push(c);
            }
        }
    }

    fn line_break(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            let kind = if self.heading {
                LineKind::Heading
            } else {
                LineKind::Body
            };
            self.lines.push(TextLine {
                kind,
                text: text.to_string(),
            });
        }
        self.current.clear();
    }

    fn paragraph_break(&mut self) {
        self.line_break();
        if self.lines.last().is_some_and(|l| !l.text.is_empty()) {
            self.lines.push(TextLine {
                kind: LineKind::Body,
                text: String::new(),
            });
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        self.line_break();
        while self.lines.last().is_some_and(|l| l.text.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let lines = html_to_lines("<h1>Weekly Report</h1><p>All   good.\n Ship it.</p><p>Next</p>");
        assert_eq!(texts(&lines), vec!["Weekly Report", "", "All good. Ship it.", "", "Next"]);
        assert_eq!(lines[0].kind, LineKind::Heading);
        assert_eq!(lines[2].kind, LineKind::Body);
    }

    #[test]
    fn test_head_and_style_are_dropped() {
        let html = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>T</title>\
                    <style>body { color: red; }</style></head><body><p>Hi</p></body></html>";
        assert_eq!(texts(&html_to_lines(html)), vec!["Hi"]);
    }

    #[test]
    fn test_list_items_get_markers() {
        let lines = html_to_lines("<ul>\n  <li>bob: 1/2</li>\n  <li>amy: 0/1</li>\n</ul>");
        assert_eq!(texts(&lines), vec!["- bob: 1/2", "- amy: 0/1"]);
    }

    #[test]
    fn test_table_cells_are_separated() {
        let html = "<table><tr><th>User</th><th>Done</th></tr>\n<tr><td>bob</td> <td>1</td></tr></table>";
        assert_eq!(texts(&html_to_lines(html)), vec!["User | Done", "bob | 1"]);
    }

    #[test]
    fn test_inline_tags_keep_text_flowing() {
        let lines = html_to_lines("<p>Bob <strong>finished</strong> <em>everything</em>.</p>");
        assert_eq!(texts(&lines), vec!["Bob finished everything."]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let lines = html_to_lines("<p>R&amp;D &lt;team&gt; &#8211; &#x41;</p>");
        assert_eq!(texts(&lines), vec!["R&D <team> – A"]);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let lines = html_to_lines("No markup at all");
        assert_eq!(texts(&lines), vec!["No markup at all"]);
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let lines = html_to_lines("<p>a < b");
        assert_eq!(texts(&lines), vec!["a < b"]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let lines = html_to_lines("<p>a<!-- hidden -->b</p>");
        assert_eq!(texts(&lines), vec!["ab"]);
    }

    #[test]
    fn test_comment_containing_angle_bracket_is_ignored() {
        let lines = html_to_lines("<p>a<!-- x > y -->b</p>");
        assert_eq!(texts(&lines), vec!["ab"]);
    }

    #[test]
    fn test_quoted_attribute_with_angle_bracket_stays_out_of_text() {
        let lines = html_to_lines("<p title=\"1 > 0\">hello</p>");
        assert_eq!(texts(&lines), vec!["hello"]);
    }
}
