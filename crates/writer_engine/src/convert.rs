use ego_tree::iter::Edge;
use pulldown_cmark::{html, Options, Parser};
use scraper::{Html, Node};

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Render Markdown source to HTML, with tables and strikethrough enabled.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Elements whose text never reaches the plain-text projection.
const SKIPPED: &[&str] = &["head", "script", "style", "template"];

/// Elements that end a line in the plain-text projection.
const BLOCKS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "pre", "blockquote", "section",
    "article", "header", "footer", "table", "ul", "ol",
];

/// Plain-text projection of an HTML document: block elements become lines,
/// `<br>` becomes a newline and runs of whitespace collapse to one space.
pub fn html_to_plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    let mut skip_depth = 0usize;

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) if SKIPPED.contains(&element.name()) => skip_depth += 1,
                _ if skip_depth > 0 => {}
                Node::Element(element) if element.name() == "br" => {
                    trim_trailing_spaces(&mut out);
                    out.push('\n');
                }
                Node::Text(text) => push_collapsed(&mut out, text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    let name = element.name();
                    if SKIPPED.contains(&name) {
                        skip_depth = skip_depth.saturating_sub(1);
                    } else if skip_depth == 0 && BLOCKS.contains(&name) {
                        trim_trailing_spaces(&mut out);
                        if !out.is_empty() && !out.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                }
            }
        }
    }

    out.trim_end().to_string()
}

fn push_collapsed(out: &mut String, text: &str) {
    let at_line_start = out.is_empty() || out.ends_with('\n');
    let leading_space = text.starts_with(char::is_whitespace);
    let trailing_space = text.ends_with(char::is_whitespace);

    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        if leading_space && !at_line_start && !out.ends_with(' ') {
            out.push(' ');
        }
        return;
    }

    if leading_space && !at_line_start && !out.ends_with(' ') {
        out.push(' ');
    }
    for (index, word) in words.enumerate() {
        if index > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    if trailing_space {
        out.push(' ');
    }
}

fn trim_trailing_spaces(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
}

/// Minimal HTML document with one escaped paragraph per line.
pub fn plain_text_to_html(text: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<body>\n");
    for line in text.split('\n') {
        html.push_str("<p>");
        escape_into(&mut html, line);
        html.push_str("</p>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{html_to_plain_text, markdown_to_html, plain_text_to_html};

    #[test]
    fn blocks_become_lines_and_head_is_skipped() {
        let html = "<html><head><title>T</title><style>p{}</style></head><body>\
                    <h1>Title</h1>\n<p>Hello <b>world</b></p><p>Line<br>break</p></body></html>";
        assert_eq!(html_to_plain_text(html), "Title\nHello world\nLine\nbreak");
    }

    #[test]
    fn whitespace_runs_collapse() {
        let html = "<p>  spaced \n\t out   text </p>";
        assert_eq!(html_to_plain_text(html), "spaced out text");
    }

    #[test]
    fn markdown_syntax_is_not_counted_as_text() {
        let html = markdown_to_html("# Heading\n\nSome *emphasis* and `code`.\n\n- one\n- two\n");
        assert!(html.contains("<h1>Heading</h1>"));
        assert_eq!(
            html_to_plain_text(&html),
            "Heading\nSome emphasis and code.\none\ntwo"
        );
    }

    #[test]
    fn generated_html_escapes_markup() {
        let html = plain_text_to_html("a < b & c\nnext");
        assert!(html.contains("<p>a &lt; b &amp; c</p>"));
        assert!(html.contains("<p>next</p>"));
    }

    #[test]
    fn generated_html_projects_back_to_the_same_lines() {
        let text = "first line\nsecond <line>";
        assert_eq!(html_to_plain_text(&plain_text_to_html(text)), text);
    }
}
