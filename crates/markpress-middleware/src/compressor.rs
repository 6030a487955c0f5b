//! Markup compressor engines
//!
//! Regex-driven HTML and XML minification. The engines are pure text
//! transforms: no parsing, no I/O, and the same input always yields the
//! same output. Both are idempotent, so re-minifying already-minified
//! markup is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Minification options, fixed at filter construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyConfig {
    /// Remove comments (`<!-- ... -->`). HTML conditional comments
    /// (`<!--[if ...]>`) are always kept.
    pub remove_comments: bool,
    /// Remove whitespace between tags entirely instead of collapsing it
    /// to a single space
    pub remove_intertag_spaces: bool,
    /// Rewrite `http://` to the protocol-relative `//` inside
    /// `href`/`src`/`cite`/`action` attributes (HTML only)
    pub remove_http_protocol: bool,
    /// Rewrite `https://` to the protocol-relative `//` inside
    /// `href`/`src`/`cite`/`action` attributes (HTML only)
    pub remove_https_protocol: bool,
    /// Keep line breaks when collapsing whitespace
    pub preserve_line_breaks: bool,
}

impl MinifyConfig {
    /// Default options for HTML: comments removed, whitespace collapsed,
    /// one space kept between tags.
    pub fn html() -> Self {
        Self {
            remove_comments: true,
            remove_intertag_spaces: false,
            remove_http_protocol: false,
            remove_https_protocol: false,
            preserve_line_breaks: false,
        }
    }

    /// Default options for XML: comments and intertag whitespace removed.
    pub fn xml() -> Self {
        Self {
            remove_intertag_spaces: true,
            ..Self::html()
        }
    }
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self::html()
    }
}

/// A pure markup transform.
///
/// Implementations must be total: `compress` always terminates and never
/// panics on well-formed or malformed markup alike.
pub trait MarkupCompressor: Send + Sync + fmt::Debug {
    /// Minify the given markup
    fn compress(&self, input: &str) -> String;
}

// <pre>, <textarea>, <script> and <style> contents are whitespace- or
// syntax-sensitive and must survive minification verbatim.
static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<pre\b[^>]*>.*?</pre\s*>|<textarea\b[^>]*>.*?</textarea\s*>|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
    )
    .unwrap()
});

// Plain comments only; `<!--[if ...]>` conditional comments are skipped.
static HTML_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--(?:[^\[].*?)?-->").unwrap());

static XML_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static INTERTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());

static MULTI_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Whitespace runs not containing a newline, and runs around a newline,
// for the preserve-line-breaks mode.
static AROUND_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]*\n\s*").unwrap());
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

static HTTP_PROTOCOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b((?:href|src|cite|action)\s*=\s*["'])http://"#).unwrap()
});
static HTTPS_PROTOCOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b((?:href|src|cite|action)\s*=\s*["'])https://"#).unwrap()
});

// Placeholders for preserved blocks. Private-use characters cannot occur
// in the surrounding markup passes.
const BLOCK_OPEN: char = '\u{e000}';
const BLOCK_CLOSE: char = '\u{e001}';

fn preserve_blocks(input: &str, blocks: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for m in BLOCK_RE.find_iter(input) {
        out.push_str(&input[last..m.start()]);
        out.push(BLOCK_OPEN);
        out.push_str(&blocks.len().to_string());
        out.push(BLOCK_CLOSE);
        blocks.push(m.as_str().to_string());
        last = m.end();
    }
    out.push_str(&input[last..]);
    out
}

fn restore_blocks(mut markup: String, blocks: &[String]) -> String {
    for (i, block) in blocks.iter().enumerate() {
        markup = markup.replace(&format!("{BLOCK_OPEN}{i}{BLOCK_CLOSE}"), block);
    }
    markup
}

fn collapse_whitespace(markup: &str, preserve_line_breaks: bool) -> String {
    if preserve_line_breaks {
        let markup = AROUND_NEWLINE_RE.replace_all(markup, "\n");
        MULTI_SPACE_RE.replace_all(&markup, " ").into_owned()
    } else {
        MULTI_WS_RE.replace_all(markup, " ").into_owned()
    }
}

/// Regex-driven HTML minifier
#[derive(Debug, Clone)]
pub struct HtmlCompressor {
    config: MinifyConfig,
}

impl HtmlCompressor {
    /// Create an HTML compressor with default options
    pub fn new() -> Self {
        Self::with_config(MinifyConfig::html())
    }

    /// Create an HTML compressor with custom options
    pub fn with_config(config: MinifyConfig) -> Self {
        Self { config }
    }
}

impl Default for HtmlCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupCompressor for HtmlCompressor {
    fn compress(&self, input: &str) -> String {
        let mut blocks = Vec::new();
        let mut markup = preserve_blocks(input, &mut blocks);

        if self.config.remove_comments {
            markup = HTML_COMMENT_RE.replace_all(&markup, "").into_owned();
        }
        if self.config.remove_intertag_spaces {
            markup = INTERTAG_RE.replace_all(&markup, "><").into_owned();
        }
        markup = collapse_whitespace(&markup, self.config.preserve_line_breaks);
        if self.config.remove_http_protocol {
            markup = HTTP_PROTOCOL_RE.replace_all(&markup, "${1}//").into_owned();
        }
        if self.config.remove_https_protocol {
            markup = HTTPS_PROTOCOL_RE.replace_all(&markup, "${1}//").into_owned();
        }

        restore_blocks(markup.trim().to_string(), &blocks)
    }
}

/// Regex-driven XML minifier
#[derive(Debug, Clone)]
pub struct XmlCompressor {
    config: MinifyConfig,
}

impl XmlCompressor {
    /// Create an XML compressor with default options
    pub fn new() -> Self {
        Self::with_config(MinifyConfig::xml())
    }

    /// Create an XML compressor with custom options
    pub fn with_config(config: MinifyConfig) -> Self {
        Self { config }
    }
}

impl Default for XmlCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupCompressor for XmlCompressor {
    fn compress(&self, input: &str) -> String {
        let mut markup = input.to_string();

        if self.config.remove_comments {
            markup = XML_COMMENT_RE.replace_all(&markup, "").into_owned();
        }
        if self.config.remove_intertag_spaces {
            markup = INTERTAG_RE.replace_all(&markup, "><").into_owned();
        }
        markup = collapse_whitespace(&markup, self.config.preserve_line_breaks);

        markup.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_default_collapses_whitespace() {
        let c = HtmlCompressor::new();
        let out = c.compress("<!DOCTYPE html>\n<html>\n  <head>\n    <title>t</title>\n  </head>\n</html>");
        assert_eq!(out, "<!DOCTYPE html> <html> <head> <title>t</title> </head> </html>");
    }

    #[test]
    fn test_html_intertag_spaces_removed() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            remove_intertag_spaces: true,
            ..MinifyConfig::html()
        });
        let out = c.compress("<!DOCTYPE html>\n<html>\n  <head>\n  </head>\n</html>");
        assert_eq!(out, "<!DOCTYPE html><html><head></head></html>");
    }

    #[test]
    fn test_html_comments_removed() {
        let c = HtmlCompressor::new();
        assert_eq!(
            c.compress("<p>a</p><!-- note --><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn test_html_conditional_comments_kept() {
        let c = HtmlCompressor::new();
        let input = "<!--[if IE]><link href=\"ie.css\"><![endif]-->";
        assert_eq!(c.compress(input), input);
    }

    #[test]
    fn test_html_comments_kept_when_disabled() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            remove_comments: false,
            ..MinifyConfig::html()
        });
        assert_eq!(c.compress("<p>a</p><!-- note -->"), "<p>a</p><!-- note -->");
    }

    #[test]
    fn test_html_protocol_removal() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            remove_http_protocol: true,
            remove_https_protocol: true,
            ..MinifyConfig::html()
        });
        assert_eq!(
            c.compress("<a href=\"http://example.com\">x</a><img src='https://example.com/i.png'>"),
            "<a href=\"//example.com\">x</a><img src='//example.com/i.png'>"
        );
    }

    #[test]
    fn test_html_protocol_kept_when_disabled() {
        let c = HtmlCompressor::new();
        assert_eq!(
            c.compress("<a href=\"http://example.com\">x</a>"),
            "<a href=\"http://example.com\">x</a>"
        );
    }

    #[test]
    fn test_html_pre_and_script_preserved() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            remove_intertag_spaces: true,
            ..MinifyConfig::html()
        });
        let out = c.compress("<div>\n  <pre>  a\n  b  </pre>\n</div>\n<script>\nvar x = 1;\n</script>");
        assert!(out.contains("<pre>  a\n  b  </pre>"));
        assert!(out.contains("<script>\nvar x = 1;\n</script>"));
    }

    #[test]
    fn test_html_preserve_line_breaks() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            preserve_line_breaks: true,
            ..MinifyConfig::html()
        });
        assert_eq!(
            c.compress("<html>\n  <head>   </head>\n</html>"),
            "<html>\n<head> </head>\n</html>"
        );
    }

    #[test]
    fn test_html_idempotent() {
        let c = HtmlCompressor::with_config(MinifyConfig {
            remove_intertag_spaces: true,
            remove_http_protocol: true,
            remove_https_protocol: true,
            ..MinifyConfig::html()
        });
        let once = c.compress("<html>\n  <body>\n    <!-- c -->\n    <a href=\"http://e.com\">x</a>\n  </body>\n</html>");
        assert_eq!(c.compress(&once), once);
    }

    #[test]
    fn test_html_empty_input() {
        assert_eq!(HtmlCompressor::new().compress(""), "");
    }

    #[test]
    fn test_xml_default() {
        let c = XmlCompressor::new();
        assert_eq!(
            c.compress("<node>\n  <!-- c -->\n  <subnode>v</subnode>\n</node>"),
            "<node><subnode>v</subnode></node>"
        );
    }

    #[test]
    fn test_xml_comments_kept_when_disabled() {
        let c = XmlCompressor::with_config(MinifyConfig {
            remove_comments: false,
            ..MinifyConfig::xml()
        });
        assert_eq!(
            c.compress("<node> <!-- c --> </node>"),
            "<node><!-- c --></node>"
        );
    }

    #[test]
    fn test_xml_idempotent() {
        let c = XmlCompressor::new();
        let once = c.compress("<a>\n  <b>v</b>\n</a>");
        assert_eq!(c.compress(&once), once);
    }
}
