//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Highlighted tokens are emitted as CSS classes so the color theme lives in
/// a stylesheet (see [`highlight_css`]).
const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Markdown renderer with class-based syntax highlighting
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, syntect::Error> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',')
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref())?;
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, syntect::Error> {
        let syntax = find_syntax(lang);

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        let highlighted = generator.finalize();

        let lang = html_escape(lang.unwrap_or("text"));
        Ok(format!(
            r#"<pre class="highlight"><code class="language-{}">{}</code></pre>"#,
            lang, highlighted
        ))
    }
}

fn find_syntax(lang: Option<&str>) -> &'static SyntaxReference {
    lang.and_then(|lang| {
        SYNTAX_SET
            .find_syntax_by_token(lang)
            .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
    })
    .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

/// Stylesheet for the classes emitted by [`MarkdownRenderer`], from a bundled syntect theme
pub fn highlight_css(theme_name: &str) -> anyhow::Result<String> {
    let theme = THEME_SET
        .themes
        .get(theme_name)
        .ok_or_else(|| {
            let mut known: Vec<_> = THEME_SET.themes.keys().map(String::as_str).collect();
            known.sort_unstable();
            anyhow::anyhow!(
                "Unknown highlight theme {:?} (available: {})",
                theme_name,
                known.join(", ")
            )
        })?;
    Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block_uses_classes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```\n").unwrap();
        assert!(html.contains(r#"<pre class="highlight"><code class="language-rust">"#));
        assert!(html.contains("<span class=\""));
        assert!(!html.contains("style="));
    }

    #[test]
    fn test_render_code_block_escapes_content() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<script>x</script>\n```\n").unwrap();
        assert!(html.contains("language-text"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_indented_code_block_is_not_leaked_as_paragraph() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Intro\n\n    let x = 1;\n\nOutro\n").unwrap();
        assert!(html.contains(r#"<pre class="highlight">"#));
        assert!(html.contains("<p>Outro</p>"));
        assert!(!html.contains("<p>let x"));
    }

    #[test]
    fn test_info_string_attributes_are_ignored() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust,ignore\nlet a = 1;\n```\n").unwrap();
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let src = "Text with `code`\n\n```go\nfunc main() {}\n```\n";
        assert_eq!(renderer.render(src).unwrap(), renderer.render(src).unwrap());
    }

    #[test]
    fn test_highlight_css() {
        let css = highlight_css("InspiredGitHub").unwrap();
        assert!(css.contains("color"));
        assert!(highlight_css("no-such-theme").is_err());
    }
}
