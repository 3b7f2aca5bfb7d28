//! Thin HTML serializer for [Document]s.
//!
//! An independent renderer of the same content model the pagination engine
//! consumes, for in-browser preview. It performs no layout: the browser
//! flows the text, so the output shares nothing with [crate::pdf] except
//! the [Document] itself.

use crate::document::{ContentBlock, Document, ParagraphKind};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt::Write;

/// Render the document as a standalone HTML preview page. Text is escaped;
/// figures are inlined as base64 data URIs so the page has no external
/// resources.
pub fn render_html(document: &Document) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        out,
        "<title>{}</title>",
        html_escape::encode_text(document.title())
    );
    out.push_str(concat!(
        "<style>\n",
        "body { font-family: Helvetica, Arial, sans-serif; max-width: 40em; ",
        "margin: 2em auto; line-height: 1.4; }\n",
        "figure { margin: 1.5em 0; }\n",
        "figure img { max-width: 100%; }\n",
        "figcaption { font-style: italic; font-size: 0.85em; }\n",
        "</style>\n",
    ));
    out.push_str("</head>\n<body>\n");

    for block in document.blocks() {
        match block {
            ContentBlock::Heading { text, level } => {
                let tag = if *level <= 1 { "h1" } else { "h2" };
                let _ = writeln!(out, "<{tag}>{}</{tag}>", html_escape::encode_text(text));
            }
            ContentBlock::Paragraph { text, kind } => {
                let class = match kind {
                    ParagraphKind::Abstract => " class=\"abstract\"",
                    ParagraphKind::Body => "",
                    ParagraphKind::Caption => " class=\"caption\"",
                };
                let _ = writeln!(out, "<p{class}>{}</p>", html_escape::encode_text(text));
            }
            ContentBlock::Figure(figure) => {
                let _ = writeln!(
                    out,
                    "<figure>\n<img src=\"data:{};base64,{}\" alt=\"{}\">\n\
                     <figcaption>{}</figcaption>\n</figure>",
                    html_escape::encode_double_quoted_attribute(&figure.mime_type),
                    BASE64.encode(&figure.bytes),
                    html_escape::encode_double_quoted_attribute(&figure.caption),
                    html_escape::encode_text(&figure.caption),
                );
            }
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Figure, Manuscript};

    #[test]
    fn escapes_markup_in_text() {
        let document = Manuscript {
            title: Some("Results for x < y & z".into()),
            abstract_text: "A <script> free abstract.".into(),
            ..Manuscript::default()
        }
        .into_document();
        let html = render_html(&document);
        assert!(html.contains("Results for x &lt; y &amp; z"));
        assert!(html.contains("A &lt;script&gt; free abstract."));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn inlines_figures_as_data_uris() {
        let document = Manuscript {
            title: Some("With Figure".into()),
            figures: vec![
                Figure::new(vec![1, 2, 3], "image/png", "Figure 1.1").with_dimensions(1, 1),
            ],
            ..Manuscript::default()
        }
        .into_document();
        let html = render_html(&document);
        assert!(html.contains("data:image/png;base64,AQID"));
        assert!(html.contains("<figcaption>Figure 1.1</figcaption>"));
    }

    #[test]
    fn preserves_the_section_structure() {
        let document = Manuscript {
            title: Some("T".into()),
            body: vec!["Body.".into()],
            ..Manuscript::default()
        }
        .into_document();
        let html = render_html(&document);
        assert!(html.contains("<h1>T</h1>"));
        assert!(html.contains("<h2>Abstract</h2>"));
        assert!(!html.contains("<h2>Figures</h2>"));
    }
}
