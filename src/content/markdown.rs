use pulldown_cmark::{html, Options, Parser};

use super::{AdBlock, ImageBlock, Segment};

/// Renders markdown to HTML with the extensions the editor exposes.
pub fn markdown_to_html(input: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(input, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders assembled segments to HTML. Consecutive markdown lines are
/// rendered as one document so multi-line constructs (lists, fenced code,
/// tables) survive; image and ad blocks become HTML fragments addressable
/// by their insertion key.
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut pending: Vec<&str> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Markdown(line) => pending.push(line.as_str()),
            Segment::Image(image) => {
                flush_markdown(&mut out, &mut pending);
                push_image(&mut out, image);
            }
            Segment::Ad(ad) => {
                flush_markdown(&mut out, &mut pending);
                push_ad(&mut out, ad);
            }
        }
    }
    flush_markdown(&mut out, &mut pending);
    out
}

fn flush_markdown(out: &mut String, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    let source = pending.join("\n");
    pending.clear();
    out.push_str(&markdown_to_html(&source));
}

fn push_image(out: &mut String, image: &ImageBlock) {
    out.push_str(&format!(
        "<figure class=\"content-image\" id=\"insert-{}\">\n<img src=\"{}\" alt=\"{}\">\n",
        image.key,
        escape_html(&image.url),
        escape_html(&image.alt),
    ));
    if let Some(caption) = &image.caption {
        out.push_str(&format!("<figcaption>{}</figcaption>\n", escape_html(caption)));
    }
    out.push_str("</figure>\n");
}

fn push_ad(out: &mut String, ad: &AdBlock) {
    out.push_str(&format!("<aside class=\"inline-ad\" id=\"insert-{}\">\n", ad.key));
    let body = ad_body(ad);
    match &ad.link_url {
        Some(link) => out.push_str(&format!(
            "<a href=\"{}\" rel=\"sponsored noopener\" target=\"_blank\">\n{}</a>\n",
            escape_html(link),
            body,
        )),
        None => out.push_str(&body),
    }
    out.push_str("<span class=\"ad-tag\">Sponsored</span>\n</aside>\n");
}

fn ad_body(ad: &AdBlock) -> String {
    let mut body = String::new();
    if let Some(url) = &ad.image_url {
        let alt = ad.alt_text.as_deref().unwrap_or("");
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape_html(url),
            escape_html(alt),
        ));
    }
    body.push_str(&format!(
        "<span class=\"ad-title\">{}</span>\n",
        escape_html(&ad.title),
    ));
    body
}
