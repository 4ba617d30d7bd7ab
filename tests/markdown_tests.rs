use brandpress::content::{
    markdown_to_html, render_segments, AdBlock, ImageBlock, Segment,
};

#[test]
fn consecutive_lines_render_as_one_document() {
    // A list spanning several Markdown segments must stay one list.
    let segments = vec![
        Segment::Markdown("- one".to_string()),
        Segment::Markdown("- two".to_string()),
        Segment::Markdown("- three".to_string()),
    ];

    let html = render_segments(&segments);
    assert_eq!(html.matches("<ul>").count(), 1);
    assert!(html.contains("<li>two</li>"));
}

#[test]
fn a_spliced_block_splits_the_markdown_stream() {
    let segments = vec![
        Segment::Markdown("- one".to_string()),
        Segment::Image(ImageBlock {
            key: 0,
            url: "/a.png".to_string(),
            alt: "a".to_string(),
            caption: None,
        }),
        Segment::Markdown("- two".to_string()),
    ];

    // Two separate lists, with the figure between them.
    let html = render_segments(&segments);
    assert_eq!(html.matches("<ul>").count(), 2);
    let figure = html.find("id=\"insert-0\"").unwrap();
    assert!(html[..figure].contains("<li>one</li>"));
    assert!(html[figure..].contains("<li>two</li>"));
}

#[test]
fn image_blocks_carry_their_insertion_key_and_caption() {
    let segments = vec![Segment::Image(ImageBlock {
        key: 3,
        url: "/pic.png".to_string(),
        alt: "a <chart>".to_string(),
        caption: Some("Q3 \"numbers\"".to_string()),
    })];

    let html = render_segments(&segments);
    assert!(html.contains("<figure class=\"content-image\" id=\"insert-3\">"));
    assert!(html.contains("alt=\"a &lt;chart&gt;\""));
    assert!(html.contains("<figcaption>Q3 &quot;numbers&quot;</figcaption>"));
}

#[test]
fn linked_ads_render_as_sponsored_anchors() {
    let segments = vec![Segment::Ad(AdBlock {
        key: 1,
        title: "Try it".to_string(),
        image_url: Some("/ad.png".to_string()),
        alt_text: None,
        link_url: Some("https://example.com?a=1&b=2".to_string()),
    })];

    let html = render_segments(&segments);
    assert!(html.contains("<aside class=\"inline-ad\" id=\"insert-1\">"));
    assert!(html.contains("href=\"https://example.com?a=1&amp;b=2\""));
    assert!(html.contains("rel=\"sponsored noopener\""));
    assert!(html.contains("<span class=\"ad-tag\">Sponsored</span>"));
}

#[test]
fn unlinked_ads_render_without_an_anchor() {
    let segments = vec![Segment::Ad(AdBlock {
        key: 0,
        title: "House ad".to_string(),
        image_url: None,
        alt_text: None,
        link_url: None,
    })];

    let html = render_segments(&segments);
    assert!(!html.contains("<a "));
    assert!(html.contains("<span class=\"ad-title\">House ad</span>"));
}

#[test]
fn editor_extensions_are_enabled() {
    let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
    assert!(html.contains("<table>"));
    assert!(html.contains("<del>gone</del>"));
}
