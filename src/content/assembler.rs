use rand::Rng;

use crate::models::{parse_position_tag, Advertisement, CachedContentImage, ContentImage};

/// One block of assembled output. `Markdown` lines are the source lines
/// verbatim (plus the blank separator lines the assembler adds around
/// spliced blocks); `Image` and `Ad` are the spliced visual blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Markdown(String),
    Image(ImageBlock),
    Ad(AdBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    /// Stable insertion key, unique per spliced block within one assembly.
    pub key: usize,
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdBlock {
    pub key: usize,
    pub title: String,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub link_url: Option<String>,
}

/// Image input to the assembler, decoupled from where the row came from
/// (the `content_images` table or the cached copy on the blog row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
    pub position: String,
}

impl From<&ContentImage> for InlineImage {
    fn from(image: &ContentImage) -> Self {
        InlineImage {
            url: image.url.clone(),
            alt: image.alt_text.clone(),
            caption: image.caption.clone(),
            position: image.position.clone(),
        }
    }
}

impl From<&CachedContentImage> for InlineImage {
    fn from(image: &CachedContentImage) -> Self {
        InlineImage {
            url: image.url.clone(),
            alt: image.alt.clone(),
            caption: image.caption.clone(),
            position: image.position.clone(),
        }
    }
}

/// Ad input to the assembler: just the fields an inline ad block renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAd {
    pub title: String,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub link_url: Option<String>,
}

impl From<&Advertisement> for InlineAd {
    fn from(ad: &Advertisement) -> Self {
        InlineAd {
            title: ad.title.clone(),
            image_url: non_empty(&ad.image_url),
            alt_text: non_empty(&ad.alt_text),
            link_url: non_empty(&ad.link_url),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A level-1/2 heading found in blog markdown, with its 1-based ordinal.
/// The admin image screens use this to offer position choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub ordinal: u32,
    pub level: usize,
    pub text: String,
}

/// Returns the heading level (1 or 2) if the line opens with one or two
/// `#` characters followed by at least one whitespace character. Level 3
/// and deeper headings never anchor insertions.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 2 {
        return None;
    }
    let mut rest = line[hashes..].chars();
    match rest.next() {
        Some(c) if c.is_whitespace() => Some(hashes),
        _ => None,
    }
}

/// Scans content for anchor headings in document order.
pub fn outline(content: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    if content.is_empty() {
        return headings;
    }
    for line in content.split('\n') {
        if let Some(level) = heading_level(line) {
            headings.push(Heading {
                ordinal: headings.len() as u32 + 1,
                level,
                text: line[level..].trim().to_string(),
            });
        }
    }
    headings
}

/// Splices image and ad blocks into raw markdown at heading boundaries.
///
/// Every source line is emitted verbatim. After the Nth anchor heading,
/// every image whose position tag names ordinal N is spliced in input
/// order, each wrapped in blank lines so the surrounding markdown still
/// parses as its own paragraphs. Headings with an even ordinal that
/// received no image get one ad, picked uniformly at random, under the
/// same wrapping. Empty content assembles to nothing.
pub fn assemble<R: Rng + ?Sized>(
    content: &str,
    images: &[InlineImage],
    ads: &[InlineAd],
    rng: &mut R,
) -> Vec<Segment> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut heading_count: u32 = 0;
    let mut next_key: usize = 0;

    for line in content.split('\n') {
        segments.push(Segment::Markdown(line.to_string()));
        if heading_level(line).is_none() {
            continue;
        }
        heading_count += 1;

        let mut image_inserted = false;
        for image in images {
            if parse_position_tag(&image.position) != Some(heading_count) {
                continue;
            }
            segments.push(Segment::Markdown(String::new()));
            segments.push(Segment::Image(ImageBlock {
                key: next_key,
                url: image.url.clone(),
                alt: image.alt.clone(),
                caption: image.caption.clone(),
            }));
            segments.push(Segment::Markdown(String::new()));
            next_key += 1;
            image_inserted = true;
        }

        if heading_count % 2 == 0 && !ads.is_empty() && !image_inserted {
            let ad = &ads[rng.random_range(0..ads.len())];
            segments.push(Segment::Markdown(String::new()));
            segments.push(Segment::Ad(AdBlock {
                key: next_key,
                title: ad.title.clone(),
                image_url: ad.image_url.clone(),
                alt_text: ad.alt_text.clone(),
                link_url: ad.link_url.clone(),
            }));
            segments.push(Segment::Markdown(String::new()));
            next_key += 1;
        }
    }

    segments
}
