//! Content assembly: splicing image and advertisement blocks into raw
//! blog markdown at heading boundaries, and rendering the result to HTML.
//!
//! Headings are the only position-addressable unit raw markdown offers
//! without a full AST parse, so content images are tagged with the 1-based
//! ordinal of the level-1/2 heading they should follow. The assembler walks
//! the source once, emits every original line untouched, and splices visual
//! blocks in after their headings; ads ride along on every second heading
//! that did not already receive an image.

pub use assembler::{
    assemble, heading_level, outline, AdBlock, Heading, ImageBlock, InlineAd, InlineImage,
    Segment,
};
pub use markdown::{escape_html, markdown_to_html, render_segments};

mod assembler;
mod markdown;

use rand::Rng;

/// Assemble and render in one step: the annotated HTML body for a blog.
pub fn render_annotated<R: Rng + ?Sized>(
    content: &str,
    images: &[InlineImage],
    ads: &[InlineAd],
    rng: &mut R,
) -> String {
    render_segments(&assemble(content, images, ads, rng))
}
