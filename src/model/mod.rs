//! Data model shared by the outline pipeline.
//!
//! [`TextFragment`] is what the extractor produces from a page layout;
//! [`Heading`] and [`OutlineResult`] are what the pipeline hands back and
//! what gets serialized to disk.

mod fragment;
mod outline;

pub use fragment::{BBox, StyleFlags, TextFragment};
pub use outline::{
    validate_outline_json, validate_outline_value, Heading, HeadingLevel, OutlineResult,
};
