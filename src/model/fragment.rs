//! Styled text fragments.

use bitflags::bitflags;

bitflags! {
    /// Style bits attached to a span.
    ///
    /// Bit values follow the common layout-engine convention (superscript = 1,
    /// italic = 2, serif = 4, monospace = 8, bold = 16). The classifier treats
    /// them as opaque.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const SUPERSCRIPT = 1;
        const ITALIC = 1 << 1;
        const SERIF = 1 << 2;
        const MONOSPACE = 1 << 3;
        const BOLD = 1 << 4;
    }
}

impl StyleFlags {
    /// Infer style bits from a PostScript font name such as `Helvetica-BoldOblique`.
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = StyleFlags::empty();

        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            flags |= StyleFlags::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= StyleFlags::ITALIC;
        }
        if name.contains("mono") || name.contains("courier") || name.contains("consol") {
            flags |= StyleFlags::MONOSPACE;
        }
        if name.contains("times") || (name.contains("serif") && !name.contains("sans")) {
            flags |= StyleFlags::SERIF;
        }

        flags
    }
}

/// Axis-aligned bounding box in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// One styled run of text as laid out on a page.
///
/// Fragments are created once per document scan and are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Trimmed, non-empty text
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Style bits
    pub flags: StyleFlags,
    /// 1-based page number
    pub page: u32,
    /// Position on the page; not used by classification
    pub bbox: BBox,
}

impl TextFragment {
    /// Create a fragment with default font name, flags and bounding box.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: String::new(),
            flags: StyleFlags::empty(),
            page,
            bbox: BBox::default(),
        }
    }

    /// Set the font name and derive style flags from it.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self.flags = StyleFlags::from_font_name(&self.font_name);
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Number of characters (not bytes) in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_flags_from_font_name() {
        let flags = StyleFlags::from_font_name("Helvetica-BoldOblique");
        assert!(flags.contains(StyleFlags::BOLD));
        assert!(flags.contains(StyleFlags::ITALIC));
        assert!(!flags.contains(StyleFlags::MONOSPACE));

        let flags = StyleFlags::from_font_name("Courier");
        assert_eq!(flags, StyleFlags::MONOSPACE);

        let flags = StyleFlags::from_font_name("Times-Roman");
        assert_eq!(flags, StyleFlags::SERIF);

        assert!(StyleFlags::from_font_name("DejaVuSans").is_empty());
    }

    #[test]
    fn test_style_flag_bits() {
        assert_eq!(StyleFlags::BOLD.bits(), 16);
        assert_eq!((StyleFlags::BOLD | StyleFlags::ITALIC).bits(), 18);
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 10.0, 20.0, 20.0);
        let b = BBox::new(15.0, 5.0, 30.0, 18.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(10.0, 5.0, 30.0, 20.0));
        assert_eq!(u.width(), 20.0);
        assert_eq!(u.height(), 15.0);
    }

    #[test]
    fn test_fragment_builder() {
        let frag = TextFragment::new("Überblick", 14.0, 2).with_font("Arial-BoldMT");
        assert_eq!(frag.char_len(), 9);
        assert!(frag.text.len() > 9);
        assert!(frag.flags.contains(StyleFlags::BOLD));
        assert_eq!(frag.page, 2);
    }
}
