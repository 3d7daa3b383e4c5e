//! Flattening of page layouts into text fragments.

use crate::error::Result;
use crate::model::TextFragment;
use crate::parser::{LayoutSource, PageLayout};

use super::options::{ErrorMode, OutlineOptions};

/// Turns the layout tree of every page into an ordered fragment list.
///
/// Order is page ascending, then the block/line/span order of the layout.
#[derive(Debug, Clone)]
pub struct FragmentExtractor<'a> {
    options: &'a OutlineOptions,
}

impl<'a> FragmentExtractor<'a> {
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self { options }
    }

    /// Extract fragments from every page of `source`.
    ///
    /// In [`ErrorMode::Strict`] the first page that fails to decode fails
    /// the whole document. In [`ErrorMode::Lenient`] it is logged and skipped.
    pub fn extract<S: LayoutSource + ?Sized>(&self, source: &S) -> Result<Vec<TextFragment>> {
        let mut fragments = Vec::new();

        for page in source.page_numbers() {
            match source.page_layout(page) {
                Ok(layout) => self.collect_page(&layout, &mut fragments),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(fragments)
    }

    /// Append the qualifying spans of one page.
    pub fn collect_page(&self, layout: &PageLayout, out: &mut Vec<TextFragment>) {
        for span in layout.spans() {
            let text = span.text.trim();
            if text.is_empty() || text.chars().count() < self.options.min_heading_length {
                continue;
            }
            if !self.options.accepts_font_size(span.font_size) {
                continue;
            }

            let mut fragment = TextFragment::new(text, span.font_size, layout.page)
                .with_font(span.font_name.as_str())
                .with_bbox(span.bbox);
            fragment.flags = span.flags;
            out.push(fragment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::{TextBlock, TextLine, TextSpan};

    fn page(number: u32, spans: Vec<TextSpan>) -> PageLayout {
        PageLayout::new(number, vec![TextBlock::new(vec![TextLine::new(spans)])])
    }

    #[test]
    fn test_extract_filters_short_and_blank_spans() {
        let pages = vec![page(
            1,
            vec![
                TextSpan::new("  Overview  ", 18.0, "Helvetica-Bold"),
                TextSpan::new("   ", 12.0, "Helvetica"),
                TextSpan::new("ab", 12.0, "Helvetica"),
                TextSpan::new(" é漢字 ", 12.0, "Helvetica"),
            ],
        )];
        let options = OutlineOptions::default();
        let fragments = FragmentExtractor::new(&options).extract(&pages).unwrap();

        let texts: Vec<_> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Overview", "é漢字"]);
        assert_eq!(fragments[0].font_size, 18.0);
        assert_eq!(fragments[0].font_name, "Helvetica-Bold");
        assert_eq!(fragments[0].page, 1);
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let pages = vec![
            page(1, vec![TextSpan::new("First", 12.0, "F")]),
            page(
                2,
                vec![
                    TextSpan::new("Second", 10.0, "F"),
                    TextSpan::new("Third", 14.0, "F"),
                ],
            ),
        ];
        let options = OutlineOptions::default();
        let fragments = FragmentExtractor::new(&options).extract(&pages).unwrap();

        let order: Vec<_> = fragments.iter().map(|f| (f.page, f.text.as_str())).collect();
        assert_eq!(order, vec![(1, "First"), (2, "Second"), (2, "Third")]);
    }

    #[test]
    fn test_min_length_is_configurable() {
        let pages = vec![page(1, vec![TextSpan::new("Intro", 12.0, "F")])];
        let options = OutlineOptions::new().with_min_heading_length(6);
        let fragments = FragmentExtractor::new(&options).extract(&pages).unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_font_size_window_when_enabled() {
        let pages = vec![page(
            1,
            vec![
                TextSpan::new("Footnote text", 6.0, "F"),
                TextSpan::new("Body text", 11.0, "F"),
                TextSpan::new("Poster", 96.0, "F"),
            ],
        )];

        let options = OutlineOptions::default();
        assert_eq!(FragmentExtractor::new(&options).extract(&pages).unwrap().len(), 3);

        let options = OutlineOptions::new().with_default_font_size_range();
        let fragments = FragmentExtractor::new(&options).extract(&pages).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Body text");
    }

    /// Layout source whose second page cannot be decoded.
    struct BrokenPage;

    impl LayoutSource for BrokenPage {
        fn page_numbers(&self) -> Vec<u32> {
            vec![1, 2, 3]
        }

        fn page_layout(&self, number: u32) -> Result<PageLayout> {
            if number == 2 {
                return Err(Error::PdfParse("bad content stream".to_string()));
            }
            Ok(page(number, vec![TextSpan::new("Readable", 12.0, "F")]))
        }
    }

    #[test]
    fn test_strict_mode_fails_on_bad_page() {
        let options = OutlineOptions::default();
        let result = FragmentExtractor::new(&options).extract(&BrokenPage);
        assert!(matches!(result, Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_lenient_mode_skips_bad_page() {
        let options = OutlineOptions::new().lenient();
        let fragments = FragmentExtractor::new(&options).extract(&BrokenPage).unwrap();
        let pages: Vec<_> = fragments.iter().map(|f| f.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }
}
