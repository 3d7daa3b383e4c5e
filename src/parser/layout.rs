//! Page layout reconstruction from PDF content streams.
//!
//! Walks the text operators of each page and builds a block -> line -> span
//! tree in content-stream order. Spans are runs of text sharing one font,
//! size and style on one baseline. No reordering or column detection is done:
//! the order of the tree is the order in which the producer drew the text.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{BBox, StyleFlags};

use super::backend::{ContentOp, PageFonts, PageId, PdfBackend, PdfValue};

/// Rough advance of one glyph, as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
/// Ascender/descender approximations used for span boxes.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;
/// Baseline moves larger than this fraction of the font size start a new line.
const LINE_Y_TOLERANCE: f32 = 0.3;
/// TJ adjustments (thousandths of an em) beyond this are word breaks.
const TJ_SPACE_THRESHOLD: f32 = 200.0;
/// Leading used by `T*` when the stream never sets `TL`.
const DEFAULT_LEADING: f32 = 0.0;
/// Horizontal gaps wider than this many ems separate runs into distinct spans.
const MAX_SPAN_GAP: f32 = 3.0;

/// A run of text with uniform font, size and style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    /// Effective font size in points (font size times text/CTM scale)
    pub font_size: f32,
    pub font_name: String,
    pub flags: StyleFlags,
    pub bbox: BBox,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, font_size: f32, font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        Self {
            text: text.into(),
            font_size,
            flags: StyleFlags::from_font_name(&font_name),
            font_name,
            bbox: BBox::default(),
        }
    }

    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.font_size == other.font_size
            && self.font_name == other.font_name
            && self.flags == other.flags
    }
}

/// Spans sharing a baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    pub fn bbox(&self) -> BBox {
        union_all(self.spans.iter().map(|s| s.bbox))
    }

    /// Largest span size in the line.
    pub fn font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.font_size).fold(0.0, f32::max)
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Consecutive lines forming a paragraph-like unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    pub fn bbox(&self) -> BBox {
        union_all(self.lines.iter().map(TextLine::bbox))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }
}

/// The text layout of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// 1-based page number
    pub page: u32,
    pub blocks: Vec<TextBlock>,
}

impl PageLayout {
    pub fn new(page: u32, blocks: Vec<TextBlock>) -> Self {
        Self { page, blocks }
    }

    /// All spans in layout order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }

    pub fn span_count(&self) -> usize {
        self.spans().count()
    }
}

/// Anything that can produce per-page layout trees.
pub trait LayoutSource {
    /// 1-based page numbers in document order.
    fn page_numbers(&self) -> Vec<u32>;

    /// Layout of one page.
    fn page_layout(&self, page: u32) -> Result<PageLayout>;
}

impl LayoutSource for [PageLayout] {
    fn page_numbers(&self) -> Vec<u32> {
        self.iter().map(|p| p.page).collect()
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        self.iter()
            .find(|p| p.page == page)
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.len() as u32))
    }
}

impl LayoutSource for Vec<PageLayout> {
    fn page_numbers(&self) -> Vec<u32> {
        self.as_slice().page_numbers()
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        self.as_slice().page_layout(page)
    }
}

/// Builds [`PageLayout`]s from a [`PdfBackend`].
pub struct LayoutAnalyzer<B: PdfBackend> {
    backend: B,
    pages: BTreeMap<u32, PageId>,
}

impl<B: PdfBackend> LayoutAnalyzer<B> {
    pub fn new(backend: B) -> Self {
        let pages = backend.pages();
        Self { backend, pages }
    }
}

impl<B: PdfBackend> LayoutSource for LayoutAnalyzer<B> {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))?;

        let fonts = self.backend.page_fonts(page_id)?;
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        let mut walker = SpanWalker::new(&self.backend, page_id, &fonts);
        for op in &ops {
            walker.apply(op);
        }
        let lines = walker.finish();

        Ok(PageLayout::new(page, group_lines_into_blocks(lines)))
    }
}

/// 2D affine matrix `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: &ContentOp) -> Self {
        Matrix {
            a: op.number(0, 1.0),
            b: op.number(1, 0.0),
            c: op.number(2, 0.0),
            d: op.number(3, 1.0),
            e: op.number(4, 0.0),
            f: op.number(5, 0.0),
        }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    /// `self × other` (apply `self`, then `other`).
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Vertical scale factor: length of the transformed y axis `(c, d)`.
    fn scale(&self) -> f32 {
        if self.c == 0.0 {
            self.d.abs()
        } else {
            (self.c * self.c + self.d * self.d).sqrt()
        }
    }
}

/// Content-stream interpreter that collects styled runs into lines.
struct SpanWalker<'a, B: PdfBackend> {
    backend: &'a B,
    page_id: PageId,
    fonts: &'a PageFonts,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
    in_text: bool,
    lines: Vec<LineBuilder>,
}

/// A line under construction, with the baseline and pen position.
struct LineBuilder {
    baseline: f32,
    pen_x: f32,
    spans: Vec<TextSpan>,
}

impl<'a, B: PdfBackend> SpanWalker<'a, B> {
    fn new(backend: &'a B, page_id: PageId, fonts: &'a PageFonts) -> Self {
        Self {
            backend,
            page_id,
            fonts,
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: DEFAULT_LEADING,
            in_text: false,
            lines: Vec::new(),
        }
    }

    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.ctm_stack.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => self.ctm = Matrix::from_op(op).multiply(&self.ctm),
            "BT" => {
                self.in_text = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.font_name = self
                        .fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    self.font_resource = name.clone();
                }
                self.font_size = op.number(1, self.font_size);
            }
            "TL" => self.leading = op.number(0, self.leading),
            "Td" => self.move_line(op.number(0, 0.0), op.number(1, 0.0)),
            "TD" => {
                let ty = op.number(1, 0.0);
                self.leading = -ty;
                self.move_line(op.number(0, 0.0), ty);
            }
            "Tm" => {
                self.line_matrix = Matrix::from_op(op);
                self.text_matrix = self.line_matrix;
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.font_resource, bytes)
    }

    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -item.as_f32().unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                    {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    /// Record a shown string at the current text position and advance the pen.
    fn show(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }

        let device = self.text_matrix.multiply(&self.ctm);
        let size = self.font_size * device.scale();
        let (x, y) = (device.e, device.f);
        let glyphs = text.chars().count() as f32;
        let width = glyphs * size * AVG_GLYPH_WIDTH;

        // Advance in text space so consecutive shows without moves line up.
        let advance = glyphs * self.font_size * AVG_GLYPH_WIDTH;
        self.text_matrix = Matrix::translation(advance, 0.0).multiply(&self.text_matrix);

        if text.trim().is_empty() {
            if let Some(line) = self.lines.last_mut() {
                line.pen_x = line.pen_x.max(x + width);
            }
            return;
        }

        let span = TextSpan::new(text, size, self.font_name.clone()).with_bbox(BBox::new(
            x,
            y - size * DESCENT,
            x + width,
            y + size * ASCENT,
        ));
        self.push_span(span, x, y);
    }

    fn push_span(&mut self, span: TextSpan, x: f32, y: f32) {
        let tolerance = span.font_size * LINE_Y_TOLERANCE;
        let end_x = span.bbox.x1;

        match self.lines.last_mut() {
            Some(line) if (line.baseline - y).abs() <= tolerance => {
                let gap = x - line.pen_x;
                // Columns and table cells share baselines but never a span.
                let detached = gap < -span.font_size || gap > span.font_size * MAX_SPAN_GAP;
                let needs_space = gap > span.font_size * 0.15;
                match line.spans.last_mut() {
                    Some(last) if !detached && last.same_style(&span) => {
                        if needs_space && !ends_or_starts_with_space(&last.text, &span.text) {
                            last.text.push(' ');
                        }
                        last.text.push_str(&span.text);
                        last.bbox = last.bbox.union(&span.bbox);
                    }
                    _ => line.spans.push(span),
                }
                line.pen_x = if detached {
                    end_x
                } else {
                    line.pen_x.max(end_x)
                };
            }
            _ => self.lines.push(LineBuilder {
                baseline: y,
                pen_x: end_x,
                spans: vec![span],
            }),
        }
    }

    fn finish(self) -> Vec<TextLine> {
        self.lines
            .into_iter()
            .map(|l| TextLine::new(l.spans))
            .collect()
    }
}

fn ends_or_starts_with_space(prev: &str, next: &str) -> bool {
    prev.ends_with(char::is_whitespace) || next.starts_with(char::is_whitespace)
}

/// Group lines into blocks on large vertical gaps, size changes or indent changes.
fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(TextBlock::new(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(TextBlock::new(current));
    }

    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].bbox().y0 - w[1].bbox().y0).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    let (prev_box, curr_box) = (prev.bbox(), curr.bbox());

    (prev_box.y0 - curr_box.y0).abs() > avg_spacing * 1.5
        || (prev.font_size() - curr.font_size()).abs() > 1.0
        || (prev_box.x0 - curr_box.x0).abs() > 20.0
}

fn union_all(boxes: impl Iterator<Item = BBox>) -> BBox {
    boxes.reduce(|acc, b| acc.union(&b)).unwrap_or_default()
}

/// Scripts written without spaces between words (Chinese, Japanese kana).
///
/// Hangul is excluded since Korean uses word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}
