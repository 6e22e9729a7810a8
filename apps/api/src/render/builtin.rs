use async_trait::async_trait;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::html_text::{html_to_lines, LineKind, TextLine};
use super::{ensure_pdf, PdfRenderer, RenderError};

const DOCUMENT_TITLE: &str = "Team Productivity Report";
const LAYER_NAME: &str = "Layer 1";

// A4 portrait.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const BODY_SIZE_PT: f32 = 11.0;
const HEADING_SIZE_PT: f32 = 15.0;
const LINE_SPACING: f32 = 1.45;
const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;

/// In-process engine: flattens the HTML to headings and body text and typesets
/// it with the PDF standard Helvetica fonts. CSS is not applied.
///
/// Standard fonts only cover Latin text, so characters outside ASCII are
/// transliterated or replaced with `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPdfRenderer;

#[async_trait]
impl PdfRenderer for BuiltinPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let lines = html_to_lines(html);
        let bytes = tokio::task::spawn_blocking(move || typeset(&lines))
            .await
            .map_err(|e| RenderError::Layout(format!("layout task failed: {e}")))??;
        ensure_pdf(bytes)
    }
}

struct Style<'a> {
    font: &'a IndirectFontRef,
    size_pt: f32,
}

impl Style<'_> {
    fn line_height_mm(&self) -> f32 {
        self.size_pt * LINE_SPACING * PT_TO_MM
    }

    fn max_chars(&self) -> usize {
        let usable_pt = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / PT_TO_MM;
        (usable_pt / (self.size_pt * AVG_GLYPH_WIDTH_EM)) as usize
    }
}

fn typeset(lines: &[TextLine]) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(layout_error)?;
    let heading_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(layout_error)?;

    let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in lines {
        let style = match line.kind {
            LineKind::Heading => Style {
                font: &heading_font,
                size_pt: HEADING_SIZE_PT,
            },
            LineKind::Body => Style {
                font: &body_font,
                size_pt: BODY_SIZE_PT,
            },
        };

        let wrapped = if line.text.is_empty() {
            vec![String::new()]
        } else {
            wrap(&to_latin_ascii(&line.text), style.max_chars())
        };

        for text in wrapped {
            let advance = style.line_height_mm();
            if y - advance < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
                current = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            y -= advance;
            if !text.is_empty() {
                current.use_text(text, style.size_pt, Mm(MARGIN_MM), Mm(y), style.font);
            }
        }
    }

    doc.save_to_bytes().map_err(layout_error)
}

fn layout_error(e: printpdf::Error) -> RenderError {
    RenderError::Layout(e.to_string())
}

/// Greedy word wrap. Words longer than `max_chars` are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn to_latin_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() => c.to_string(),
            '–' | '—' | '‒' | '−' => "-".to_string(),
            '‘' | '’' | '‚' | '′' => "'".to_string(),
            '“' | '”' | '„' | '″' => "\"".to_string(),
            '•' | '·' => "*".to_string(),
            '…' => "...".to_string(),
            '\u{a0}' => " ".to_string(),
            _ => "?".to_string(),
        })
        .collect()
}
