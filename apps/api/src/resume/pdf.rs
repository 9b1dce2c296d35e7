//! Renders a `StructuredResume` to a US-letter PDF with the built-in
//! Helvetica faces. Text is wrapped with `resume::metrics` and flows onto new
//! pages as needed.
//!
//! Rendering is CPU-bound; call `render_resume_pdf` from `spawn_blocking`.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rgb,
};
use thiserror::Error;

use crate::resume::metrics::{metrics, Face};
use crate::resume::schema::StructuredResume;

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const MARGIN_X_PT: f32 = 72.0;
const MARGIN_TOP_PT: f32 = 72.0;
const MARGIN_BOTTOM_PT: f32 = 54.0;
const TEXT_WIDTH_PT: f32 = PAGE_WIDTH_PT - 2.0 * MARGIN_X_PT;

const NAME_SIZE: f32 = 24.0;
const SECTION_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const LINE_SPACING: f32 = 1.3;

const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn indigo() -> Color {
    Color::Rgb(Rgb::new(0.29, 0.0, 0.51, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Cursor over the document. `y` is the baseline of the next line, in points
/// from the bottom of the page.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, PdfError> {
        let (doc, page, layer) = PdfDocument::new(title, mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_PT - MARGIN_TOP_PT,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_PT - MARGIN_TOP_PT;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM_PT {
            self.new_page();
        }
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }

    fn line_at(&mut self, text: &str, face: Face, size: f32, x: f32, color: Color) {
        let advance = size * LINE_SPACING;
        self.ensure_space(advance);
        self.layer.set_fill_color(color);
        self.layer.use_text(text, size, mm(x), mm(self.y - size), self.font(face));
        self.y -= advance;
    }

    fn paragraph(&mut self, text: &str, face: Face, size: f32) {
        for line in metrics(face).wrap(text, size, TEXT_WIDTH_PT) {
            self.line_at(&line, face, size, MARGIN_X_PT, black());
        }
    }

    fn centered(&mut self, text: &str, face: Face, size: f32, color: Color) {
        for line in metrics(face).wrap(text, size, TEXT_WIDTH_PT) {
            let x = (PAGE_WIDTH_PT - metrics(face).measure(&line, size)) / 2.0;
            self.line_at(&line, face, size, x, color.clone());
        }
    }

    fn section(&mut self, title: &str) {
        // Keep the heading with at least one body line.
        self.ensure_space(SECTION_SIZE * LINE_SPACING + BODY_SIZE * LINE_SPACING + 12.0);
        self.gap(12.0);
        self.line_at(title, Face::Bold, SECTION_SIZE, MARGIN_X_PT, indigo());
        self.gap(2.0);
    }

    fn gap(&mut self, pt: f32) {
        self.y -= pt;
    }

    fn finish(self) -> Result<Vec<u8>, PdfError> {
        Ok(self.doc.save_to_bytes()?)
    }
}

fn joined(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders the résumé. Empty sections are skipped.
pub fn render_resume_pdf(resume: &StructuredResume) -> Result<Vec<u8>, PdfError> {
    let personal = &resume.personal;
    let name = personal.full_name();
    let mut w = PageWriter::new(if name.is_empty() { "Resume" } else { name.as_str() })?;

    if !name.is_empty() {
        w.centered(&name, Face::Bold, NAME_SIZE, indigo());
        w.gap(4.0);
    }
    let contact = joined(&[personal.email.as_str(), personal.phone.as_str()], " | ");
    if !contact.is_empty() {
        w.centered(&contact, Face::Regular, BODY_SIZE, black());
    }

    if !personal.summary.trim().is_empty() {
        w.section("PROFESSIONAL SUMMARY");
        w.paragraph(&personal.summary, Face::Regular, BODY_SIZE);
    }

    if !resume.experience.is_empty() {
        w.section("EXPERIENCE");
        for exp in &resume.experience {
            w.paragraph(&joined(&[exp.role.as_str(), exp.company.as_str()], " | "), Face::Bold, BODY_SIZE);
            let dates = joined(&[exp.start.as_str(), exp.end.as_str()], " - ");
            if !dates.is_empty() {
                w.paragraph(&dates, Face::Regular, BODY_SIZE);
            }
            w.paragraph(&exp.description, Face::Regular, BODY_SIZE);
            w.gap(6.0);
        }
    }

    if !resume.education.is_empty() {
        w.section("EDUCATION");
        for edu in &resume.education {
            w.paragraph(&joined(&[edu.degree.as_str(), edu.field.as_str()], " in "), Face::Bold, BODY_SIZE);
            let graduated = if edu.year.trim().is_empty() {
                String::new()
            } else {
                format!("Graduated: {}", edu.year.trim())
            };
            w.paragraph(&joined(&[edu.school.as_str(), graduated.as_str()], " | "), Face::Regular, BODY_SIZE);
            w.gap(4.0);
        }
    }

    if !resume.projects.is_empty() {
        w.section("PROJECTS");
        for project in &resume.projects {
            w.paragraph(&joined(&[project.title.as_str(), project.tech_stack.as_str()], " | "), Face::Bold, BODY_SIZE);
            w.paragraph(&project.description, Face::Regular, BODY_SIZE);
            w.gap(4.0);
        }
    }

    if !resume.skills.is_empty() {
        w.section("SKILLS");
        w.paragraph(&resume.skills.join(", "), Face::Regular, BODY_SIZE);
    }

    w.finish()
}
