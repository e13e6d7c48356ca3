use std::path::Path;

use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::error::ReportError;
use crate::record::{InspectionRecord, MonthlyReport, NOT_AVAILABLE};

// US letter with one-inch margins.
const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);
const MARGIN: f32 = 25.4;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;

const TITLE_ADVANCE: f32 = 14.0;
const HEADING_ADVANCE: f32 = 10.0;
const HEADER_ROW_ADVANCE: f32 = 8.0;
const ROW_ADVANCE: f32 = 7.0;
const SECTION_GAP: f32 = 4.0;

// Detail table value column and monthly list column offsets, in mm from the
// left margin.
const VALUE_COLUMN: f32 = 55.0;
const STAT_COLUMN: f32 = 70.0;
const LIST_COLUMNS: [f32; 4] = [0.0, 38.0, 82.0, 130.0];

// Embedded images render at 4x3 inches.
const IMAGE_WIDTH: f32 = 101.6;
const IMAGE_HEIGHT: f32 = 76.2;
const IMAGE_DPI: f32 = 300.0;
const IMAGE_GAP: f32 = 8.0;

/// Stateless PDF assembly for inspection and monthly reports.
pub struct PdfRenderer;

impl PdfRenderer {
    /// Renders the detail report for one inspection record.
    ///
    /// Image paths that do not exist on disk are left out, matching how the
    /// records are written: clients may list captures that were later
    /// cleaned up.
    pub fn render_inspection(record: &InspectionRecord) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            "Antemortem Inspection Report",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            "Layer 1",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?;
        let mut writer = PageWriter::new(&doc, doc.get_page(page).get_layer(layer));

        writer.line("Antemortem Inspection Report", TITLE_SIZE, &bold, TITLE_ADVANCE);
        writer.gap(SECTION_GAP);
        writer.line("Inspection Details", HEADING_SIZE, &bold, HEADING_ADVANCE);

        writer.row(&[("Field", 0.0), ("Value", VALUE_COLUMN)], &bold, HEADER_ROW_ADVANCE);
        let fields = [
            ("Inspection ID", record.id.as_deref()),
            ("Date", record.date.as_deref()),
            ("Inspector", record.inspector.as_deref()),
            ("Animal Type", record.animal_type.as_deref()),
            ("Health Status", record.health_status.as_deref()),
            ("Observations", record.observations.as_deref()),
        ];
        for (label, value) in fields {
            writer.row(
                &[(label, 0.0), (value.unwrap_or(NOT_AVAILABLE), VALUE_COLUMN)],
                &regular,
                ROW_ADVANCE,
            );
        }

        let on_disk: Vec<&str> = record
            .images
            .iter()
            .map(String::as_str)
            .filter(|path| Path::new(path).exists())
            .collect();
        if !on_disk.is_empty() {
            writer.gap(SECTION_GAP);
            writer.line("Inspection Images", HEADING_SIZE, &bold, HEADING_ADVANCE);
            for path in on_disk {
                match printpdf::image_crate::open(path) {
                    Ok(img) => writer.image(img),
                    Err(e) => {
                        tracing::warn!(path, error = %e, "Skipping undecodable report image")
                    }
                }
            }
        }

        doc.save_to_bytes().map_err(render_err)
    }

    /// Renders the month summary: statistics block followed by the
    /// per-inspection listing, breaking pages as the list grows.
    pub fn render_monthly(report: &MonthlyReport) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            "Monthly Inspection Report",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            "Layer 1",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?;
        let mut writer = PageWriter::new(&doc, doc.get_page(page).get_layer(layer));

        let title = format!("Monthly Inspection Report - {}", report.month_label());
        writer.line(&title, TITLE_SIZE, &bold, TITLE_ADVANCE);
        writer.gap(SECTION_GAP);

        writer.line("Summary Statistics", HEADING_SIZE, &bold, HEADING_ADVANCE);
        writer.row(&[("Metric", 0.0), ("Count", STAT_COLUMN)], &bold, HEADER_ROW_ADVANCE);
        let stats = [
            ("Total Inspections", report.total_inspections),
            ("Passed", report.passed_inspections),
            ("Failed", report.failed_inspections),
            ("Pending Actions", report.pending_actions),
        ];
        for (label, count) in stats {
            let count = count.to_string();
            writer.row(&[(label, 0.0), (&count, STAT_COLUMN)], &regular, ROW_ADVANCE);
        }

        writer.gap(SECTION_GAP);
        writer.line("Inspection List", HEADING_SIZE, &bold, HEADING_ADVANCE);
        writer.row(
            &[
                ("Date", LIST_COLUMNS[0]),
                ("ID", LIST_COLUMNS[1]),
                ("Animal Type", LIST_COLUMNS[2]),
                ("Status", LIST_COLUMNS[3]),
            ],
            &bold,
            HEADER_ROW_ADVANCE,
        );
        for entry in &report.inspections {
            let date = entry.date.format("%Y-%m-%d").to_string();
            writer.row(
                &[
                    (&date, LIST_COLUMNS[0]),
                    (&entry.id, LIST_COLUMNS[1]),
                    (&entry.animal_type, LIST_COLUMNS[2]),
                    (&entry.status, LIST_COLUMNS[3]),
                ],
                &regular,
                ROW_ADVANCE,
            );
        }

        doc.save_to_bytes().map_err(render_err)
    }
}

fn render_err(e: printpdf::Error) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Top-down layout cursor over a growing document. `y` is millimeters above
/// the page bottom; content that would cross the bottom margin moves to a
/// fresh page first.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_HEIGHT.0 - MARGIN,
        }
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT.0 - MARGIN;
        }
    }

    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        self.cells(&[(text, 0.0)], size, font, advance);
    }

    fn row(&mut self, cells: &[(&str, f32)], font: &IndirectFontRef, advance: f32) {
        self.cells(cells, BODY_SIZE, font, advance);
    }

    fn cells(&mut self, cells: &[(&str, f32)], size: f32, font: &IndirectFontRef, advance: f32) {
        self.ensure_space(advance);
        for (text, offset) in cells {
            self.layer
                .use_text(*text, size, Mm(MARGIN + offset), Mm(self.y), font);
        }
        self.y -= advance;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Embeds one image scaled to a fixed 4x3 inch box at the left margin.
    fn image(&mut self, img: printpdf::image_crate::DynamicImage) {
        // Alpha channels render unreliably in PDF viewers, flatten to RGB.
        let rgb = printpdf::image_crate::DynamicImage::ImageRgb8(img.to_rgb8());
        let px_w = rgb.width().max(1) as f32;
        let px_h = rgb.height().max(1) as f32;

        self.ensure_space(IMAGE_HEIGHT + IMAGE_GAP);
        let bottom = self.y - IMAGE_HEIGHT;

        // Frames are placed at IMAGE_DPI, the scale factors then stretch the
        // natural size to the fixed box.
        let natural_w = px_w / IMAGE_DPI * 25.4;
        let natural_h = px_h / IMAGE_DPI * 25.4;
        let transform = ImageTransform {
            translate_x: Some(Mm(MARGIN)),
            translate_y: Some(Mm(bottom)),
            scale_x: Some(IMAGE_WIDTH / natural_w),
            scale_y: Some(IMAGE_HEIGHT / natural_h),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        };
        Image::from_dynamic_image(&rgb).add_to_layer(self.layer.clone(), transform);
        self.y = bottom - IMAGE_GAP;
    }
}
