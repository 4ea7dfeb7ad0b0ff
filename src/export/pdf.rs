//! Monthly hour report as a PDF, built directly with `pdf-writer`.
//!
//! Layout: a dark header band with the venue title, the employee/month
//! info block with the rounded total, then the shift table with a filled
//! header row and zebra striping, paginated when a month has more rows
//! than fit one page.

use crate::errors::AppResult;
use crate::export::MonthlyReport;
use crate::export::notify_export_success;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;
const HEADER_BAND_H: f32 = 90.0;

const COL_HEADERS: [&str; 5] = ["Date", "Start", "End", "Hours", "Edited"];
const COL_WIDTHS: [f32; 5] = [130.0, 80.0, 80.0, 80.0, 125.0];

struct PdfBuilder {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_font_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    next_id: i32,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_font_id,
            page_refs: Vec::new(),
            current_content_id: None,
            next_id: 5,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);
        drop(fonts);
        drop(resources);
        drop(page);

        self.current_content_id = Some(content_id);
        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

fn draw_text(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, text: &str) {
    content.begin_text();
    content.set_font(font, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(text.as_bytes()));
    content.end_text();
}

fn draw_centered(content: &mut Content, font: Name<'_>, size: f32, y: f32, text: &str) {
    // Helvetica metrics are not at hand; 0.5em per glyph centers well
    // enough for the short header strings used here.
    let approx_w = text.len() as f32 * size * 0.5;
    draw_text(content, font, size, (PAGE_W - approx_w) / 2.0, y, text);
}

fn draw_header_band(content: &mut Content) {
    content.save_state();
    content.set_fill_rgb(0.08, 0.08, 0.08);
    content.rect(0.0, PAGE_H - HEADER_BAND_H, PAGE_W, HEADER_BAND_H);
    content.fill_nonzero();
    content.restore_state();

    // Gold on black, the venue's livery.
    content.save_state();
    content.set_fill_rgb(0.83, 0.69, 0.22);
    draw_centered(content, Name(b"F2"), 22.0, PAGE_H - 45.0, "LEVANT");
    content.restore_state();

    content.save_state();
    content.set_fill_rgb(1.0, 1.0, 1.0);
    draw_centered(content, Name(b"F1"), 10.0, PAGE_H - 70.0, "Hours registration");
    content.restore_state();
}

fn draw_table_header(content: &mut Content, y: f32) {
    content.save_state();
    content.set_fill_rgb(0.11, 0.10, 0.09);
    content.rect(MARGIN, y, COL_WIDTHS.iter().sum(), ROW_H);
    content.fill_nonzero();
    content.restore_state();

    content.save_state();
    content.set_fill_rgb(0.83, 0.69, 0.22);
    let mut x = MARGIN;
    for (header, w) in COL_HEADERS.iter().zip(COL_WIDTHS) {
        draw_text(content, Name(b"F2"), 10.0, x + 4.0, y + 6.0, header);
        x += w;
    }
    content.restore_state();
}

fn draw_row(content: &mut Content, y: f32, cells: [&str; 5], stripe: bool) {
    if stripe {
        content.save_state();
        content.set_fill_rgb(0.96, 0.96, 0.96);
        content.rect(MARGIN, y, COL_WIDTHS.iter().sum(), ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    let mut x = MARGIN;
    for (cell, w) in cells.iter().zip(COL_WIDTHS) {
        draw_text(content, Name(b"F1"), 10.0, x + 4.0, y + 6.0, cell);
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, ROW_H);
        content.stroke();
        content.restore_state();
        x += w;
    }
}

pub fn export_pdf(report: &MonthlyReport, path: &Path) -> AppResult<()> {
    let mut builder = PdfBuilder::new();

    let mut remaining: &[crate::export::ReportRow] = &report.rows;
    let mut page_idx = 1;

    loop {
        let mut content = builder.new_page();
        draw_header_band(&mut content);

        let mut y = PAGE_H - HEADER_BAND_H - 30.0;
        if page_idx == 1 {
            draw_text(
                &mut content,
                Name(b"F1"),
                11.0,
                MARGIN,
                y,
                &format!("Employee: {}", report.employee_name),
            );
            draw_text(
                &mut content,
                Name(b"F2"),
                11.0,
                PAGE_W - MARGIN - 150.0,
                y,
                &format!("Total hours: {}", report.total_hours),
            );
            y -= 16.0;
            draw_text(
                &mut content,
                Name(b"F1"),
                11.0,
                MARGIN,
                y,
                &format!("Month: {}", crate::utils::date::month_label(&report.month)),
            );
            y -= 28.0;
        }

        draw_table_header(&mut content, y);
        y -= ROW_H;

        let mut consumed = 0;
        for (i, row) in remaining.iter().enumerate() {
            if y - ROW_H < MARGIN + 30.0 {
                break;
            }
            draw_row(
                &mut content,
                y,
                [&row.date, &row.start, &row.end, &row.hours, &row.edited],
                i % 2 == 0,
            );
            y -= ROW_H;
            consumed += 1;
        }

        draw_text(
            &mut content,
            Name(b"F1"),
            8.0,
            MARGIN,
            MARGIN - 20.0,
            "Generated automatically by the Levant staff portal.",
        );
        draw_text(
            &mut content,
            Name(b"F1"),
            8.0,
            PAGE_W - MARGIN - 50.0,
            MARGIN - 20.0,
            &format!("Page {page_idx}"),
        );

        builder.finalize_page(content);
        remaining = &remaining[consumed..];
        page_idx += 1;

        if remaining.is_empty() {
            break;
        }
    }

    builder.save(path)?;
    notify_export_success("PDF", path);
    Ok(())
}
