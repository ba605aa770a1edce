use chrono::{Datelike, Utc};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, Point, Rgb};

use crate::services::error::WorkflowError;

// Landscape A4.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MM_PER_PT: f32 = 0.352_778;

/// Fixed-layout certificate: conference title, attendee name, activity
/// title and issue date, returned as PDF bytes.
pub fn render(full_name: &str, activity_title: &str) -> Result<Vec<u8>, WorkflowError> {
    let (doc, page, layer) = PdfDocument::new(
        "Diploma",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "diploma",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;
    let italic = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(render_err)?;

    // Frame
    layer.set_outline_color(Color::Rgb(Rgb::new(0.15, 0.35, 0.75, None)));
    layer.set_outline_thickness(3.0);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(8.0), Mm(8.0)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - 8.0), Mm(8.0)), false),
            (
                Point::new(Mm(PAGE_WIDTH_MM - 8.0), Mm(PAGE_HEIGHT_MM - 8.0)),
                false,
            ),
            (Point::new(Mm(8.0), Mm(PAGE_HEIGHT_MM - 8.0)), false),
        ],
        is_closed: true,
    });

    layer.set_fill_color(Color::Rgb(Rgb::new(0.05, 0.25, 0.6, None)));
    centered_text(&layer, "CONGRESO DE TECNOLOGÍA", 26.0, Mm(172.0), &bold);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
    centered_text(&layer, "Otorga el presente diploma a", 16.0, Mm(150.0), &regular);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.1, 0.1, 0.3, None)));
    centered_text(&layer, full_name, 30.0, Mm(130.0), &bold);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.3, 0.3, 0.3, None)));
    centered_text(
        &layer,
        "Por su destacada participación en la actividad:",
        14.0,
        Mm(110.0),
        &italic,
    );

    layer.set_fill_color(Color::Rgb(Rgb::new(0.05, 0.28, 0.63, None)));
    centered_text(
        &layer,
        &format!("\u{201c}{}\u{201d}", activity_title),
        16.0,
        Mm(100.0),
        &bold,
    );

    // Signature line
    layer.set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(PAGE_WIDTH_MM / 2.0 - 50.0), Mm(45.0)), false),
            (Point::new(Mm(PAGE_WIDTH_MM / 2.0 + 50.0), Mm(45.0)), false),
        ],
        is_closed: false,
    });
    layer.set_fill_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
    centered_text(
        &layer,
        "Coordinador General - Congreso de Tecnología",
        12.0,
        Mm(38.0),
        &italic,
    );

    centered_text(
        &layer,
        &format!("Emitido el {}", issue_date_label()),
        12.0,
        Mm(25.0),
        &regular,
    );

    doc.save_to_bytes().map_err(render_err)
}

fn render_err(e: printpdf::Error) -> WorkflowError {
    WorkflowError::Render(e.to_string())
}

fn centered_text(
    layer: &printpdf::PdfLayerReference,
    text: &str,
    size_pt: f32,
    y: Mm,
    font: &IndirectFontRef,
) {
    // Approximate Helvetica advance width (~0.5 em per glyph); the builtin
    // fonts expose no metrics.
    let width_mm = text.chars().count() as f32 * size_pt * 0.5 * MM_PER_PT;
    layer.use_text(text, size_pt, Mm((PAGE_WIDTH_MM - width_mm) / 2.0), y, font);
}

fn issue_date_label() -> String {
    const MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    let today = Utc::now().date_naive();
    format!(
        "{:02} de {} de {}",
        today.day(),
        MONTHS[today.month0() as usize],
        today.year()
    )
}
