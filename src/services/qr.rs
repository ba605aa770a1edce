use std::io::Cursor;

use image::Luma;
use qrcode::QrCode;

use crate::services::error::WorkflowError;

/// QR payloads look like `INSCRIPCION-<id>-<nombre>-<actividad>`; the
/// enrollment id is always the second dash-delimited token.
pub const PAYLOAD_PREFIX: &str = "INSCRIPCION";

pub fn encode_payload(enrollment_id: i64, full_name: &str, activity_title: &str) -> String {
    format!("{PAYLOAD_PREFIX}-{enrollment_id}-{full_name}-{activity_title}")
}

/// Accepts either a bare numeric enrollment id (scanner clients usually
/// decode before calling) or the full payload string.
pub fn enrollment_id_from_scan(scanned: &str) -> Option<i64> {
    let trimmed = scanned.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    trimmed.split('-').nth(1)?.parse().ok()
}

pub fn render_png(payload: &str) -> Result<Vec<u8>, WorkflowError> {
    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| WorkflowError::Render(e.to_string()))?;
    let img = code.render::<Luma<u8>>().min_dimensions(200, 200).build();

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .map_err(|e| WorkflowError::Render(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips() {
        let payload = encode_payload(42, "Ana López", "Inteligencia Artificial Aplicada");
        assert_eq!(enrollment_id_from_scan(&payload), Some(42));
    }

    #[test]
    fn bare_numeric_id_is_accepted() {
        assert_eq!(enrollment_id_from_scan("17"), Some(17));
        assert_eq!(enrollment_id_from_scan("  17 "), Some(17));
    }

    #[test]
    fn malformed_scans_are_rejected() {
        assert_eq!(enrollment_id_from_scan(""), None);
        assert_eq!(enrollment_id_from_scan("garbage"), None);
        assert_eq!(enrollment_id_from_scan("INSCRIPCION-abc-Ana"), None);
        assert_eq!(enrollment_id_from_scan("INSCRIPCION"), None);
    }

    #[test]
    fn renders_a_png() {
        let bytes = render_png("INSCRIPCION-1-Ana-Taller").unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
