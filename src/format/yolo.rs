//! YOLO normalized text labels.
//!
//! One line per box: `<class> <center_x> <center_y> <width> <height>`, the four
//! geometry values being fractions of the image width/height.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{LABEL_FIELDS, NORMALIZED_PRECISION};
use crate::format::error::{FormatError, LineError};
use crate::model::BoundingBox;

/// One parsed label line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLine {
    pub class_id: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelLine {
    /// Normalize a pixel box against a `width` x `height` surface.
    pub fn from_pixel_box(bbox: &BoundingBox, width: f64, height: f64) -> Self {
        Self {
            class_id: bbox.class_id,
            center_x: (bbox.x1 + bbox.x2) / 2.0 / width,
            center_y: (bbox.y1 + bbox.y2) / 2.0 / height,
            width: (bbox.x2 - bbox.x1) / width,
            height: (bbox.y2 - bbox.y1) / height,
        }
    }

    /// Convert back to pixel corners on a `width` x `height` surface.
    pub fn to_pixel_box(&self, width: f64, height: f64) -> BoundingBox {
        BoundingBox::new(
            (self.center_x - self.width / 2.0) * width,
            (self.center_y - self.height / 2.0) * height,
            (self.center_x + self.width / 2.0) * width,
            (self.center_y + self.height / 2.0) * height,
            self.class_id,
        )
    }
}

impl FromStr for LabelLine {
    type Err = LineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != LABEL_FIELDS {
            return Err(LineError::FieldCount { found: parts.len() });
        }

        let class_id: u32 = parts[0]
            .parse()
            .map_err(|_| LineError::InvalidClassId(parts[0].to_string()))?;

        let number = |s: &str| -> Result<f64, LineError> {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LineError::InvalidNumber(s.to_string()))
        };

        Ok(Self {
            class_id,
            center_x: number(parts[1])?,
            center_y: number(parts[2])?,
            width: number(parts[3])?,
            height: number(parts[4])?,
        })
    }
}

impl fmt::Display for LabelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const P: usize = NORMALIZED_PRECISION;
        write!(
            f,
            "{} {:.*} {:.*} {:.*} {:.*}",
            self.class_id, P, self.center_x, P, self.center_y, P, self.width, P, self.height
        )
    }
}

/// A line that was dropped during import.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the input text
    pub line_number: usize,
    /// The offending line, trimmed
    pub content: String,
    pub reason: LineError,
}

/// Result of a best-effort parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Boxes in pixel coordinates, in file order
    pub boxes: Vec<BoundingBox>,
    /// Lines that did not parse
    pub skipped: Vec<SkippedLine>,
}

fn check_dimensions(width: f64, height: f64) -> Result<(), FormatError> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok(())
    } else {
        Err(FormatError::MissingDimensions { width, height })
    }
}

/// Parse label text into pixel boxes for a `width` x `height` surface.
///
/// Blank lines are ignored and malformed lines are collected in
/// [`ImportReport::skipped`]; only a surface without a usable size fails.
pub fn parse_labels(text: &str, width: f64, height: f64) -> Result<ImportReport, FormatError> {
    check_dimensions(width, height)?;

    let mut report = ImportReport::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line.parse::<LabelLine>() {
            Ok(label) => report.boxes.push(label.to_pixel_box(width, height)),
            Err(reason) => {
                log::warn!("Skipping label line {}: {} ({:?})", idx + 1, reason, line);
                report.skipped.push(SkippedLine {
                    line_number: idx + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

/// Render pixel boxes as label text, one line per box, no trailing newline.
pub fn export_labels(
    boxes: &[BoundingBox],
    width: f64,
    height: f64,
) -> Result<String, FormatError> {
    check_dimensions(width, height)?;

    Ok(boxes
        .iter()
        .map(|b| LabelLine::from_pixel_box(b, width, height).to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Read and parse a label file.
pub fn read_labels_file(
    path: &Path,
    width: f64,
    height: f64,
) -> Result<ImportReport, FormatError> {
    log::info!("Reading labels from {:?}", path);
    let text = std::fs::read_to_string(path)?;
    parse_labels(&text, width, height)
}

/// Write boxes to a label file.
pub fn write_labels_file(
    path: &Path,
    boxes: &[BoundingBox],
    width: f64,
    height: f64,
) -> Result<(), FormatError> {
    let text = export_labels(boxes, width, height)?;
    std::fs::write(path, text)?;
    log::info!("Wrote {} labels to {:?}", boxes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_line() {
        let label: LabelLine = "0 0.5 0.5 0.2 0.3".parse().unwrap();
        assert_eq!(label.class_id, 0);

        let bbox = label.to_pixel_box(100.0, 200.0);
        assert!((bbox.x1 - 40.0).abs() < 1e-9);
        assert!((bbox.y1 - 70.0).abs() < 1e-9);
        assert!((bbox.x2 - 60.0).abs() < 1e-9);
        assert!((bbox.y2 - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_errors() {
        assert_eq!(
            "0 0.5 0.5 0.2".parse::<LabelLine>(),
            Err(LineError::FieldCount { found: 4 })
        );
        assert_eq!(
            "0 0.5 0.5 0.2 0.3 0.9".parse::<LabelLine>(),
            Err(LineError::FieldCount { found: 6 })
        );
        assert_eq!(
            "-1 0.5 0.5 0.2 0.3".parse::<LabelLine>(),
            Err(LineError::InvalidClassId("-1".into()))
        );
        assert_eq!(
            "0 0.5 abc 0.2 0.3".parse::<LabelLine>(),
            Err(LineError::InvalidNumber("abc".into()))
        );
        assert!("0 NaN 0.5 0.2 0.3".parse::<LabelLine>().is_err());
    }

    #[test]
    fn test_line_format_six_decimals() {
        let line = LabelLine {
            class_id: 1,
            center_x: 0.45,
            center_y: 0.475,
            width: 0.3,
            height: 0.35,
        };
        assert_eq!(line.to_string(), "1 0.450000 0.475000 0.300000 0.350000");
    }

    #[test]
    fn test_parse_skips_bad_lines_and_blanks() {
        let text = "\n0 0.5 0.5 0.2 0.2\nnot a label\n\n\
                    1 0.25 0.25 0.1 0.1 extra\n1 0.1 0.1 0.1 0.1\n\n";
        let report = parse_labels(text, 100.0, 100.0).unwrap();

        assert_eq!(report.boxes.len(), 2);
        assert_eq!(report.boxes[1].class_id, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_number, 3);
        assert_eq!(report.skipped[1].reason, LineError::FieldCount { found: 6 });
    }

    #[test]
    fn test_zero_surface_rejected() {
        assert!(matches!(
            parse_labels("0 0.5 0.5 0.2 0.2", 0.0, 100.0),
            Err(FormatError::MissingDimensions { .. })
        ));
        let boxes = [BoundingBox::new(0.0, 0.0, 1.0, 1.0, 0)];
        assert!(export_labels(&boxes, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_export_empty_set() {
        assert_eq!(export_labels(&[], 640.0, 480.0).unwrap(), "");
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("urchin_labels_{}.txt", std::process::id()));
        let boxes = vec![BoundingBox::new(64.0, 48.0, 128.0, 96.0, 1)];

        write_labels_file(&path, &boxes, 640.0, 480.0).unwrap();
        let report = read_labels_file(&path, 640.0, 480.0).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(report.skipped.is_empty());
        let b = report.boxes[0];
        assert!((b.x1 - 64.0).abs() < 1e-6 && (b.y2 - 96.0).abs() < 1e-6);
        assert_eq!(b.class_id, 1);
    }
}
