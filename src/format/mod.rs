//! Annotation text formats.
//!
//! - **YOLO TXT**: normalized `class cx cy w h` lines, the format exchanged
//!   with the server
//! - **classes.txt**: the class names matching YOLO class ids
//! - **flat arrays**: box coordinates handed over from JS

mod classes;
mod error;
mod flat;
pub mod yolo;

pub use classes::{class_names_from_text, class_names_to_text};
pub use error::{FormatError, LineError};
pub use flat::{boxes_from_flat, corners_from_flat};
pub use yolo::{
    export_labels, parse_labels, read_labels_file, write_labels_file, ImportReport, LabelLine,
    SkippedLine,
};
