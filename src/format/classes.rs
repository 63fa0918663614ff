//! `classes.txt`: one class name per line, in class-id order.

use crate::model::ClassList;

/// Render class names, one per line.
pub fn class_names_to_text(classes: &ClassList) -> String {
    classes.names().collect::<Vec<_>>().join("\n")
}

/// Parse class names, ignoring blank lines. Ids follow line order and
/// colors come from the default palette.
pub fn class_names_from_text(text: &str) -> ClassList {
    ClassList::from_names(
        text.lines()
            .map(str::trim)
            .filter(|name| !name.is_empty()),
    )
}
