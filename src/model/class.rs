//! Class definitions for annotated boxes.

use serde::{Deserialize, Serialize};
use urchin_canvas::Color;

use crate::color_utils::palette_color;

/// One annotation class, e.g. "Male" or "Female".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Identifier shown to users and sent to the server.
    pub id: u32,
    /// Display name drawn in box labels.
    pub name: String,
    /// Stroke/label color.
    pub color: Color,
}

impl ClassDef {
    pub fn new(id: u32, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}

/// The fixed, ordered list of classes an annotator works with.
///
/// A box's `class_id` is an index into this list. The list is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ClassDef>", into = "Vec<ClassDef>")]
pub struct ClassList {
    classes: Vec<ClassDef>,
}

impl ClassList {
    /// Build a class list. An empty list is replaced by a single generic class.
    pub fn new(classes: Vec<ClassDef>) -> Self {
        if classes.is_empty() {
            log::warn!("Empty class list supplied, falling back to a single 'object' class");
            return Self::single_class("object");
        }
        Self { classes }
    }

    /// Build a class list from names, assigning ids and palette colors.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| ClassDef::new(i as u32, name, palette_color(i)))
                .collect(),
        )
    }

    /// The two-class sex classification used on the gonopore pages.
    pub fn gonopore_sex() -> Self {
        Self::new(vec![
            ClassDef::new(0, "Male", Color::rgb8(52, 152, 219)),
            ClassDef::new(1, "Female", Color::rgb8(231, 76, 60)),
        ])
    }

    /// A list holding one class.
    pub fn single_class(name: impl Into<String>) -> Self {
        Self {
            classes: vec![ClassDef::new(0, name, Color::rgb8(46, 204, 113))],
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Check if `class_id` indexes a defined class.
    pub fn contains(&self, class_id: u32) -> bool {
        (class_id as usize) < self.classes.len()
    }

    pub fn get(&self, class_id: u32) -> Option<&ClassDef> {
        self.classes.get(class_id as usize)
    }

    /// Class used to render `class_id`; out-of-range ids render as class 0.
    pub fn resolve(&self, class_id: u32) -> &ClassDef {
        self.get(class_id).unwrap_or(&self.classes[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }
}

impl Default for ClassList {
    fn default() -> Self {
        Self::gonopore_sex()
    }
}

impl From<Vec<ClassDef>> for ClassList {
    fn from(classes: Vec<ClassDef>) -> Self {
        Self::new(classes)
    }
}

impl From<ClassList> for Vec<ClassDef> {
    fn from(list: ClassList) -> Self {
        list.classes
    }
}
