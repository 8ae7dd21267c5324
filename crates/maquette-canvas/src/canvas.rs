//! Canvas Model
//!
//! The authoritative ordered collection of placed elements. All structural
//! mutations (drop, move, merge update, lock toggle, delete, clear) go
//! through this type; the property editor and resize controller only hold
//! transient copies and commit back through [`Canvas::update_element`].
//!
//! Z-order policy: a new or moved element always lands on top
//! (`max + 1`). A drop or move near locked elements demotes those locked
//! elements to `z = 1`, turning them into a background layer.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::CatalogEntry;
use crate::element::{Element, ElementUpdate, Position};
use crate::geometry;

/// The authoritative element collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Canvas {
    elements: Vec<Element>,
    #[serde(default)]
    selected: Option<Uuid>,
}

impl Canvas {
    /// Create an empty canvas
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when nothing is placed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in insertion order
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements sorted ascending by z-index, stable for ties, so the last
    /// entry renders on top.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Get an element by id
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Currently selected element id
    #[must_use]
    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// Currently selected element
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Select an element. Returns false (and clears nothing) when the id
    /// does not exist.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Clear the selection
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Highest z-index currently in use, 0 for an empty canvas
    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        self.elements.iter().map(|e| e.z_index).max().unwrap_or(0)
    }

    /// Drop a new element from the palette.
    ///
    /// The element gets catalog defaults, a fresh id, `locked = false`,
    /// and lands on top of the stack. Locked elements within the
    /// proximity threshold of the drop position are demoted to `z = 1`.
    pub fn add_element(&mut self, entry: &CatalogEntry, position: Position) -> Uuid {
        let top = self.max_z_index();
        self.demote_locked_near(position, None);

        let element = Element::new(entry.kind, position)
            .with_props(entry.default_props.clone())
            .with_style(entry.default_style.clone())
            .with_z_index(top + 1);
        let id = element.id;
        debug!(element_id = %id, kind = %entry.kind, x = position.x, y = position.y, "element dropped");
        self.elements.push(element);
        id
    }

    /// Move an element to a new (already snapped) position.
    ///
    /// No-op when the id is missing or the element is locked. Locked
    /// elements near the destination are demoted and the moved element is
    /// promoted above everything else.
    pub fn move_element(&mut self, id: Uuid, position: Position) -> bool {
        let Some(index) = self.elements.iter().position(|e| e.id == id) else {
            return false;
        };
        if self.elements[index].locked {
            debug!(element_id = %id, "move ignored: element is locked");
            return false;
        }

        let top = self.max_z_index();
        let demoted = self.demote_locked_near(position, Some(id));

        let element = &mut self.elements[index];
        element.position = position;
        if demoted > 0 {
            element.z_index = top + 1;
        }
        true
    }

    /// Shallow-merge a partial update into an element. No-op when the id
    /// does not exist.
    pub fn update_element(&mut self, id: Uuid, update: ElementUpdate) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                update.apply(element);
                true
            }
            None => false,
        }
    }

    /// Flip an element's lock state. Position and z-index are untouched.
    pub fn toggle_lock(&mut self, id: Uuid) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.locked = !element.locked;
                true
            }
            None => false,
        }
    }

    /// Remove an element. Clears the selection when the removed element
    /// was selected.
    pub fn delete_element(&mut self, id: Uuid) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        let removed = self.elements.len() != before;
        if removed && self.selected == Some(id) {
            self.selected = None;
        }
        removed
    }

    /// Remove every element and clear the selection. Confirmation is the
    /// caller's concern (see the protocol's `ClearCanvas` message).
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Demote locked elements near `position` to the background layer.
    /// Returns how many were demoted. `exclude` skips the element being
    /// moved.
    fn demote_locked_near(&mut self, position: Position, exclude: Option<Uuid>) -> usize {
        let mut demoted = 0;
        for element in &mut self.elements {
            if element.locked && Some(element.id) != exclude && geometry::near(position, element) {
                element.z_index = 1;
                demoted += 1;
            }
        }
        if demoted > 0 {
            debug!(count = demoted, x = position.x, y = position.y, "locked elements demoted to background");
        }
        demoted
    }
}
