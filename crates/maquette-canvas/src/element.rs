//! Canvas Element Types
//!
//! This module defines the element data model: the fixed set of element
//! kinds, the placed `Element` record, and the partial update applied by
//! the canvas model's merge operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset from the canvas origin, in pixels
    pub x: i32,
    /// Vertical offset from the canvas origin, in pixels
    pub y: i32,
}

impl Position {
    /// Create a position
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The fixed set of droppable element kinds.
///
/// `Unknown` is the catch-all for unrecognized kind tags arriving over the
/// wire; it renders as a visible fallback instead of failing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Navigation bar with space-separated menu items
    Navbar,
    /// Clickable button with a variant class
    Button,
    /// Heading h1-h6
    Heading,
    /// Paragraph of text
    Paragraph,
    /// Image with src/alt
    Image,
    /// Single-line text input
    Input,
    /// Multi-line text area
    Textarea,
    /// Titled content card
    Card,
    /// Horizontal rule
    Divider,
    /// Generic block container
    Container,
    /// Hyperlink
    Link,
    /// Ordered or unordered list
    List,
    /// Dropdown select
    Select,
    /// Labeled checkbox
    Checkbox,
    /// Labeled radio button
    Radio,
    /// Form label
    Label,
    /// Inline text span
    Span,
    /// Table with generated cells
    Table,
    /// Video player
    Video,
    /// Embedded frame
    Iframe,
    /// Form container
    Form,
    /// Fallback for unrecognized kind tags
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    /// All kinds exposed in the palette, in catalog order
    pub const ALL: &'static [ElementKind] = &[
        Self::Navbar,
        Self::Button,
        Self::Heading,
        Self::Paragraph,
        Self::Image,
        Self::Input,
        Self::Textarea,
        Self::Card,
        Self::Divider,
        Self::Container,
        Self::Link,
        Self::List,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Label,
        Self::Span,
        Self::Table,
        Self::Video,
        Self::Iframe,
        Self::Form,
    ];

    /// Get the string representation (the wire/export tag)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Button => "button",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Image => "image",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Card => "card",
            Self::Divider => "divider",
            Self::Container => "container",
            Self::Link => "link",
            Self::List => "list",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Label => "label",
            Self::Span => "span",
            Self::Table => "table",
            Self::Video => "video",
            Self::Iframe => "iframe",
            Self::Form => "form",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Style fields, camelCase keys as edited (backgroundColor, fontSize, ...)
pub type StyleMap = BTreeMap<String, String>;

/// Type-specific semantic fields (text, variant, level, src, ...)
pub type PropMap = Map<String, Value>;

/// One placed element on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, stable for the element's lifetime
    pub id: Uuid,

    /// Element kind
    pub kind: ElementKind,

    /// Kind-specific semantic fields
    #[serde(default)]
    pub props: PropMap,

    /// Visual fields, independent of kind
    #[serde(default)]
    pub style: StyleMap,

    /// Grid-snapped canvas position
    pub position: Position,

    /// Stacking order; ties broken by insertion order
    pub z_index: i64,

    /// Locked elements ignore move and resize input
    #[serde(default)]
    pub locked: bool,
}

impl Element {
    /// Create a new unlocked element at the given position
    #[must_use]
    pub fn new(kind: ElementKind, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            props: PropMap::new(),
            style: StyleMap::new(),
            position,
            z_index: 1,
            locked: false,
        }
    }

    /// Create with a specific ID
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Set the initial props
    #[must_use]
    pub fn with_props(mut self, props: PropMap) -> Self {
        self.props = props;
        self
    }

    /// Set the initial style
    #[must_use]
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Set the stacking order
    #[must_use]
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Get a string prop
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Get an integer prop
    #[must_use]
    pub fn prop_i64(&self, key: &str) -> Option<i64> {
        self.props.get(key).and_then(Value::as_i64)
    }

    /// Get a boolean prop
    #[must_use]
    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        self.props.get(key).and_then(Value::as_bool)
    }
}

/// A partial element update, shallow-merged at the top level: a field that
/// is present replaces the element's field wholesale, a field that is
/// absent is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementUpdate {
    /// Replacement props map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<PropMap>,

    /// Replacement style map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,

    /// New position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// New stacking order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,

    /// New lock state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl ElementUpdate {
    /// An update carrying only a props replacement
    #[must_use]
    pub fn props(props: PropMap) -> Self {
        Self {
            props: Some(props),
            ..Self::default()
        }
    }

    /// An update carrying only a style replacement
    #[must_use]
    pub fn style(style: StyleMap) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// An update carrying only a position change
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Add a position change to this update
    #[must_use]
    pub fn and_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// True when no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_none()
            && self.style.is_none()
            && self.position.is_none()
            && self.z_index.is_none()
            && self.locked.is_none()
    }

    /// Apply the present fields to an element
    pub fn apply(self, element: &mut Element) {
        if let Some(props) = self.props {
            element.props = props;
        }
        if let Some(style) = self.style {
            element.style = style;
        }
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        let json = serde_json::to_string(&ElementKind::Navbar).unwrap();
        assert_eq!(json, "\"navbar\"");
        let parsed: ElementKind = serde_json::from_str("\"table\"").unwrap();
        assert_eq!(parsed, ElementKind::Table);
    }

    #[test]
    fn test_kind_unknown_fallback() {
        let parsed: ElementKind = serde_json::from_str("\"blink\"").unwrap();
        assert_eq!(parsed, ElementKind::Unknown);
    }

    #[test]
    fn test_element_builders() {
        let mut props = PropMap::new();
        props.insert("text".into(), Value::from("Click Me"));
        let element = Element::new(ElementKind::Button, Position::new(10, 20))
            .with_props(props)
            .with_z_index(3);

        assert_eq!(element.prop_str("text"), Some("Click Me"));
        assert_eq!(element.z_index, 3);
        assert!(!element.locked);
    }

    #[test]
    fn test_update_shallow_merge() {
        let mut element = Element::new(ElementKind::Heading, Position::new(0, 0));
        element.props.insert("text".into(), Value::from("Title"));
        element.style.insert("fontSize".into(), "2rem".into());

        let mut new_props = PropMap::new();
        new_props.insert("level".into(), Value::from(3));
        ElementUpdate::props(new_props).apply(&mut element);

        // props replaced wholesale, style untouched
        assert_eq!(element.prop_i64("level"), Some(3));
        assert!(element.prop_str("text").is_none());
        assert_eq!(element.style.get("fontSize").map(String::as_str), Some("2rem"));
        assert_eq!(element.position, Position::new(0, 0));
    }

    #[test]
    fn test_update_absent_fields_retained() {
        let mut element = Element::new(ElementKind::Span, Position::new(30, 40))
            .with_z_index(7);
        element.locked = true;

        ElementUpdate::position(Position::new(50, 60)).apply(&mut element);

        assert_eq!(element.position, Position::new(50, 60));
        assert_eq!(element.z_index, 7);
        assert!(element.locked);
    }

    #[test]
    fn test_update_deserializes_partial_json() {
        let update: ElementUpdate =
            serde_json::from_str(r#"{"locked": true}"#).unwrap();
        assert_eq!(update.locked, Some(true));
        assert!(update.props.is_none());
        assert!(update.position.is_none());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(ElementUpdate::default().is_empty());
        assert!(!ElementUpdate::position(Position::new(0, 0)).is_empty());
    }
}
