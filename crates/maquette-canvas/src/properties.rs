//! Property Schemas and Editor
//!
//! Each element kind exposes a fixed set of editable prop fields; every
//! kind shares the same style and position fields. The [`PropertyEditor`]
//! buffers the selected element's props/style locally and turns each edit
//! into an [`ElementUpdate`] for the canvas model, so the editor never
//! mutates canvas state directly.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::element::{Element, ElementKind, ElementUpdate, PropMap, StyleMap};

/// The input control a field is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// URL input
    Url,
    /// Color picker
    Color,
    /// Bounded number input
    Number {
        /// Lowest accepted value
        min: i64,
        /// Highest accepted value, unbounded when None
        max: Option<i64>,
    },
    /// Boolean toggle
    Checkbox,
    /// Fixed choice list
    Select {
        /// The selectable values
        options: &'static [&'static str],
    },
}

/// One editable field in a schema.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Field {
    /// Props/style key the field reads and writes
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Input control
    #[serde(flatten)]
    pub control: Control,
}

const fn field(key: &'static str, label: &'static str, control: Control) -> Field {
    Field {
        key,
        label,
        control,
    }
}

const NAVBAR_FIELDS: &[Field] = &[field("text", "Menu Items (space separated)", Control::Text)];

const BUTTON_FIELDS: &[Field] = &[
    field("text", "Text", Control::Text),
    field(
        "variant",
        "Variant",
        Control::Select {
            options: &["primary", "secondary", "success", "danger"],
        },
    ),
];

const HEADING_FIELDS: &[Field] = &[
    field("text", "Text", Control::Text),
    field(
        "level",
        "Level (1-6)",
        Control::Number {
            min: 1,
            max: Some(6),
        },
    ),
];

const TEXT_FIELDS: &[Field] = &[field("text", "Text", Control::Text)];

const IMAGE_FIELDS: &[Field] = &[
    field("src", "Image URL", Control::Url),
    field("alt", "Alt Text", Control::Text),
];

const PLACEHOLDER_FIELDS: &[Field] = &[field("placeholder", "Placeholder", Control::Text)];

const CARD_FIELDS: &[Field] = &[
    field("title", "Title", Control::Text),
    field("content", "Content", Control::TextArea),
];

const CONTAINER_FIELDS: &[Field] = &[field("children", "Content", Control::TextArea)];

const LINK_FIELDS: &[Field] = &[
    field("text", "Link Text", Control::Text),
    field("href", "URL", Control::Url),
    field(
        "target",
        "Target",
        Control::Select {
            options: &["_self", "_blank"],
        },
    ),
];

const LIST_FIELDS: &[Field] = &[
    field("items", "Items (one per line)", Control::TextArea),
    field("ordered", "Ordered List", Control::Checkbox),
];

const SELECT_FIELDS: &[Field] = &[
    field("placeholder", "Placeholder", Control::Text),
    field("options", "Options (one per line)", Control::TextArea),
];

const CHECKBOX_FIELDS: &[Field] = &[
    field("label", "Label Text", Control::Text),
    field("checked", "Checked", Control::Checkbox),
];

const RADIO_FIELDS: &[Field] = &[
    field("label", "Label Text", Control::Text),
    field("checked", "Checked", Control::Checkbox),
    field("name", "Group Name", Control::Text),
];

const LABEL_FIELDS: &[Field] = &[
    field("text", "Label Text", Control::Text),
    field("for", "For (Element ID)", Control::Text),
];

const TABLE_FIELDS: &[Field] = &[
    field("rows", "Rows", Control::Number { min: 1, max: None }),
    field("cols", "Columns", Control::Number { min: 1, max: None }),
    field("header", "Show Header Row", Control::Checkbox),
];

const VIDEO_FIELDS: &[Field] = &[
    field("src", "Video URL", Control::Url),
    field("controls", "Show Controls", Control::Checkbox),
];

const IFRAME_FIELDS: &[Field] = &[
    field("src", "URL", Control::Url),
    field("width", "Width", Control::Text),
    field("height", "Height", Control::Text),
];

const FORM_FIELDS: &[Field] = &[
    field("action", "Action URL", Control::Text),
    field(
        "method",
        "Method",
        Control::Select {
            options: &["get", "post"],
        },
    ),
];

const STYLE_FIELDS: &[Field] = &[
    field("backgroundColor", "Background Color", Control::Color),
    field("color", "Color", Control::Color),
    field("fontSize", "Font Size (px)", Control::Number { min: 0, max: None }),
    field("padding", "Padding (px)", Control::Number { min: 0, max: None }),
    field("margin", "Margin (px)", Control::Number { min: 0, max: None }),
    field(
        "borderRadius",
        "Border Radius (px)",
        Control::Number { min: 0, max: None },
    ),
    field("width", "Width (px or %)", Control::Text),
    field("height", "Height (px or %)", Control::Text),
];

/// Editable prop fields for an element kind, in display order.
#[must_use]
pub fn prop_fields(kind: ElementKind) -> &'static [Field] {
    match kind {
        ElementKind::Navbar => NAVBAR_FIELDS,
        ElementKind::Button => BUTTON_FIELDS,
        ElementKind::Heading => HEADING_FIELDS,
        ElementKind::Paragraph | ElementKind::Span => TEXT_FIELDS,
        ElementKind::Image => IMAGE_FIELDS,
        ElementKind::Input | ElementKind::Textarea => PLACEHOLDER_FIELDS,
        ElementKind::Card => CARD_FIELDS,
        ElementKind::Container => CONTAINER_FIELDS,
        ElementKind::Link => LINK_FIELDS,
        ElementKind::List => LIST_FIELDS,
        ElementKind::Select => SELECT_FIELDS,
        ElementKind::Checkbox => CHECKBOX_FIELDS,
        ElementKind::Radio => RADIO_FIELDS,
        ElementKind::Label => LABEL_FIELDS,
        ElementKind::Table => TABLE_FIELDS,
        ElementKind::Video => VIDEO_FIELDS,
        ElementKind::Iframe => IFRAME_FIELDS,
        ElementKind::Form => FORM_FIELDS,
        ElementKind::Divider | ElementKind::Unknown => &[],
    }
}

/// Style fields shared by every kind, in display order.
#[must_use]
pub fn style_fields() -> &'static [Field] {
    STYLE_FIELDS
}

/// Local-state buffered editor for the selected element.
#[derive(Debug, Clone, Default)]
pub struct PropertyEditor {
    element_id: Option<Uuid>,
    props: PropMap,
    style: StyleMap,
}

impl PropertyEditor {
    /// Create an editor with nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element the buffer currently tracks
    #[must_use]
    pub fn element_id(&self) -> Option<Uuid> {
        self.element_id
    }

    /// Reset the buffer from a newly selected element's current state.
    pub fn select(&mut self, element: &Element) {
        self.element_id = Some(element.id);
        self.props = element.props.clone();
        self.style = element.style.clone();
    }

    /// Drop the selection and buffer.
    pub fn deselect(&mut self) {
        self.element_id = None;
        self.props = PropMap::new();
        self.style = StyleMap::new();
    }

    /// Buffer a prop edit and produce the commit for the canvas model.
    /// Returns None when nothing is selected.
    pub fn set_prop(&mut self, key: impl Into<String>, value: Value) -> Option<(Uuid, ElementUpdate)> {
        let id = self.element_id?;
        self.props.insert(key.into(), value);
        Some((id, ElementUpdate::props(self.props.clone())))
    }

    /// Buffer a style edit and produce the commit for the canvas model.
    pub fn set_style(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<(Uuid, ElementUpdate)> {
        let id = self.element_id?;
        self.style.insert(key.into(), value.into());
        Some((id, ElementUpdate::style(self.style.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Position;
    use serde_json::json;

    fn heading() -> Element {
        let mut element = Element::new(ElementKind::Heading, Position::new(0, 0));
        element.props.insert("text".into(), json!("Title"));
        element.props.insert("level".into(), json!(1));
        element
    }

    #[test]
    fn test_every_kind_has_a_schema() {
        for kind in ElementKind::ALL {
            // divider legitimately has no prop fields; the call itself
            // must cover every kind
            let _ = prop_fields(*kind);
        }
    }

    #[test]
    fn test_heading_schema_bounds_level() {
        let fields = prop_fields(ElementKind::Heading);
        let level = fields.iter().find(|f| f.key == "level").unwrap();
        assert!(matches!(
            level.control,
            Control::Number {
                min: 1,
                max: Some(6)
            }
        ));
    }

    #[test]
    fn test_button_variant_options() {
        let fields = prop_fields(ElementKind::Button);
        let variant = fields.iter().find(|f| f.key == "variant").unwrap();
        match variant.control {
            Control::Select { options } => assert!(options.contains(&"danger")),
            _ => panic!("variant should be a select"),
        }
    }

    #[test]
    fn test_editor_buffers_and_commits() {
        let element = heading();
        let mut editor = PropertyEditor::new();
        editor.select(&element);

        let (id, update) = editor.set_prop("level", json!(3)).unwrap();
        assert_eq!(id, element.id);
        let props = update.props.unwrap();
        // buffered edit keeps the untouched fields of the same map
        assert_eq!(props["level"], json!(3));
        assert_eq!(props["text"], json!("Title"));
    }

    #[test]
    fn test_editor_resets_on_selection_change() {
        let first = heading();
        let mut second = Element::new(ElementKind::Button, Position::new(0, 0));
        second.props.insert("text".into(), json!("Go"));

        let mut editor = PropertyEditor::new();
        editor.select(&first);
        editor.set_prop("level", json!(4));

        editor.select(&second);
        let (_, update) = editor.set_prop("variant", json!("danger")).unwrap();
        let props = update.props.unwrap();
        assert_eq!(props["text"], json!("Go"));
        assert!(props.get("level").is_none());
    }

    #[test]
    fn test_editor_without_selection_is_noop() {
        let mut editor = PropertyEditor::new();
        assert!(editor.set_prop("text", json!("x")).is_none());
        assert!(editor.set_style("color", "#000").is_none());
    }

    #[test]
    fn test_style_commit_replaces_whole_map() {
        let mut element = heading();
        element.style.insert("fontSize".into(), "2rem".into());
        let mut editor = PropertyEditor::new();
        editor.select(&element);

        let (_, update) = editor.set_style("color", "#333").unwrap();
        let style = update.style.unwrap();
        assert_eq!(style.get("color").unwrap(), "#333");
        assert_eq!(style.get("fontSize").unwrap(), "2rem");
    }
}
