//! Element Catalog
//!
//! The static, ordered palette of droppable element kinds. Each entry
//! carries the label and icon shown in the palette plus the default props
//! and style copied onto a freshly dropped element. The canvas model reads
//! the defaults only at creation time.

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{json, Value};

use crate::element::{ElementKind, PropMap, StyleMap};

/// One palette entry: an element kind with its creation defaults.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// Element kind this entry creates
    pub kind: ElementKind,
    /// Palette label
    pub label: &'static str,
    /// Palette icon
    pub icon: &'static str,
    /// Props copied onto a new element
    pub default_props: PropMap,
    /// Style copied onto a new element
    pub default_style: StyleMap,
}

fn props(entries: &[(&str, Value)]) -> PropMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn style(entries: &[(&str, &str)]) -> StyleMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
    vec![
        CatalogEntry {
            kind: ElementKind::Navbar,
            label: "Navbar",
            icon: "📋",
            default_props: props(&[("text", json!("Home About Contact"))]),
            default_style: style(&[
                ("backgroundColor", "#333"),
                ("color", "#fff"),
                ("padding", "1rem"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Button,
            label: "Button",
            icon: "🔘",
            default_props: props(&[("text", json!("Click Me")), ("variant", json!("primary"))]),
            default_style: style(&[
                ("padding", "0.75rem 1.5rem"),
                ("borderRadius", "4px"),
                ("cursor", "pointer"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Heading,
            label: "Heading",
            icon: "📝",
            default_props: props(&[("text", json!("Heading")), ("level", json!(1))]),
            default_style: style(&[
                ("fontSize", "2rem"),
                ("fontWeight", "bold"),
                ("margin", "1rem 0"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Paragraph,
            label: "Paragraph",
            icon: "📄",
            default_props: props(&[(
                "text",
                json!("Lorem ipsum dolor sit amet, consectetur adipiscing elit."),
            )]),
            default_style: style(&[
                ("fontSize", "1rem"),
                ("lineHeight", "1.6"),
                ("margin", "1rem 0"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Image,
            label: "Image",
            icon: "🖼️",
            default_props: props(&[
                ("src", json!("https://via.placeholder.com/400x300")),
                ("alt", json!("Image")),
            ]),
            default_style: style(&[
                ("width", "100%"),
                ("maxWidth", "400px"),
                ("height", "auto"),
                ("borderRadius", "8px"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Input,
            label: "Input",
            icon: "📥",
            default_props: props(&[
                ("placeholder", json!("Enter text...")),
                ("type", json!("text")),
            ]),
            default_style: style(&[
                ("padding", "0.75rem"),
                ("border", "1px solid #ddd"),
                ("borderRadius", "4px"),
                ("width", "100%"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Textarea,
            label: "Textarea",
            icon: "📝",
            default_props: props(&[
                ("placeholder", json!("Enter your message...")),
                ("rows", json!(4)),
            ]),
            default_style: style(&[
                ("padding", "0.75rem"),
                ("border", "1px solid #ddd"),
                ("borderRadius", "4px"),
                ("width", "100%"),
                ("resize", "vertical"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Card,
            label: "Card",
            icon: "🎴",
            default_props: props(&[
                ("title", json!("Card Title")),
                ("content", json!("Card content goes here...")),
            ]),
            default_style: style(&[
                ("padding", "1.5rem"),
                ("backgroundColor", "#fff"),
                ("borderRadius", "8px"),
                ("boxShadow", "0 2px 8px rgba(0,0,0,0.1)"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Divider,
            label: "Divider",
            icon: "➖",
            default_props: PropMap::new(),
            default_style: style(&[("borderTop", "1px solid #ddd"), ("margin", "1rem 0")]),
        },
        CatalogEntry {
            kind: ElementKind::Container,
            label: "Container",
            icon: "📦",
            default_props: PropMap::new(),
            default_style: style(&[
                ("padding", "1rem"),
                ("backgroundColor", "#f9f9f9"),
                ("borderRadius", "8px"),
                ("minHeight", "100px"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Link,
            label: "Link",
            icon: "🔗",
            default_props: props(&[
                ("text", json!("Link")),
                ("href", json!("https://example.com")),
                ("target", json!("_self")),
            ]),
            default_style: style(&[("color", "#667eea"), ("textDecoration", "underline")]),
        },
        CatalogEntry {
            kind: ElementKind::List,
            label: "List",
            icon: "📃",
            default_props: props(&[
                ("items", json!("Item 1\nItem 2\nItem 3")),
                ("ordered", json!(false)),
            ]),
            default_style: style(&[("margin", "1rem 0"), ("paddingLeft", "1.5rem")]),
        },
        CatalogEntry {
            kind: ElementKind::Select,
            label: "Select",
            icon: "🔽",
            default_props: props(&[
                ("placeholder", json!("Select an option...")),
                ("options", json!("Option 1\nOption 2\nOption 3")),
            ]),
            default_style: style(&[
                ("padding", "0.5rem"),
                ("border", "1px solid #ddd"),
                ("borderRadius", "4px"),
            ]),
        },
        CatalogEntry {
            kind: ElementKind::Checkbox,
            label: "Checkbox",
            icon: "☑️",
            default_props: props(&[("label", json!("Checkbox")), ("checked", json!(false))]),
            default_style: StyleMap::new(),
        },
        CatalogEntry {
            kind: ElementKind::Radio,
            label: "Radio",
            icon: "⭕",
            default_props: props(&[
                ("label", json!("Radio")),
                ("checked", json!(false)),
                ("name", json!("radio-group")),
            ]),
            default_style: StyleMap::new(),
        },
        CatalogEntry {
            kind: ElementKind::Label,
            label: "Label",
            icon: "🏷️",
            default_props: props(&[("text", json!("Label")), ("for", json!(""))]),
            default_style: style(&[("fontWeight", "500")]),
        },
        CatalogEntry {
            kind: ElementKind::Span,
            label: "Span",
            icon: "✏️",
            default_props: props(&[("text", json!("Span text"))]),
            default_style: StyleMap::new(),
        },
        CatalogEntry {
            kind: ElementKind::Table,
            label: "Table",
            icon: "📊",
            default_props: props(&[
                ("rows", json!(3)),
                ("cols", json!(3)),
                ("header", json!(true)),
            ]),
            default_style: style(&[("borderCollapse", "collapse")]),
        },
        CatalogEntry {
            kind: ElementKind::Video,
            label: "Video",
            icon: "🎬",
            default_props: props(&[("src", json!("")), ("controls", json!(true))]),
            default_style: style(&[("width", "400px")]),
        },
        CatalogEntry {
            kind: ElementKind::Iframe,
            label: "Iframe",
            icon: "🌐",
            default_props: props(&[
                ("src", json!("https://www.example.com")),
                ("width", json!("600")),
                ("height", json!("400")),
            ]),
            default_style: style(&[("border", "1px solid #ddd")]),
        },
        CatalogEntry {
            kind: ElementKind::Form,
            label: "Form",
            icon: "📑",
            default_props: props(&[("action", json!("#")), ("method", json!("post"))]),
            default_style: style(&[
                ("padding", "1rem"),
                ("border", "1px dashed #ccc"),
                ("borderRadius", "8px"),
            ]),
        },
    ]
});

/// The full ordered catalog
#[must_use]
pub fn all() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Look up the entry for a kind
#[must_use]
pub fn entry(kind: ElementKind) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_palette_kind() {
        for kind in ElementKind::ALL {
            assert!(entry(*kind).is_some(), "missing catalog entry for {kind}");
        }
        assert_eq!(all().len(), ElementKind::ALL.len());
    }

    #[test]
    fn test_catalog_order_matches_palette() {
        let kinds: Vec<_> = all().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, ElementKind::ALL);
    }

    #[test]
    fn test_no_entry_for_unknown() {
        assert!(entry(ElementKind::Unknown).is_none());
    }

    #[test]
    fn test_button_defaults() {
        let button = entry(ElementKind::Button).unwrap();
        assert_eq!(button.default_props["text"], "Click Me");
        assert_eq!(button.default_props["variant"], "primary");
        assert_eq!(
            button.default_style.get("borderRadius").map(String::as_str),
            Some("4px")
        );
    }

    #[test]
    fn test_divider_has_no_props() {
        let divider = entry(ElementKind::Divider).unwrap();
        assert!(divider.default_props.is_empty());
        assert!(divider.default_style.contains_key("borderTop"));
    }
}
