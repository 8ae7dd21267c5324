//! Style Serialization
//!
//! Style maps are edited with camelCase keys (backgroundColor) and
//! exported as hyphenated CSS properties (background-color). This module
//! does the conversion in both directions, renders declaration strings,
//! and parses a generated per-element stylesheet block back into its
//! position/z-index/style fields.

use maquette_canvas::element::{Position, StyleMap};

/// Convert a camelCase style key to its hyphenated CSS property form.
#[must_use]
pub fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a hyphenated CSS property back to the camelCase editing key.
#[must_use]
pub fn kebab_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a style map as a single-line declaration list for an inline
/// `style` attribute: `background-color: #333; padding: 1rem`.
#[must_use]
pub fn inline_declarations(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}: {}", camel_to_kebab(key), value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The parsed contents of one generated `#element-<id>` stylesheet block.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBlock {
    /// Position recovered from `left`/`top`
    pub position: Position,
    /// Stacking order recovered from `z-index`
    pub z_index: i64,
    /// Remaining style fields, keys converted back to camelCase
    pub style: StyleMap,
}

/// Parse the `#element-<id>` block for one element out of a generated
/// stylesheet. Returns None when the block is missing or malformed.
#[must_use]
pub fn parse_element_block(css: &str, id: &str) -> Option<ElementBlock> {
    let selector = format!("#element-{id}");
    let start = css.find(&selector)?;
    let open = css[start..].find('{')? + start;
    let close = css[open..].find('}')? + open;
    let body = &css[open + 1..close];

    let mut position = Position::default();
    let mut z_index = None;
    let mut style = StyleMap::new();

    for declaration in body.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "position" => {}
            "left" => position.x = parse_px(value)?,
            "top" => position.y = parse_px(value)?,
            "z-index" => z_index = value.parse::<i64>().ok(),
            _ => {
                style.insert(kebab_to_camel(key), value.to_string());
            }
        }
    }

    Some(ElementBlock {
        position,
        z_index: z_index?,
        style,
    })
}

fn parse_px(value: &str) -> Option<i32> {
    value.strip_suffix("px")?.trim().parse().ok()
}
