//! Per-Kind Markup Dispatch
//!
//! The single switch over element kinds, shared by the design-time
//! preview and the code export so the two can never drift apart. Each
//! kind gets one builder that applies the kind's defaulting rules; the
//! mode decides the interactive surface (preview suppresses it) and the
//! anchor/inline-style placement.

use maquette_canvas::element::{Element, ElementKind, StyleMap};

use crate::style::inline_declarations;

/// Placeholder used when an image element has no source
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300";

/// Placeholder substituted when an image fails to load in the preview
pub const MISSING_IMAGE: &str = "https://via.placeholder.com/400x300?text=Image+Not+Found";

/// Largest table dimension the generator will synthesize
const MAX_TABLE_DIM: i64 = 100;

/// Which consumer the markup is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupMode {
    /// In-canvas mock: inline styles, interactivity suppressed
    Preview,
    /// Exported page: `element-<id>` anchors, styling via stylesheet
    Export,
}

/// Escape HTML special characters
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Split a newline-delimited prop into display items, substituting a
/// numbered fallback for blank lines.
fn item_lines(raw: Option<&str>, fallback: &str) -> Vec<String> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                format!("{fallback} {}", i + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

/// Effective inline style for the preview, with per-kind size defaults.
fn preview_style(element: &Element) -> StyleMap {
    let mut style = element.style.clone();
    match element.kind {
        ElementKind::Divider => {
            style.entry("width".to_string()).or_insert_with(|| "200px".to_string());
            style.entry("height".to_string()).or_insert_with(|| "1px".to_string());
            style.insert("border".to_string(), "none".to_string());
            style
                .entry("borderTop".to_string())
                .or_insert_with(|| "1px solid #ddd".to_string());
        }
        ElementKind::Image => {
            style
                .entry("maxWidth".to_string())
                .or_insert_with(|| "400px".to_string());
            style.insert("objectFit".to_string(), "contain".to_string());
        }
        _ => {}
    }
    style
}

struct Ctx<'a> {
    element: &'a Element,
    mode: MarkupMode,
}

impl Ctx<'_> {
    fn preview(&self) -> bool {
        self.mode == MarkupMode::Preview
    }

    /// Export anchor for selector correlation
    fn anchor(&self) -> String {
        match self.mode {
            MarkupMode::Export => format!(" id=\"element-{}\"", self.element.id),
            MarkupMode::Preview => String::new(),
        }
    }

    /// Inline style attribute (preview only; the export styles through
    /// the stylesheet)
    fn style_attr(&self) -> String {
        match self.mode {
            MarkupMode::Preview => {
                let style = preview_style(self.element);
                if style.is_empty() {
                    String::new()
                } else {
                    format!(" style=\"{}\"", inline_declarations(&style))
                }
            }
            MarkupMode::Export => String::new(),
        }
    }

    fn prop(&self, key: &str) -> Option<&str> {
        self.element.prop_str(key)
    }

    fn prop_or(&self, key: &str, default: &str) -> String {
        html_escape(self.prop(key).unwrap_or(default))
    }
}

/// Generate the markup fragment for one element.
#[must_use]
pub fn markup_for(element: &Element, mode: MarkupMode) -> String {
    let ctx = Ctx { element, mode };
    match element.kind {
        ElementKind::Navbar => navbar(&ctx),
        ElementKind::Button => button(&ctx),
        ElementKind::Heading => heading(&ctx),
        ElementKind::Paragraph => {
            format!(
                "<p{}{}>{}</p>",
                ctx.anchor(),
                ctx.style_attr(),
                ctx.prop_or("text", "")
            )
        }
        ElementKind::Image => image(&ctx),
        ElementKind::Input => input(&ctx),
        ElementKind::Textarea => textarea(&ctx),
        ElementKind::Card => card(&ctx),
        ElementKind::Divider => format!("<hr{}{} />", ctx.anchor(), ctx.style_attr()),
        ElementKind::Container => container(&ctx),
        ElementKind::Link => link(&ctx),
        ElementKind::List => list(&ctx),
        ElementKind::Select => select(&ctx),
        ElementKind::Checkbox => check_or_radio(&ctx, "checkbox"),
        ElementKind::Radio => check_or_radio(&ctx, "radio"),
        ElementKind::Label => label(&ctx),
        ElementKind::Span => {
            format!(
                "<span{}{}>{}</span>",
                ctx.anchor(),
                ctx.style_attr(),
                ctx.prop_or("text", "Span text")
            )
        }
        ElementKind::Table => table(&ctx),
        ElementKind::Video => video(&ctx),
        ElementKind::Iframe => iframe(&ctx),
        ElementKind::Form => form(&ctx),
        ElementKind::Unknown => format!(
            "<div{}{}>Unknown Element</div>",
            ctx.anchor(),
            ctx.style_attr()
        ),
    }
}

fn navbar(ctx: &Ctx<'_>) -> String {
    let items: String = ctx
        .prop("text")
        .unwrap_or_default()
        .split_whitespace()
        .map(|item| format!("        <li>{}</li>\n", html_escape(item)))
        .collect();
    format!(
        "<nav{}{}>\n    <ul style=\"list-style: none; display: flex; gap: 2rem; margin: 0; padding: 0;\">\n{}    </ul>\n</nav>",
        ctx.anchor(),
        ctx.style_attr(),
        items
    )
}

fn button(ctx: &Ctx<'_>) -> String {
    let variant = ctx.prop("variant").unwrap_or("primary");
    format!(
        "<button{} class=\"btn-{}\"{}>{}</button>",
        ctx.anchor(),
        html_escape(variant),
        ctx.style_attr(),
        ctx.prop_or("text", "")
    )
}

fn heading(ctx: &Ctx<'_>) -> String {
    let level = ctx.element.prop_i64("level").unwrap_or(1).clamp(1, 6);
    format!(
        "<h{level}{}{}>{}</h{level}>",
        ctx.anchor(),
        ctx.style_attr(),
        ctx.prop_or("text", "")
    )
}

fn image(ctx: &Ctx<'_>) -> String {
    let src = ctx.prop("src").filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER_IMAGE);
    let fallback = if ctx.preview() {
        // degrade to the not-found placeholder when loading fails
        format!(" onerror=\"this.onerror=null;this.src='{MISSING_IMAGE}'\"")
    } else {
        String::new()
    };
    format!(
        "<img{} src=\"{}\" alt=\"{}\"{}{} />",
        ctx.anchor(),
        html_escape(src),
        ctx.prop_or("alt", "Image"),
        fallback,
        ctx.style_attr()
    )
}

fn input(ctx: &Ctx<'_>) -> String {
    let readonly = if ctx.preview() { " readonly" } else { "" };
    format!(
        "<input{} type=\"{}\" placeholder=\"{}\"{}{} />",
        ctx.anchor(),
        ctx.prop_or("type", "text"),
        ctx.prop_or("placeholder", ""),
        readonly,
        ctx.style_attr()
    )
}

fn textarea(ctx: &Ctx<'_>) -> String {
    let rows = ctx.element.prop_i64("rows").unwrap_or(4).max(1);
    let readonly = if ctx.preview() { " readonly" } else { "" };
    format!(
        "<textarea{} placeholder=\"{}\" rows=\"{}\"{}{}></textarea>",
        ctx.anchor(),
        ctx.prop_or("placeholder", ""),
        rows,
        readonly,
        ctx.style_attr()
    )
}

fn card(ctx: &Ctx<'_>) -> String {
    format!(
        "<div{} class=\"card\"{}>\n    <h3>{}</h3>\n    <p>{}</p>\n</div>",
        ctx.anchor(),
        ctx.style_attr(),
        ctx.prop_or("title", ""),
        ctx.prop_or("content", "")
    )
}

fn container(ctx: &Ctx<'_>) -> String {
    let children = ctx.prop("children").map(html_escape);
    let body = match (children, ctx.preview()) {
        (Some(text), _) if !text.is_empty() => format!("    {text}"),
        (_, true) => "    Container".to_string(),
        (_, false) => "    <!-- Container content -->".to_string(),
    };
    format!(
        "<div{}{}>\n{}\n</div>",
        ctx.anchor(),
        ctx.style_attr(),
        body
    )
}

fn link(ctx: &Ctx<'_>) -> String {
    // navigation is suppressed in the preview
    let href = if ctx.preview() {
        "#".to_string()
    } else {
        ctx.prop_or("href", "#")
    };
    let target = ctx.prop_or("target", "_self");
    format!(
        "<a{} href=\"{}\" target=\"{}\"{}>{}</a>",
        ctx.anchor(),
        href,
        target,
        ctx.style_attr(),
        ctx.prop_or("text", "Link")
    )
}

fn list(ctx: &Ctx<'_>) -> String {
    let tag = if ctx.element.prop_bool("ordered").unwrap_or(false) {
        "ol"
    } else {
        "ul"
    };
    let items: String = item_lines(ctx.prop("items"), "Item")
        .iter()
        .map(|item| format!("    <li>{}</li>\n", html_escape(item)))
        .collect();
    format!(
        "<{tag}{}{}>\n{}</{tag}>",
        ctx.anchor(),
        ctx.style_attr(),
        items
    )
}

fn select(ctx: &Ctx<'_>) -> String {
    let disabled = if ctx.preview() { " disabled" } else { "" };
    let mut options = String::new();
    if let Some(placeholder) = ctx.prop("placeholder").filter(|p| !p.is_empty()) {
        options.push_str(&format!(
            "    <option value=\"\" disabled>{}</option>\n",
            html_escape(placeholder)
        ));
    }
    for option in item_lines(ctx.prop("options"), "Option") {
        let escaped = html_escape(&option);
        options.push_str(&format!(
            "    <option value=\"{escaped}\">{escaped}</option>\n"
        ));
    }
    format!(
        "<select{}{}{}>\n{}</select>",
        ctx.anchor(),
        disabled,
        ctx.style_attr(),
        options
    )
}

fn check_or_radio(ctx: &Ctx<'_>, input_type: &str) -> String {
    let checked = if ctx.element.prop_bool("checked").unwrap_or(false) {
        " checked"
    } else {
        ""
    };
    let disabled = if ctx.preview() { " disabled" } else { "" };
    let name = if input_type == "radio" {
        format!(" name=\"{}\"", ctx.prop_or("name", "radio-group"))
    } else {
        String::new()
    };
    let fallback = if input_type == "radio" { "Radio" } else { "Checkbox" };
    format!(
        "<label{}{}>\n    <input type=\"{input_type}\"{name}{checked}{disabled} />\n    <span>{}</span>\n</label>",
        ctx.anchor(),
        ctx.style_attr(),
        ctx.prop_or("label", fallback)
    )
}

fn label(ctx: &Ctx<'_>) -> String {
    let target = ctx.prop("for").filter(|f| !f.is_empty());
    let for_attr = match target {
        Some(target) => format!(" for=\"{}\"", html_escape(target)),
        None => String::new(),
    };
    format!(
        "<label{}{}{}>{}</label>",
        ctx.anchor(),
        for_attr,
        ctx.style_attr(),
        ctx.prop_or("text", "Label")
    )
}

fn table(ctx: &Ctx<'_>) -> String {
    let rows = ctx.element.prop_i64("rows").unwrap_or(3).clamp(1, MAX_TABLE_DIM);
    let cols = ctx.element.prop_i64("cols").unwrap_or(3).clamp(1, MAX_TABLE_DIM);
    let header = ctx.element.prop_bool("header").unwrap_or(true);
    const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 0.5rem;";

    let mut out = format!("<table{}{}>\n", ctx.anchor(), ctx.style_attr());
    if header {
        out.push_str("    <thead>\n        <tr>\n");
        for c in 1..=cols {
            out.push_str(&format!(
                "            <th style=\"{CELL_STYLE}\">Header {c}</th>\n"
            ));
        }
        out.push_str("        </tr>\n    </thead>\n");
    }
    out.push_str("    <tbody>\n");
    for r in 1..=rows {
        out.push_str("        <tr>\n");
        for c in 1..=cols {
            out.push_str(&format!(
                "            <td style=\"{CELL_STYLE}\">Cell {r}-{c}</td>\n"
            ));
        }
        out.push_str("        </tr>\n");
    }
    out.push_str("    </tbody>\n</table>");
    out
}

fn video(ctx: &Ctx<'_>) -> String {
    let controls = if ctx.element.prop_bool("controls").unwrap_or(true) {
        " controls"
    } else {
        ""
    };
    format!(
        "<video{} src=\"{}\"{}{}>Your browser does not support the video tag.</video>",
        ctx.anchor(),
        ctx.prop_or("src", ""),
        controls,
        ctx.style_attr()
    )
}

fn iframe(ctx: &Ctx<'_>) -> String {
    format!(
        "<iframe{} src=\"{}\" width=\"{}\" height=\"{}\" title=\"Embedded content\"{}></iframe>",
        ctx.anchor(),
        ctx.prop_or("src", "https://www.example.com"),
        ctx.prop_or("width", "600"),
        ctx.prop_or("height", "400"),
        ctx.style_attr()
    )
}

fn form(ctx: &Ctx<'_>) -> String {
    format!(
        "<form{} action=\"{}\" method=\"{}\"{}>\n    <p>Form container - Add inputs here</p>\n</form>",
        ctx.anchor(),
        ctx.prop_or("action", "#"),
        ctx.prop_or("method", "post"),
        ctx.style_attr()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_canvas::element::Position;
    use serde_json::json;

    fn element(kind: ElementKind) -> Element {
        Element::new(kind, Position::new(0, 0))
    }

    #[test]
    fn test_heading_level_from_props() {
        let mut heading = element(ElementKind::Heading);
        heading.props.insert("text".into(), json!("Docs"));
        heading.props.insert("level".into(), json!(3));

        let html = markup_for(&heading, MarkupMode::Export);
        assert!(html.starts_with(&format!("<h3 id=\"element-{}\"", heading.id)));
        assert!(html.ends_with("</h3>"));
        assert!(html.contains(">Docs<"));
    }

    #[test]
    fn test_heading_level_clamped() {
        let mut heading = element(ElementKind::Heading);
        heading.props.insert("level".into(), json!(12));
        let html = markup_for(&heading, MarkupMode::Preview);
        assert!(html.starts_with("<h6"));
    }

    #[test]
    fn test_button_variant_class() {
        let mut button = element(ElementKind::Button);
        button.props.insert("text".into(), json!("Go"));
        button.props.insert("variant".into(), json!("danger"));
        let html = markup_for(&button, MarkupMode::Export);
        assert!(html.contains("class=\"btn-danger\""));
        assert!(html.contains(">Go<"));
    }

    #[test]
    fn test_navbar_splits_menu_items() {
        let mut navbar = element(ElementKind::Navbar);
        navbar.props.insert("text".into(), json!("Home About Contact"));
        let html = markup_for(&navbar, MarkupMode::Export);
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<li>About</li>"));
    }

    #[test]
    fn test_image_placeholder_and_preview_fallback() {
        let image = element(ElementKind::Image);
        let preview = markup_for(&image, MarkupMode::Preview);
        assert!(preview.contains(PLACEHOLDER_IMAGE));
        assert!(preview.contains("onerror"));

        let export = markup_for(&image, MarkupMode::Export);
        assert!(!export.contains("onerror"));
    }

    #[test]
    fn test_preview_suppresses_interaction() {
        let input = element(ElementKind::Input);
        assert!(markup_for(&input, MarkupMode::Preview).contains(" readonly"));
        assert!(!markup_for(&input, MarkupMode::Export).contains(" readonly"));

        let select = element(ElementKind::Select);
        assert!(markup_for(&select, MarkupMode::Preview).contains(" disabled"));

        let mut link = element(ElementKind::Link);
        link.props.insert("href".into(), json!("https://example.com/a"));
        let preview = markup_for(&link, MarkupMode::Preview);
        assert!(preview.contains("href=\"#\""));
        let export = markup_for(&link, MarkupMode::Export);
        assert!(export.contains("href=\"https://example.com/a\""));
    }

    #[test]
    fn test_divider_preview_default_size() {
        let divider = element(ElementKind::Divider);
        let html = markup_for(&divider, MarkupMode::Preview);
        assert!(html.contains("width: 200px"));
        assert!(html.contains("height: 1px"));
    }

    #[test]
    fn test_list_newline_items_with_fallback() {
        let mut list = element(ElementKind::List);
        list.props.insert("items".into(), json!("First\n\nThird"));
        list.props.insert("ordered".into(), json!(true));
        let html = markup_for(&list, MarkupMode::Export);
        assert!(html.starts_with("<ol"));
        assert!(html.contains("<li>First</li>"));
        assert!(html.contains("<li>Item 2</li>"));
        assert!(html.contains("<li>Third</li>"));
    }

    #[test]
    fn test_select_placeholder_option() {
        let mut select = element(ElementKind::Select);
        select.props.insert("placeholder".into(), json!("Pick one"));
        select.props.insert("options".into(), json!("A\nB"));
        let html = markup_for(&select, MarkupMode::Export);
        assert!(html.contains("<option value=\"\" disabled>Pick one</option>"));
        assert_eq!(html.matches("<option").count(), 3);
    }

    #[test]
    fn test_table_synthesizes_cells() {
        let mut table = element(ElementKind::Table);
        table.props.insert("rows".into(), json!(2));
        table.props.insert("cols".into(), json!(2));
        let html = markup_for(&table, MarkupMode::Export);
        assert_eq!(html.matches("<th ").count(), 2);
        assert_eq!(html.matches("<td ").count(), 4);
        assert!(html.contains("Cell 2-2"));
    }

    #[test]
    fn test_table_header_toggle() {
        let mut table = element(ElementKind::Table);
        table.props.insert("header".into(), json!(false));
        let html = markup_for(&table, MarkupMode::Export);
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<tbody>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut span = element(ElementKind::Span);
        span.props.insert("text".into(), json!("<script>alert('x')</script>"));
        let html = markup_for(&span, MarkupMode::Export);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unknown_kind_fallback() {
        let unknown = element(ElementKind::Unknown);
        let html = markup_for(&unknown, MarkupMode::Preview);
        assert!(html.contains("Unknown Element"));
    }

    #[test]
    fn test_every_kind_produces_markup() {
        for kind in ElementKind::ALL {
            let html = markup_for(&element(*kind), MarkupMode::Export);
            assert!(html.starts_with('<'), "no markup for {kind}");
            assert!(html.contains("element-"), "missing anchor for {kind}");
        }
    }
}
