//! Code Export
//!
//! Serializes the z-order-sorted element collection into three standalone
//! artifacts: a markup document, a stylesheet, and a behavior script.
//! Every element receives a stable `element-<id>` anchor in both the
//! markup and the stylesheet; absolute positioning and z-order are baked
//! into the per-element stylesheet blocks so the exported page matches
//! the canvas.

use maquette_canvas::element::Element;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::markup::{markup_for, MarkupMode};
use crate::style::camel_to_kebab;

/// The three exported artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Markup document
    pub html: String,
    /// Stylesheet
    pub css: String,
    /// Behavior script
    pub js: String,
}

const HTML_HEAD: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>Generated UI</title>
    <link rel=\"stylesheet\" href=\"styles.css\">
</head>
<body>
    <div class=\"container\">
";

const HTML_TAIL: &str = "\
    </div>
    <script src=\"script.js\"></script>
</body>
</html>";

const BASE_CSS: &str = "\
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
        'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue', sans-serif;
    -webkit-font-smoothing: antialiased;
    -moz-osx-font-smoothing: grayscale;
    background: #f5f5f5;
    padding: 2rem;
}

.container {
    position: relative;
    max-width: 1200px;
    margin: 0 auto;
    background: white;
    padding: 2rem;
    border-radius: 8px;
    box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
}

/* Button Styles */
.btn-primary {
    background: #667eea;
    color: white;
    border: none;
    cursor: pointer;
    transition: background 0.2s;
}

.btn-primary:hover {
    background: #5568d3;
}

.btn-secondary {
    background: #6c757d;
    color: white;
    border: none;
    cursor: pointer;
    transition: background 0.2s;
}

.btn-secondary:hover {
    background: #5a6268;
}

.btn-success {
    background: #28a745;
    color: white;
    border: none;
    cursor: pointer;
    transition: background 0.2s;
}

.btn-success:hover {
    background: #218838;
}

.btn-danger {
    background: #dc3545;
    color: white;
    border: none;
    cursor: pointer;
    transition: background 0.2s;
}

.btn-danger:hover {
    background: #c82333;
}

/* Card Styles */
.card {
    padding: 1.5rem;
    background-color: #fff;
    border-radius: 8px;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
}

.card h3 {
    margin: 0 0 0.5rem 0;
    font-size: 1.25rem;
}

.card p {
    margin: 0;
    color: #666;
}

/* Input Styles */
input, textarea {
    font-family: inherit;
    font-size: 1rem;
}

input:focus, textarea:focus {
    outline: none;
    border-color: #667eea;
    box-shadow: 0 0 0 3px rgba(102, 126, 234, 0.1);
}

/* Navbar Styles */
nav ul {
    list-style: none;
    display: flex;
    gap: 2rem;
    margin: 0;
    padding: 0;
}

nav ul li {
    cursor: pointer;
    transition: color 0.2s;
}

nav ul li:hover {
    color: #667eea;
}
";

const SCRIPT_JS: &str = "\
// Generated JavaScript for UI interactions

document.addEventListener('DOMContentLoaded', function() {
    // Button click handlers
    const buttons = document.querySelectorAll('button');
    buttons.forEach(button => {
        button.addEventListener('click', function() {
            console.log('Button clicked:', this.textContent);
            // Add your button click logic here
        });
    });

    // Navbar link handlers
    const navLinks = document.querySelectorAll('nav ul li');
    navLinks.forEach(link => {
        link.addEventListener('click', function() {
            console.log('Nav link clicked:', this.textContent);
            // Add your navigation logic here
        });
    });

    // Input handlers
    const inputs = document.querySelectorAll('input, textarea');
    inputs.forEach(input => {
        input.addEventListener('input', function() {
            console.log('Input changed:', this.value);
            // Add your input handling logic here
        });
    });

    // Image load handlers
    const images = document.querySelectorAll('img');
    images.forEach(img => {
        img.addEventListener('load', function() {
            console.log('Image loaded:', this.src);
        });
        img.addEventListener('error', function() {
            console.error('Image failed to load:', this.src);
        });
    });
});

// Utility functions
function showAlert(message) {
    alert(message);
}

function logToConsole(message) {
    console.log(message);
}
";

/// Export the full canvas. `elements` must already be in paint order
/// (ascending z-index), as produced by the canvas model.
#[must_use]
pub fn export(elements: &[&Element]) -> GeneratedCode {
    debug!(count = elements.len(), "exporting canvas with local templates");
    GeneratedCode {
        html: export_html(elements),
        css: export_css(elements),
        js: export_js(),
    }
}

/// Generate the markup document.
#[must_use]
pub fn export_html(elements: &[&Element]) -> String {
    let mut html = String::from(HTML_HEAD);
    for element in elements {
        for line in markup_for(element, MarkupMode::Export).lines() {
            html.push_str("        ");
            html.push_str(line);
            html.push('\n');
        }
    }
    html.push_str(HTML_TAIL);
    html
}

/// Generate the stylesheet: fixed base rules plus one positioned block
/// per element.
#[must_use]
pub fn export_css(elements: &[&Element]) -> String {
    let mut css = String::from(BASE_CSS);
    for (index, element) in elements.iter().enumerate() {
        css.push_str(&format!(
            "\n/* Element {} - {} */\n#element-{} {{\n",
            index + 1,
            element.kind,
            element.id
        ));
        css.push_str("    position: absolute;\n");
        css.push_str(&format!("    left: {}px;\n", element.position.x));
        css.push_str(&format!("    top: {}px;\n", element.position.y));
        css.push_str(&format!("    z-index: {};\n", element.z_index));
        for (key, value) in &element.style {
            css.push_str(&format!("    {}: {};\n", camel_to_kebab(key), value));
        }
        css.push_str("}\n");
    }
    css
}

/// Generate the behavior script.
#[must_use]
pub fn export_js() -> String {
    SCRIPT_JS.to_string()
}
