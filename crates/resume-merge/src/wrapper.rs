//! Document shell around a merged body fragment.
//!
//! The shell is sized in physical units only (mm / pt), so an on-screen scaled
//! preview and a headless PDF capture lay out identically.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::escape::escape_html;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    fn css_name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }

    fn dimensions(self) -> (&'static str, &'static str) {
        match self {
            PageSize::A4 => ("210mm", "297mm"),
            PageSize::Letter => ("215.9mm", "279.4mm"),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    pub page_size: PageSize,
    pub title: String,
    pub lang: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            title: "Resume".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// Page margin applied inside the page box.
const PAGE_PADDING: &str = "14mm 16mm";

const BASE_STYLES: &str = "\
*, *::before, *::after { box-sizing: border-box; }
html, body { margin: 0; padding: 0; background: #ffffff; }
body {
  font-family: 'Helvetica Neue', Helvetica, Arial, 'Liberation Sans', sans-serif;
  font-size: 10.5pt;
  line-height: 1.4;
  color: #1a1a1a;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}
h1 { font-size: 22pt; line-height: 1.2; margin: 0 0 4pt; }
h2 { font-size: 13pt; margin: 12pt 0 4pt; text-transform: uppercase; letter-spacing: 0.5pt; }
h3 { font-size: 11pt; margin: 8pt 0 2pt; }
p { margin: 0 0 4pt; }
ul { margin: 2pt 0 6pt; padding-left: 14pt; }
li { margin: 0 0 2pt; }
a { color: inherit; text-decoration: none; }
";

static STYLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</style").expect("style close pattern is always valid"));

/// Wraps a merged body fragment in a complete HTML document.
///
/// Fixed print styles come first and the template's CSS last, so template
/// rules override the defaults. The template CSS cannot close the style
/// element early.
pub fn wrap_document(body: &str, template_css: &str, options: &ShellOptions) -> String {
    let (width, height) = options.page_size.dimensions();
    let template_css = STYLE_CLOSE.replace_all(template_css, r"<\/style");

    let mut html = String::with_capacity(body.len() + template_css.len() + BASE_STYLES.len() + 512);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n", escape_html(&options.lang)));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&options.title)));
    html.push_str("<style>\n");
    html.push_str(&format!(
        "@page {{ size: {}; margin: 0; }}\n",
        options.page_size.css_name()
    ));
    html.push_str(BASE_STYLES);
    html.push_str(&format!(
        ".resume-page {{ width: {width}; min-height: {height}; padding: {PAGE_PADDING}; margin: 0 auto; overflow: hidden; }}\n"
    ));
    html.push_str("</style>\n<style>\n");
    html.push_str(&template_css);
    html.push_str("\n</style>\n</head>\n<body>\n<div class=\"resume-page\">\n");
    html.push_str(body);
    html.push_str("\n</div>\n</body>\n</html>\n");
    html
}
