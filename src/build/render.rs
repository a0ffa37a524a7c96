//! HTML page wrapping with Tera.

use serde::Serialize;
use tera::{Context, Tera};

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
</head>
<body>
<h1>{{ title }}</h1>
{{ content | safe }}
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"<ul>
{% for entry in entries -%}
<li>[{{ entry.id }}] <a href="{{ entry.url | safe }}">{{ entry.title }}</a></li>
{% endfor -%}
</ul>
"#;

/// One line of the site index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub id: i64,
    pub url: String,
    pub title: String,
}

/// The template renderer, wrapping Tera.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer with the built-in page and index templates.
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("page.html", PAGE_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Wrap an HTML fragment in a full page titled `title`.
    pub fn render_page(&self, title: &str, content: &str) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("content", content);
        Ok(self.tera.render("page.html", &context)?)
    }

    /// Render the index page listing every migrated item.
    pub fn render_index(&self, title: &str, entries: &[IndexEntry]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("entries", entries);
        let list = self.tera.render("index.html", &context)?;
        self.render_page(title, &list)
    }
}
