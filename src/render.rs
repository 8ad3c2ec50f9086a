//! HTML pages, rendered with minijinja from templates embedded at build time.

use crate::error::LoongesError;
use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("products.html", include_str!("../templates/products.html")),
    (
        "product_detail.html",
        include_str!("../templates/product_detail.html"),
    ),
    ("factory.html", include_str!("../templates/factory.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    (
        "admin_messages.html",
        include_str!("../templates/admin_messages.html"),
    ),
];

/// Template registry shared by all handlers. `.html` templates auto-escape.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, LoongesError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, LoongesError> {
        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn every_template_renders_with_empty_context() {
        let pages = Pages::new().expect("templates compile");
        for (name, _) in TEMPLATES {
            if *name == "base.html" {
                continue;
            }
            pages
                .render(name, context! { product => crate::catalog::DEFAULT_PRODUCT })
                .unwrap_or_else(|e| panic!("{name} failed to render: {e}"));
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let pages = Pages::new().expect("templates compile");
        let messages = vec![crate::db::ContactMessage {
            id: 1,
            name: "<script>alert(1)</script>".to_string(),
            email: "a@x.com".to_string(),
            message: "Hi".to_string(),
            timestamp: chrono::Utc::now(),
        }];
        let Html(body) = pages
            .render("admin_messages.html", context! { messages })
            .expect("render inbox");
        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("&lt;script&gt;"));
    }
}
