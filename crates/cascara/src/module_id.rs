//! Module identifier and wrapper handling.
//!
//! The host addresses an embedded style block as a virtual module: a file
//! path plus a query string (`Button.scss?raw`, `Button.scss?inline=shadow`)
//! and a body wrapped in a JS string literal with `\n`-escaped newlines.

use std::collections::HashMap;

/// How a style block participates in page styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope {
    /// Ordinary block: folds into the shared page stylesheet
    Page,
    /// Shadow-DOM scoped: keeps its CSS inline, excluded from the page
    /// sheet so isolated-DOM components do not inherit ambient styles
    Shadow,
}

/// Parsed module identifier: file extension plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleQuery {
    pub extension: String,
    pub params: HashMap<String, Option<String>>,
}

impl ModuleQuery {
    pub fn parse(id: &str) -> Self {
        let (path, query) = match id.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (id, None),
        };
        let extension = path.rsplit('.').next().unwrap_or("").to_string();

        let mut params = HashMap::new();
        if let Some(query) = query {
            for pair in query.split('&') {
                match pair.split_once('=') {
                    Some((key, value)) => params.insert(key.to_string(), Some(value.to_string())),
                    None => params.insert(pair.to_string(), None),
                };
            }
        }
        Self { extension, params }
    }

    pub fn is_scss(&self) -> bool {
        self.extension == "scss"
    }

    /// The transform only acts on modules requested with the `raw` or
    /// `inline` flag; the flag value `shadow` marks shadow-DOM scoping.
    pub fn style_request(&self) -> Option<StyleScope> {
        let value = self
            .params
            .get("raw")
            .or_else(|| self.params.get("inline"))?;
        if value.as_deref() == Some("shadow") {
            Some(StyleScope::Shadow)
        } else {
            Some(StyleScope::Page)
        }
    }
}

/// Strip the host's string-literal wrapper from an embedded style module,
/// yielding newline-delimited SCSS source.
pub fn unwrap_module_literal(code: &str) -> String {
    let inner = code.strip_prefix("export default \"").unwrap_or(code);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    inner.replace("\\n", "\n")
}

/// Wrap compiled CSS back into a module body. A template literal, since
/// expanded output spans multiple lines.
pub fn wrap_module_literal(css: &str) -> String {
    format!("export default `{css}`")
}
