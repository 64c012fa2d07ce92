//! Placeholder substitution for template bodies.
//!
//! `{{name}}` and `{{{name}}}` both insert the raw value: the output is
//! LaTeX, not HTML, so the default HTML escaping is switched off. Missing keys
//! render as an empty string. Templates that want escaping opt in per value
//! with `{{latex name}}`.
//!
//! Only text shaped like a Handlebars tag is handed to the engine as syntax.
//! Everything else is LaTeX: backslashes and opening braces outside tags are
//! swapped for Unicode noncharacters before rendering and swapped back after,
//! so `\\{{x}}`, `\{{{x}}\}` and `{{\Large Resume}}` come out as written.

use std::sync::LazyLock;

use handlebars::{handlebars_helper, no_escape, Handlebars, RenderError};
use regex::Regex;
use serde_json::Value;

const LITERAL_BACKSLASH: char = '\u{FDD0}';
const LITERAL_BRACE: char = '\u{FDD1}';

/// Triple-stash, comment, or double-brace tag (optionally `#`, `/`, `^`, `>`
/// or `&` prefixed) naming a path or helper.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{\{\{~?\s*[A-Za-z_@.][^{}]*\}\}\}",
        r"|\{\{~?!(?s:--.*?--|[^{}]*)~?\}\}",
        r"|\{\{~?\s*(?:[#/^>&]\s*)?[A-Za-z_@.][^{}]*\}\}",
    ))
    .expect("valid tag regex")
});

handlebars_helper!(latex: |value: Json| latex_value(value));

static REGISTRY: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(no_escape);
    registry.register_helper("latex", Box::new(latex));
    registry
});

/// Substitutes `data` into `body`.
pub fn substitute(body: &str, data: &Value) -> Result<String, RenderError> {
    let rendered = REGISTRY.render_template(&protect_literals(body), data)?;
    Ok(restore_literals(&rendered))
}

/// Whether `text` contains anything the engine would treat as a tag.
pub fn has_placeholder(text: &str) -> bool {
    TAG.is_match(text)
}

fn protect_literals(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut last = 0;
    for tag in TAG.find_iter(body) {
        push_literal(&mut out, &body[last..tag.start()]);
        out.push_str(tag.as_str());
        last = tag.end();
    }
    push_literal(&mut out, &body[last..]);
    out
}

fn push_literal(out: &mut String, text: &str) {
    out.extend(text.chars().map(|c| match c {
        '\\' => LITERAL_BACKSLASH,
        '{' => LITERAL_BRACE,
        other => other,
    }));
}

fn restore_literals(rendered: &str) -> String {
    rendered
        .chars()
        .map(|c| match c {
            LITERAL_BACKSLASH => '\\',
            LITERAL_BRACE => '{',
            other => other,
        })
        .collect()
}

fn latex_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => escape_latex(s),
        other => escape_latex(&other.to_string()),
    }
}

/// Escapes the LaTeX special characters in `text`.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
