//! Safe LaTeX template rendering.
//!
//! A template is split at `\begin{document}`. Everything up to and including
//! the marker is the preamble and is copied through byte for byte; only the
//! body is substituted and repaired. User-supplied values therefore can never
//! rewrite the document class, packages or macro definitions.
//!
//! Rendering never fails. Problems are reported as [`Diagnostic`]s and the
//! best-effort document is returned anyway.

use serde::Serialize;
use serde_json::Value;

use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::repair::repair_body;
use super::substitute::{has_placeholder, substitute};

/// Boundary between the preamble and the substitutable body.
pub const MARKER: &str = r"\begin{document}";

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderOutput {
    pub document: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders `data` into `template` and logs every diagnostic.
pub fn render(template: &str, data: &Value) -> String {
    let output = render_with_diagnostics(template, data);
    for diagnostic in &output.diagnostics {
        diagnostic.log();
    }
    output.document
}

/// Pure form of [`render`]: diagnostics are returned, not logged.
pub fn render_with_diagnostics(template: &str, data: &Value) -> RenderOutput {
    if template.is_empty() {
        return RenderOutput::default();
    }

    let Some(marker_at) = template.find(MARKER) else {
        return RenderOutput {
            document: template.to_string(),
            diagnostics: vec![Diagnostic::error(
                DiagnosticKind::MissingMarker,
                format!("Template has no {MARKER} marker; returning it unchanged"),
            )],
        };
    };

    let (preamble, body) = template.split_at(marker_at + MARKER.len());
    let mut diagnostics = Vec::new();

    let marker_count = template.matches(MARKER).count();
    if marker_count > 1 {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::DuplicateMarker,
            format!("Template contains {marker_count} {MARKER} markers; splitting at the first"),
        ));
    }

    if has_placeholder(preamble) {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::PlaceholderInPreamble,
            "Placeholders before the document marker are not substituted",
        ));
    }

    let substituted = match substitute(body, data) {
        Ok(text) => text,
        Err(e) => {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::SubstitutionFailed,
                format!("Substitution failed, keeping the raw body: {e}"),
            ));
            body.to_string()
        }
    };

    let (repaired, repairs) = repair_body(&substituted);
    diagnostics.extend(repairs);

    let mut document = String::with_capacity(preamble.len() + repaired.len());
    document.push_str(preamble);
    document.push_str(&repaired);

    RenderOutput {
        document,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::render::diagnostics::DiagnosticLevel;

    #[test]
    fn test_end_to_end_header_and_name() {
        let out = render("HEADER\\begin{document}{{name}}", &json!({ "name": "X" }));
        assert_eq!(out, "HEADER\\begin{document}X");
    }

    #[test]
    fn test_empty_template_renders_empty() {
        let out = render_with_diagnostics("", &json!({ "name": "X" }));
        assert_eq!(out.document, "");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_marker_returns_template_verbatim() {
        let template = r"\textbf Hello {{name}}";
        let out = render_with_diagnostics(template, &json!({ "name": "Ann" }));
        assert_eq!(out.document, template);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::MissingMarker);
        assert_eq!(out.diagnostics[0].level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_preamble_is_never_touched() {
        let preamble = "\\documentclass{article}\n\\newcommand{\\name}{{{name}}}\n\\textbf Hello\n\\begin{document}";
        let template = format!("{preamble}\n{{{{name}}}} \\textbf World\n\\end{{document}}");
        let out = render_with_diagnostics(&template, &json!({ "name": "Ann" }));
        assert!(out.document.starts_with(preamble));
        assert_eq!(
            &out.document[preamble.len()..],
            "\nAnn \\textbf{World}\n\\end{document}"
        );
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::PlaceholderInPreamble));
    }

    #[test]
    fn test_clean_preamble_has_no_warning() {
        let out = render_with_diagnostics(
            "\\usepackage{graphicx}\n\\begin{document}\n{{name}}",
            &json!({ "name": "Ann" }),
        );
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.document, "\\usepackage{graphicx}\n\\begin{document}\nAnn");
    }

    #[test]
    fn test_substituted_value_has_no_template_braces() {
        let out = render("\\begin{document}Name: {{name}}.", &json!({ "name": "Ann" }));
        assert_eq!(out, "\\begin{document}Name: Ann.");
        assert!(!out.contains("{{"));
        assert!(!out.contains("}}"));
    }

    #[test]
    fn test_user_value_is_repaired() {
        let out = render(
            "\\begin{document}\\textbf {{company}} Corp",
            &json!({ "company": "Acme" }),
        );
        assert_eq!(out, "\\begin{document}\\textbf{Acme} Corp");
    }

    #[test]
    fn test_inline_photo_gets_wrapped() {
        let out = render_with_diagnostics(
            "\\begin{document}\n\\includegraphics[width=2cm]{{photo}}\n",
            &json!({ "photo": "data:image/png;base64,iVBORw0KGgo=" }),
        );
        assert_eq!(
            out.document,
            "\\begin{document}\n\\includegraphics[width=2cm]{data:image/png;base64,iVBORw0KGgo=}\n"
        );
        assert_eq!(out.diagnostics.len(), 2);
    }

    #[test]
    fn test_substitution_failure_keeps_raw_body() {
        let out = render_with_diagnostics(
            "pre\\begin{document}{{#each items}}\\textbf x",
            &json!({ "items": [1, 2] }),
        );
        assert_eq!(out.document, "pre\\begin{document}{{#each items}}\\textbf{x}");
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::SubstitutionFailed);
    }

    #[test]
    fn test_backslashes_before_placeholders_survive() {
        let out = render("\\begin{document}A\\\\{{x}}", &json!({ "x": "B" }));
        assert_eq!(out, "\\begin{document}A\\\\B");

        let out = render("\\begin{document}\\{{{x}}\\}", &json!({ "x": "B" }));
        assert_eq!(out, "\\begin{document}\\{B\\}");
    }

    #[test]
    fn test_latex_group_does_not_block_substitution() {
        let out = render_with_diagnostics(
            "\\begin{document}{{\\Large Resume}} {{name}}",
            &json!({ "name": "Ann" }),
        );
        assert_eq!(out.document, "\\begin{document}{{\\Large Resume}} Ann");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_marker_splits_at_first() {
        let out = render_with_diagnostics(
            "a\\begin{document}{{x}}\\begin{document}{{x}}",
            &json!({ "x": "1" }),
        );
        assert_eq!(out.document, "a\\begin{document}1\\begin{document}1");
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::DuplicateMarker);
    }

    #[test]
    fn test_render_twice_is_stable_for_repairs() {
        let template = "\\begin{document}\\emph {{a}} \\includegraphics{{b}}";
        let data = json!({ "a": "Lead", "b": "data:image/png;base64,AA" });
        let once = render(template, &data);
        assert_eq!(render(&once, &json!({})), once);
    }
}
