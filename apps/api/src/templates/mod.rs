//! Named LaTeX resume templates.
//!
//! The store always holds the built-in `classic` template. Deployments can add
//! or override templates by pointing `TEMPLATE_DIR` at a directory of `*.tex`
//! files; each file is registered under its file stem.

pub mod handlers;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

pub const BUILTIN_TEMPLATE: &str = "classic";
const CLASSIC_SOURCE: &str = include_str!("../../templates/classic.tex");
const TEMPLATE_EXTENSION: &str = "tex";

#[derive(Debug, Error)]
pub enum TemplateStoreError {
    #[error("Template directory {path} could not be read: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: BTreeMap<String, String>,
}

impl TemplateStore {
    /// A store holding only the built-in template.
    pub fn with_builtin() -> Self {
        let mut store = Self::default();
        store.insert(BUILTIN_TEMPLATE, CLASSIC_SOURCE);
        store
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    /// Registers every `*.tex` file in `dir`. Returns the number loaded.
    ///
    /// Files that cannot be read are skipped with a warning; a directory that
    /// cannot be listed is an error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, TemplateStoreError> {
        let entries = std::fs::read_dir(dir).map_err(|source| TemplateStoreError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    if self.templates.contains_key(name) {
                        info!("Template '{name}' overridden by {}", path.display());
                    }
                    self.insert(name, source);
                    loaded += 1;
                }
                Err(e) => warn!("Skipping template {}: {e}", path.display()),
            }
        }

        Ok(loaded)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Template names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::resume::{Experience, ResumeData};
    use crate::render::diagnostics::DiagnosticLevel;
    use crate::render::render_with_diagnostics;
    use crate::render::sanitizer::MARKER;

    #[test]
    fn test_builtin_is_present() {
        let store = TemplateStore::with_builtin();
        assert_eq!(store.names(), vec![BUILTIN_TEMPLATE]);
        assert!(store.get(BUILTIN_TEMPLATE).unwrap().contains(MARKER));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_load_dir_registers_tex_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modern.tex"), "\\begin{document}{{name}}").unwrap();
        std::fs::write(dir.path().join("classic.tex"), "override").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut store = TemplateStore::with_builtin();
        let loaded = store.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.names(), vec!["classic", "modern"]);
        assert_eq!(store.get("classic"), Some("override"));
    }

    #[test]
    fn test_load_missing_dir_is_error() {
        let mut store = TemplateStore::default();
        let err = store
            .load_dir(Path::new("/nonexistent/resume/templates"))
            .unwrap_err();
        assert!(matches!(err, TemplateStoreError::ReadDir { .. }));
    }

    #[test]
    fn test_classic_renders_resume_without_errors() {
        let resume = ResumeData {
            name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            photo: Some("data:image/png;base64,iVBORw0KGgo=".into()),
            skills: "Rust, C++".into(),
            experience: vec![Experience {
                title: "Engineer".into(),
                company: "R&D Labs".into(),
                description: "- Cut costs by 30%".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let store = TemplateStore::with_builtin();
        let template = store.get(BUILTIN_TEMPLATE).unwrap();
        let out = render_with_diagnostics(template, &resume.to_substitution_map());

        assert!(out
            .diagnostics
            .iter()
            .all(|d| d.level != DiagnosticLevel::Error));
        assert!(out
            .document
            .contains(r"\includegraphics[width=\linewidth]{data:image/png;base64,iVBORw0KGgo=}"));
        assert!(out.document.contains(r"R\&D Labs"));
        assert!(out.document.contains(r"Cut costs by 30\%"));
        assert!(out.document.contains("Rust, C++"));
        assert!(out.document.ends_with("\\end{document}\n"));
    }

    #[test]
    fn test_classic_renders_empty_data() {
        let store = TemplateStore::with_builtin();
        let out = render_with_diagnostics(store.get(BUILTIN_TEMPLATE).unwrap(), &json!({}));
        assert!(out.diagnostics.is_empty());
        assert!(!out.document.contains("Experience"));
    }
}
