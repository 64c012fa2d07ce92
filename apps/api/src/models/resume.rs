use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A resume as entered in the builder form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub summary: String,
    /// Inline image as a `data:` URI.
    pub photo: Option<String>,
    /// Free text, separated by commas, semicolons or newlines.
    pub skills: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub grade: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// One accomplishment per line.
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub link: String,
    pub technologies: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl ResumeData {
    /// Skills split into a de-duplicated list.
    pub fn skill_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }

    /// Builds the substitution map consumed by the LaTeX templates.
    ///
    /// `skills` becomes a list, experience and project records gain a
    /// `bullets` list, and `has_*` flags are added for `{{#if}}` blocks.
    pub fn to_substitution_map(&self) -> Value {
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let skills = self.skill_list();
        let photo = self.photo.as_deref().filter(|p| !p.trim().is_empty());

        map.insert("has_skills".into(), json!(!skills.is_empty()));
        map.insert("skills".into(), json!(skills));
        map.insert("has_photo".into(), json!(photo.is_some()));
        map.insert("has_education".into(), json!(!self.education.is_empty()));
        map.insert("has_experience".into(), json!(!self.experience.is_empty()));
        map.insert("has_projects".into(), json!(!self.projects.is_empty()));
        map.insert("has_achievements".into(), json!(!self.achievements.is_empty()));
        map.insert(
            "experience".into(),
            Value::Array(
                self.experience
                    .iter()
                    .map(|e| with_bullets(e, &e.description))
                    .collect(),
            ),
        );
        map.insert(
            "projects".into(),
            Value::Array(
                self.projects
                    .iter()
                    .map(|p| with_bullets(p, &p.description))
                    .collect(),
            ),
        );

        Value::Object(map)
    }
}

fn with_bullets<T: Serialize>(record: &T, description: &str) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or(Value::Null);
    if let Value::Object(ref mut fields) = value {
        fields.insert("bullets".into(), json!(split_bullets(description)));
    }
    value
}

/// Splits a free-text skill list on `,`, `;` and newlines.
///
/// Entries are trimmed, empties dropped, and case-insensitive duplicates
/// removed keeping the first spelling.
pub fn split_skills(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Splits a description into bullet lines, stripping list markers.
pub fn split_bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim_start()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}
