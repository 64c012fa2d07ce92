use serde::{Deserialize, Serialize};

use crate::models::resume::{split_bullets, ResumeData};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Strong,
    Moderate,
    Weak,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: String,
    pub score: f64,
    pub entry_count: usize,
    pub missing_quantification: usize,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<String>,
    pub missing_contact: Vec<String>,
}

/// (section, weight, entry count at which the section counts as full)
const SECTION_WEIGHTS: &[(&str, f64, usize)] = &[
    ("experience", 0.35, 2),
    ("education", 0.20, 1),
    ("skills", 0.20, 6),
    ("projects", 0.15, 2),
    ("achievements", 0.10, 1),
];

/// Per-section view used for scoring: entry count and, for sections with
/// free-text descriptions, how many entries carry content and metrics.
struct SectionFacts {
    entry_count: usize,
    described: usize,
    missing_quantification: usize,
}

pub fn compute_completeness(resume: &ResumeData) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_score_sum = 0.0;

    for &(section_key, weight, target) in SECTION_WEIGHTS {
        let facts = section_facts(resume, section_key);

        if facts.entry_count == 0 {
            missing_sections.push(section_key.to_string());
            sections.push(SectionHealth {
                section: section_key.to_string(),
                score: 0.0,
                entry_count: 0,
                missing_quantification: 0,
                status: SectionStatus::Missing,
                recommendations: vec![format!(
                    "Add at least one {section_key} entry to strengthen your resume"
                )],
            });
            continue;
        }

        let coverage = (facts.entry_count as f64 / target as f64).min(1.0);
        let quality = facts.described as f64 / facts.entry_count as f64;
        let section_score = (0.5 * coverage + 0.5 * quality).clamp(0.0, 1.0);

        let status = match section_score {
            s if s >= 0.8 => SectionStatus::Strong,
            s if s >= 0.5 => SectionStatus::Moderate,
            _ => SectionStatus::Weak,
        };

        let mut recommendations = Vec::new();
        if facts.missing_quantification > 0 {
            recommendations.push(format!(
                "{} {} entries have no numbers; add a metric such as %, $, or a count",
                facts.missing_quantification, section_key
            ));
        }
        if facts.described < facts.entry_count {
            recommendations.push(format!(
                "{} {} entries are missing details",
                facts.entry_count - facts.described,
                section_key
            ));
        }
        if facts.entry_count < target {
            recommendations.push(format!(
                "Add more {section_key} entries to build a complete picture"
            ));
        }

        weighted_score_sum += section_score * weight;
        sections.push(SectionHealth {
            section: section_key.to_string(),
            score: section_score,
            entry_count: facts.entry_count,
            missing_quantification: facts.missing_quantification,
            status,
            recommendations,
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w, _)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        sections,
        missing_sections,
        missing_contact: missing_contact(resume),
    }
}

fn section_facts(resume: &ResumeData, section: &str) -> SectionFacts {
    let described = |descriptions: Vec<&str>| SectionFacts {
        entry_count: descriptions.len(),
        described: descriptions
            .iter()
            .filter(|d| !split_bullets(d).is_empty())
            .count(),
        missing_quantification: descriptions.iter().filter(|d| !is_quantified(d)).count(),
    };

    match section {
        "experience" => described(
            resume
                .experience
                .iter()
                .map(|e| e.description.as_str())
                .collect(),
        ),
        "projects" => described(
            resume
                .projects
                .iter()
                .map(|p| p.description.as_str())
                .collect(),
        ),
        "education" => {
            let entry_count = resume.education.len();
            SectionFacts {
                entry_count,
                described: resume
                    .education
                    .iter()
                    .filter(|e| !e.degree.trim().is_empty())
                    .count(),
                missing_quantification: 0,
            }
        }
        "skills" => {
            let entry_count = resume.skill_list().len();
            SectionFacts {
                entry_count,
                described: entry_count,
                missing_quantification: 0,
            }
        }
        "achievements" => SectionFacts {
            entry_count: resume.achievements.len(),
            described: resume
                .achievements
                .iter()
                .filter(|a| !a.title.trim().is_empty())
                .count(),
            missing_quantification: 0,
        },
        _ => SectionFacts {
            entry_count: 0,
            described: 0,
            missing_quantification: 0,
        },
    }
}

/// A description counts as quantified when it carries a digit or a
/// percent/currency sign.
fn is_quantified(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

fn missing_contact(resume: &ResumeData) -> Vec<String> {
    [
        ("name", &resume.name),
        ("email", &resume.email),
        ("phone", &resume.phone),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field.to_string())
    .collect()
}
