//! Plain-text resume export.

use crate::models::resume::{split_bullets, ResumeData};

/// Renders a resume as plain text.
///
/// Sections with no content are omitted. No line carries trailing whitespace.
pub fn to_plain_text(resume: &ResumeData) -> String {
    let mut out = TextWriter::default();

    if !resume.name.trim().is_empty() {
        out.line(resume.name.trim());
    }
    let contact = join_nonempty(
        &[
            &resume.email,
            &resume.phone,
            &resume.location,
            &resume.linkedin,
            &resume.github,
            &resume.website,
        ],
        " | ",
    );
    if !contact.is_empty() {
        out.line(&contact);
    }

    if !resume.summary.trim().is_empty() {
        out.section("SUMMARY");
        out.line(resume.summary.trim());
    }

    if !resume.experience.is_empty() {
        out.section("EXPERIENCE");
        for job in &resume.experience {
            out.line(&join_nonempty(&[&job.title, &job.company, &job.location], ", "));
            out.dates(&job.start_date, &job.end_date);
            for bullet in split_bullets(&job.description) {
                out.line(&format!("- {bullet}"));
            }
        }
    }

    if !resume.education.is_empty() {
        out.section("EDUCATION");
        for edu in &resume.education {
            let degree = join_nonempty(&[&edu.degree, &edu.field], " in ");
            out.line(&join_nonempty(&[&degree, &edu.institution, &edu.location], ", "));
            out.dates(&edu.start_date, &edu.end_date);
            if !edu.grade.trim().is_empty() {
                out.line(&format!("Grade: {}", edu.grade.trim()));
            }
        }
    }

    if !resume.projects.is_empty() {
        out.section("PROJECTS");
        for project in &resume.projects {
            out.line(&join_nonempty(&[&project.name, &project.link], " - "));
            if !project.technologies.trim().is_empty() {
                out.line(&format!("Technologies: {}", project.technologies.trim()));
            }
            for bullet in split_bullets(&project.description) {
                out.line(&format!("- {bullet}"));
            }
        }
    }

    if !resume.achievements.is_empty() {
        out.section("ACHIEVEMENTS");
        for achievement in &resume.achievements {
            let head = match (achievement.title.trim(), achievement.date.trim()) {
                ("", date) => date.to_string(),
                (title, "") => title.to_string(),
                (title, date) => format!("{title} ({date})"),
            };
            let line = join_nonempty(&[&head, &achievement.description], ": ");
            if !line.is_empty() {
                out.line(&format!("- {line}"));
            }
        }
    }

    let skills = resume.skill_list();
    if !skills.is_empty() {
        out.section("SKILLS");
        out.line(&skills.join(", "));
    }

    out.finish()
}

#[derive(Default)]
struct TextWriter {
    lines: Vec<String>,
}

impl TextWriter {
    fn line(&mut self, text: &str) {
        let text = text.trim_end();
        if !text.is_empty() {
            self.lines.push(text.to_string());
        }
    }

    fn section(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(title.to_string());
    }

    fn dates(&mut self, start: &str, end: &str) {
        let range = join_nonempty(&[start, end], " - ");
        self.line(&range);
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

fn join_nonempty<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
