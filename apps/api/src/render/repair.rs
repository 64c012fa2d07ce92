//! Brace repair for substituted LaTeX bodies.
//!
//! Resume data pasted into a template regularly produces command invocations
//! with a missing argument brace: `\includegraphics{{photo}}` expands to
//! `\includegraphicsdata:image/png;...`, `\textbf {{company}}` to
//! `\textbf Acme`. The rules below put the braces back.
//!
//! # Rule order
//! 1. `\includegraphics` + inline `data:` payload → open brace before payload
//! 2. `\includegraphics` + any other non-brace char → open brace at that char
//! 3. formatting command + bare word → wrap the word in braces
//! 4. `\includegraphics{data:...` never closed → close brace appended
//! 5. rule 3 again until nothing changes
//!
//! Every rule is a no-op on well-formed input, so the pass is idempotent.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::diagnostics::{Diagnostic, DiagnosticKind, RepairRule};

/// Formatting commands whose first argument gets wrapped by rule 3.
pub const FORMATTING_COMMANDS: &[&str] = &["textbf", "textit", "emph", "underline", "texttt"];

/// Upper bound on rule 5 iterations.
const MAX_BALANCE_PASSES: usize = 4;

/// `\includegraphics`, optional star, up to two optional `[...]` arguments.
const IMAGE_COMMAND: &str = r"\\includegraphics\*?(?:\[[^\]]*\]){0,2}";

static IMAGE_DATA_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({IMAGE_COMMAND})data:")).expect("valid image data regex")
});

static IMAGE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({IMAGE_COMMAND})[ \t]*([^{{\[\s\\*])")).expect("valid image regex")
});

static FORMATTING_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    let names = FORMATTING_COMMANDS.join("|");
    Regex::new(&format!(r"\\({names})[ \t]*([\p{{L}}\p{{N}}][\p{{L}}\p{{N}}_'\-]*)"))
        .expect("valid formatting regex")
});

static IMAGE_DATA_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({IMAGE_COMMAND}\{{data:[^}}\\\s]*)(\}}?)"))
        .expect("valid image close regex")
});

/// Runs every repair rule over `body` in order.
///
/// Returns the repaired body and one info diagnostic per rule that changed
/// something.
pub fn repair_body(body: &str) -> (String, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let (text, n) = replace_counted(&IMAGE_DATA_OPEN, body, |caps| {
        Some(format!("{}{{data:", &caps[1]))
    });
    note(&mut diagnostics, RepairRule::ImageDataOpenBrace, n);

    let (text, n) = replace_counted(&IMAGE_OPEN, &text, |caps| {
        Some(format!("{}{{{}", &caps[1], &caps[2]))
    });
    note(&mut diagnostics, RepairRule::ImageOpenBrace, n);

    let (text, n) = wrap_formatting_arguments(&text);
    note(&mut diagnostics, RepairRule::FormattingArgument, n);

    let (text, n) = replace_counted(&IMAGE_DATA_CLOSE, &text, |caps| {
        if caps[2].is_empty() {
            Some(format!("{}}}", &caps[1]))
        } else {
            None
        }
    });
    note(&mut diagnostics, RepairRule::ImageDataCloseBrace, n);

    let (text, n) = balance_braces(text);
    note(&mut diagnostics, RepairRule::BraceBalance, n);

    (text, diagnostics)
}

fn wrap_formatting_arguments(text: &str) -> (String, usize) {
    replace_counted(&FORMATTING_ARGUMENT, text, |caps| {
        Some(format!("\\{}{{{}}}", &caps[1], &caps[2]))
    })
}

/// Re-applies the formatting rule until it stops finding bare arguments.
fn balance_braces(mut text: String) -> (String, usize) {
    let mut total = 0;
    for _ in 0..MAX_BALANCE_PASSES {
        let (next, n) = wrap_formatting_arguments(&text);
        if n == 0 {
            break;
        }
        total += n;
        text = next;
    }
    (text, total)
}

/// `replace_all` that counts rewrites. `rewrite` returning `None` keeps the
/// match as-is and does not count it.
fn replace_counted<F>(re: &Regex, text: &str, rewrite: F) -> (String, usize)
where
    F: Fn(&Captures) -> Option<String>,
{
    let mut count = 0;
    let out = re.replace_all(text, |caps: &Captures| match rewrite(caps) {
        Some(replacement) => {
            count += 1;
            replacement
        }
        None => caps[0].to_string(),
    });
    (out.into_owned(), count)
}

fn note(diagnostics: &mut Vec<Diagnostic>, rule: RepairRule, count: usize) {
    if count == 0 {
        return;
    }
    let what = match rule {
        RepairRule::ImageDataOpenBrace => "opened inline image data arguments",
        RepairRule::ImageOpenBrace => "opened image arguments",
        RepairRule::FormattingArgument => "wrapped bare formatting arguments",
        RepairRule::ImageDataCloseBrace => "closed inline image data arguments",
        RepairRule::BraceBalance => "wrapped formatting arguments in balancing pass",
    };
    diagnostics.push(Diagnostic::info(
        DiagnosticKind::Repaired { rule, count },
        format!("Repair: {what} ({count})"),
    ));
}
