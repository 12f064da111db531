//! The fixed-format violation report.
//!
//! Renders the accumulated diagnostics as a banner-framed, 1-based indexed
//! list in discovery order, or the clean message when nothing was found.
//! The format is byte-stable; tooling downstream greps it.

use std::io::{self, Write};

use verdict_diagnostics::Diagnostic;

const BANNER: &str = "====================================";

/// Renders the violation report as a string.
pub fn render_report(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(BANNER);
    out.push('\n');
    out.push_str("        LINTER VIOLATION REPORT       \n");
    out.push_str(BANNER);
    out.push('\n');

    if diagnostics.is_empty() {
        out.push_str("  No violations found. Clean code!\n");
    } else {
        for (index, diag) in diagnostics.iter().enumerate() {
            out.push_str(&format!(" [{}] {}\n", index + 1, diag.message));
        }
    }

    out.push_str(BANNER);
    out.push_str("\n\n");
    out
}

/// Writes the violation report to standard output.
pub fn print_report(diagnostics: &[Diagnostic]) -> io::Result<()> {
    io::stdout().write_all(render_report(diagnostics).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_diagnostics::{Category, DiagnosticCode};
    use verdict_source::Span;

    fn violation(message: &str) -> Diagnostic {
        Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 101),
            message,
            Span::DUMMY,
        )
    }

    #[test]
    fn clean_report_exact_format() {
        let report = render_report(&[]);
        let lines: Vec<&str> = report.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "",
                "====================================",
                "        LINTER VIOLATION REPORT       ",
                "====================================",
                "  No violations found. Clean code!",
                "====================================",
                "",
                "",
            ]
        );
    }

    #[test]
    fn violation_report_exact_format() {
        let report = render_report(&[violation("Non Full/Parallel Case: 'case' missing 'default'.")]);
        let lines: Vec<&str> = report.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "",
                "====================================",
                "        LINTER VIOLATION REPORT       ",
                "====================================",
                " [1] Non Full/Parallel Case: 'case' missing 'default'.",
                "====================================",
                "",
                "",
            ]
        );
    }

    #[test]
    fn numbered_list_in_insertion_order() {
        let diags = vec![
            violation("Infer Latch: 'if' statement without 'else' branch."),
            violation("Multi-Driven Register: 'q' is driven by multiple blocks."),
        ];
        let report = render_report(&diags);
        assert!(report.contains(" [1] Infer Latch: 'if' statement without 'else' branch.\n"));
        assert!(report.contains(" [2] Multi-Driven Register: 'q' is driven by multiple blocks.\n"));
        let latch_pos = report.find("[1]").unwrap();
        let multi_pos = report.find("[2]").unwrap();
        assert!(latch_pos < multi_pos);
    }

    #[test]
    fn indices_are_one_based() {
        let diags = vec![violation("only one")];
        let report = render_report(&diags);
        assert!(report.contains(" [1] only one\n"));
        assert!(!report.contains("[0]"));
    }

    #[test]
    fn duplicates_are_kept() {
        let diags = vec![violation("same message"), violation("same message")];
        let report = render_report(&diags);
        assert!(report.contains(" [1] same message\n"));
        assert!(report.contains(" [2] same message\n"));
    }

    #[test]
    fn report_is_banner_framed() {
        let report = render_report(&[violation("x")]);
        assert!(report.starts_with("\n====================================\n"));
        assert!(report.ends_with("====================================\n\n"));
    }
}
