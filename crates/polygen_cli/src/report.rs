use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use polygen::DiagramSyntaxError;

const SOURCE_ID: &str = "diagram";

type AriadneSpan = (&'static str, Range<usize>);

/// Renders a syntax error as a labelled report that underlines the offending
/// characters in `diagram`.
pub(crate) fn render_syntax_error(diagram: &str, e: &DiagramSyntaxError, color: bool) -> String {
    let len = diagram.chars().count();
    if len == 0 {
        return e.to_string();
    }
    // Empty spans and spans at the end of the diagram point at the nearest
    // character instead.
    let start = e.span.start.min(len - 1);
    let end = e.span.end.clamp(start + 1, len);
    let span: AriadneSpan = (SOURCE_ID, start..end);

    let mut reasons = e.reasons.iter();
    let message = reasons.next().cloned().unwrap_or_else(|| e.kind.to_string());

    let mut builder = Report::build(ReportKind::Error, span.clone())
        .with_config(ariadne::Config::default().with_color(color))
        .with_message("invalid Coxeter diagram")
        .with_label(
            Label::new(span)
                .with_message(message)
                .with_color(Color::Red),
        );
    for hint in reasons {
        builder.add_help(hint);
    }

    let mut out = vec![];
    match builder
        .finish()
        .write((SOURCE_ID, Source::from(diagram)), &mut out)
    {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => format!("{e} (error rendering report: {err})"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_syntax_error() {
        let diagram = "x4o3o3*z";
        let e = polygen::parse(diagram).unwrap_err();
        let report = render_syntax_error(diagram, &e, false);
        assert!(report.contains("invalid Coxeter diagram"));
        assert!(report.contains(diagram));
        assert!(report.contains("virtual node *z"));
    }

    #[test]
    fn test_render_error_at_end() {
        let diagram = "x4o3";
        let e = polygen::parse(diagram).unwrap_err();
        let report = render_syntax_error(diagram, &e, false);
        assert!(report.contains("missing node"));

        let e = polygen::parse("").unwrap_err();
        assert_eq!(render_syntax_error("", &e, false), e.to_string());
    }
}
