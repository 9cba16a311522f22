// src/utils/text_debug.rs
use crate::extractors::statement::{LineOutcome, SkipReason, TracedLine};

/// Renders traced lines as text, each prefixed with the way the extractor treated it.
/// Page breaks are marked so the dump can be read next to the PDF.
pub fn annotate_lines(trace: &[TracedLine]) -> String {
    let mut out = String::new();
    let mut page = 0;

    for line in trace {
        if line.page != page {
            page = line.page;
            out.push_str(&format!("===== page {} =====\n", page));
        }
        let tag = match &line.outcome {
            LineOutcome::Blank => String::new(),
            LineOutcome::Header(name) => format!("HEADER {}", name),
            LineOutcome::Subtotal(name) => format!("SUBTOTAL {}", name),
            LineOutcome::Record => "RECORD".to_string(),
            LineOutcome::Continuation => "CONT".to_string(),
            LineOutcome::Skipped(SkipReason::Invalid(e)) => format!("INVALID {}", e),
            LineOutcome::Skipped(reason) => format!("SKIP {:?}", reason).to_uppercase(),
        };
        out.push_str(&format!("{:>4} [{:<32}] {}\n", line.line, tag, line.text.trim_end()));
    }

    out
}
