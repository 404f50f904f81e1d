//! Result presentation.
//!
//! Pure formatting over already-resolved query results. Every provider
//! attempted gets a panel, failed ones included; there is nothing here
//! that can fail.

use std::fmt::Write;

use quorum_core::models::QueryResult;

/// Render one labeled panel per result, in dispatch order.
pub fn render_panels(results: &[QueryResult]) -> String {
    results
        .iter()
        .map(render_panel)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_panel(result: &QueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", result.provider);
    if let Some(elapsed) = result.elapsed {
        let _ = writeln!(out, "Elapsed time: {:.2} seconds", elapsed.as_secs_f64());
    }
    let _ = writeln!(out, "{}", result.answer_text());
    out
}
