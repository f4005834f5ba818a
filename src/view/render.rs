use std::fmt::Write;
use std::time::Instant;

use super::{SearchView, ViewState};

const RULE: &str = "------------------------------------------------------------";

/// Renders the whole view as plain text. `now` decides which copy pulses are
/// still lit.
pub fn render(view: &SearchView, now: Instant) -> String {
    let mut out = String::new();

    // header
    let _ = writeln!(out, "Data Breach Lookup                          Breach Database");
    let _ = writeln!(out, "{RULE}");

    // search panel
    let _ = writeln!(out, "Search Database");
    let _ = writeln!(out, "> {}", view.query());
    if view.is_loading() {
        let _ = writeln!(out, "[Searching...]");
    }
    if let Some(message) = view.message() {
        let _ = writeln!(out, "! {message}");
    }

    match view.state() {
        ViewState::Loading => {
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "Searching Database");
            let _ = writeln!(out, "Searching data breaches...");
        }
        ViewState::Loaded { count, lines } => {
            let _ = writeln!(out, "{RULE}");
            render_statistics(&mut out, view, *count, lines.len());
            let _ = writeln!(out, "{RULE}");
            render_records(&mut out, view, now);
        }
        ViewState::Idle | ViewState::Empty | ViewState::Error { .. } => {}
    }

    out
}

fn render_statistics(out: &mut String, view: &SearchView, count: u64, len: usize) {
    let _ = writeln!(out, "Statistics");
    let _ = writeln!(out, "  Total Records:   {count}");
    let _ = writeln!(out, "  Query:           {}", view.query());
    let _ = writeln!(
        out,
        "  Visible Records: {} of {} (Page {}/{})",
        view.visible_lines().len(),
        len,
        view.page().current_page(),
        view.total_pages()
    );
}

fn render_records(out: &mut String, view: &SearchView, now: Instant) {
    let _ = writeln!(out, "Breach Records");
    for (index, row) in view.rows().iter().enumerate() {
        let marker = if row.pulse().is_active(now) {
            "[copied]"
        } else {
            "[copy]"
        };
        let _ = writeln!(out, "  {:>2}. {}  {marker}", index + 1, row.line());
    }

    let previous = if view.can_go_previous() {
        "< Previous"
    } else {
        "  (Previous)"
    };
    let next = if view.can_go_next() {
        "Next >"
    } else {
        "(Next)"
    };
    let _ = writeln!(out, "{previous}    {next}");
}
