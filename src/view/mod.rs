//! Client-side search view: one state container whose transitions mirror
//! the search lifecycle, plus in-memory pagination over the fetched lines.

use std::time::Instant;

use crate::clipboard::Clipboard;
use crate::client::ClientError;
use crate::data_models::SearchResult;

pub mod pagination;
pub mod render;
pub mod row;

pub use pagination::{PageState, RESULTS_PER_PAGE};
pub use row::{COPY_PULSE, CopyPulse, RowView};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a username or email to search";
pub const NO_RECORDS_MESSAGE: &str = "No records found for this search term";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded { lines: Vec<String>, count: u64 },
    Empty,
    Error { message: String },
}

/// Generation token handed out by [`SearchView::submit`]. Only the ticket of
/// the most recent submit can resolve the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct SearchView {
    query: String,
    state: ViewState,
    page: PageState,
    generation: u64,
    rows: Vec<RowView>,
}

impl Default for SearchView {
    fn default() -> Self {
        SearchView::new()
    }
}

impl SearchView {
    pub fn new() -> SearchView {
        SearchView {
            query: String::new(),
            state: ViewState::Idle,
            page: PageState::default(),
            generation: 0,
            rows: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Starts a search for the current query.
    ///
    /// A blank query moves straight to the error state and returns `None`;
    /// the caller must not issue a request in that case.
    pub fn submit(&mut self) -> Option<Ticket> {
        if self.query.trim().is_empty() {
            self.state = ViewState::Error {
                message: EMPTY_QUERY_MESSAGE.to_string(),
            };
            self.rows.clear();
            return None;
        }

        self.generation += 1;
        self.state = ViewState::Loading;
        self.page.reset();
        self.rows.clear();
        Some(Ticket(self.generation))
    }

    /// Applies the outcome of a search. Returns `false` and leaves the view
    /// untouched when `ticket` belongs to a superseded search.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<SearchResult, ClientError>) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            log::debug!(
                "dropping stale search result (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }

        self.page.reset();
        self.state = match outcome {
            Ok(result) if result.lines.is_empty() => ViewState::Empty,
            Ok(SearchResult { lines, count }) => ViewState::Loaded { lines, count },
            Err(e) => ViewState::Error {
                message: e.to_string(),
            },
        };
        self.rebuild_rows();
        true
    }

    /// All fetched lines; empty unless loaded.
    pub fn lines(&self) -> &[String] {
        match &self.state {
            ViewState::Loaded { lines, .. } => lines,
            _ => &[],
        }
    }

    pub fn total_records(&self) -> Option<u64> {
        match &self.state {
            ViewState::Loaded { count, .. } => Some(*count),
            _ => None,
        }
    }

    /// User-facing message for the empty and error states.
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Empty => Some(NO_RECORDS_MESSAGE),
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.lines().len())
    }

    pub fn visible_lines(&self) -> &[String] {
        let lines = self.lines();
        &lines[self.page.range(lines.len())]
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn can_go_previous(&self) -> bool {
        self.page.has_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.page.has_next(self.lines().len())
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.lines().len();
        let moved = self.page.next(len);
        if moved {
            self.rebuild_rows();
        }
        moved
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.page.previous();
        if moved {
            self.rebuild_rows();
        }
        moved
    }

    /// Copies the visible row at `index` and pulses that row only. The
    /// clipboard result is not reported back; a failed write is logged.
    pub fn copy_row(
        &mut self,
        index: usize,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Option<&str> {
        let row = self.rows.get_mut(index)?;
        if let Err(e) = clipboard.write_text(row.line()) {
            log::debug!("clipboard write failed: {e}");
        }
        row.pulse_mut().trigger(now);
        Some(row.line())
    }

    fn rebuild_rows(&mut self) {
        self.rows = self
            .visible_lines()
            .iter()
            .map(|line| RowView::new(line.as_str()))
            .collect();
    }
}
