use std::time::{Duration, Instant};

pub const COPY_PULSE: Duration = Duration::from_millis(300);

/// Transient acknowledgment shown on a row after its text is copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyPulse {
    started: Option<Instant>,
}

impl CopyPulse {
    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < COPY_PULSE)
    }
}

/// One visible record. Owns its pulse, so rows are rebuilt, not reused,
/// when the page changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    line: String,
    pulse: CopyPulse,
}

impl RowView {
    pub fn new(line: impl Into<String>) -> RowView {
        RowView {
            line: line.into(),
            pulse: CopyPulse::default(),
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn pulse(&self) -> &CopyPulse {
        &self.pulse
    }

    pub fn pulse_mut(&mut self) -> &mut CopyPulse {
        &mut self.pulse
    }
}
