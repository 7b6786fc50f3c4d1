//! Event position within the list and point placement within an event.

use jetlime_core::{JetLimeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an event in the overall sequence.
///
/// Start events have no incoming line, end events no outgoing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventPosition {
    Start,
    Middle,
    End,
}

impl EventPosition {
    /// Resolve the position of `index` in a list of `count` events.
    ///
    /// The last index is checked first, so a single-item list resolves to
    /// [`EventPosition::End`].
    pub fn resolve(index: usize, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(JetLimeError::config(
                "cannot resolve an event position in an empty list",
            ));
        }
        if index >= count {
            return Err(JetLimeError::config(format!(
                "event index {index} out of range for {count} events"
            )));
        }
        Ok(Self::dynamic(index, count))
    }

    /// Infallible form of [`resolve`](Self::resolve) for callers that already
    /// know `index < count`. Out-of-range indices resolve to `End`.
    #[inline]
    pub fn dynamic(index: usize, count: usize) -> Self {
        if index >= count.saturating_sub(1) {
            EventPosition::End
        } else if index == 0 {
            EventPosition::Start
        } else {
            EventPosition::Middle
        }
    }

    #[inline]
    pub fn is_not_start(self) -> bool {
        self != EventPosition::Start
    }

    #[inline]
    pub fn is_not_end(self) -> bool {
        self != EventPosition::End
    }

    pub fn name(self) -> &'static str {
        match self {
            EventPosition::Start => "START",
            EventPosition::Middle => "MIDDLE",
            EventPosition::End => "END",
        }
    }
}

impl fmt::Display for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the point sits along the main-axis span of an event's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointPlacement {
    Start,
    #[default]
    Center,
    End,
}
