//! The per-file content window.
//!
//! Every file goes through three states:
//!
//! ```text
//! BeforeContent --(start / keeper start)--> InContent --(end marker)--> Done
//! ```
//!
//! Include directives are only recognized while `BeforeContent`. Once content
//! has started they are ordinary text, so already-amalgamated fragments can
//! carry their own includes through untouched.

use crate::include::{IncludeDirective, IncludeMatcher};
use crate::policy::MergePolicy;

/// Where a file's scan currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    BeforeContent,
    InContent,
    Done,
}

/// What the caller should do with the line it just fed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// An include directive seen before content.
    Include(IncludeDirective),
    /// Append the line to the file's content.
    Keep,
    /// A start marker; content begins with the next line.
    Discard,
    /// A line in front of the content, offered to the metadata hook.
    BeforeContent,
    /// The end marker was hit, or the window was already closed.
    Stop,
}

/// Line classifier for one file.
#[derive(Debug, Default)]
pub struct ContentWindow {
    state: WindowState,
}

impl ContentWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// True once a start or keeper marker has been seen.
    pub fn started(&self) -> bool {
        self.state != WindowState::BeforeContent
    }

    /// Classify `line` and advance the state.
    pub fn feed<P: MergePolicy + ?Sized>(
        &mut self,
        line: &str,
        matcher: &IncludeMatcher,
        policy: &P,
    ) -> LineAction {
        match self.state {
            WindowState::BeforeContent => {
                if let Some(directive) = matcher.parse_line(line) {
                    return LineAction::Include(directive);
                }
                if policy.is_keeper_start_marker(line) {
                    self.state = WindowState::InContent;
                    return LineAction::Keep;
                }
                if policy.is_start_marker(line) {
                    self.state = WindowState::InContent;
                    return LineAction::Discard;
                }
                LineAction::BeforeContent
            }
            WindowState::InContent => {
                if policy.is_end_marker(line) {
                    self.state = WindowState::Done;
                    LineAction::Stop
                } else {
                    LineAction::Keep
                }
            }
            WindowState::Done => LineAction::Stop,
        }
    }
}
