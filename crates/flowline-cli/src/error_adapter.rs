//! Error adapter for converting FlowlineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use flowline::FlowlineError;

/// Adapter giving a [`FlowlineError`] a diagnostic code and, where one
/// applies, a help message.
pub struct ErrorAdapter<'a>(pub &'a FlowlineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowlineError::Io(_) => "flowline::io",
            FlowlineError::UnknownShape(_) | FlowlineError::UnknownConnection(_) => {
                "flowline::unknown_id"
            }
            FlowlineError::DuplicateShape(_) | FlowlineError::DuplicateConnection(_) => {
                "flowline::duplicate_id"
            }
            FlowlineError::InvalidSize { .. } => "flowline::invalid_size",
            FlowlineError::CyclicGrouping { .. } => "flowline::cyclic_grouping",
            FlowlineError::Scene(_) => "flowline::scene",
            FlowlineError::Config(_) => "flowline::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FlowlineError::UnknownShape(_) => "check the shape ids referenced by `parent`, `from` and `to`",
            FlowlineError::CyclicGrouping { .. } => "a shape cannot be nested inside its own descendants",
            FlowlineError::InvalidSize { .. } => "width and height must both be greater than zero",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use flowline::identifier::Id;

    use super::*;

    #[test]
    fn test_codes_follow_variants() {
        let err = FlowlineError::CyclicGrouping {
            child: Id::new("adapter-a"),
            parent: Id::new("adapter-b"),
        };
        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.code().map(|c| c.to_string()).as_deref(),
            Some("flowline::cyclic_grouping")
        );
        assert!(adapter.help().is_some());
        assert_eq!(adapter.to_string(), err.to_string());
    }

    #[test]
    fn test_config_error_has_no_help() {
        let err = FlowlineError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.code().map(|c| c.to_string()).as_deref(),
            Some("flowline::config")
        );
        assert!(adapter.help().is_none());
    }
}
