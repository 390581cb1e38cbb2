//! Parse diagnostics and the result aggregate handed to renderers

use crate::elements::Tile;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The payload cannot be rendered
    Error,
    /// The payload renders, but a payload author should look at it
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One diagnostic produced while parsing a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    pub severity: Severity,
    pub message: String,
    /// Tag name of the offending element
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// 1-based source line, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        write!(f, " <{}", self.element)?;
        if let Some(attribute) = &self.attribute {
            write!(f, " {}", attribute)?;
        }
        write!(f, ">: {}", self.message)
    }
}

/// Diagnostics plus the parsed tile.
///
/// A result is created fresh for every parse and is read-only once it is
/// returned. The tile sits behind an [`Arc`] so it can be handed to another
/// thread for rendering without copying.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    issues: Vec<ParseIssue>,
    tile: Option<Arc<Tile>>,
}

impl ParseResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &mut self,
        severity: Severity,
        element: &str,
        attribute: Option<&str>,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        let issue = ParseIssue {
            severity,
            message: message.into(),
            element: element.to_string(),
            attribute: attribute.map(str::to_string),
            line,
        };
        log::debug!("{}", issue);
        self.issues.push(issue);
    }

    pub(crate) fn add_error(&mut self, element: &str, line: Option<usize>, message: impl Into<String>) {
        self.add(Severity::Error, element, None, line, message);
    }

    pub(crate) fn add_warning(&mut self, element: &str, line: Option<usize>, message: impl Into<String>) {
        self.add(Severity::Warning, element, None, line, message);
    }

    pub(crate) fn add_attribute_warning(
        &mut self,
        element: &str,
        attribute: &str,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.add(Severity::Warning, element, Some(attribute), line, message);
    }

    pub(crate) fn set_tile(&mut self, tile: Tile) {
        self.tile = Some(Arc::new(tile));
    }

    /// All issues in document order
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// The parsed tile. Present whenever no error was reported.
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_deref()
    }

    /// Shared handle to the parsed tile
    pub fn shared_tile(&self) -> Option<Arc<Tile>> {
        self.tile.clone()
    }

    /// The readiness predicate renderers check before using [`tile`](Self::tile).
    pub fn is_ok_for_render(&self) -> bool {
        !self.has_errors() && self.tile.is_some()
    }
}
