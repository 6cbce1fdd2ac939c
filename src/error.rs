//! Error types for loading and resolving layout documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::LayoutError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read layout document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse layout document: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reference to a view name that is never declared
    #[error("unknown view '{name}'")]
    UnknownView {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String, span: Span },

    #[error("invalid relation: {reason}")]
    InvalidRelation { reason: String, span: Span },

    #[error("view '{name}' is declared more than once")]
    DuplicateView { name: String, span: Span },

    /// A view's relations were rejected by the builder
    #[error("cannot lay out '{view}': {error}")]
    Layout {
        view: String,
        span: Span,
        #[source]
        error: LayoutError,
    },
}

impl DocumentError {
    pub fn invalid(reason: impl Into<String>, span: Span) -> Self {
        Self::InvalidRelation {
            reason: reason.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Io(_) => None,
            Self::Toml(e) => e.span(),
            Self::UnknownView { span, .. }
            | Self::UnknownAttribute { span, .. }
            | Self::InvalidRelation { span, .. }
            | Self::DuplicateView { span, .. }
            | Self::Layout { span, .. } => Some(span.clone()),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownView { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {}\n", self);
        };
        let message = match self {
            Self::Toml(e) => e.message().to_string(),
            other => other.to_string(),
        };
        let label = match self.suggestions() {
            Some(suggestions) if !suggestions.is_empty() => {
                format!("{}\nDid you mean: {}", message, suggestions.join(", "))
            }
            _ => message.clone(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", self),
        }
    }
}
