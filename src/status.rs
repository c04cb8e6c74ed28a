//! Status badges: colour variant and label for any status string the console
//! shows (lead, site visit, interest level, project, approval).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Success,
    Warning,
    Info,
    Error,
    Neutral,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Info => "info",
            BadgeVariant::Error => "error",
            BadgeVariant::Neutral => "neutral",
        }
    }

    /// Variant for a normalized status key; `Neutral` for anything unknown.
    pub fn for_status(normalized: &str) -> Self {
        use BadgeVariant::*;
        match normalized {
            // site visits
            "requested" => Warning,
            "assigned" | "confirmed" => Info,
            "completed" => Success,
            "cancelled" => Error,
            // leads
            "new" => Info,
            "contacted" => Warning,
            "interested" | "converted" => Success,
            "not_interested" => Neutral,
            // interest levels
            "high" => Success,
            "medium" => Warning,
            "low" => Neutral,
            // projects
            "active" => Success,
            "inactive" => Neutral,
            "upcoming" => Info,
            "sold_out" => Error,
            // general
            "pending" => Warning,
            "approved" => Success,
            "rejected" => Error,
            _ => Neutral,
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered status badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub variant: BadgeVariant,
    pub label: String,
}

impl StatusBadge {
    /// Badge for `status`, variant looked up from the status itself.
    pub fn new(status: Option<&str>) -> Self {
        let variant = BadgeVariant::for_status(&normalize(status.unwrap_or_default()));
        Self::with_variant(status, variant)
    }

    /// Badge with an explicit variant.
    pub fn with_variant(status: Option<&str>, variant: BadgeVariant) -> Self {
        let label = match status {
            Some(s) if !s.is_empty() => s.replace('_', " "),
            _ => "Unknown".to_string(),
        };
        Self { variant, label }
    }
}

/// Lowercase, runs of whitespace collapsed to `_`.
pub fn normalize(status: &str) -> String {
    status
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
