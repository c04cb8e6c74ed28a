use std::fmt;
use std::sync::Arc;

use super::row::TableRow;

/// Shown in a cell that has nothing to display.
pub const PLACEHOLDER: &str = "-";

/// Custom cell renderer.
pub type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// One column of a [`DataTable`](super::DataTable).
///
/// The accessor names the row field the column shows and searches; the
/// renderer, when set, decides what the cell displays. A column with neither
/// shows [`PLACEHOLDER`] in every cell.
pub struct ColumnSpec<R> {
    header: String,
    accessor: Option<String>,
    renderer: Option<Renderer<R>>,
    width: Option<String>,
}

impl<R: TableRow> ColumnSpec<R> {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: None,
            renderer: None,
            width: None,
        }
    }

    /// Shorthand for a header plus accessor.
    pub fn field(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self::new(header).accessor(accessor)
    }

    pub fn accessor(mut self, field: impl Into<String>) -> Self {
        self.accessor = Some(field.into());
        self
    }

    pub fn render<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn accessor_name(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    pub fn width_hint(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// False for a column with neither accessor nor renderer.
    pub fn displays_data(&self) -> bool {
        self.accessor.is_some() || self.renderer.is_some()
    }

    /// The accessor's raw value for `row`, used by search.
    pub fn value(&self, row: &R) -> Option<String> {
        self.accessor.as_deref().and_then(|field| row.field(field))
    }

    /// Cell text: renderer output, else the accessor value, else `-`.
    pub fn cell(&self, row: &R) -> String {
        match &self.renderer {
            Some(render) => render(row),
            None => self.value(row).unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
            width: self.width.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .field("width", &self.width)
            .finish()
    }
}
