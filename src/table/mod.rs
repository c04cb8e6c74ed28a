//! Searchable, paginated data table.
//!
//! [`DataTable`] holds the rows, the search query and the current page, and
//! produces a [`TableView`] for a renderer to draw. Searching never touches
//! the source rows; it only changes which of them are visible.

mod column;
mod row;

pub use column::{ColumnSpec, Renderer, PLACEHOLDER};
pub use row::{display_json, TableRow};

use crate::config::DEFAULT_PAGE_SIZE;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

type RowCallback<R> = Box<dyn FnMut(&R) + Send>;

/// Client-side table state over an ordered collection of rows.
///
/// ```
/// use serde_json::json;
/// use squarefeet_console::table::{ColumnSpec, DataTable};
///
/// let rows = vec![json!({"name": "Alice"}), json!({"name": "Bob"}), json!({"name": "Carol"})];
/// let mut table = DataTable::new(vec![ColumnSpec::field("Name", "name")], rows).page_size(2);
///
/// assert_eq!(table.page_count(), 2);
/// table.set_query("bo");
/// assert_eq!(table.filtered_len(), 1);
/// assert_eq!(table.current_page(), 1);
/// ```
pub struct DataTable<R> {
    columns: Vec<ColumnSpec<R>>,
    rows: Vec<R>,
    page_size: usize,
    query: String,
    current_page: usize,
    // indices into `rows` that match `query`, in source order
    visible: Vec<usize>,
    on_row_click: Option<RowCallback<R>>,
    empty_message: String,
    search_placeholder: String,
    searchable: bool,
    loading: bool,
}

impl<R: TableRow> DataTable<R> {
    pub fn new(columns: Vec<ColumnSpec<R>>, rows: Vec<R>) -> Self {
        let mut table = Self {
            columns,
            rows,
            page_size: DEFAULT_PAGE_SIZE,
            query: String::new(),
            current_page: 1,
            visible: Vec::new(),
            on_row_click: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            searchable: true,
            loading: false,
        };
        table.refilter();
        table
    }

    /// Rows per page. Zero is treated as one.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_page();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    /// Hides the search bar in the rendered view.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&R) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the source rows. The query is kept and re-applied; the current
    /// page is clamped to the new page count.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refilter();
        self.clamp_page();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    /// Changes the search query and goes back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
        self.current_page = 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows matching the query, in source order.
    pub fn filtered(&self) -> impl Iterator<Item = &R> + '_ {
        self.visible.iter().map(move |&i| &self.rows[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    /// `ceil(filtered / page_size)`; zero when nothing matches.
    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size)
    }

    /// 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jumps to `page`, clamped to `[1, page_count]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.min(self.page_count()).max(1);
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.page_count());
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        let (start, end) = self.page_bounds();
        self.visible[start..end].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Fires the row-click callback for the `index`-th row of the current
    /// page. Returns false when there is no callback or no such row.
    pub fn click_row(&mut self, index: usize) -> bool {
        let (start, end) = self.page_bounds();
        let Some(&row_index) = self.visible[start..end].get(index) else {
            return false;
        };
        match self.on_row_click.as_mut() {
            Some(callback) => {
                callback(&self.rows[row_index]);
                true
            }
            None => false,
        }
    }

    /// Everything a renderer needs to draw the current state.
    pub fn view(&self) -> TableView {
        let filtered = self.visible.len();
        let total_pages = self.page_count();
        let (start, end) = self.page_bounds();

        let search = self.searchable.then(|| SearchBarView {
            query: self.query.clone(),
            placeholder: self.search_placeholder.clone(),
            item_count: item_count_label(filtered),
        });

        let headers = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                label: c.header().to_string(),
                width: c.width_hint().map(str::to_string),
            })
            .collect();

        let body = if self.loading {
            TableBody::Loading
        } else if start == end {
            TableBody::Empty(self.empty_message.clone())
        } else {
            let clickable = self.on_row_click.is_some();
            TableBody::Rows(
                self.visible[start..end]
                    .iter()
                    .enumerate()
                    .map(|(position, &i)| {
                        let row = &self.rows[i];
                        RowView {
                            key: row.row_id().unwrap_or_else(|| position.to_string()),
                            cells: self.columns.iter().map(|c| c.cell(row)).collect(),
                            clickable,
                        }
                    })
                    .collect(),
            )
        };

        let pagination = (total_pages > 1).then(|| PaginationView {
            current_page: self.current_page,
            total_pages,
            first_item: start + 1,
            last_item: end,
            total_items: filtered,
            can_go_back: self.current_page > 1,
            can_go_forward: self.current_page < total_pages,
        });

        TableView {
            search,
            headers,
            body,
            pagination,
        }
    }

    fn page_bounds(&self) -> (usize, usize) {
        let len = self.visible.len();
        let start = ((self.current_page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        (start, end)
    }

    fn clamp_page(&mut self) {
        self.go_to_page(self.current_page);
    }

    fn refilter(&mut self) {
        if self.query.trim().is_empty() {
            self.visible = (0..self.rows.len()).collect();
            return;
        }

        let needle = self.query.to_lowercase();
        let columns = &self.columns;
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                columns.iter().any(|col| {
                    col.value(row)
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                })
            })
            .map(|(i, _)| i)
            .collect();
    }
}

impl<R> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.rows.len())
            .field("visible", &self.visible.len())
            .field("query", &self.query)
            .field("current_page", &self.current_page)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn item_count_label(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{n} items")
    }
}

/// Rendered table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// `None` when the table isn't searchable.
    pub search: Option<SearchBarView>,
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    /// `None` when everything fits on one page.
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarView {
    pub query: String,
    pub placeholder: String,
    /// "1 item" / "n items", counting filtered rows.
    pub item_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    /// Nothing to show; carries the empty-state message.
    Empty(String),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    pub cells: Vec<String>,
    pub clickable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on this page.
    pub first_item: usize,
    pub last_item: usize,
    pub total_items: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl PaginationView {
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {}",
            self.first_item, self.last_item, self.total_items
        )
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use super::*;

    fn people() -> Vec<Value> {
        vec![
            json!({"name": "Alice"}),
            json!({"name": "Bob"}),
            json!({"name": "Carol"}),
        ]
    }

    fn names(rows: Vec<&Value>) -> Vec<String> {
        rows.into_iter().filter_map(|r| r.field("name")).collect()
    }

    fn table() -> DataTable<Value> {
        DataTable::new(vec![ColumnSpec::field("Name", "name")], people()).page_size(2)
    }

    #[test]
    fn pages_through_rows() {
        let mut t = table();
        assert_eq!(t.page_count(), 2);
        assert_eq!(names(t.page_rows()), ["Alice", "Bob"]);
        t.next_page();
        assert_eq!(names(t.page_rows()), ["Carol"]);
        t.next_page();
        assert_eq!(t.current_page(), 2);
        t.go_to_page(0);
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn query_filters_and_resets_page() {
        let mut t = table();
        t.last_page();
        assert_eq!(t.current_page(), 2);

        t.set_query("bo");
        assert_eq!(names(t.filtered().collect()), ["Bob"]);
        assert_eq!(t.current_page(), 1);
        assert_eq!(t.rows().len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_and_skips_nulls() {
        let rows = vec![
            json!({"name": "Rahul", "advisor": null}),
            json!({"name": "Priya", "advisor": "Vijay Kumar"}),
        ];
        let mut t = DataTable::new(
            vec![
                ColumnSpec::field("Lead", "name"),
                ColumnSpec::field("Advisor", "advisor"),
                ColumnSpec::new("Actions").render(|_| "view".to_string()),
            ],
            rows,
        );
        t.set_query("VIJAY");
        assert_eq!(t.filtered_len(), 1);
        t.set_query("null");
        assert_eq!(t.filtered_len(), 0);
        // renderer output is not searched
        t.set_query("view");
        assert_eq!(t.filtered_len(), 0);
        t.set_query("   ");
        assert_eq!(t.filtered_len(), 2);
    }

    #[test]
    fn empty_state_and_hidden_pagination() {
        let mut t = table().empty_message("No leads found");
        t.set_query("zzz");
        let view = t.view();
        assert_eq!(view.body, TableBody::Empty("No leads found".into()));
        assert!(view.pagination.is_none());
        assert_eq!(t.page_count(), 0);
        assert_eq!(t.current_page(), 1);
        assert_eq!(view.search.unwrap().item_count, "0 items");
    }

    #[test]
    fn view_rows_and_pagination() {
        let mut t = table();
        t.next_page();
        let view = t.view();
        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.summary(), "Showing 3 to 3 of 3");
        assert_eq!(pagination.page_label(), "Page 2 of 2");
        assert!(pagination.can_go_back);
        assert!(!pagination.can_go_forward);

        match view.body {
            TableBody::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].key, "0");
                assert_eq!(rows[0].cells, ["Carol"]);
                assert!(!rows[0].clickable);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn loading_body() {
        let mut t = table();
        t.set_loading(true);
        assert_eq!(t.view().body, TableBody::Loading);
    }

    #[test]
    fn shrinking_rows_clamps_page() {
        let mut t = table();
        t.last_page();
        t.set_rows(vec![json!({"name": "Dana"})]);
        assert_eq!(t.current_page(), 1);
        assert_eq!(names(t.page_rows()), ["Dana"]);
    }

    #[test]
    fn click_hits_row_on_current_page() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = clicked.clone();
        let mut t = table().on_row_click(move |row: &Value| {
            sink.lock().unwrap().push(row.field("name").unwrap_or_default());
        });
        t.next_page();
        assert!(t.click_row(0));
        assert!(!t.click_row(1));
        assert_eq!(*clicked.lock().unwrap(), ["Carol"]);
        assert!(matches!(t.view().body, TableBody::Rows(ref rows) if rows[0].clickable));
    }

    #[test]
    fn single_item_label() {
        let mut t = table();
        t.set_query("carol");
        assert_eq!(t.view().search.unwrap().item_count, "1 item");
        assert!(table().searchable(false).view().search.is_none());
    }
}
