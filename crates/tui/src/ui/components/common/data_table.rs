//! Column/row table model used by the admin cards.
//!
//! Mirrors the shape the settings screens work in: columns name a field,
//! rows map field names to cell text. Rendering goes through Ratatui's
//! `Table` with zebra striping and a styled header row.

use indexmap::IndexMap;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row as TableRow, Table, TableState};

use crate::ui::theme::{Theme, theme_helpers as th};

/// A table column. `field` keys into each row's cell map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub field: String,
    pub width: Constraint,
}

impl Column {
    pub fn new(name: impl Into<String>, field: impl Into<String>, width: Constraint) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            width,
        }
    }
}

/// A table row: cell text keyed by column field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: IndexMap<String, String>,
}

impl Row {
    pub fn cell(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }
}

/// Table model plus selection state.
#[derive(Debug, Default, Clone)]
pub struct DataTableState {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub table_state: TableState,
}

impl DataTableState {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            table_state: TableState::default(),
        }
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        let clamped = match (self.table_state.selected(), self.rows.len()) {
            (_, 0) => None,
            (Some(selected), len) => Some(selected.min(len - 1)),
            (None, _) => None,
        };
        self.table_state.select(clamped);
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(current) => (current + 1).min(self.rows.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = self.table_state.selected().unwrap_or(0).saturating_sub(1);
        self.table_state.select(Some(previous));
    }

    /// Renders the table into `rect`. Selection is highlighted only while the
    /// table has focus.
    pub fn render(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme, focused: bool) {
        let header = TableRow::new(
            self.columns
                .iter()
                .map(|column| Cell::new(column.name.clone()).style(th::table_header_style(theme))),
        )
        .style(th::table_header_row_style(theme));

        let rows = self.rows.iter().enumerate().map(|(index, row)| {
            let cells = self.columns.iter().map(|column| {
                let text = row.cells.get(&column.field).cloned().unwrap_or_default();
                Cell::new(text)
            });
            TableRow::new(cells).style(th::table_row_style(theme, index))
        });

        let widths: Vec<Constraint> = self.columns.iter().map(|column| column.width).collect();
        let mut table = Table::new(rows, widths).header(header).column_spacing(1);
        if focused {
            table = table.row_highlight_style(th::table_selected_style(theme));
        }
        frame.render_stateful_widget(table, rect, &mut self.table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTableState {
        let mut table = DataTableState::new(vec![
            Column::new("Description", "description", Constraint::Min(10)),
            Column::new("Channel messages", "channel_messages", Constraint::Length(18)),
        ]);
        table.set_rows(vec![
            Row::default().cell("description", "60 day policy").cell("channel_messages", "60 days"),
            Row::default().cell("description", "Yearly policy").cell("channel_messages", "1 year"),
        ]);
        table
    }

    #[test]
    fn selection_clamps_to_row_count() {
        let mut table = sample();
        table.select_next();
        table.select_next();
        table.select_next();
        assert_eq!(table.selected(), Some(1));
        table.select_previous();
        assert_eq!(table.selected(), Some(0));
        table.select_previous();
        assert_eq!(table.selected(), Some(0));
    }

    #[test]
    fn replacing_rows_keeps_selection_in_bounds() {
        let mut table = sample();
        table.select_next();
        table.select_next();
        assert_eq!(table.selected(), Some(1));

        table.set_rows(vec![Row::default().cell("description", "only row")]);
        assert_eq!(table.selected(), Some(0));

        table.set_rows(Vec::new());
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn missing_fields_render_as_empty_cells() {
        let row = Row::default().cell("description", "no message column");
        assert!(row.cells.get("channel_messages").is_none());
    }
}
