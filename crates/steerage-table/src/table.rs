//! The passenger table

use crate::{
    column::{Cell, Column, ColumnData},
    report::ReportFrame,
    schema::Field,
};

/// Row-per-passenger table with typed, nullable columns.
///
/// Columns are kept in [`Field`] declaration order. Every row carries its
/// original position in `index`, so rows keep their labels after duplicate
/// removal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassengerTable {
    columns: Vec<Column>,
    index: Vec<usize>,
}

impl PassengerTable {
    /// Builds a table from columns of equal length.
    ///
    /// # Panics
    ///
    /// Panics if the columns differ in length or a field appears twice.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        let rows = columns.first().map_or(0, |c| c.data.len());
        let mut table = Self {
            columns: vec![],
            index: (0..rows).collect(),
        };
        for column in columns {
            assert!(
                !table.has(column.field),
                "duplicate column '{}'",
                column.field
            );
            table.set_column(column);
        }
        table
    }

    /// (rows, columns)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Original row labels.
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.iter().map(|c| c.field)
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.column(field).is_some()
    }

    #[must_use]
    pub fn has_all(&self, fields: &[Field]) -> bool {
        fields.iter().all(|f| self.has(*f))
    }

    #[must_use]
    pub fn column(&self, field: Field) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn column_mut(&mut self, field: Field) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.field == field)
    }

    /// Inserts a column at its schema position, replacing any column of the
    /// same field.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the table's row count.
    pub fn set_column(&mut self, column: Column) {
        assert_eq!(
            column.data.len(),
            self.index.len(),
            "column '{}' length must match row count",
            column.field
        );
        match self.columns.binary_search_by_key(&column.field, |c| c.field) {
            Ok(pos) => self.columns[pos] = column,
            Err(pos) => self.columns.insert(pos, column),
        }
    }

    /// Integer values of a column, if it exists and stores integers.
    #[must_use]
    pub fn ints(&self, field: Field) -> Option<&[Option<i64>]> {
        match &self.column(field)?.data {
            ColumnData::Int(values) => Some(values),
            _ => None,
        }
    }

    /// Float values of a column, if it exists and stores floats.
    #[must_use]
    pub fn floats(&self, field: Field) -> Option<&[Option<f64>]> {
        match &self.column(field)?.data {
            ColumnData::Float(values) => Some(values),
            _ => None,
        }
    }

    /// Category values of a column, if it exists and is categorical.
    #[must_use]
    pub fn categories(&self, field: Field) -> Option<&[Option<String>]> {
        match &self.column(field)?.data {
            ColumnData::Category(values) => Some(values),
            _ => None,
        }
    }

    /// Numeric view of any int or float column.
    #[must_use]
    pub fn numeric(&self, field: Field) -> Option<Vec<Option<f64>>> {
        self.column(field)?.data.to_f64()
    }

    /// Keeps the rows whose mask entry is `true`.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the row count.
    pub fn retain_rows(&mut self, mask: &[bool]) {
        assert_eq!(mask.len(), self.index.len(), "mask length must match rows");
        for column in &mut self.columns {
            column.data.retain_rows(mask);
        }
        let mut keep = mask.iter();
        self.index
            .retain(|_| keep.next().copied().unwrap_or(false));
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Vec<Cell> {
        self.columns.iter().map(|c| c.data.cell(row)).collect()
    }

    /// The first `n` rows as a report frame.
    #[must_use]
    pub fn head(&self, n: usize) -> ReportFrame {
        let mut frame = ReportFrame::new(self.columns.iter().map(Column::name));
        for row in 0..n.min(self.row_count()) {
            frame.push_row(self.index[row], self.row(row));
        }
        frame
    }

    /// Column types as a report frame (`dtype` column).
    #[must_use]
    pub fn dtypes(&self) -> ReportFrame {
        ReportFrame::from_series(
            "dtype",
            self.columns
                .iter()
                .map(|c| (c.name(), c.data.kind().to_string())),
        )
    }

    /// Row and column counts as a report frame.
    #[must_use]
    pub fn shape_frame(&self) -> ReportFrame {
        let (rows, cols) = self.shape();
        ReportFrame::from_series("value", [("rows", rows), ("cols", cols)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PassengerTable {
        PassengerTable::new(vec![
            Column::new(Field::Fare, ColumnData::Float(vec![Some(7.25), Some(71.28)])),
            Column::new(Field::Survived, ColumnData::Int(vec![Some(0), Some(1)])),
        ])
    }

    #[test]
    fn test_columns_follow_schema_order() {
        let table = table();
        assert_eq!(
            table.fields().collect::<Vec<_>>(),
            [Field::Survived, Field::Fare]
        );
        assert_eq!(table.shape(), (2, 2));
    }

    #[test]
    fn test_set_column_replaces() {
        let mut table = table();
        table.set_column(Column::new(
            Field::Survived,
            ColumnData::Int(vec![Some(1), Some(1)]),
        ));
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.ints(Field::Survived), Some(&[Some(1), Some(1)][..]));
    }

    #[test]
    fn test_retain_rows_keeps_labels() {
        let mut table = table();
        table.retain_rows(&[false, true]);
        assert_eq!(table.index(), [1]);
        assert_eq!(table.floats(Field::Fare), Some(&[Some(71.28)][..]));
        let head = table.head(5);
        assert_eq!(head.index, ["1"]);
    }

    #[test]
    fn test_typed_accessors() {
        let table = table();
        assert!(table.floats(Field::Survived).is_none());
        assert!(table.ints(Field::Age).is_none());
        assert_eq!(table.numeric(Field::Survived), Some(vec![Some(0.0), Some(1.0)]));
    }

    #[test]
    fn test_dtypes_and_shape_frames() {
        let table = table();
        let dtypes = table.dtypes();
        assert_eq!(dtypes.index, ["survived", "fare"]);
        assert_eq!(dtypes.rows[1], [Cell::from("float64")]);
        let shape = table.shape_frame();
        assert_eq!(shape.rows, [[Cell::Int(2)], [Cell::Int(2)]]);
    }
}
