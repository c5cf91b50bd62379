//! One-hot encoding of categorical columns

use crate::{column::ColumnData, table::PassengerTable};

/// A column of an [`EncodedTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedColumn {
    /// A non-categorical column, copied as is.
    Data(ColumnData),
    /// Whether each row holds one category.
    Indicator(Vec<bool>),
}

impl EncodedColumn {
    /// CSV field text of one row.
    #[must_use]
    pub fn csv_field(&self, row: usize) -> String {
        match self {
            Self::Data(data) => data.cell(row).to_csv_field(),
            Self::Indicator(flags) => String::from(if flags[row] { "True" } else { "False" }),
        }
    }
}

/// The passenger table with categorical columns replaced by indicators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedTable {
    pub names: Vec<String>,
    pub columns: Vec<EncodedColumn>,
    pub row_count: usize,
}

impl EncodedTable {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&EncodedColumn> {
        let pos = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[pos])
    }
}

/// One-hot encodes every categorical column, dropping the first category.
///
/// Non-categorical columns come first in table order. Each categorical column
/// then contributes `<name>_<category>` for its sorted categories except the
/// first. A null category sets every indicator of its row to `false`.
///
/// ```
/// use steerage_table::{encode, loader::{self, HeaderStyle}};
///
/// let csv = "Sex,Age,Embarked\nmale,22,S\nfemale,38,C\nfemale,26,Q\n";
/// let table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
/// let encoded = encode::one_hot(&table);
/// assert_eq!(encoded.names, ["age", "sex_male", "embarked_Q", "embarked_S"]);
/// ```
#[must_use]
pub fn one_hot(table: &PassengerTable) -> EncodedTable {
    let mut encoded = EncodedTable {
        row_count: table.row_count(),
        ..EncodedTable::default()
    };

    for column in table.columns().iter().filter(|c| !c.data.is_category()) {
        encoded.names.push(column.name().to_owned());
        encoded.columns.push(EncodedColumn::Data(column.data.clone()));
    }

    for column in table.columns() {
        let ColumnData::Category(values) = &column.data else {
            continue;
        };
        for category in column.data.categories().into_iter().skip(1) {
            let flags = values
                .iter()
                .map(|v| v.as_deref() == Some(category.as_str()))
                .collect();
            encoded.names.push(format!("{}_{category}", column.name()));
            encoded.columns.push(EncodedColumn::Indicator(flags));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{HeaderStyle, from_reader};

    #[test]
    fn test_indicators_follow_sorted_categories() {
        let csv = "Survived,Sex,Embarked\n0,male,S\n1,female,C\n1,female,\n0,male,Q\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let encoded = one_hot(&table);

        assert_eq!(
            encoded.names,
            ["survived", "sex_male", "embarked_Q", "embarked_S"]
        );
        assert_eq!(
            encoded.column("sex_male"),
            Some(&EncodedColumn::Indicator(vec![true, false, false, true]))
        );
        assert_eq!(
            encoded.column("embarked_S"),
            Some(&EncodedColumn::Indicator(vec![true, false, false, false])),
            "null embarked has no indicator set"
        );
        assert_eq!(encoded.column("embarked_C"), None, "first category is dropped");
    }

    #[test]
    fn test_csv_fields() {
        let csv = "Age,Sex\n22,male\n,female\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let encoded = one_hot(&table);
        let age = encoded.column("age").unwrap();
        let male = encoded.column("sex_male").unwrap();
        assert_eq!(age.csv_field(0), "22.0");
        assert_eq!(age.csv_field(1), "");
        assert_eq!(male.csv_field(0), "True");
        assert_eq!(male.csv_field(1), "False");
    }

    #[test]
    fn test_single_category_yields_no_indicator() {
        let csv = "Survived,Sex\n0,male\n1,male\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let encoded = one_hot(&table);
        assert_eq!(encoded.names, ["survived"]);
        assert_eq!(encoded.row_count, 2);
    }
}
