//! CSV loading and column normalization
//!
//! Two header conventions are understood:
//!
//! - [`HeaderStyle::Source`]: the raw dataset (`Survived`, `Pclass`, ...).
//!   Whitelisted columns are kept and renamed; everything else is ignored.
//! - [`HeaderStyle::Normalized`]: tables previously written by
//!   [`export`](crate::export), with lowercase names and `family_size`.
//!
//! Empty fields and the usual NA markers (`NA`, `NaN`, `null`, ...) load as
//! nulls. Markers match the exact field text; surrounding whitespace is only
//! ignored when parsing numbers. Rows shorter than the header are padded
//! with nulls.

use std::{io, path::Path};

use tracing::debug;

use crate::{
    column::{Column, ColumnData},
    error::TableError,
    schema::Field,
    table::PassengerTable,
};

/// Field texts treated as missing values.
const NA_MARKERS: [&str; 10] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None",
];

/// Which header names identify the schema fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Source,
    Normalized,
}

impl HeaderStyle {
    fn field(self, header: &str) -> Option<Field> {
        match self {
            Self::Source => Field::from_source_name(header),
            Self::Normalized => Field::from_name(header),
        }
    }
}

/// Loads the raw dataset from `path`.
///
/// Fails with [`TableError::NotFound`] if the file does not exist.
pub fn read_passengers<P>(path: P) -> Result<PassengerTable, TableError>
where
    P: AsRef<Path>,
{
    read_path(path.as_ref(), HeaderStyle::Source)
}

/// Loads a table written by [`export::write_table`](crate::export::write_table).
pub fn read_normalized<P>(path: P) -> Result<PassengerTable, TableError>
where
    P: AsRef<Path>,
{
    read_path(path.as_ref(), HeaderStyle::Normalized)
}

fn read_path(path: &Path, style: HeaderStyle) -> Result<PassengerTable, TableError> {
    if !path.exists() {
        return Err(TableError::NotFound {
            path: path.to_owned(),
        });
    }
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| TableError::Read {
            path: path.to_owned(),
            source,
        })?;
    parse(reader, style).map_err(|err| match err {
        TableError::Record { source } => TableError::Read {
            path: path.to_owned(),
            source,
        },
        other => other,
    })
}

/// Loads a table from any CSV byte stream.
///
/// ```
/// use steerage_table::{loader::{self, HeaderStyle}, schema::Field};
///
/// let csv = "PassengerId,Survived,Sex,Age\n1,0,male,22\n2,1,female,\n";
/// let table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
/// assert_eq!(table.fields().collect::<Vec<_>>(), [Field::Survived, Field::Sex, Field::Age]);
/// assert_eq!(table.floats(Field::Age), Some(&[Some(22.0), None][..]));
/// ```
pub fn from_reader<R>(reader: R, style: HeaderStyle) -> Result<PassengerTable, TableError>
where
    R: io::Read,
{
    parse(
        csv::ReaderBuilder::new().flexible(true).from_reader(reader),
        style,
    )
}

fn parse<R>(mut reader: csv::Reader<R>, style: HeaderStyle) -> Result<PassengerTable, TableError>
where
    R: io::Read,
{
    let headers = reader
        .headers()
        .map_err(|source| TableError::Record { source })?
        .clone();

    // (position in record, field), first occurrence of each field wins
    let mut selected: Vec<(usize, Field)> = vec![];
    for (pos, header) in headers.iter().enumerate() {
        match style.field(header) {
            Some(field) if !selected.iter().any(|(_, f)| *f == field) => {
                selected.push((pos, field));
            }
            _ => debug!(header, "ignoring column"),
        }
    }
    selected.sort_by_key(|(_, field)| *field);

    let mut data = selected
        .iter()
        .map(|(_, field)| ColumnData::empty(field.kind()))
        .collect::<Vec<_>>();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| TableError::Record { source })?;
        for ((pos, field), column) in selected.iter().zip(&mut data) {
            // short rows leave their trailing fields missing
            let text = record.get(*pos).unwrap_or("");
            push_value(column, *field, row, text)?;
        }
    }

    let columns = selected
        .into_iter()
        .zip(data)
        .map(|((_, field), data)| Column::new(field, data))
        .collect();
    Ok(PassengerTable::new(columns))
}

fn push_value(
    column: &mut ColumnData,
    field: Field,
    row: usize,
    text: &str,
) -> Result<(), TableError> {
    let is_na = NA_MARKERS.contains(&text);
    let trimmed = text.trim();
    if is_na && field.is_required() {
        return Err(TableError::MissingValue {
            row,
            column: field.name(),
        });
    }

    let parse_error = || TableError::Parse {
        row,
        column: field.name(),
        value: text.to_owned(),
        kind: field.kind(),
    };

    match column {
        ColumnData::Int(values) => {
            let value = if is_na {
                None
            } else {
                Some(parse_int(trimmed).ok_or_else(parse_error)?)
            };
            values.push(value);
        }
        ColumnData::Float(values) => {
            let value = if is_na {
                None
            } else {
                let v = trimmed.parse::<f64>().map_err(|_| parse_error())?;
                (!v.is_nan()).then_some(v)
            };
            values.push(value);
        }
        ColumnData::Category(values) => {
            values.push((!is_na).then(|| text.to_owned()));
        }
    }
    debug_assert_eq!(column.kind(), field.kind());
    Ok(())
}

/// Parses `"3"` or an integral float such as `"3.0"`.
#[expect(clippy::cast_possible_truncation)]
fn parse_int(text: &str) -> Option<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Cell;

    const KAGGLE_HEAD: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C
6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q
62,1,1,\"Icard, Miss. Amelie\",female,38,0,0,113572,80,B28,
";

    #[test]
    fn test_full_schema_is_normalized() {
        let table = from_reader(KAGGLE_HEAD.as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(table.shape(), (4, 8));
        assert_eq!(
            table.fields().collect::<Vec<_>>(),
            Field::SOURCE.to_vec(),
            "only whitelisted columns, in whitelist order"
        );
        assert_eq!(table.floats(Field::Age).unwrap()[2], None);
        assert_eq!(table.categories(Field::Embarked).unwrap()[3], None);
        assert_eq!(table.floats(Field::Fare).unwrap()[3], Some(80.0));
        assert_eq!(
            table.row(1)[2],
            Cell::from("female"),
            "quoted names must not shift columns"
        );
    }

    #[test]
    fn test_subset_of_columns() {
        let csv = "Fare,Name,Survived,Embarked\n7.25,A,0,S\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(
            table.fields().collect::<Vec<_>>(),
            [Field::Survived, Field::Fare, Field::Embarked]
        );
    }

    #[test]
    fn test_no_known_columns() {
        let table = from_reader("a,b\n1,2\n".as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(table.shape(), (0, 0));
    }

    #[test]
    fn test_integral_floats_load_as_ints() {
        let csv = "Survived,SibSp\n1.0,2\n0,1.0\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(table.ints(Field::Survived), Some(&[Some(1), Some(0)][..]));
        assert_eq!(table.ints(Field::SibSp), Some(&[Some(2), Some(1)][..]));
    }

    #[test]
    fn test_null_survived_is_an_error() {
        let err = from_reader("Survived\n1\n0\nNA\n".as_bytes(), HeaderStyle::Source).unwrap_err();
        assert!(
            matches!(err, TableError::MissingValue { row: 2, column: "survived" }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_unparseable_number() {
        let err = from_reader("Fare\nabc\n".as_bytes(), HeaderStyle::Source).unwrap_err();
        assert!(matches!(err, TableError::Parse { row: 0, .. }), "unexpected error: {err}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_passengers(dir.path().join("train.csv")).unwrap_err();
        assert!(matches!(err, TableError::NotFound { .. }));
        assert!(err.to_string().starts_with("input file not found"));
    }

    #[test]
    fn test_short_row_pads_with_nulls() {
        let csv = "Survived,Age,Embarked\n0,22,S\n1,38\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.floats(Field::Age), Some(&[Some(22.0), Some(38.0)][..]));
        assert_eq!(
            table.categories(Field::Embarked),
            Some(&[Some("S".to_owned()), None][..])
        );
    }

    #[test]
    fn test_padded_markers_are_values() {
        let csv = "Embarked,Fare\n NA, 7.25\n S,\nNA,8.05\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        assert_eq!(
            table.categories(Field::Embarked),
            Some(&[Some(" NA".to_owned()), Some(" S".to_owned()), None][..])
        );
        assert_eq!(
            table.floats(Field::Fare),
            Some(&[Some(7.25), None, Some(8.05)][..])
        );
    }

    #[test]
    fn test_normalized_headers() {
        let csv = "survived,sex,family_size,Age\n1,female,2,30\n";
        let table = from_reader(csv.as_bytes(), HeaderStyle::Normalized).unwrap();
        assert_eq!(
            table.fields().collect::<Vec<_>>(),
            [Field::Survived, Field::Sex, Field::FamilySize]
        );
        assert_eq!(table.ints(Field::FamilySize), Some(&[Some(2)][..]));
    }
}
