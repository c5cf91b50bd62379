//! CSV export
//!
//! Tables are written without the row index, with normalized headers. Floats
//! keep one decimal for integral values and nulls are empty fields, so
//! [`read_normalized`](crate::loader::read_normalized) reloads the same
//! column data. Row labels are not written; a reloaded table is numbered
//! `0..n` even if rows were dropped before writing.

use std::{io, path::Path};

use tracing::info;

use crate::{
    column::{Cell, Column},
    encode::EncodedTable,
    error::TableError,
    table::PassengerTable,
};

/// File name of the cleaned table.
pub const CLEAN_FILE_NAME: &str = "titanic_clean.csv";
/// File name of the one-hot-encoded table.
pub const ENCODED_FILE_NAME: &str = "titanic_encoded.csv";

/// Writes the table to `path`, replacing any existing file.
pub fn write_table<P>(table: &PassengerTable, path: P) -> Result<(), TableError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let writer = csv::Writer::from_path(path).map_err(|source| write_error(path, source))?;
    table_to_writer(table, writer).map_err(|source| write_error(path, source))?;
    info!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

/// Writes the encoded table to `path`, replacing any existing file.
pub fn write_encoded<P>(encoded: &EncodedTable, path: P) -> Result<(), TableError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let writer = csv::Writer::from_path(path).map_err(|source| write_error(path, source))?;
    encoded_to_writer(encoded, writer).map_err(|source| write_error(path, source))?;
    info!(path = %path.display(), columns = encoded.names.len(), "wrote encoded table");
    Ok(())
}

fn write_error(path: &Path, source: csv::Error) -> TableError {
    TableError::Write {
        path: path.to_owned(),
        source,
    }
}

/// Writes the table as CSV to any byte sink.
pub fn table_to_writer<W>(table: &PassengerTable, mut writer: csv::Writer<W>) -> csv::Result<()>
where
    W: io::Write,
{
    if table.columns().is_empty() {
        return Ok(());
    }
    writer.write_record(table.columns().iter().map(Column::name))?;
    for row in 0..table.row_count() {
        writer.write_record(table.row(row).iter().map(Cell::to_csv_field))?;
    }
    writer.flush()?;
    Ok(())
}

fn encoded_to_writer<W>(encoded: &EncodedTable, mut writer: csv::Writer<W>) -> csv::Result<()>
where
    W: io::Write,
{
    if encoded.names.is_empty() {
        return Ok(());
    }
    writer.write_record(&encoded.names)?;
    for row in 0..encoded.row_count {
        writer.write_record(encoded.columns.iter().map(|c| c.csv_field(row)))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        clean, encode,
        loader::{self, HeaderStyle},
        schema::Field,
    };

    const SYNTHETIC: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,7.925,,S
4,1,1,\"Futrelle, Mrs. Jacques Heath\",female,35,1,0,113803,53.1,C123,
";

    #[test]
    fn test_cleaned_table_reloads_identically() {
        let mut table = loader::from_reader(SYNTHETIC.as_bytes(), HeaderStyle::Source).unwrap();
        clean::clean(&mut table);
        assert_eq!(table.column(Field::Age).unwrap().data.null_count(), 0);
        assert_eq!(table.column(Field::Embarked).unwrap().data.null_count(), 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLEAN_FILE_NAME);
        write_table(&table, &path).unwrap();
        let reloaded = loader::read_normalized(&path).unwrap();
        assert_eq!(reloaded.columns(), table.columns());
    }

    #[test]
    fn test_deduplicated_table_reloads_renumbered() {
        let csv = "Survived,Age,Embarked\n0,22,S\n0,22,S\n1,,C\n";
        let mut table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let report = clean::clean(&mut table);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(table.index(), [0, 2]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLEAN_FILE_NAME);
        write_table(&table, &path).unwrap();
        let reloaded = loader::read_normalized(&path).unwrap();
        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.index(), [0, 1]);
    }

    #[test]
    fn test_written_text() {
        let csv = "Survived,Age,Embarked\n0,22,S\n1,,\n";
        let table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let mut buf = vec![];
        table_to_writer(&table, csv::Writer::from_writer(&mut buf)).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "survived,age,embarked\n0,22.0,S\n1,,\n"
        );
    }

    #[test]
    fn test_encoded_file() {
        let csv = "Survived,Sex,Fare\n0,male,7.25\n1,female,71.2833\n";
        let table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ENCODED_FILE_NAME);
        write_encoded(&encode::one_hot(&table), &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "survived,fare,sex_male\n0,7.25,True\n1,71.2833,False\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(CLEAN_FILE_NAME);
        let err = write_table(&PassengerTable::default(), &path).unwrap_err();
        assert!(matches!(err, TableError::Write { .. }), "unexpected error: {err}");
    }
}
