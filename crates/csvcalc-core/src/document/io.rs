use super::Table;
use crate::error::Result;
use crate::storage::{LoadOptions, read_table};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

impl Table {
    /// Load a table from delimited text.
    pub fn load<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Self> {
        Ok(Table::new(read_table(reader, options)?))
    }

    /// Load a table from a file on disk.
    pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Self> {
        debug!(path = %path.display(), "loading table");
        let file = File::open(path)?;
        Self::load(BufReader::new(file), options)
    }

    /// Load a table from in-memory text.
    pub fn parse(text: &str, options: &LoadOptions) -> Result<Self> {
        Self::load(text.as_bytes(), options)
    }

    /// Replace the cells with freshly loaded ones and drop every memoized value.
    ///
    /// On error the current table is left untouched.
    pub fn reload<R: BufRead>(&mut self, reader: R, options: &LoadOptions) -> Result<()> {
        let fresh = Table::load(reader, options)?;
        *self = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvCalcError;
    use std::io::Write;

    #[test]
    fn test_reload_clears_cache() {
        let options = LoadOptions::default();
        let mut table = Table::parse(",A,B\n1,1,=A1+1\n", &options).unwrap();
        assert_eq!(table.evaluate("B1"), Ok("2".to_string()));
        assert!(!table.cache().is_empty());

        table.reload(",A,B\n1,5,=A1+1\n".as_bytes(), &options).unwrap();
        assert!(table.cache().is_empty());
        assert_eq!(table.evaluate("B1"), Ok("6".to_string()));
    }

    #[test]
    fn test_failed_reload_keeps_previous_table() {
        let options = LoadOptions::default();
        let mut table = Table::parse(",A\n1,=2*2\n", &options).unwrap();
        table.evaluate("A1").unwrap();

        let err = table.reload(",A\nx,1\n".as_bytes(), &options).unwrap_err();
        assert!(matches!(err, CsvCalcError::MalformedTable { .. }));
        assert_eq!(table.raw_at("A1"), Ok("=2*2"));
        assert_eq!(table.cache().len(), 1);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ",A,B\r\n1, 2 , = A1 * 3 \r\n").unwrap();

        let mut table = Table::load_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(table.raw_at("B1"), Ok("=A1*3"));
        assert_eq!(table.evaluate("B1"), Ok("6".to_string()));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::load_file(&dir.path().join("missing.csv"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, CsvCalcError::Io(_)));
    }
}
