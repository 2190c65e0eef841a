use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::RowSourceError;
use crate::models::Record;

/// 数据源：按顺序产出记录
pub trait RowSource {
    fn read_records(&self) -> Result<Vec<Record>, RowSourceError>;
}

/// CSV 数据源
///
/// 第一行作为表头；行的字段数少于表头时，缺少的字段不出现在记录中。
pub struct CsvRowSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_error(&self, source: csv::Error) -> RowSourceError {
        RowSourceError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl RowSource for CsvRowSource {
    fn read_records(&self) -> Result<Vec<Record>, RowSourceError> {
        if !self.path.is_file() {
            return Err(RowSourceError::NotFound(self.path.clone()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| self.csv_error(e))?;
            let fields: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(row.iter().map(String::from))
                .collect();
            records.push(Record::new(fields));
        }

        tracing::debug!("从 {} 读取 {} 条记录", self.path.display(), records.len());
        Ok(records)
    }
}
