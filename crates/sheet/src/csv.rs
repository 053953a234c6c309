use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader("Sheet1", content.as_bytes(), &CsvOptions::default())
    }

    /// Load a named sheet from a reader.
    ///
    /// Records may have different lengths. Fields that are not valid UTF-8
    /// are decoded lossily instead of failing the whole file.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R, options: &CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut data: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.byte_records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    let field = String::from_utf8_lossy(field);
                    CellValue::parse(field.trim_start_matches('\u{feff}'))
                })
                .collect();
            data.push(row);
        }

        Ok(Sheet::from_rows(name, data))
    }

    /// Save the sheet to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_csv(writer, &CsvOptions::default())
    }

    /// Write the sheet to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .flexible(true)
            .from_writer(writer);

        for row in self.data() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the sheet to a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, &CsvOptions::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
