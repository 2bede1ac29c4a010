// src/load/mod.rs
pub mod clean;

use crate::error::ParseError;
use crate::table::{Row, Table, COUNTRY_COLUMN, ESTIMATE_COLUMN};
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, warn};

pub use clean::{clean_country, clean_estimate, clean_table};

/// Records as read, with the header row already located.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    fn column_index(&self, name: &str) -> Result<usize, ParseError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ParseError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Give the year column its stable logical name.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), ParseError> {
        let idx = self.column_index(from)?;
        self.headers[idx] = to.to_string();
        Ok(())
    }

    /// Keep only country + estimate, in file order.
    pub fn into_table(self) -> Result<Table, ParseError> {
        let country_idx = self.column_index(COUNTRY_COLUMN)?;
        let estimate_idx = self.column_index(ESTIMATE_COLUMN)?;

        let rows = self
            .rows
            .into_iter()
            .map(|fields| {
                let get = |i: usize| fields.get(i).cloned().unwrap_or_default();
                Row::new(get(country_idx), get(estimate_idx))
            })
            .collect();
        Ok(Table::new(rows))
    }
}

fn is_header(record: &StringRecord, year_column: &str) -> bool {
    let has = |name: &str| record.iter().any(|f| f.trim() == name);
    has(COUNTRY_COLUMN) && has(year_column)
}

/// Parse the CSV, taking the header from whichever of the first two lines
/// carries both `Country` and `year_column`. The source export puts a
/// title line above the real header.
pub fn read_raw<R: Read>(reader: R, year_column: &str) -> Result<RawTable, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let header_idx = match records.iter().take(2).position(|r| is_header(r, year_column)) {
        Some(i) => i,
        None => {
            // A country header without the year means the wrong year was asked for.
            let has_country = records
                .iter()
                .take(2)
                .any(|r| r.iter().any(|f| f.trim() == COUNTRY_COLUMN));
            return Err(if has_country {
                ParseError::MissingColumn {
                    column: year_column.to_string(),
                }
            } else {
                ParseError::MissingHeader {
                    column: COUNTRY_COLUMN.to_string(),
                }
            });
        }
    };
    if header_idx == 1 {
        debug!("header found on second line, skipping title line");
    }

    let headers: Vec<String> = records[header_idx]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .skip(header_idx + 1)
        .filter(|r| r.iter().any(|f| !f.trim().is_empty()))
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

/// Read `path` into a `Table` whose estimate column is the one labelled
/// `year_column`. Values are not cleaned yet.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, year_column: &str) -> Result<Table, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut raw = read_raw(file, year_column)?;
    raw.rename_column(year_column, ESTIMATE_COLUMN)?;
    let table = raw.into_table()?;

    if table.is_empty() {
        warn!("input has a header but no data rows");
    }
    info!(rows = table.len(), "loaded table");
    Ok(table)
}
