/// Stable name for the estimate column, whatever year the source labels it with.
pub const ESTIMATE_COLUMN: &str = "Estimated no. w/ HIV";

/// Name of the country column in the source header.
pub const COUNTRY_COLUMN: &str = "Country";

/// One country's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub country: String,
    /// Free text until cleaned, then digits or empty.
    pub estimated_count: String,
    /// ISO 3166-1 alpha-3, `None` when the catalog has no match.
    pub code: Option<String>,
}

impl Row {
    pub fn new(country: impl Into<String>, estimated_count: impl Into<String>) -> Self {
        Row {
            country: country.into(),
            estimated_count: estimated_count.into(),
            code: None,
        }
    }
}

/// Ordered rows sharing one schema. Each pipeline stage takes it by value
/// and hands it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.rows.iter().filter(|r| r.code.is_some()).count()
    }
}
