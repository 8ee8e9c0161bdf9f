//! In-memory string table shared by the loader and the aggregation stage.

/// Rows of text cells under a header. An empty cell is a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stacks the rows of `tables` in order.
    ///
    /// The resulting header is the union of all headers in order of first
    /// appearance; a table lacking a column contributes empty cells for it.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut headers: Vec<String> = Vec::new();
        for table in &tables {
            for h in &table.headers {
                if !headers.contains(h) {
                    headers.push(h.clone());
                }
            }
        }

        let mut combined = Table::new(headers);
        for table in tables {
            let mapping: Vec<Option<usize>> = combined
                .headers
                .iter()
                .map(|h| table.column_index(h))
                .collect();

            for row in table.rows {
                let aligned = mapping
                    .iter()
                    .map(|idx| idx.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                    .collect();
                combined.rows.push(aligned);
            }
        }

        combined
    }
}
