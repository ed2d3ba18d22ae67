use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};
use crate::vocabulary::column_position;

/// One named column of a source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub label: String,
    pub cells: Vec<CellValue>,
}

impl RawColumn {
    pub fn new(label: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }

    /// Number of cells that are not [`CellValue::Missing`].
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_missing()).count()
    }

    /// True when at least one cell carries a non-blank value.
    pub fn has_content(&self) -> bool {
        self.cells.iter().any(|cell| !cell.is_blank())
    }
}

/// A source table as loaded from disk, after header recovery.
///
/// Columns keep their source order and labels are unique. The table is not
/// mutated once loading finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    height: usize,
}

impl RawTable {
    /// Builds a table, rejecting ragged columns and duplicate labels.
    pub fn new(columns: Vec<RawColumn>) -> Result<Self> {
        let height = columns.first().map_or(0, |column| column.cells.len());
        let table = Self { columns, height };
        table.validate()?;
        Ok(table)
    }

    /// Builds a table without checking its shape.
    ///
    /// Used by callers that assemble columns from external data and validate
    /// later, see [`RawTable::validate`].
    pub fn from_parts_unchecked(columns: Vec<RawColumn>, height: usize) -> Self {
        Self { columns, height }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if column.cells.len() != self.height {
                return Err(ModelError::RaggedColumn {
                    column: column.label.clone(),
                    expected: self.height,
                    actual: column.cells.len(),
                });
            }
            if !seen.insert(column.label.as_str()) {
                return Err(ModelError::DuplicateColumn(column.label.clone()));
            }
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.label.as_str())
    }

    pub fn column(&self, label: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|column| column.label == label)
    }

    /// Cells of row `index` in column order, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.height {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| column.cells.get(index).unwrap_or(&CellValue::Missing))
                .collect(),
        )
    }

    pub fn into_columns(self) -> Vec<RawColumn> {
        self.columns
    }
}

/// A column of the normalized output, named by a canonical SFLF column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedColumn {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// Output table whose columns are canonical SFLF names in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    columns: Vec<NormalizedColumn>,
    height: usize,
}

impl NormalizedTable {
    pub fn new(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    /// Inserts a column, replacing an existing column of the same name in
    /// place. New columns are placed by canonical order.
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        let Some(position) = column_position(name) else {
            return Err(ModelError::UnknownColumn(name.to_string()));
        };
        if values.len() != self.height {
            return Err(ModelError::RaggedColumn {
                column: name.to_string(),
                expected: self.height,
                actual: values.len(),
            });
        }
        if let Some(existing) = self.columns.iter_mut().find(|column| column.name == name) {
            existing.values = values;
            return Ok(());
        }
        let insert_at = self
            .columns
            .iter()
            .position(|column| column_position(&column.name).is_some_and(|other| other > position))
            .unwrap_or(self.columns.len());
        self.columns.insert(
            insert_at,
            NormalizedColumn {
                name: name.to_string(),
                values,
            },
        );
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[NormalizedColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&NormalizedColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Rendered values of row `index`, in column order.
    pub fn row_strings(&self, index: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                column
                    .values
                    .get(index)
                    .map(CellValue::display)
                    .unwrap_or_default()
            })
            .collect()
    }
}
