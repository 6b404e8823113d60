use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;

use crate::core::primitives::{datetime_to_epoch_seconds, decimal_to_f64};
use crate::core::types::Span;
use crate::error::{PlotError, PlotResult};

/// One cell of a data column.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl DataValue {
    pub fn from_decimal(value: Decimal, field_name: &str) -> PlotResult<Self> {
        Ok(DataValue::Number(decimal_to_f64(value, field_name)?))
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        DataValue::Number(datetime_to_epoch_seconds(time))
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Display label used for discrete levels and facet matching.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            DataValue::Number(value) => format!("{value}"),
            DataValue::Text(value) => value.clone(),
            DataValue::Boolean(value) => format!("{value}"),
            DataValue::Null => "n/a".to_owned(),
        }
    }
}

/// Immutable columnar table; every column has the same row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: IndexMap<String, Vec<DataValue>>,
}

impl DataFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<DataValue>,
    ) -> PlotResult<Self> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(PlotError::InvalidData(format!(
                "column `{name}` has {} rows, expected {}",
                values.len(),
                self.row_count()
            )));
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    pub fn with_numeric_column(self, name: impl Into<String>, values: Vec<f64>) -> PlotResult<Self> {
        self.with_column(name, values.into_iter().map(DataValue::Number).collect())
    }

    pub fn with_text_column(
        self,
        name: impl Into<String>,
        values: Vec<impl Into<String>>,
    ) -> PlotResult<Self> {
        self.with_column(
            name,
            values
                .into_iter()
                .map(|value| DataValue::Text(value.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Numeric view of a column; non-numeric cells become `None`.
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.column(name)
            .map(|values| values.iter().map(DataValue::as_f64).collect())
    }

    /// `true` when at least one cell of the column is non-numeric data.
    #[must_use]
    pub fn is_discrete(&self, name: &str) -> bool {
        self.column(name).is_some_and(|values| {
            values
                .iter()
                .any(|value| !value.is_null() && value.as_f64().is_none())
        })
    }

    /// Range over finite numeric cells.
    #[must_use]
    pub fn range(&self, name: &str) -> Option<Span> {
        let values = self.column(name)?;
        let mut span: Option<Span> = None;
        for value in values {
            if let Some(value) = value.as_f64().filter(|value| value.is_finite()) {
                let singleton = Span::singleton(value).ok();
                span = Span::union_optional(span, singleton);
            }
        }
        span
    }

    /// Distinct non-null labels in order of first appearance.
    #[must_use]
    pub fn distinct_levels(&self, name: &str) -> Vec<String> {
        let mut levels = IndexSet::new();
        if let Some(values) = self.column(name) {
            for value in values {
                if !value.is_null() {
                    levels.insert(value.label());
                }
            }
        }
        levels.into_iter().collect()
    }

    /// Row subset in the given index order; indices out of bounds are skipped.
    #[must_use]
    pub fn slice(&self, indices: &[usize]) -> DataFrame {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let taken = indices
                    .iter()
                    .filter_map(|&index| values.get(index).cloned())
                    .collect();
                (name.clone(), taken)
            })
            .collect();
        DataFrame { columns }
    }
}
