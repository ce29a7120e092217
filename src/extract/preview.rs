//! Small `(year, value)` previews of one dataset.

use serde::{Deserialize, Serialize};

use crate::domain::{DatasetMeta, Series};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub year: i32,
    pub value: f64,
}

/// Preview response for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub ok: bool,
    pub name: String,
    pub title: String,
    pub entity: String,
    pub meta: DatasetMeta,
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,
}

/// First `limit` non-null points of `series`, in year order.
pub fn preview_rows(series: &Series, limit: usize) -> Vec<PreviewRow> {
    series
        .present()
        .take(limit)
        .map(|(year, value)| PreviewRow { year, value })
        .collect()
}
