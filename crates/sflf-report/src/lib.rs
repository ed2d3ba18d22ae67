//! Upload previews: per-column mapping decisions, table statistics and a
//! sample of rows, built from a loaded table and its column mappings.

mod preview;

pub use preview::{
    CellPreview, ColumnPreview, EMPTY_CELL, PreviewStatistics, PreviewSummary, ROW_VALUE_CHARS,
    RowPreview, SAMPLE_VALUE_CHARS, SAMPLE_VALUES, SkipReason, build_preview, truncate,
};
