//! Flat CSV export of the merged request index

pub mod table;

pub use table::{CsvTarget, ID_COLUMN, export_csv, header, write_csv};
