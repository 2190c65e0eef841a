pub mod csv_loader;
pub mod dir_loader;

pub use csv_loader::{CsvRowSource, RowSource};
pub use dir_loader::collect_input_files;
