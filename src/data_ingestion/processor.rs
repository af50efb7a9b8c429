pub mod csv_io;
pub mod json_io;
pub mod text_io;

pub use csv_io::{CsvReader, CsvReaderConfig};
pub use json_io::parse_json;
pub use text_io::{parse_text, TEXT_COLUMN};
