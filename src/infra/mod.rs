pub mod fetch;
pub mod import;
pub mod source_reader;
