pub mod sheet;
pub mod source_reader;
pub mod writer;
