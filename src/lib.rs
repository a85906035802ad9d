pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod numeric;
pub mod path_policy;
pub mod report;
pub mod store;
pub mod summary;
pub mod text;
