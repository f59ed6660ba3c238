pub mod error;
pub mod input_validator;
pub mod report;
pub mod result_formatter;
