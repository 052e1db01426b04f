pub mod date;
pub mod digest;
pub mod paths;
