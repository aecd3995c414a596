pub mod csv;
pub mod receipt;
pub mod views;
