pub mod app;
pub mod data;
pub mod error;
pub mod finder;
pub mod records;
pub mod render;
pub mod route_table;
