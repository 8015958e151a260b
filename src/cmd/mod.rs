pub mod config;
pub mod console;
pub mod ticket;
