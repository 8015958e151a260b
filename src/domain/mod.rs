pub mod employer;
pub mod priority;
pub mod ticket;
