pub mod aggregate;
pub mod responses;
