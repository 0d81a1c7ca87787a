//! Farmer detail registry: admission, lookup and paginated listing of
//! farmer records staged for the ERP.

pub mod error;
pub mod identity;
pub mod projector;
pub mod query;
pub mod repository;
pub mod service;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::FarmerDetailError;
pub use service::FarmerDetailService;
