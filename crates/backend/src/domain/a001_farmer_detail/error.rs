use thiserror::Error;

use super::repository::StoreError;

/// Farmer registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FarmerDetailError {
    #[error("The indicated cooperative does not exist.")]
    MissingCooperative,

    #[error("You must provide a Farmer ID.")]
    MissingFarmerId,

    #[error("You must provide the first and last name.")]
    MissingName,

    #[error("Either farmer_kyc_id or clubLeaderFarmerId must be provided.")]
    MissingKycIdentity,

    #[error("Farmer with the given KYC ID {0} already exists.")]
    DuplicateKyc(String),

    #[error("The Farmer ID {farmer_id} is already registered in the cooperative {coop_id}.")]
    DuplicateFarmerInCooperative { farmer_id: String, coop_id: String },

    #[error("Invalid {field} value '{value}': expected an RFC 3339 timestamp or YYYY-MM-DD")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Farmer not found")]
    NotFound,

    #[error("{0}")]
    Persistence(String),
}

impl FarmerDetailError {
    /// Rejections caused by the request itself (reported as 400)
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::NotFound | Self::Persistence(_))
    }
}

impl From<StoreError> for FarmerDetailError {
    fn from(e: StoreError) -> Self {
        FarmerDetailError::Persistence(e.to_string())
    }
}
