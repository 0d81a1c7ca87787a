// Aggregate handlers
pub mod a001_farmer_detail;

use std::sync::Arc;

use crate::domain::a001_farmer_detail::FarmerDetailService;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub farmers: Arc<FarmerDetailService>,
}

impl AppState {
    pub fn new(farmers: FarmerDetailService) -> Self {
        Self {
            farmers: Arc::new(farmers),
        }
    }
}
