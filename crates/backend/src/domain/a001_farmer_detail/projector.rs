//! Maps stored farmer details to the public response shapes.

use chrono::{DateTime, Utc};
use contracts::domain::a001_farmer_detail::aggregate::FarmerDetail;
use contracts::domain::a001_farmer_detail::responses::{
    CreateFarmerResponse, FarmerDetailViewDto, FarmerErrorData, FarmerErrorResponse,
    FarmerListResponse, FarmerReceiptDto, PageInfo, CREATED_MESSAGE, FETCHED_MESSAGE,
};

use super::query::PageRequest;
use crate::shared::format::{format_timestamp, format_timestamp_millis};

pub fn to_receipt(record: &FarmerDetail, message: &str) -> FarmerReceiptDto {
    FarmerReceiptDto {
        temp_erp_customer_id: record.temp_id.clone(),
        erp_customer_id: record.customer_id.clone(),
        erp_vendor_id: record.vendor_id.clone(),
        farmer_id: record.farmer_id.clone(),
        created_at: format_timestamp(&record.metadata.created_at),
        updated_at: format_timestamp(&record.metadata.updated_at),
        message: message.to_string(),
    }
}

pub fn created_response(record: &FarmerDetail) -> CreateFarmerResponse {
    CreateFarmerResponse {
        success: true,
        data: to_receipt(record, CREATED_MESSAGE),
    }
}

pub fn list_response(items: &[FarmerDetail], pagination: PageInfo) -> FarmerListResponse {
    FarmerListResponse {
        success: true,
        data: items.iter().map(|r| to_receipt(r, "")).collect(),
        pagination,
    }
}

pub fn to_detail_view(record: &FarmerDetail) -> FarmerDetailViewDto {
    FarmerDetailViewDto {
        farmer_id: record.farmer_id.clone(),
        name: record.display_name(),
        mobile_number: record.mobile_number.clone(),
        cooperative: record.coop_id.clone(),
        region_id: record.region_id,
        region_part_id: record.region_part_id,
        settlement_id: record.settlement_id,
        settlement_part_id: record.settlement_part_id,
        custom_geography_structure1_id: record.custom_geography_structure1_id.clone(),
        custom_geography_structure2_id: record.custom_geography_structure2_id.clone(),
        zip_code: record.zip_code.clone(),
        farmer_kyc_type_id: record.farmer_kyc_type_id,
        farmer_kyc_type: record.farmer_kyc_type.clone(),
        farmer_kyc_id: record.farmer_kyc_id.clone(),
        club_id: record.club_id.clone(),
        club_name: record.club_name.clone(),
        club_leader_farmer_id: record.club_leader_farmer_id.clone(),
        entity_id: record.temp_id.clone(),
        customer_code: record.customer_id.clone(),
        vendor_code: record.vendor_id.clone(),
        created_date: format_timestamp(&record.metadata.created_at),
        updated_date: format_timestamp(&record.metadata.updated_at),
        raithu_created_date: record.raithu_created_date.clone(),
        raithu_updated_at: record.raithu_updated_at.clone(),
        message: FETCHED_MESSAGE.to_string(),
    }
}

/// Rejected admission. Unlike the success views, timestamps here keep
/// millisecond precision; existing consumers read both shapes.
pub fn error_response(farmer_id: &str, message: &str, now: DateTime<Utc>) -> FarmerErrorResponse {
    let stamp = format_timestamp_millis(&now);
    FarmerErrorResponse {
        success: false,
        data: FarmerErrorData {
            temp_erp_customer_id: "0".to_string(),
            erp_customer_id: String::new(),
            farmer_id: farmer_id.to_string(),
            created_at: stamp.clone(),
            updated_at: stamp,
            message: message.to_string(),
        },
    }
}

pub fn page_info(page: PageRequest, total_items: u64) -> PageInfo {
    let total_pages = total_items.div_ceil(page.limit());
    PageInfo {
        page: page.page(),
        limit: page.limit(),
        total_items,
        total_pages,
        has_previous: page.page() > 1,
        has_next: page.page() < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_farmer_detail::test_support::{record_at, sample_dto};
    use chrono::TimeZone;

    fn stored_record() -> FarmerDetail {
        let at = Utc.with_ymd_and_hms(2025, 12, 30, 5, 3, 17).unwrap()
            + chrono::Duration::milliseconds(863);
        let mut record = record_at("COOP-7", &sample_dto("F58982", "KYC-77"), at);
        record.customer_id = "C-100".into();
        record
    }

    #[test]
    fn receipt_uses_second_precision() {
        let record = stored_record();
        let body = created_response(&record);

        assert!(body.success);
        assert_eq!(body.data.temp_erp_customer_id, record.temp_id);
        assert_eq!(body.data.erp_customer_id, "C-100");
        assert_eq!(body.data.erp_vendor_id, "");
        assert_eq!(body.data.created_at, "2025-12-30T05:03:17Z");
        assert_eq!(body.data.message, CREATED_MESSAGE);
    }

    #[test]
    fn detail_view_keeps_identifiers() {
        let record = stored_record();
        let view = to_detail_view(&record);

        assert_eq!(view.farmer_id, record.farmer_id);
        assert_eq!(view.cooperative, record.coop_id);
        assert_eq!(view.club_leader_farmer_id, record.club_leader_farmer_id);
        assert_eq!(view.name, "Lakshmi Reddy");
        assert_eq!(view.entity_id, record.temp_id);
        assert_eq!(view.customer_code, "C-100");
        assert_eq!(view.updated_date, "2025-12-30T05:03:17Z");
        assert_eq!(
            view.raithu_created_date.as_deref(),
            Some("2025-12-30T05:03:17.863Z")
        );
    }

    #[test]
    fn error_view_uses_millisecond_precision() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(5);
        let body = error_response("F1", "You must provide a Farmer ID.", now);

        assert!(!body.success);
        assert_eq!(body.data.temp_erp_customer_id, "0");
        assert_eq!(body.data.erp_customer_id, "");
        assert_eq!(body.data.created_at, "2025-01-01T10:00:00.005Z");
        assert_eq!(body.data.created_at, body.data.updated_at);
    }

    #[test]
    fn page_info_boundaries() {
        let info = page_info(PageRequest::new(2, 10), 25);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_previous && info.has_next);

        let info = page_info(PageRequest::new(3, 10), 25);
        assert!(!info.has_next);

        let info = page_info(PageRequest::new(1, 10), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_previous && !info.has_next);

        let info = page_info(PageRequest::new(1, 10), 10);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next);

        let info = page_info(PageRequest::new(0, 0), 25);
        assert_eq!((info.page, info.limit, info.total_pages), (1, 10, 3));
    }

    #[test]
    fn list_items_carry_no_message() {
        let record = stored_record();
        let body = list_response(
            std::slice::from_ref(&record),
            page_info(PageRequest::default(), 1),
        );
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].message, "");
        assert_eq!(body.pagination.total_items, 1);
    }
}
