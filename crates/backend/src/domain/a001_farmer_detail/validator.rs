use contracts::domain::a001_farmer_detail::aggregate::CreateFarmerDetailDto;

use super::repository::FarmerStore;
use super::FarmerDetailError;

type PresenceCheck = fn(&str, &CreateFarmerDetailDto) -> bool;

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn has_cooperative(coop_id: &str, _: &CreateFarmerDetailDto) -> bool {
    is_present(coop_id)
}

fn has_farmer_id(_: &str, dto: &CreateFarmerDetailDto) -> bool {
    is_present(&dto.farmer_id)
}

fn has_full_name(_: &str, dto: &CreateFarmerDetailDto) -> bool {
    is_present(&dto.first_name) && is_present(&dto.last_name)
}

fn has_kyc_identity(_: &str, dto: &CreateFarmerDetailDto) -> bool {
    is_present(&dto.farmer_kyc_id) || is_present(&dto.club_leader_farmer_id)
}

/// Presence rules in evaluation order
fn presence_rules() -> [(PresenceCheck, FarmerDetailError); 4] {
    [
        (has_cooperative as PresenceCheck, FarmerDetailError::MissingCooperative),
        (has_farmer_id as PresenceCheck, FarmerDetailError::MissingFarmerId),
        (has_full_name as PresenceCheck, FarmerDetailError::MissingName),
        (has_kyc_identity as PresenceCheck, FarmerDetailError::MissingKycIdentity),
    ]
}

/// Payload checks that need no store access
pub fn check_presence(coop_id: &str, dto: &CreateFarmerDetailDto) -> Result<(), FarmerDetailError> {
    for (holds, error) in presence_rules() {
        if !holds(coop_id, dto) {
            return Err(error);
        }
    }
    Ok(())
}

/// Full admission check: presence rules, then KYC uniqueness, then
/// farmer-in-cooperative uniqueness. Stops at the first failure and never
/// writes to the store.
///
/// The uniqueness reads are advisory; the store's unique indexes are what
/// make them hold under concurrent admissions.
pub async fn validate(
    store: &dyn FarmerStore,
    coop_id: &str,
    dto: &CreateFarmerDetailDto,
) -> Result<(), FarmerDetailError> {
    check_presence(coop_id, dto)?;

    if is_present(&dto.farmer_kyc_id)
        && store.find_by_kyc_id(&dto.farmer_kyc_id).await?.is_some()
    {
        return Err(FarmerDetailError::DuplicateKyc(dto.farmer_kyc_id.clone()));
    }

    if store
        .find_by_coop_and_farmer(coop_id, &dto.farmer_id)
        .await?
        .is_some()
    {
        return Err(FarmerDetailError::DuplicateFarmerInCooperative {
            farmer_id: dto.farmer_id.clone(),
            coop_id: coop_id.to_string(),
        });
    }

    Ok(())
}
