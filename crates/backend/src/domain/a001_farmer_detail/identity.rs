use uuid::Uuid;

/// Temporary identifier given to a record at admission, before the ERP has
/// issued a customer or vendor id. 128 random bits, hyphenated text form.
pub fn assign_temp_id() -> String {
    Uuid::new_v4().to_string()
}
