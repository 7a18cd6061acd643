//! Export serializer: the full record set as an `.xlsx` workbook.
//!
//! The artifact is built in memory per request and discarded after
//! delivery; nothing is cached. Attachment fields are exported as their raw
//! stored path strings, never resolved content.

use rust_xlsxwriter::Workbook;

use pravesh_db::model::record::Record;

use crate::error::ServiceResult;

/// Column headers in schema insertion order.
pub const EXPORT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "firstName",
    "middleName",
    "lastName",
    "fullName",
    "motherName",
    "gender",
    "address",
    "taluka",
    "district",
    "pinCode",
    "state",
    "mobileNumber",
    "emailId",
    "aadhaarNumber",
    "dob",
    "age",
    "religion",
    "casteCategory",
    "caste",
    "physicallyHandicapped",
    "casteCertificate",
    "marksheet",
    "photo",
    "signature",
];

/// ## Summary
/// Serializes the record set into an xlsx workbook with a "Records"
/// worksheet: one column per field in schema order, one row per record in
/// repository list order. An empty set yields a header-only sheet.
///
/// ## Errors
/// Returns `Export` if workbook serialization fails.
pub fn export_workbook(records: &[Record]) -> ServiceResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Records")?;

    let mut col: u16 = 0;
    for header in EXPORT_COLUMNS {
        worksheet.write_string(0, col, *header)?;
        col += 1;
    }

    let mut row: u32 = 1;
    for record in records {
        let mut col: u16 = 0;
        for value in row_values(record) {
            worksheet.write_string(row, col, value)?;
            col += 1;
        }
        row += 1;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Cell values for one record, aligned with [`EXPORT_COLUMNS`].
fn row_values(record: &Record) -> Vec<String> {
    let path = |p: &Option<String>| p.clone().unwrap_or_default();
    vec![
        record.id.to_string(),
        record.title.clone(),
        record.first_name.clone(),
        record.middle_name.clone(),
        record.last_name.clone(),
        record.full_name.clone(),
        record.mother_name.clone(),
        record.gender.clone(),
        record.address.clone(),
        record.taluka.clone(),
        record.district.clone(),
        record.pin_code.clone(),
        record.state.clone(),
        record.mobile_number.clone(),
        record.email_id.clone(),
        record.aadhaar_number.clone(),
        record.date_of_birth.to_string(),
        record.age.to_string(),
        record.religion.clone(),
        record.caste_category.clone(),
        record.caste.clone(),
        record.physically_handicapped.clone(),
        path(&record.caste_certificate),
        path(&record.marksheet),
        path(&record.photo),
        path(&record.signature),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn sample_record() -> Record {
        Record {
            id: uuid::Uuid::now_v7(),
            title: "Ms.".into(),
            first_name: "Asha".into(),
            middle_name: String::new(),
            last_name: "Rao".into(),
            full_name: "Asha  Rao".into(),
            mother_name: "Sunita Rao".into(),
            gender: "Female".into(),
            address: "14 Shivaji Road".into(),
            taluka: "Haveli".into(),
            district: "Pune".into(),
            pin_code: "411001".into(),
            state: "Maharashtra".into(),
            mobile_number: "9876543210".into(),
            email_id: "asha.rao@example.com".into(),
            aadhaar_number: "123412341234".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
            age: 24,
            religion: "Hindu".into(),
            caste_category: "General".into(),
            caste: "Maratha".into(),
            physically_handicapped: "No".into(),
            caste_certificate: Some("uploads/1-cert.pdf".into()),
            marksheet: Some("uploads/2-marks.pdf".into()),
            photo: Some("uploads/3-photo.png".into()),
            signature: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_set_is_a_valid_header_only_workbook() {
        let buffer = export_workbook(&[]).unwrap();
        // xlsx is a zip container
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_row_values_align_with_columns() {
        let values = row_values(&sample_record());
        assert_eq!(values.len(), EXPORT_COLUMNS.len());
        assert_eq!(values[1], "Ms.");
        assert_eq!(values[16], "2000-06-15");
        assert_eq!(values[17], "24");
        // attachments export as raw stored paths; a missing one is empty
        assert_eq!(values[22], "uploads/1-cert.pdf");
        assert_eq!(values[25], "");
    }

    #[test]
    fn test_workbook_with_rows_serializes() {
        let buffer = export_workbook(&[sample_record(), sample_record()]).unwrap();
        assert!(buffer.len() > 500);
    }
}
