//! The canonical admission record row and its form-state round trips.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use pravesh_core::error::{CoreError, CoreResult};
use pravesh_core::form::derive::parse_dob;
use pravesh_core::form::state::FormState;

use crate::db::schema;

/// A stored admission record. Attachment fields hold stored blob paths;
/// the repository never opens or validates the blobs behind them.
#[derive(
    Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, AsChangeset, Serialize,
    Deserialize,
)]
#[diesel(table_name = schema::record)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: uuid::Uuid,
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub full_name: String,
    pub mother_name: String,
    pub gender: String,
    pub address: String,
    pub taluka: String,
    pub district: String,
    pub pin_code: String,
    pub state: String,
    pub mobile_number: String,
    pub email_id: String,
    pub aadhaar_number: String,
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub religion: String,
    pub caste_category: String,
    pub caste: String,
    pub physically_handicapped: String,
    pub caste_certificate: Option<String>,
    pub marksheet: Option<String>,
    pub photo: Option<String>,
    pub signature: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::record)]
pub struct NewRecord {
    pub id: uuid::Uuid,
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub full_name: String,
    pub mother_name: String,
    pub gender: String,
    pub address: String,
    pub taluka: String,
    pub district: String,
    pub pin_code: String,
    pub state: String,
    pub mobile_number: String,
    pub email_id: String,
    pub aadhaar_number: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub religion: String,
    pub caste_category: String,
    pub caste: String,
    pub physically_handicapped: String,
    pub caste_certificate: Option<String>,
    pub marksheet: Option<String>,
    pub photo: Option<String>,
    pub signature: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewRecord {
    /// ## Summary
    /// Builds an insertable row from a validated form state.
    ///
    /// ## Errors
    /// Returns an error if the state's dob does not parse or its derived age
    /// is missing; both are ruled out by prior validation.
    pub fn from_state(id: uuid::Uuid, state: &FormState, now: DateTime<Utc>) -> CoreResult<Self> {
        let date_of_birth = parse_dob(&state.dob)
            .ok_or_else(|| CoreError::InvalidInput(format!("not a calendar date: {}", state.dob)))?;
        let age = state
            .age
            .ok_or(CoreError::InvariantViolation("derived age missing"))?;

        Ok(Self {
            id,
            title: state.title.clone(),
            first_name: state.first_name.clone(),
            middle_name: state.middle_name.clone(),
            last_name: state.last_name.clone(),
            full_name: state.full_name.clone(),
            mother_name: state.mother_name.clone(),
            gender: state.gender.clone(),
            address: state.address.clone(),
            taluka: state.taluka.clone(),
            district: state.district.clone(),
            pin_code: state.pin_code.clone(),
            state: state.state.clone(),
            mobile_number: state.mobile_number.clone(),
            email_id: state.email_id.clone(),
            aadhaar_number: state.aadhaar_number.clone(),
            date_of_birth,
            age,
            religion: state.religion.clone(),
            caste_category: state.caste_category.clone(),
            caste: state.caste.clone(),
            physically_handicapped: state.physically_handicapped.clone(),
            caste_certificate: state.caste_certificate.clone(),
            marksheet: state.marksheet.clone(),
            photo: state.photo.clone(),
            signature: state.signature.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Record {
    /// ## Summary
    /// Projects this row back into a form state so a patch can be merged and
    /// the result re-validated with the same rules a fresh submission faces.
    #[must_use]
    pub fn to_form_state(&self) -> FormState {
        FormState {
            title: self.title.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            full_name: self.full_name.clone(),
            mother_name: self.mother_name.clone(),
            gender: self.gender.clone(),
            address: self.address.clone(),
            taluka: self.taluka.clone(),
            district: self.district.clone(),
            pin_code: self.pin_code.clone(),
            state: self.state.clone(),
            mobile_number: self.mobile_number.clone(),
            email_id: self.email_id.clone(),
            aadhaar_number: self.aadhaar_number.clone(),
            dob: self.date_of_birth.to_string(),
            age: Some(self.age),
            religion: self.religion.clone(),
            caste_category: self.caste_category.clone(),
            caste: self.caste.clone(),
            physically_handicapped: self.physically_handicapped.clone(),
            caste_certificate: self.caste_certificate.clone(),
            marksheet: self.marksheet.clone(),
            photo: self.photo.clone(),
            signature: self.signature.clone(),
        }
    }

    /// ## Summary
    /// Rebuilds this row from a merged, re-validated form state, keeping the
    /// identifier and creation timestamp.
    ///
    /// ## Errors
    /// Same conditions as [`NewRecord::from_state`].
    pub fn with_state(&self, state: &FormState, now: DateTime<Utc>) -> CoreResult<Self> {
        let merged = NewRecord::from_state(self.id, state, now)?;
        Ok(Self {
            id: self.id,
            title: merged.title,
            first_name: merged.first_name,
            middle_name: merged.middle_name,
            last_name: merged.last_name,
            full_name: merged.full_name,
            mother_name: merged.mother_name,
            gender: merged.gender,
            address: merged.address,
            taluka: merged.taluka,
            district: merged.district,
            pin_code: merged.pin_code,
            state: merged.state,
            mobile_number: merged.mobile_number,
            email_id: merged.email_id,
            aadhaar_number: merged.aadhaar_number,
            date_of_birth: merged.date_of_birth,
            age: merged.age,
            religion: merged.religion,
            caste_category: merged.caste_category,
            caste: merged.caste,
            physically_handicapped: merged.physically_handicapped,
            caste_certificate: merged.caste_certificate,
            marksheet: merged.marksheet,
            photo: merged.photo,
            signature: merged.signature,
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pravesh_core::form::state::FormPatch;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn complete_state() -> FormState {
        let mut patch = FormPatch::default();
        for (name, value) in [
            ("gender", "Female"),
            ("district", "Pune"),
            ("title", "Ms."),
            ("firstName", "Asha"),
            ("middleName", ""),
            ("lastName", "Rao"),
            ("motherName", "Sunita Rao"),
            ("address", "14 Shivaji Road"),
            ("taluka", "Haveli"),
            ("pinCode", "411001"),
            ("mobileNumber", "9876543210"),
            ("emailId", "asha.rao@example.com"),
            ("aadhaarNumber", "123412341234"),
            ("dob", "2000-06-15"),
            ("religion", "Hindu"),
            ("casteCategory", "General"),
            ("caste", "Maratha"),
            ("physicallyHandicapped", "No"),
        ] {
            patch.set_wire(name, value.into());
        }
        patch.set_attachment("casteCertificate", "uploads/1-cert.pdf".into());
        patch.set_attachment("marksheet", "uploads/2-marks.pdf".into());
        patch.set_attachment("photo", "uploads/3-photo.png".into());
        patch.set_attachment("signature", "uploads/4-sign.png".into());
        FormState::new().apply(&patch, today())
    }

    #[test]
    fn test_from_state_carries_derived_fields() {
        let state = complete_state();
        let row = NewRecord::from_state(uuid::Uuid::now_v7(), &state, Utc::now()).unwrap();
        assert_eq!(row.full_name, "Asha  Rao");
        assert_eq!(row.age, 24);
        assert_eq!(
            row.date_of_birth,
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap()
        );
        assert_eq!(row.photo.as_deref(), Some("uploads/3-photo.png"));
    }

    #[test]
    fn test_from_state_rejects_bad_dob() {
        let mut state = complete_state();
        state.dob = "garbage".into();
        let result = NewRecord::from_state(uuid::Uuid::now_v7(), &state, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_form_state_round_trip() {
        let state = complete_state();
        let now = Utc::now();
        let new = NewRecord::from_state(uuid::Uuid::now_v7(), &state, now).unwrap();
        let row = Record {
            id: new.id,
            title: new.title,
            first_name: new.first_name,
            middle_name: new.middle_name,
            last_name: new.last_name,
            full_name: new.full_name,
            mother_name: new.mother_name,
            gender: new.gender,
            address: new.address,
            taluka: new.taluka,
            district: new.district,
            pin_code: new.pin_code,
            state: new.state,
            mobile_number: new.mobile_number,
            email_id: new.email_id,
            aadhaar_number: new.aadhaar_number,
            date_of_birth: new.date_of_birth,
            age: new.age,
            religion: new.religion,
            caste_category: new.caste_category,
            caste: new.caste,
            physically_handicapped: new.physically_handicapped,
            caste_certificate: new.caste_certificate,
            marksheet: new.marksheet,
            photo: new.photo,
            signature: new.signature,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(row.to_form_state(), state);
    }

    #[test]
    fn test_serializes_wire_names() {
        let state = complete_state();
        let now = Utc::now();
        let new = NewRecord::from_state(uuid::Uuid::now_v7(), &state, now).unwrap();
        let row = Record {
            id: new.id,
            title: new.title,
            first_name: new.first_name,
            middle_name: new.middle_name,
            last_name: new.last_name,
            full_name: new.full_name,
            mother_name: new.mother_name,
            gender: new.gender,
            address: new.address,
            taluka: new.taluka,
            district: new.district,
            pin_code: new.pin_code,
            state: new.state,
            mobile_number: new.mobile_number,
            email_id: new.email_id,
            aadhaar_number: new.aadhaar_number,
            date_of_birth: new.date_of_birth,
            age: new.age,
            religion: new.religion,
            caste_category: new.caste_category,
            caste: new.caste,
            physically_handicapped: new.physically_handicapped,
            caste_certificate: new.caste_certificate,
            marksheet: new.marksheet,
            photo: new.photo,
            signature: new.signature,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["emailId"], "asha.rao@example.com");
        assert_eq!(json["dob"], "2000-06-15");
        assert_eq!(json["casteCertificate"], "uploads/1-cert.pdf");
    }
}
