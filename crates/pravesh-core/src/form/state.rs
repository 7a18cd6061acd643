//! Immutable form state and the typed patch applied over it.

use chrono::NaiveDate;

use crate::constants::DEFAULT_STATE;
use crate::form::derive;

/// Scalar (non-attachment) form fields a submitter can set directly.
///
/// `fullName` and `age` are derived and deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    FirstName,
    MiddleName,
    LastName,
    MotherName,
    Gender,
    Address,
    Taluka,
    District,
    PinCode,
    State,
    MobileNumber,
    EmailId,
    AadhaarNumber,
    Dob,
    Religion,
    CasteCategory,
    Caste,
    PhysicallyHandicapped,
}

impl Field {
    /// ## Summary
    /// Maps a multipart/JSON wire name to a settable field.
    ///
    /// Derived and attachment field names return `None`; so does anything
    /// unknown.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Some(match name {
            "title" => Self::Title,
            "firstName" => Self::FirstName,
            "middleName" => Self::MiddleName,
            "lastName" => Self::LastName,
            "motherName" => Self::MotherName,
            "gender" => Self::Gender,
            "address" => Self::Address,
            "taluka" => Self::Taluka,
            "district" => Self::District,
            "pinCode" => Self::PinCode,
            "state" => Self::State,
            "mobileNumber" => Self::MobileNumber,
            "emailId" => Self::EmailId,
            "aadhaarNumber" => Self::AadhaarNumber,
            "dob" => Self::Dob,
            "religion" => Self::Religion,
            "casteCategory" => Self::CasteCategory,
            "caste" => Self::Caste,
            "physicallyHandicapped" => Self::PhysicallyHandicapped,
            _ => return None,
        })
    }
}

/// A candidate admission record as the form sees it: raw field values plus
/// the derived fields kept consistent by [`FormState::set`].
///
/// The state is immutable per edit; `set` consumes and returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Derived: trimmed concatenation of the three name parts.
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
    /// Raw `YYYY-MM-DD` wire value.
    pub dob: String,
    /// Derived from `dob`; `None` while `dob` is absent or unparseable.
    pub age: Option<i32>,
    pub religion: String,
    pub caste_category: String,
    pub caste: String,
    pub physically_handicapped: String,
    pub caste_certificate: Option<String>,
    pub marksheet: Option<String>,
    pub photo: Option<String>,
    pub signature: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// An empty form; only the state field carries a default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            mother_name: String::new(),
            gender: String::new(),
            address: String::new(),
            taluka: String::new(),
            district: String::new(),
            pin_code: String::new(),
            state: DEFAULT_STATE.to_string(),
            mobile_number: String::new(),
            email_id: String::new(),
            aadhaar_number: String::new(),
            dob: String::new(),
            age: None,
            religion: String::new(),
            caste_category: String::new(),
            caste: String::new(),
            physically_handicapped: String::new(),
            caste_certificate: None,
            marksheet: None,
            photo: None,
            signature: None,
        }
    }

    /// ## Summary
    /// Sets a single field and recomputes everything derived from it.
    ///
    /// - any name part: full name is re-derived
    /// - dob: age is re-derived against `today`
    /// - gender: title resets to the first option of the new title set
    /// - district: the chosen taluka resets to empty
    #[must_use]
    pub fn set(mut self, field: Field, value: String, today: NaiveDate) -> Self {
        match field {
            Field::Title => self.title = value,
            Field::FirstName => {
                self.first_name = value;
                self.refresh_full_name();
            }
            Field::MiddleName => {
                self.middle_name = value;
                self.refresh_full_name();
            }
            Field::LastName => {
                self.last_name = value;
                self.refresh_full_name();
            }
            Field::MotherName => self.mother_name = value,
            Field::Gender => {
                self.gender = value;
                self.title = derive::title_options(&self.gender)
                    .first()
                    .map_or_else(String::new, ToString::to_string);
            }
            Field::Address => self.address = value,
            Field::Taluka => self.taluka = value,
            Field::District => {
                self.district = value;
                self.taluka.clear();
            }
            Field::PinCode => self.pin_code = value,
            Field::State => self.state = value,
            Field::MobileNumber => self.mobile_number = value,
            Field::EmailId => self.email_id = value,
            Field::AadhaarNumber => self.aadhaar_number = value,
            Field::Dob => {
                self.dob = value;
                self.age = derive::age_from_field(&self.dob, today);
            }
            Field::Religion => self.religion = value,
            Field::CasteCategory => self.caste_category = value,
            Field::Caste => self.caste = value,
            Field::PhysicallyHandicapped => self.physically_handicapped = value,
        }
        self
    }

    /// ## Summary
    /// Merges a patch over this state: present keys overwrite field-by-field,
    /// absent attachment fields keep their previous stored path.
    ///
    /// Gender and district are applied before the other scalars so an
    /// explicitly patched title or taluka wins over the reset they trigger.
    #[must_use]
    pub fn apply(self, patch: &FormPatch, today: NaiveDate) -> Self {
        let mut next = self;

        if let Some(v) = &patch.gender {
            next = next.set(Field::Gender, v.clone(), today);
        }
        if let Some(v) = &patch.district {
            next = next.set(Field::District, v.clone(), today);
        }

        let scalars: [(Field, &Option<String>); 17] = [
            (Field::Title, &patch.title),
            (Field::FirstName, &patch.first_name),
            (Field::MiddleName, &patch.middle_name),
            (Field::LastName, &patch.last_name),
            (Field::MotherName, &patch.mother_name),
            (Field::Address, &patch.address),
            (Field::Taluka, &patch.taluka),
            (Field::PinCode, &patch.pin_code),
            (Field::State, &patch.state),
            (Field::MobileNumber, &patch.mobile_number),
            (Field::EmailId, &patch.email_id),
            (Field::AadhaarNumber, &patch.aadhaar_number),
            (Field::Dob, &patch.dob),
            (Field::Religion, &patch.religion),
            (Field::CasteCategory, &patch.caste_category),
            (Field::Caste, &patch.caste),
            (Field::PhysicallyHandicapped, &patch.physically_handicapped),
        ];
        for (field, value) in scalars {
            if let Some(v) = value {
                next = next.set(field, v.clone(), today);
            }
        }

        if let Some(p) = &patch.caste_certificate {
            next.caste_certificate = Some(p.clone());
        }
        if let Some(p) = &patch.marksheet {
            next.marksheet = Some(p.clone());
        }
        if let Some(p) = &patch.photo {
            next.photo = Some(p.clone());
        }
        if let Some(p) = &patch.signature {
            next.signature = Some(p.clone());
        }

        next
    }

    fn refresh_full_name(&mut self) {
        self.full_name = derive::full_name(&self.first_name, &self.middle_name, &self.last_name);
    }
}

/// Explicit typed patch: only present keys overwrite the base record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub mother_name: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub taluka: Option<String>,
    pub district: Option<String>,
    pub pin_code: Option<String>,
    pub state: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub aadhaar_number: Option<String>,
    pub dob: Option<String>,
    pub religion: Option<String>,
    pub caste_category: Option<String>,
    pub caste: Option<String>,
    pub physically_handicapped: Option<String>,
    pub caste_certificate: Option<String>,
    pub marksheet: Option<String>,
    pub photo: Option<String>,
    pub signature: Option<String>,
}

impl FormPatch {
    /// ## Summary
    /// Records a scalar field by wire name; returns false for names that are
    /// not settable (derived, attachment, or unknown fields).
    pub fn set_wire(&mut self, name: &str, value: String) -> bool {
        let Some(field) = Field::from_wire(name) else {
            return false;
        };
        let slot = match field {
            Field::Title => &mut self.title,
            Field::FirstName => &mut self.first_name,
            Field::MiddleName => &mut self.middle_name,
            Field::LastName => &mut self.last_name,
            Field::MotherName => &mut self.mother_name,
            Field::Gender => &mut self.gender,
            Field::Address => &mut self.address,
            Field::Taluka => &mut self.taluka,
            Field::District => &mut self.district,
            Field::PinCode => &mut self.pin_code,
            Field::State => &mut self.state,
            Field::MobileNumber => &mut self.mobile_number,
            Field::EmailId => &mut self.email_id,
            Field::AadhaarNumber => &mut self.aadhaar_number,
            Field::Dob => &mut self.dob,
            Field::Religion => &mut self.religion,
            Field::CasteCategory => &mut self.caste_category,
            Field::Caste => &mut self.caste,
            Field::PhysicallyHandicapped => &mut self.physically_handicapped,
        };
        *slot = Some(value);
        true
    }

    /// ## Summary
    /// Records an attachment's stored path by wire field name; returns false
    /// for anything that is not one of the four attachment fields.
    pub fn set_attachment(&mut self, name: &str, path: String) -> bool {
        let slot = match name {
            "casteCertificate" => &mut self.caste_certificate,
            "marksheet" => &mut self.marksheet,
            "photo" => &mut self.photo,
            "signature" => &mut self.signature,
            _ => return false,
        };
        *slot = Some(path);
        true
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_new_defaults_state_only() {
        let state = FormState::new();
        assert_eq!(state.state, "Maharashtra");
        assert_eq!(state.title, "");
        assert_eq!(state.age, None);
    }

    #[test]
    fn test_name_parts_derive_full_name() {
        let state = FormState::new()
            .set(Field::FirstName, "Asha".into(), today())
            .set(Field::LastName, "Rao".into(), today());
        assert_eq!(state.full_name, "Asha  Rao");

        let state = state.set(Field::MiddleName, "Vijay".into(), today());
        assert_eq!(state.full_name, "Asha Vijay Rao");
    }

    #[test]
    fn test_dob_derives_age() {
        let state = FormState::new().set(Field::Dob, "2000-06-15".into(), today());
        assert_eq!(state.age, Some(24));

        let state = state.set(Field::Dob, String::new(), today());
        assert_eq!(state.age, None);
    }

    #[test]
    fn test_gender_resets_title_to_first_option() {
        let state = FormState::new()
            .set(Field::Gender, "Female".into(), today())
            .set(Field::Title, "Mrs.".into(), today());
        assert_eq!(state.title, "Mrs.");

        let state = state.set(Field::Gender, "Male".into(), today());
        assert_eq!(state.title, "Mr.");

        let state = state.set(Field::Gender, "Other".into(), today());
        assert_eq!(state.title, "Mx.");
    }

    #[test]
    fn test_district_resets_taluka() {
        let state = FormState::new()
            .set(Field::District, "Pune".into(), today())
            .set(Field::Taluka, "Haveli".into(), today());
        assert_eq!(state.taluka, "Haveli");

        let state = state.set(Field::District, "Nashik".into(), today());
        assert_eq!(state.taluka, "");
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let state = FormState::new()
            .set(Field::FirstName, "Asha".into(), today())
            .set(Field::Dob, "2000-06-15".into(), today());
        let applied = state.clone().apply(&FormPatch::default(), today());
        assert_eq!(applied, state);
    }

    #[test]
    fn test_apply_patched_title_wins_over_gender_reset() {
        let mut patch = FormPatch::default();
        patch.set_wire("gender", "Female".into());
        patch.set_wire("title", "Mrs.".into());

        let state = FormState::new().apply(&patch, today());
        assert_eq!(state.gender, "Female");
        assert_eq!(state.title, "Mrs.");
    }

    #[test]
    fn test_apply_patched_district_and_taluka() {
        let mut patch = FormPatch::default();
        patch.set_wire("taluka", "Karad".into());
        patch.set_wire("district", "Satara".into());

        let state = FormState::new().apply(&patch, today());
        assert_eq!(state.district, "Satara");
        assert_eq!(state.taluka, "Karad");
    }

    #[test]
    fn test_apply_keeps_absent_attachment() {
        let mut base = FormState::new();
        base.photo = Some("uploads/1-old.png".into());

        let mut patch = FormPatch::default();
        patch.set_attachment("marksheet", "uploads/2-new.pdf".into());

        let state = base.apply(&patch, today());
        assert_eq!(state.photo.as_deref(), Some("uploads/1-old.png"));
        assert_eq!(state.marksheet.as_deref(), Some("uploads/2-new.pdf"));
    }

    #[test]
    fn test_set_wire_rejects_derived_and_unknown() {
        let mut patch = FormPatch::default();
        assert!(!patch.set_wire("fullName", "x".into()));
        assert!(!patch.set_wire("age", "9".into()));
        assert!(!patch.set_wire("id", "9".into()));
        assert!(patch.set_wire("pinCode", "411001".into()));
    }

    #[test]
    fn test_set_attachment_rejects_unknown() {
        let mut patch = FormPatch::default();
        assert!(!patch.set_attachment("resume", "uploads/x".into()));
        assert!(patch.set_attachment("photo", "uploads/x".into()));
        assert!(!patch.is_empty());
    }
}
