//! Static district → taluka reference data.
//!
//! Narrows the dependent taluka selection and backs the validator's
//! membership check; records persist the chosen taluka as a plain string.

/// Districts with their talukas, in declaration order.
pub const DISTRICT_TALUKAS: &[(&str, &[&str])] = &[
    (
        "Pune",
        &["Haveli", "Mulshi", "Maval", "Baramati", "Junnar", "Shirur"],
    ),
    ("Mumbai Suburban", &["Andheri", "Borivali", "Kurla"]),
    ("Nagpur", &["Nagpur Rural", "Kamptee", "Hingna", "Katol"]),
    ("Nashik", &["Nashik", "Sinnar", "Igatpuri", "Dindori"]),
    ("Satara", &["Satara", "Karad", "Wai", "Phaltan"]),
    ("Kolhapur", &["Karvir", "Panhala", "Shirol", "Hatkanangale"]),
    (
        "Ahmednagar",
        &["Nagar", "Shrirampur", "Sangamner", "Kopargaon"],
    ),
];

/// ## Summary
/// Talukas for a district, or `None` for an unknown district.
#[must_use]
pub fn talukas_for(district: &str) -> Option<&'static [&'static str]> {
    DISTRICT_TALUKAS
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, talukas)| *talukas)
}
