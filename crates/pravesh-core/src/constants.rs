/// Constants shared across crates.

/// Default value for the record's state field.
pub const DEFAULT_STATE: &str = "Maharashtra";

/// Wire names of the four attachment fields, in schema order.
pub const ATTACHMENT_FIELDS: &[&str] = &["casteCertificate", "marksheet", "photo", "signature"];

/// Upper bound on a registration photo, in bytes (1 MiB).
pub const MAX_PHOTO_BYTES: u64 = 1_048_576;

/// MIME types accepted for a registration photo.
pub const ALLOWED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// File name the exported spreadsheet is served under.
pub const EXPORT_FILE_NAME: &str = "records.xlsx";
