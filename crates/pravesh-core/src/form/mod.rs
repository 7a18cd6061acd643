//! Admission form domain: immutable form state, declarative field
//! validation, and derivation of computed fields.
//!
//! The submission pipeline is `FormState::new()` → [`FormState::apply`] a
//! [`state::FormPatch`] → [`validate::validate_record`]. Derived fields
//! (full name, age, title/taluka narrowing) are recomputed inside
//! [`FormState::set`] whenever one of their inputs changes, so a state is
//! always internally consistent.
//!
//! [`FormState`]: state::FormState
//! [`FormState::apply`]: state::FormState::apply
//! [`FormState::set`]: state::FormState::set

pub mod derive;
pub mod districts;
pub mod state;
pub mod validate;
