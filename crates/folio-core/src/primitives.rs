//! # Primitives
//!
//! Hardcoded limits and constants for the Folio engine.
//!
//! These values are compiled into the binary and are immutable at runtime.

// =============================================================================
// SKILLS MATRIX
// =============================================================================

/// Lowest proficiency level in the skills matrix.
pub const MIN_SKILL_LEVEL: u8 = 1;

/// Highest proficiency level in the skills matrix.
pub const MAX_SKILL_LEVEL: u8 = 5;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of values accepted for a single facet dimension in a query.
///
/// Limits the cost of filter requests arriving over the API.
pub const MAX_FACET_SELECTIONS: usize = 64;

/// Maximum length of a single facet value in a query.
pub const MAX_FACET_VALUE_LENGTH: usize = 128;

/// Maximum length of the contact form name field.
pub const MAX_CONTACT_NAME_LENGTH: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_CONTACT_EMAIL_LENGTH: usize = 254;

/// Maximum length of the contact form subject field.
pub const MAX_CONTACT_SUBJECT_LENGTH: usize = 200;

/// Maximum length of the contact form message body.
pub const MAX_CONTACT_MESSAGE_LENGTH: usize = 5000;

/// Number of hex characters in a contact receipt reference.
pub const RECEIPT_LENGTH: usize = 12;
