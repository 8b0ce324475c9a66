/// Party identifiers are plain signed integers, matching the form fields.
pub type PartyId = i64;
