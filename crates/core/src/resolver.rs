//! Sender/recipient resolution against the [`Directory`].

use crate::directory::{Directory, Party};
use crate::error::CoreError;
use crate::types::PartyId;

/// Look up the sender and then the recipient.
///
/// The sender is checked first, so when both ids are unknown the error
/// always names `from_id`. Self-notification (`from_id == to_id`) is allowed.
pub fn resolve(
    directory: &Directory,
    from_id: PartyId,
    to_id: PartyId,
) -> Result<(&Party, &Party), CoreError> {
    let from = lookup(directory, from_id)?;
    let to = lookup(directory, to_id)?;
    Ok((from, to))
}

fn lookup(directory: &Directory, id: PartyId) -> Result<&Party, CoreError> {
    directory
        .find(id)
        .ok_or(CoreError::NotFound { entity: "Party", id })
}
