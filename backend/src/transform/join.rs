//! Denormalized player + session view.

use crate::error::TableResult;
use crate::table::Table;

/// Left join players to sessions on `key`.
///
/// One output row per player row; session fields are null where the
/// session is missing.
pub fn full_join(players: &Table, sessions: &Table, key: &str) -> TableResult<Table> {
    let joined = players.left_join(sessions, key)?;
    log::debug!("Joined {} player rows with {} sessions", joined.len(), sessions.len());
    Ok(joined)
}
