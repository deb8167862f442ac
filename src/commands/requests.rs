//! Request bodies accepted by the squad, lineup and transfer commands.
//!
//! Fields are optional on the wire so that a missing field becomes a
//! [`FantasyError::MissingField`] instead of an opaque decode error.

use serde::{Deserialize, Serialize};

use crate::{
    cli::types::{PlayerKey, UserId},
    error::{FantasyError, Result},
};

fn missing(field: &str) -> FantasyError {
    FantasyError::MissingField {
        field: field.to_string(),
    }
}

fn require_user(user_id: Option<String>) -> Result<UserId> {
    user_id.ok_or_else(|| missing("userId"))?.parse()
}

/// `{ "name": ..., "club": ... }` as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayerSelection {
    pub name: Option<String>,
    pub club: Option<String>,
}

impl PlayerSelection {
    fn into_key(self, field: &str) -> Result<PlayerKey> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| missing(&format!("{field}.name")))?;
        let club = self
            .club
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| missing(&format!("{field}.club")))?;
        Ok(PlayerKey::new(name.trim(), club.trim()))
    }
}

/// Body of a squad creation
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadRequest {
    pub user_id: Option<String>,
    pub player_names: Option<Vec<PlayerSelection>>,
}

impl SquadRequest {
    pub fn validate(self) -> Result<(UserId, Vec<PlayerKey>)> {
        let user_id = require_user(self.user_id)?;
        let selections = self.player_names.ok_or_else(|| missing("playerNames"))?;
        let keys = selections
            .into_iter()
            .map(|s| s.into_key("playerNames"))
            .collect::<Result<Vec<_>>>()?;
        Ok((user_id, keys))
    }
}

/// Body of a starting-eleven selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRequest {
    pub user_id: Option<String>,
    pub player_names: Option<Vec<String>>,
}

impl LineupRequest {
    pub fn validate(self) -> Result<(UserId, Vec<String>)> {
        let user_id = require_user(self.user_id)?;
        let names = self.player_names.ok_or_else(|| missing("playerNames"))?;
        Ok((user_id, names.into_iter().map(|n| n.trim().to_string()).collect()))
    }
}

/// Body of a transfer
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_id: Option<String>,
    pub player_out: Option<PlayerSelection>,
    pub player_in: Option<PlayerSelection>,
}

/// A transfer with every field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransfer {
    pub user_id: UserId,
    pub player_out: PlayerKey,
    pub player_in: PlayerKey,
}

impl TransferRequest {
    pub fn validate(self) -> Result<ValidTransfer> {
        let user_id = require_user(self.user_id)?;
        let player_out = self
            .player_out
            .ok_or_else(|| missing("playerOut"))?
            .into_key("playerOut")?;
        let player_in = self
            .player_in
            .ok_or_else(|| missing("playerIn"))?
            .into_key("playerIn")?;
        Ok(ValidTransfer {
            user_id,
            player_out,
            player_in,
        })
    }
}
