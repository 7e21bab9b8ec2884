//! Идентичность участника матча: ParticipantId, Player, PlayerInput

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Стабильный идентификатор участника (игрок или AI hunter)
///
/// Приходит из сетевого слоя как строка; числовые id тоже сводятся к строке,
/// чтобы оба варианта жили в одних и тех же map'ах.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Участник-игрок (local или remote)
///
/// AI hunters этот компонент НЕ получают — их entity принадлежат AI слою.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Player {
    pub id: ParticipantId,
    pub is_local: bool,
}

impl Player {
    pub fn new(id: ParticipantId, is_local: bool) -> Self {
        Self { id, is_local }
    }
}

/// Marker component для entity которым управляет локальный input
///
/// Input systems используют `With<PlayerInput>` filter.
/// В одном матче обычно ровно один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput;
