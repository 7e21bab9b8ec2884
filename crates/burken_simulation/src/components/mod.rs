//! ECS Components для участников матча
//!
//! Организация по доменам:
//! - player: идентичность участника (ParticipantId, Player, PlayerInput)
//! - renderable: связь logical entity → визуал в сцене (Renderable, VisualHandle)

pub mod player;
pub mod renderable;

pub use player::*;
pub use renderable::*;
