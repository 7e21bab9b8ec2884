//! Player roster — ParticipantId ↔ Entity в ECS World
//!
//! Simulation-side collaborator для визуального слоя:
//! - add_player: spawn logical entity (Player + optional Transform)
//! - position / attach_renderable: то, что визуальный слой читает и пишет
//! - remove_player: despawn + очистка индекса

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{ParticipantId, Player, PlayerInput, Renderable, VisualHandle};
use crate::logger;

/// Индекс игроков: ParticipantId → Entity
///
/// Инвариант: каждый entity в индексе жив и имеет `Player` с тем же id.
#[derive(Resource, Debug, Default)]
pub struct PlayerIndex {
    players: HashMap<ParticipantId, Entity>,
    local_player: Option<ParticipantId>,
}

impl PlayerIndex {
    pub fn get(&self, id: &ParticipantId) -> Option<Entity> {
        self.players.get(id).copied()
    }

    pub fn local_player(&self) -> Option<&ParticipantId> {
        self.local_player.as_ref()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Точка спавна для новых player entity
///
/// Без этого resource entity создаётся БЕЗ Transform — позиция появится позже
/// (physics / network sync), а визуальный слой берёт свой default spawn.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpawn {
    pub position: Vec3,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

/// Операции над игроками поверх `World`
///
/// Реализовано для `World` напрямую — и headless тесты, и exclusive systems
/// работают с одним и тем же API.
pub trait PlayerRoster {
    /// Создать logical entity игрока; повторный id заменяет старый entity
    fn add_player(&mut self, id: ParticipantId, is_local: bool) -> Entity;

    fn player_entity(&self, id: &ParticipantId) -> Option<Entity>;

    fn local_player(&self) -> Option<ParticipantId>;

    /// Despawn entity игрока. `false` если id неизвестен.
    fn remove_player(&mut self, id: &ParticipantId) -> bool;

    /// Текущая позиция (None если у entity ещё нет Transform)
    fn position(&self, entity: Entity) -> Option<Vec3>;

    /// Прикрепить renderable к entity. `false` если entity уже нет.
    fn attach_renderable(&mut self, entity: Entity, visual: VisualHandle) -> bool;

    fn renderable(&self, entity: Entity) -> Option<VisualHandle>;
}

impl PlayerRoster for World {
    fn add_player(&mut self, id: ParticipantId, is_local: bool) -> Entity {
        if self.player_entity(&id).is_some() {
            logger::log_warning(&format!("roster: player {} re-added, replacing entity", id));
            self.remove_player(&id);
        }

        let spawn = self.get_resource::<PlayerSpawn>().map(|spawn| spawn.position);

        let mut entity_mut = self.spawn(Player::new(id.clone(), is_local));
        if let Some(position) = spawn {
            entity_mut.insert(Transform::from_translation(position));
        }
        if is_local {
            entity_mut.insert(PlayerInput);
        }
        let entity = entity_mut.id();

        let mut index = self.get_resource_or_insert_with(PlayerIndex::default);
        index.players.insert(id.clone(), entity);
        if is_local {
            index.local_player = Some(id.clone());
        }

        logger::log(&format!("roster: added player {} (local: {}) → {:?}", id, is_local, entity));
        entity
    }

    fn player_entity(&self, id: &ParticipantId) -> Option<Entity> {
        self.get_resource::<PlayerIndex>()?.get(id)
    }

    fn local_player(&self) -> Option<ParticipantId> {
        self.get_resource::<PlayerIndex>()?.local_player().cloned()
    }

    fn remove_player(&mut self, id: &ParticipantId) -> bool {
        let entity = {
            let Some(mut index) = self.get_resource_mut::<PlayerIndex>() else {
                return false;
            };
            let Some(entity) = index.players.remove(id) else {
                return false;
            };
            if index.local_player.as_ref() == Some(id) {
                index.local_player = None;
            }
            entity
        };

        self.despawn(entity);
        logger::log(&format!("roster: removed player {} ({:?})", id, entity));
        true
    }

    fn position(&self, entity: Entity) -> Option<Vec3> {
        self.get::<Transform>(entity).map(|transform| transform.translation)
    }

    fn attach_renderable(&mut self, entity: Entity, visual: VisualHandle) -> bool {
        let Ok(mut entity_mut) = self.get_entity_mut(entity) else {
            return false;
        };
        entity_mut.insert(Renderable::new(visual));
        true
    }

    fn renderable(&self, entity: Entity) -> Option<VisualHandle> {
        self.get::<Renderable>(entity).map(|renderable| renderable.visual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_player_without_spawn_has_no_transform() {
        let mut world = World::new();
        let entity = world.add_player("p1".into(), false);

        assert!(world.get::<Player>(entity).is_some());
        assert_eq!(world.position(entity), None);
        assert!(world.get::<PlayerInput>(entity).is_none());
    }

    #[test]
    fn test_add_player_uses_spawn_resource() {
        let mut world = World::new();
        world.insert_resource(PlayerSpawn {
            position: Vec3::new(1.0, 0.5, -2.0),
        });

        let entity = world.add_player("p1".into(), true);

        assert_eq!(world.position(entity), Some(Vec3::new(1.0, 0.5, -2.0)));
        assert!(world.get::<PlayerInput>(entity).is_some());
        assert_eq!(world.local_player(), Some(ParticipantId::from("p1")));
    }

    #[test]
    fn test_readd_replaces_entity() {
        let mut world = World::new();
        let first = world.add_player("p1".into(), false);
        let second = world.add_player("p1".into(), false);

        assert_ne!(first, second);
        assert!(world.get_entity(first).is_err());
        assert_eq!(world.player_entity(&"p1".into()), Some(second));
        assert_eq!(world.resource::<PlayerIndex>().len(), 1);
    }

    #[test]
    fn test_remove_player() {
        let mut world = World::new();
        let entity = world.add_player("p1".into(), true);

        assert!(world.remove_player(&"p1".into()));
        assert!(world.get_entity(entity).is_err());
        assert_eq!(world.player_entity(&"p1".into()), None);
        assert_eq!(world.local_player(), None);

        // Unknown id — no-op
        assert!(!world.remove_player(&"p1".into()));
        assert!(!World::new().remove_player(&"ghost".into()));
    }

    #[test]
    fn test_attach_renderable() {
        let mut world = World::new();
        let entity = world.add_player("p1".into(), false);

        assert_eq!(world.renderable(entity), None);
        assert!(world.attach_renderable(entity, VisualHandle(7)));
        assert_eq!(world.renderable(entity), Some(VisualHandle(7)));

        world.remove_player(&"p1".into());
        assert!(!world.attach_renderable(entity, VisualHandle(8)));
        assert_eq!(world.renderable(entity), None);
    }
}
