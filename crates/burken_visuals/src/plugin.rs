//! Bevy integration: roster commands → PlayerLifecycleManager
//!
//! Сетевой слой/лобби пишут `RosterCommand`, exclusive system применяет их
//! к менеджеру (resource) и к World (logical entities) в одном месте.
//!
//! Менеджер вставляет host: renderer конструируется снаружи ECS.

use bevy::prelude::*;
use burken_simulation::{logger, ParticipantId, PlayerRoster};
use std::marker::PhantomData;

use crate::manager::PlayerLifecycleManager;
use crate::placement::SpawnPoint;
use crate::render::{GpuResources, SceneGraph};

/// Join/leave событие от сетевого слоя
#[derive(Event, Debug, Clone, PartialEq)]
pub enum RosterCommand {
    AddLocal(ParticipantId),
    AddRemote(ParticipantId),
    AddHunter {
        id: ParticipantId,
        position: Option<Vec3>,
    },
    RemovePlayer(ParticipantId),
    RemoveHunter(ParticipantId),
    ClearAll,
}

impl<R: SceneGraph + GpuResources> PlayerLifecycleManager<R> {
    /// Применить одну команду (порядок команд = порядок вызовов)
    pub fn apply<S: PlayerRoster>(&mut self, sim: &mut S, command: RosterCommand) {
        match command {
            RosterCommand::AddLocal(id) => {
                self.add_local_player(sim, id);
            }
            RosterCommand::AddRemote(id) => {
                self.add_remote_player(sim, id);
            }
            RosterCommand::AddHunter { id, position } => {
                self.add_hunter(id, position.map(SpawnPoint::from));
            }
            RosterCommand::RemovePlayer(id) => {
                if !self.remove_player(sim, &id) {
                    logger::log_warning(&format!("RemovePlayer: unknown player {}", id));
                }
            }
            RosterCommand::RemoveHunter(id) => {
                if !self.remove_hunter(&id) {
                    logger::log_warning(&format!("RemoveHunter: unknown AI hunter {}", id));
                }
            }
            RosterCommand::ClearAll => self.clear_all(sim),
        }
    }
}

/// Регистрирует `RosterCommand` и систему, применяющую их в Update
pub struct VisualLifecyclePlugin<R> {
    _renderer: PhantomData<fn() -> R>,
}

impl<R> Default for VisualLifecyclePlugin<R> {
    fn default() -> Self {
        Self {
            _renderer: PhantomData,
        }
    }
}

impl<R> Plugin for VisualLifecyclePlugin<R>
where
    R: SceneGraph + GpuResources + Send + Sync + 'static,
{
    fn build(&self, app: &mut App) {
        app.add_event::<RosterCommand>();
        app.add_systems(Update, apply_roster_commands_main_thread::<R>);
    }
}

/// Exclusive system: drain команд + применение к менеджеру и World
///
/// Main thread: renderer (scene + GPU) не должен трогаться из worker'ов.
pub fn apply_roster_commands_main_thread<R>(world: &mut World)
where
    R: SceneGraph + GpuResources + Send + Sync + 'static,
{
    let commands: Vec<RosterCommand> = world.resource_mut::<Events<RosterCommand>>().drain().collect();
    if commands.is_empty() {
        return;
    }

    if !world.contains_resource::<PlayerLifecycleManager<R>>() {
        logger::log_error(&format!(
            "PlayerLifecycleManager resource missing, dropped {} roster commands",
            commands.len()
        ));
        return;
    }

    world.resource_scope(|world, mut manager: Mut<PlayerLifecycleManager<R>>| {
        for command in commands {
            manager.apply(world, command);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LifecycleConfig;
    use crate::render::HeadlessRenderer;

    type Manager = PlayerLifecycleManager<HeadlessRenderer>;

    #[test]
    fn test_apply_commands_in_order() {
        let mut world = World::new();
        let mut manager = Manager::with_primitives(HeadlessRenderer::new(), LifecycleConfig::default());

        manager.apply(&mut world, RosterCommand::AddLocal("p1".into()));
        manager.apply(&mut world, RosterCommand::AddRemote("p2".into()));
        manager.apply(
            &mut world,
            RosterCommand::AddHunter {
                id: "h1".into(),
                position: Some(Vec3::new(5.0, 0.0, 5.0)),
            },
        );
        manager.apply(&mut world, RosterCommand::RemovePlayer("p1".into()));

        assert_eq!(manager.player_ids(), vec![ParticipantId::from("p2")]);
        assert_eq!(manager.hunter_count(), 1);
        assert_eq!(world.local_player(), None);

        manager.apply(&mut world, RosterCommand::ClearAll);
        assert_eq!(manager.player_count(), 0);
        assert_eq!(manager.hunter_count(), 0);
        assert_eq!(manager.renderer().len(), 0);
    }

    #[test]
    fn test_unknown_removals_are_ignored() {
        let mut world = World::new();
        let mut manager = Manager::with_primitives(HeadlessRenderer::new(), LifecycleConfig::default());

        manager.apply(&mut world, RosterCommand::RemovePlayer("ghost".into()));
        manager.apply(&mut world, RosterCommand::RemoveHunter("ghost".into()));

        assert_eq!(manager.player_count(), 0);
        assert_eq!(manager.renderer().len(), 0);
    }
}
