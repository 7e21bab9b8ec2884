//! PlayerLifecycleManager — join/leave участников на визуальной стороне
//!
//! Владеет palette cursor'ом и двумя map'ами с одинаковыми ключами:
//! ParticipantId → VisualHandle и ParticipantId → Entity. Hunters живут в
//! отдельном store: их logical entity принадлежит AI слою.
//!
//! Add: factory → placement → (tint) → scene.add → Renderable на entity → map'ы.
//! Remove: lookup → scene.remove → disposal → очистка map'ов.

use bevy::prelude::*;
use burken_simulation::{logger, ParticipantId, PlayerRoster, VisualHandle};
use std::collections::{BTreeSet, HashMap};

use crate::color::Rgb;
use crate::config::LifecycleConfig;
use crate::disposal::{dispose_visual, DisposalReport};
use crate::factory::{CharacterVisualConfig, CharacterVisualFactory, GubbeBuilder};
use crate::overlays::{build_hearing_circle, build_vision_cone};
use crate::placement::{place_visual, SpawnPoint};
use crate::render::{GpuResources, SceneGraph};
use crate::tint::apply_local_tint;
use crate::visual::{CharacterType, VisualObject};

/// Визуальная сторона одного hunter'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunterVisuals {
    pub visual: VisualHandle,
    pub vision_cone: Option<VisualHandle>,
    pub hearing_circle: Option<VisualHandle>,
}

impl HunterVisuals {
    fn handles(&self) -> impl Iterator<Item = VisualHandle> {
        [Some(self.visual), self.vision_cone, self.hearing_circle]
            .into_iter()
            .flatten()
    }
}

pub struct PlayerLifecycleManager<R> {
    renderer: R,
    factory: CharacterVisualFactory,
    config: LifecycleConfig,
    /// Следующий индекс palette для remote игрока (стартует с 1)
    color_cursor: usize,
    player_visuals: HashMap<ParticipantId, VisualHandle>,
    player_entities: HashMap<ParticipantId, Entity>,
    hunters: HashMap<ParticipantId, HunterVisuals>,
}

/// Bevy resource (single-threaded доступ через exclusive system)
impl<R: Send + Sync + 'static> Resource for PlayerLifecycleManager<R> {}

impl<R: SceneGraph + GpuResources> PlayerLifecycleManager<R> {
    pub fn new(renderer: R, factory: CharacterVisualFactory, config: LifecycleConfig) -> Self {
        Self {
            renderer,
            factory,
            config,
            color_cursor: 1,
            player_visuals: HashMap::new(),
            player_entities: HashMap::new(),
            hunters: HashMap::new(),
        }
    }

    /// Gubbe-персонажи (rich builder), seed имён из config
    pub fn with_gubbe(renderer: R, config: LifecycleConfig) -> Self {
        let factory = CharacterVisualFactory::detect(Some(Box::new(GubbeBuilder::default())), config.name_seed);
        Self::new(renderer, factory, config)
    }

    /// Box-персонажи (без rich builder'а)
    pub fn with_primitives(renderer: R, config: LifecycleConfig) -> Self {
        let factory = CharacterVisualFactory::detect(None, config.name_seed);
        Self::new(renderer, factory, config)
    }

    // === Players ===

    pub fn add_local_player<S: PlayerRoster>(&mut self, sim: &mut S, id: impl Into<ParticipantId>) -> Entity {
        let color = self.local_color();
        self.register_player(sim, id.into(), true, color)
    }

    pub fn add_remote_player<S: PlayerRoster>(&mut self, sim: &mut S, id: impl Into<ParticipantId>) -> Entity {
        let color = self.next_remote_color();
        self.register_player(sim, id.into(), false, color)
    }

    fn register_player<S: PlayerRoster>(
        &mut self,
        sim: &mut S,
        id: ParticipantId,
        is_local: bool,
        color: Rgb,
    ) -> Entity {
        if self.player_visuals.contains_key(&id) || self.player_entities.contains_key(&id) {
            logger::log_warning(&format!("Player {} already registered, replacing", id));
            self.remove_player(sim, &id);
        }

        let entity = sim.add_player(id.clone(), is_local);
        let spawn = sim
            .position(entity)
            .map(SpawnPoint::from)
            .unwrap_or(self.config.player_spawn);

        let visual_config = CharacterVisualConfig::new(color)
            .participant(id.clone())
            .opacity(self.config.player_opacity)
            .character_type(CharacterType::Player)
            .name_prefix("player");
        let mut visual = self.factory.build(&visual_config, &mut self.renderer);
        visual.metadata.is_local_player = is_local;

        place_visual(Some(&mut visual), Some(spawn));
        if is_local {
            apply_local_tint(Some(&mut visual), self.config.local_tint);
        }

        let handle = self.renderer.add(visual);
        sim.attach_renderable(entity, handle);

        self.player_visuals.insert(id.clone(), handle);
        self.player_entities.insert(id.clone(), entity);

        let kind = if is_local { "local" } else { "remote" };
        logger::log_info(&format!("Added {} player: {}", kind, id));
        entity
    }

    /// Удалить игрока. `false` если id не был зарегистрирован.
    pub fn remove_player<S: PlayerRoster>(&mut self, sim: &mut S, id: &ParticipantId) -> bool {
        let entity = sim
            .player_entity(id)
            .or_else(|| self.player_entities.get(id).copied());

        // Renderable на entity — основной путь, map менеджера — запасной
        let mut handles = BTreeSet::new();
        if let Some(handle) = entity.and_then(|entity| sim.renderable(entity)) {
            handles.insert(handle);
        }
        if let Some(handle) = self.player_visuals.get(id) {
            handles.insert(*handle);
        }

        let known = entity.is_some() || !handles.is_empty();
        if !known {
            return false;
        }

        for handle in handles {
            self.detach_and_dispose(handle);
        }
        sim.remove_player(id);
        self.player_visuals.remove(id);
        self.player_entities.remove(id);

        logger::log(&format!("Removed player: {}", id));
        true
    }

    // === Hunters ===

    /// Визуал hunter'а; AI entity создаёт и держит AI слой
    pub fn add_hunter(&mut self, id: impl Into<ParticipantId>, position: Option<SpawnPoint>) -> VisualHandle {
        let id = id.into();
        if self.hunters.contains_key(&id) {
            logger::log_warning(&format!("AI hunter {} already registered, replacing", id));
            self.remove_hunter(&id);
        }

        let spawn = position.unwrap_or(self.config.hunter_spawn);

        let visual_config = CharacterVisualConfig::new(self.config.hunter_color)
            .participant(id.clone())
            .opacity(self.config.hunter_opacity)
            .character_type(CharacterType::Hunter)
            .name_prefix("hunter");
        let mut visual = self.factory.build(&visual_config, &mut self.renderer);
        visual.metadata.hunter_id = Some(id.clone());
        place_visual(Some(&mut visual), Some(spawn));

        let world_position = visual.position;
        let visual = self.renderer.add(visual);

        let (vision_cone, hearing_circle) = match self.config.debug_overlays {
            Some(overlays) => {
                let cone = build_vision_cone(&mut self.renderer, &id, &overlays, world_position);
                let circle = build_hearing_circle(&mut self.renderer, &id, &overlays, world_position);
                (Some(self.renderer.add(cone)), Some(self.renderer.add(circle)))
            }
            None => (None, None),
        };

        self.hunters.insert(
            id.clone(),
            HunterVisuals {
                visual,
                vision_cone,
                hearing_circle,
            },
        );

        logger::log(&format!(
            "Added AI hunter: {} at position ({}, {})",
            id, world_position.x, world_position.z
        ));
        visual
    }

    /// Удалить визуалы hunter'а. `false` если id неизвестен.
    pub fn remove_hunter(&mut self, id: &ParticipantId) -> bool {
        let Some(hunter) = self.hunters.remove(id) else {
            return false;
        };

        for handle in hunter.handles() {
            self.detach_and_dispose(handle);
        }

        logger::log(&format!("Removed AI hunter: {}", id));
        true
    }

    /// Снять всех игроков и hunters (palette cursor НЕ сбрасывается)
    pub fn clear_all<S: PlayerRoster>(&mut self, sim: &mut S) {
        let player_ids: BTreeSet<ParticipantId> = self
            .player_visuals
            .keys()
            .chain(self.player_entities.keys())
            .cloned()
            .collect();
        for id in &player_ids {
            self.remove_player(sim, id);
        }

        let hunter_ids: Vec<ParticipantId> = self.hunters.keys().cloned().collect();
        for id in &hunter_ids {
            self.remove_hunter(id);
        }
    }

    fn detach_and_dispose(&mut self, handle: VisualHandle) -> Option<DisposalReport> {
        let Some(mut visual) = self.renderer.remove(handle) else {
            logger::log_warning(&format!("Visual {:?} already detached from scene", handle));
            return None;
        };
        Some(dispose_visual(Some(&mut visual), &mut self.renderer))
    }

    // === Palette ===

    fn local_color(&self) -> Rgb {
        self.config.palette.first().copied().unwrap_or(Rgb::WHITE)
    }

    /// Цвет следующего remote игрока без сдвига cursor'а
    pub fn peek_remote_color(&self) -> Rgb {
        let palette = &self.config.palette;
        if palette.is_empty() {
            return Rgb::WHITE;
        }
        palette[self.color_cursor % palette.len()]
    }

    fn next_remote_color(&mut self) -> Rgb {
        let color = self.peek_remote_color();
        self.color_cursor += 1;
        color
    }

    pub fn color_cursor(&self) -> usize {
        self.color_cursor
    }

    // === Queries ===

    pub fn player_handle(&self, id: &ParticipantId) -> Option<VisualHandle> {
        self.player_visuals.get(id).copied()
    }

    pub fn player_visual(&self, id: &ParticipantId) -> Option<&VisualObject> {
        self.renderer.get(self.player_handle(id)?)
    }

    pub fn player_entity(&self, id: &ParticipantId) -> Option<Entity> {
        self.player_entities.get(id).copied()
    }

    pub fn hunter(&self, id: &ParticipantId) -> Option<&HunterVisuals> {
        self.hunters.get(id)
    }

    pub fn hunter_visual(&self, id: &ParticipantId) -> Option<&VisualObject> {
        self.renderer.get(self.hunters.get(id)?.visual)
    }

    /// Отсортированные id из map'ы визуалов
    pub fn player_ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self.player_visuals.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Отсортированные id из map'ы entity
    pub fn entity_ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self.player_entities.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn player_count(&self) -> usize {
        self.player_visuals.len()
    }

    pub fn hunter_count(&self) -> usize {
        self.hunters.len()
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
