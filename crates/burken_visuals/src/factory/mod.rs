//! CharacterVisualFactory — построение визуала персонажа
//!
//! Стратегия выбирается один раз при создании фабрики:
//! - RichBuilderStrategy: внешний builder композитных персонажей (части, поза)
//! - PrimitiveFallback: один box-меш
//!
//! Фабрика применяет общий postcondition к результату любой стратегии
//! (metadata, shadow флаги) и не трогает сцену.

mod gubbe;
mod primitive;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod factory_tests;

pub use gubbe::*;
pub use primitive::*;

use burken_simulation::ParticipantId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::Rgb;
use crate::render::GpuResources;
use crate::visual::{CharacterType, VisualObject};

/// Диапазон случайного суффикса для визуалов без participant id
const ANONYMOUS_SUFFIX_RANGE: u32 = 100_000;

/// Параметры одного визуала
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterVisualConfig {
    pub color: Rgb,
    pub participant_id: Option<ParticipantId>,
    pub opacity: f32,
    pub accent_color: Option<Rgb>,
    pub character_type: CharacterType,
    pub name_prefix: String,
}

impl Default for CharacterVisualConfig {
    fn default() -> Self {
        Self {
            color: Rgb(0x4a90e2),
            participant_id: None,
            opacity: 0.95,
            accent_color: None,
            character_type: CharacterType::Player,
            name_prefix: "character".to_string(),
        }
    }
}

impl CharacterVisualConfig {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn participant(mut self, id: ParticipantId) -> Self {
        self.participant_id = Some(id);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn accent(mut self, accent: Rgb) -> Self {
        self.accent_color = Some(accent);
        self
    }

    pub fn character_type(mut self, character_type: CharacterType) -> Self {
        self.character_type = character_type;
        self
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }
}

/// Способ построить визуал
///
/// `name` — display name, уже выведенный фабрикой из prefix + id/суффикса.
pub trait VisualStrategy: Send + Sync {
    fn build(&self, config: &CharacterVisualConfig, name: &str, gpu: &mut dyn GpuResources) -> VisualObject;

    fn label(&self) -> &'static str;
}

pub struct CharacterVisualFactory {
    strategy: Box<dyn VisualStrategy>,
    rng: ChaCha8Rng,
}

impl CharacterVisualFactory {
    pub fn new(strategy: Box<dyn VisualStrategy>, seed: u64) -> Self {
        Self {
            strategy,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rich builder если он есть, иначе primitive box
    pub fn detect(rich: Option<Box<dyn RichMeshBuilder>>, seed: u64) -> Self {
        let strategy: Box<dyn VisualStrategy> = match rich {
            Some(builder) => Box::new(RichBuilderStrategy::new(builder)),
            None => Box::new(PrimitiveFallback::default()),
        };
        Self::new(strategy, seed)
    }

    pub fn strategy_label(&self) -> &'static str {
        self.strategy.label()
    }

    pub fn build(&mut self, config: &CharacterVisualConfig, gpu: &mut dyn GpuResources) -> VisualObject {
        let name = self.display_name(config);
        let mut visual = self.strategy.build(config, &name, gpu);

        let metadata = &mut visual.metadata;
        if let Some(id) = &config.participant_id {
            metadata.participant_id = Some(id.clone());
        }
        metadata.character_type = config.character_type;
        metadata.base_color = config.color;
        metadata.accent_color = config.accent_color;

        visual.for_each_mesh_mut(&mut |mesh| {
            mesh.cast_shadow = true;
            mesh.receive_shadow = false;
        });

        visual
    }

    fn display_name(&mut self, config: &CharacterVisualConfig) -> String {
        match &config.participant_id {
            Some(id) => format!("{}_{}", config.name_prefix, id),
            None => {
                let suffix = self.rng.gen_range(0..ANONYMOUS_SUFFIX_RANGE);
                format!("{}_visual_{}", config.name_prefix, suffix)
            }
        }
    }
}
