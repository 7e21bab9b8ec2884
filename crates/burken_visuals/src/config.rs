//! LifecycleConfig — константы визуального слоя (palette, spawn, opacity)
//!
//! Загрузка с диска — задача host'а; здесь только serde-совместимая форма
//! и значения по умолчанию.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::overlays::DebugOverlayConfig;
use crate::placement::SpawnPoint;
use crate::tint::LOCAL_PLAYER_EMISSIVE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Fallback, если у player entity ещё нет Transform
    pub player_spawn: SpawnPoint,
    pub hunter_spawn: SpawnPoint,
    /// Index 0 зарезервирован за локальным игроком
    pub palette: Vec<Rgb>,
    pub hunter_color: Rgb,
    pub player_opacity: f32,
    pub hunter_opacity: f32,
    pub local_tint: Rgb,
    /// `Some` → hunters получают vision cone + hearing circle
    pub debug_overlays: Option<DebugOverlayConfig>,
    /// Seed для анонимных имён визуалов
    pub name_seed: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            player_spawn: SpawnPoint::new(0.0, 0.5, 0.0),
            hunter_spawn: SpawnPoint::new(-5.0, 0.5, 5.0),
            palette: vec![
                Rgb(0x4a90e2),
                Rgb(0x7ed321),
                Rgb(0xf5a623),
                Rgb(0xd0021b),
                Rgb(0x9013fe),
                Rgb(0x50e3c2),
                Rgb(0xb8e986),
                Rgb(0xbd10e0),
            ],
            hunter_color: Rgb(0xff4444),
            player_opacity: 0.95,
            hunter_opacity: 0.9,
            local_tint: LOCAL_PLAYER_EMISSIVE,
            debug_overlays: None,
            name_seed: 42,
        }
    }
}
