//! Bollen i Burken — visual lifecycle layer
//!
//! Визуалы персонажей поверх ECS симуляции:
//! - factory: rich "gubbe" builder или primitive box fallback
//! - placement / tint / disposal: операции над одним визуалом
//! - manager: join/leave игроков и hunters (palette, map'ы, cleanup)
//! - plugin: `RosterCommand` → manager внутри Bevy App
//!
//! Сцена владеет визуалами; ECS и менеджер держат только `VisualHandle`.

pub mod color;
pub mod config;
pub mod disposal;
pub mod factory;
pub mod manager;
pub mod overlays;
pub mod placement;
pub mod plugin;
pub mod render;
pub mod tint;
pub mod visual;

pub use color::Rgb;
pub use config::LifecycleConfig;
pub use disposal::{dispose_visual, DisposalReport};
pub use factory::{
    CharacterVisualConfig, CharacterVisualFactory, GubbeBuilder, PrimitiveFallback, RichBuildRequest,
    RichMeshBuilder, VisualStrategy,
};
pub use manager::{HunterVisuals, PlayerLifecycleManager};
pub use overlays::DebugOverlayConfig;
pub use placement::{place_visual, SpawnPoint};
pub use plugin::{RosterCommand, VisualLifecyclePlugin};
pub use render::{GpuResources, HeadlessRenderer, ResourceLedger, SceneGraph, SceneRoot};
pub use tint::{apply_local_tint, LOCAL_PLAYER_EMISSIVE};
pub use visual::{CharacterType, VisualMetadata, VisualObject};
