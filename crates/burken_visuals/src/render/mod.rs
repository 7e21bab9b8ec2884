//! Rendering collaborator boundary
//!
//! - resources: GPU ресурсы (geometry buffers, materials) + ResourceLedger
//! - scene: SceneGraph (add/remove по handle) + SceneRoot
//!
//! Реальный renderer реализует оба trait'а; HeadlessRenderer — in-memory
//! вариант для headless матчей и тестов (считает живые GPU ресурсы).

mod resources;
mod scene;

pub use resources::*;
pub use scene::*;
