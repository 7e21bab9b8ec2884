//! Bollen i Burken — Simulation Core
//!
//! ECS-сторона матча на Bevy 0.16: logical entities игроков, roster индекс,
//! глобальный logger.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = logical layer (кто в матче, где стоит, кем управляется)
//! - burken_visuals = visual layer (меши, материалы, сцена)

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod logger;
pub mod roster;

// Re-export базовых типов для удобства
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter, LOGGER_LEVEL,
};
pub use roster::{PlayerIndex, PlayerRoster, PlayerSpawn};

/// Главный plugin симуляции
///
/// Регистрирует roster resources; PlayerSpawn вставляется только если задан
/// (иначе entity спавнятся без Transform).
#[derive(Default)]
pub struct SimulationPlugin {
    pub player_spawn: Option<Vec3>,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIndex>();

        if let Some(position) = self.player_spawn {
            app.insert_resource(PlayerSpawn { position });
        }
    }
}

/// Создаёт minimal Bevy App для headless матча (без рендера)
pub fn create_headless_app(player_spawn: Option<Vec3>) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin { player_spawn })
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
