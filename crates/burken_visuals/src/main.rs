//! Headless join/leave churn
//!
//! Гоняет Bevy App с VisualLifecyclePlugin: игроки входят и выходят, в конце
//! сцена и GPU ledger должны быть пустыми.

use bevy::prelude::*;
use burken_simulation::{create_headless_app, logger, ParticipantId};
use burken_visuals::{
    HeadlessRenderer, LifecycleConfig, PlayerLifecycleManager, RosterCommand, SceneGraph, VisualLifecyclePlugin,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type Manager = PlayerLifecycleManager<HeadlessRenderer>;

fn main() {
    let seed = 42;
    println!("Starting Bollen i Burken visual churn (seed: {})", seed);

    let mut app = create_headless_app(Some(Vec3::new(0.0, 0.5, 0.0)));
    logger::set_log_level(logger::LogLevel::Info);
    app.add_plugins(VisualLifecyclePlugin::<HeadlessRenderer>::default())
        .insert_resource(Manager::with_gubbe(HeadlessRenderer::new(), LifecycleConfig::default()));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    app.world_mut().send_event(RosterCommand::AddLocal("local".into()));
    app.world_mut().send_event(RosterCommand::AddHunter {
        id: "hunter".into(),
        position: None,
    });

    for tick in 0..1000 {
        let id = ParticipantId::from(format!("remote_{}", rng.gen_range(0..12)));
        let command = if rng.gen_bool(0.5) {
            RosterCommand::AddRemote(id)
        } else {
            RosterCommand::RemovePlayer(id)
        };
        app.world_mut().send_event(command);
        app.update();

        if tick % 100 == 0 {
            let manager = app.world().resource::<Manager>();
            println!(
                "Tick {}: {} players, {} scene objects, {} live geometries",
                tick,
                manager.player_count(),
                manager.renderer().len(),
                manager.renderer().resources.live_geometries()
            );
        }
    }

    app.world_mut().send_event(RosterCommand::ClearAll);
    app.update();

    let manager = app.world().resource::<Manager>();
    println!(
        "Churn complete: {} scene objects, {} live geometries, {} live materials",
        manager.renderer().len(),
        manager.renderer().resources.live_geometries(),
        manager.renderer().resources.live_materials()
    );
}
