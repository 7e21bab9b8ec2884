//! Lifecycle внутри headless App: команды через events, cleanup через сцену и ledger

use bevy::prelude::*;
use burken_simulation::{create_headless_app, ParticipantId, PlayerIndex, PlayerRoster, Renderable};
use burken_visuals::{
    DebugOverlayConfig, HeadlessRenderer, LifecycleConfig, PlayerLifecycleManager, RosterCommand, SceneGraph,
    VisualLifecyclePlugin, LOCAL_PLAYER_EMISSIVE,
};

type Manager = PlayerLifecycleManager<HeadlessRenderer>;

fn lifecycle_app(config: LifecycleConfig) -> App {
    let mut app = create_headless_app(Some(Vec3::new(0.0, 0.5, 0.0)));
    app.add_plugins(VisualLifecyclePlugin::<HeadlessRenderer>::default())
        .insert_resource(Manager::with_gubbe(HeadlessRenderer::new(), config));
    app
}

fn send(app: &mut App, command: RosterCommand) {
    app.world_mut().send_event(command);
}

#[test]
fn test_join_through_events() {
    let mut app = lifecycle_app(LifecycleConfig::default());

    send(&mut app, RosterCommand::AddLocal("p1".into()));
    send(&mut app, RosterCommand::AddRemote("p2".into()));
    app.update();

    let world = app.world();
    let manager = world.resource::<Manager>();
    let p1 = ParticipantId::from("p1");

    assert_eq!(manager.player_count(), 2);
    assert_eq!(world.resource::<PlayerIndex>().len(), 2);
    assert_eq!(world.local_player(), Some(p1.clone()));

    let entity = world.player_entity(&p1).expect("p1 entity");
    let handle = world.get::<Renderable>(entity).map(|r| r.visual);
    assert_eq!(handle, manager.player_handle(&p1));

    let torso = manager
        .player_visual(&p1)
        .and_then(|visual| visual.part("torso"))
        .and_then(|torso| torso.material())
        .and_then(|material| material.emissive);
    assert_eq!(torso, Some(LOCAL_PLAYER_EMISSIVE));
}

#[test]
fn test_leave_releases_everything() {
    let mut app = lifecycle_app(LifecycleConfig::default());

    send(&mut app, RosterCommand::AddLocal("p1".into()));
    send(&mut app, RosterCommand::AddRemote("p2".into()));
    app.update();

    send(&mut app, RosterCommand::RemovePlayer("p2".into()));
    app.update();

    let world = app.world();
    let manager = world.resource::<Manager>();
    assert_eq!(manager.player_ids(), vec![ParticipantId::from("p1")]);
    assert_eq!(manager.renderer().len(), 1);
    assert_eq!(manager.renderer().resources.live_geometries(), 7);
    assert_eq!(world.player_entity(&"p2".into()), None);
}

#[test]
fn test_commands_apply_in_send_order() {
    let mut app = lifecycle_app(LifecycleConfig::default());

    // Join + leave в одном кадре → игрока нет
    send(&mut app, RosterCommand::AddRemote("p2".into()));
    send(&mut app, RosterCommand::RemovePlayer("p2".into()));
    send(&mut app, RosterCommand::AddRemote("p3".into()));
    app.update();

    let manager = app.world().resource::<Manager>();
    assert_eq!(manager.player_ids(), vec![ParticipantId::from("p3")]);
    // p2 успел занять palette slot
    assert_eq!(manager.color_cursor(), 3);
}

#[test]
fn test_clear_all_with_hunters_and_overlays() {
    let config = LifecycleConfig {
        debug_overlays: Some(DebugOverlayConfig::default()),
        ..LifecycleConfig::default()
    };
    let mut app = lifecycle_app(config);

    send(&mut app, RosterCommand::AddLocal("p1".into()));
    send(
        &mut app,
        RosterCommand::AddHunter {
            id: "h1".into(),
            position: Some(Vec3::new(5.0, 0.0, 5.0)),
        },
    );
    app.update();

    {
        let manager = app.world().resource::<Manager>();
        assert_eq!(manager.hunter_count(), 1);
        // игрок + hunter + cone + circle
        assert_eq!(manager.renderer().len(), 4);
    }

    send(&mut app, RosterCommand::ClearAll);
    app.update();

    let world = app.world();
    let manager = world.resource::<Manager>();
    assert_eq!(manager.renderer().len(), 0);
    assert_eq!(manager.renderer().resources.live_geometries(), 0);
    assert_eq!(manager.renderer().resources.live_materials(), 0);
    assert!(world.resource::<PlayerIndex>().is_empty());
}

#[test]
fn test_missing_manager_drops_commands() {
    let mut app = create_headless_app(None);
    app.add_plugins(VisualLifecyclePlugin::<HeadlessRenderer>::default());

    send(&mut app, RosterCommand::AddRemote("p2".into()));
    app.update();

    assert!(app.world().resource::<PlayerIndex>().is_empty());
}
