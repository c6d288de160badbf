//! End-to-end session tests against the headless host: mode transitions,
//! input gating, building, and save/load through the menus.

use std::fs;
use std::path::PathBuf;

use canvas_engine::mode::Mode;
use canvas_engine::rules::Click;
use canvas_engine::world::position::{BlockPos, Face, PlayerPos};
use canvas_game::colors;
use canvas_game::config::AppConfig;
use canvas_game::host::HeadlessHost;
use canvas_game::input::{InputEvent, MenuAction};
use canvas_game::session::{
    Hover, MSG_LOAD_FAILED, MSG_NO_SAVE, MSG_SAVE_FAILED, MSG_SAVED, Session,
};

fn temp_save(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("voxel_canvas_session_{name}"));
    let _ = fs::remove_dir_all(&dir);
    dir.join("save.json")
}

fn setup(name: &str) -> (Session, HeadlessHost) {
    let config = AppConfig {
        world_size: 8,
        save_path: temp_save(name),
        ..AppConfig::default()
    };
    let session = Session::new(&config);
    let mut host = HeadlessHost::new();
    session.attach(&mut host);
    (session, host)
}

fn cleanup(session: &Session) {
    if let Some(dir) = session.save_path().parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

fn top(x: i64, y: i64, z: i64) -> Option<Hover> {
    Some(Hover {
        pos: BlockPos::new(x, y, z),
        face: Face::Up,
    })
}

/// Enter play with the player parked in a corner, away from the build site.
fn start_playing(session: &mut Session, host: &mut HeadlessHost) {
    session.handle_menu(MenuAction::NewCanvas, host);
    session.update(0.0, PlayerPos::new(0.0, 1.0, 0.0), host);
}

fn place(session: &mut Session, host: &mut HeadlessHost, x: i64, y: i64, z: i64) {
    session.handle_input(InputEvent::Click(Click::Secondary), top(x, y - 1, z), host);
}

// ---------------------------------------------------------------------------
// Start-up and modes
// ---------------------------------------------------------------------------

#[test]
fn starts_at_title_with_ground_visible() {
    let (session, host) = setup("startup");
    assert_eq!(session.mode(), Mode::Title);
    assert_eq!(host.menu, Mode::Title);
    assert_eq!(host.blocks.len(), 64);
    assert!(!host.player_enabled);
    assert!(!host.pointer_captured);
    assert_eq!(host.selection, colors::DEFAULT_SELECTION);
    assert_eq!(session.selection().current_color(), colors::GREEN);
}

#[test]
fn escape_does_nothing_at_title() {
    let (mut session, mut host) = setup("escape_title");
    session.handle_input(InputEvent::Escape, None, &mut host);
    assert_eq!(session.mode(), Mode::Title);

    session.handle_menu(MenuAction::SaveCanvas, &mut host);
    session.handle_menu(MenuAction::Return, &mut host);
    assert_eq!(session.mode(), Mode::Title);
    assert!(!session.save_path().exists());
}

#[test]
fn new_canvas_enters_play_and_escape_toggles_pause() {
    let (mut session, mut host) = setup("toggle");
    session.handle_menu(MenuAction::NewCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert!(host.player_enabled);
    assert!(host.pointer_captured);
    assert_eq!(host.player, PlayerPos::new(4.0, 5.0, 4.0));

    session.handle_input(InputEvent::Escape, None, &mut host);
    assert_eq!(session.mode(), Mode::Paused);
    assert_eq!(host.menu, Mode::Paused);
    assert!(!host.player_enabled);
    assert!(!host.pointer_captured);

    session.handle_input(InputEvent::Escape, None, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert!(host.player_enabled);

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::Return, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert!(host.pointer_captured);
}

#[test]
fn load_without_save_stays_at_title() {
    let (mut session, mut host) = setup("load_missing");
    session.handle_menu(MenuAction::LoadCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Title);
    assert_eq!(session.message(), Some(MSG_NO_SAVE));
    assert_eq!(host.message.as_deref(), Some(MSG_NO_SAVE));
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

#[test]
fn place_and_remove_through_clicks() {
    let (mut session, mut host) = setup("build");
    start_playing(&mut session, &mut host);

    place(&mut session, &mut host, 5, 1, 5);
    let block = session.world().get(BlockPos::new(5, 1, 5)).expect("placed");
    assert_eq!(block.color, colors::GREEN);
    assert_eq!(host.player_block_count(), 1);

    session.handle_input(InputEvent::Click(Click::Primary), top(5, 1, 5), &mut host);
    assert!(!session.world().contains(BlockPos::new(5, 1, 5)));
    assert_eq!(session.world().player_block_count(), 0);
    assert_eq!(host.player_block_count(), 0);
}

#[test]
fn ground_survives_primary_click() {
    let (mut session, mut host) = setup("ground");
    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Click(Click::Primary), top(3, 0, 3), &mut host);
    assert_eq!(session.world().ground_count(), 64);
    assert_eq!(host.blocks.len(), 64);
}

#[test]
fn cannot_build_inside_player() {
    let (mut session, mut host) = setup("enclose");
    start_playing(&mut session, &mut host);
    session.update(0.0, PlayerPos::new(2.0, 1.0, 2.0), &mut host);

    place(&mut session, &mut host, 2, 1, 2);
    place(&mut session, &mut host, 3, 1, 2);
    assert_eq!(session.world().player_block_count(), 0);

    place(&mut session, &mut host, 4, 1, 2);
    assert_eq!(session.world().player_block_count(), 1);
}

#[test]
fn clicks_without_hover_are_ignored() {
    let (mut session, mut host) = setup("no_hover");
    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Click(Click::Secondary), None, &mut host);
    assert_eq!(session.world().player_block_count(), 0);
}

#[test]
fn selection_keys_only_work_while_playing() {
    let (mut session, mut host) = setup("selection");
    session.handle_input(InputEvent::Digit(1), None, &mut host);
    session.handle_input(InputEvent::ScrollUp, None, &mut host);
    assert_eq!(session.selection().active_index(), colors::DEFAULT_SELECTION);

    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Digit(5), None, &mut host);
    assert_eq!(session.selection().current_color(), colors::RED);
    assert_eq!(host.selection, 4);

    // Number keys clamp, scrolling wraps.
    session.handle_input(InputEvent::Digit(9), None, &mut host);
    assert_eq!(session.selection().active_index(), 7);
    session.handle_input(InputEvent::ScrollUp, None, &mut host);
    assert_eq!(session.selection().active_index(), 0);
    session.handle_input(InputEvent::ScrollDown, None, &mut host);
    assert_eq!(session.selection().active_index(), 7);

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_input(InputEvent::Digit(2), None, &mut host);
    assert_eq!(session.selection().active_index(), 7);

    place(&mut session, &mut host, 6, 1, 6);
    assert_eq!(session.world().player_block_count(), 0);
}

#[test]
fn placed_color_follows_selection() {
    let (mut session, mut host) = setup("colors");
    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Digit(3), None, &mut host);
    place(&mut session, &mut host, 6, 1, 6);
    assert_eq!(
        session.world().get(BlockPos::new(6, 1, 6)).unwrap().color,
        colors::BLUE
    );
}

#[test]
fn player_is_kept_over_the_ground() {
    let (mut session, mut host) = setup("clamp");
    start_playing(&mut session, &mut host);

    let corrected = session.update(0.016, PlayerPos::new(-2.0, 3.0, 12.0), &mut host);
    assert_eq!(corrected, PlayerPos::new(0.0, 3.0, 7.0));
    assert_eq!(host.player, corrected);
    assert_eq!(session.player(), corrected);
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

#[test]
fn save_shows_message_then_hides_it() {
    let (mut session, mut host) = setup("save_message");
    start_playing(&mut session, &mut host);
    place(&mut session, &mut host, 5, 1, 5);

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::SaveCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Paused);
    assert_eq!(session.message(), Some(MSG_SAVED));
    assert!(session.save_path().exists());
    assert_eq!(session.unsaved_changes(), 0);

    session.update(1.0, session.player(), &mut host);
    assert_eq!(host.message.as_deref(), Some(MSG_SAVED));
    session.update(1.5, session.player(), &mut host);
    assert_eq!(session.message(), None);
    assert_eq!(host.message, None);

    cleanup(&session);
}

#[test]
fn save_new_load_restores_the_canvas() {
    let (mut session, mut host) = setup("roundtrip");
    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Digit(5), None, &mut host);
    place(&mut session, &mut host, 5, 1, 5);
    place(&mut session, &mut host, 5, 2, 5);
    session.handle_input(InputEvent::Digit(2), None, &mut host);
    place(&mut session, &mut host, 6, 1, 3);

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::SaveCanvas, &mut host);

    session.handle_menu(MenuAction::NewCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert_eq!(session.world().player_block_count(), 0);
    assert_eq!(host.player_block_count(), 0);

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::LoadCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert_eq!(session.world().player_block_count(), 3);
    assert_eq!(host.player_block_count(), 3);
    assert_eq!(
        session.world().get(BlockPos::new(5, 2, 5)).unwrap().color,
        colors::RED
    );
    assert_eq!(
        session.world().get(BlockPos::new(6, 1, 3)).unwrap().color,
        colors::WHITE
    );
    assert_eq!(session.unsaved_changes(), 0);

    cleanup(&session);
}

#[test]
fn load_from_title_uses_existing_save() {
    let path = temp_save("title_load");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"[{"position": [1, 2, 3], "color": [1, 0, 0, 1]}]"#,
    )
    .unwrap();

    let config = AppConfig {
        world_size: 8,
        save_path: path.clone(),
        ..AppConfig::default()
    };
    let mut session = Session::new(&config);
    let mut host = HeadlessHost::new();
    session.attach(&mut host);

    session.handle_menu(MenuAction::LoadCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Playing);
    assert_eq!(session.world().player_block_count(), 1);
    let block = session.world().get(BlockPos::new(1, 2, 3)).unwrap();
    assert!(!block.is_ground);
    assert_eq!(block.color, colors::RED);

    cleanup(&session);
}

#[test]
fn corrupt_save_keeps_current_canvas() {
    let (mut session, mut host) = setup("corrupt");
    start_playing(&mut session, &mut host);
    place(&mut session, &mut host, 5, 1, 5);

    let path = session.save_path().to_path_buf();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not a save").unwrap();

    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::LoadCanvas, &mut host);
    assert_eq!(session.mode(), Mode::Paused);
    assert_eq!(session.message(), Some(MSG_LOAD_FAILED));
    assert_eq!(session.world().player_block_count(), 1);

    cleanup(&session);
}

#[test]
fn failed_save_reports_error() {
    let dir = std::env::temp_dir().join("voxel_canvas_session_save_fail");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("blocker");
    fs::write(&blocker, b"x").unwrap();

    let config = AppConfig {
        world_size: 8,
        save_path: blocker.join("save.json"),
        ..AppConfig::default()
    };
    let mut session = Session::new(&config);
    let mut host = HeadlessHost::new();
    session.attach(&mut host);
    start_playing(&mut session, &mut host);
    session.handle_input(InputEvent::Escape, None, &mut host);
    session.handle_menu(MenuAction::SaveCanvas, &mut host);

    assert_eq!(session.mode(), Mode::Paused);
    assert_eq!(session.message(), Some(MSG_SAVE_FAILED));

    let _ = fs::remove_dir_all(&dir);
}
