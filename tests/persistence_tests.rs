//! Snapshot persistence tests.
//!
//! Reloading an engine from its store must resume the game, never resume a
//! running clock, and never let a misbehaving store break play.

use std::io;

use fishbowl::{
    Card, EngineConfig, FileStore, GameEngine, GameState, MemoryStore, NullStore, Rules,
    SnapshotCodec, SnapshotStore, Stage, StoreError, TeamId,
};

fn config() -> EngineConfig {
    EngineConfig::default().with_seed(11)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fishbowl=debug")
        .with_test_writer()
        .try_init();
}

fn play_a_little<S: SnapshotStore>(engine: &mut GameEngine<S>) {
    engine.set_rules(Rules::new(3, 3, 30)).unwrap();
    for name in ["Cat", "Dog", "Fish"] {
        engine.add_card(Card::new(name)).unwrap();
    }
    engine.finalize_cards().unwrap();
    engine.start_playing().unwrap();
    engine.got_it().unwrap();
    engine.pass().unwrap();
}

/// Store whose reads and writes can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_loads: bool,
    fail_saves: bool,
}

impl SnapshotStore for FlakyStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_loads {
            return Err(io::Error::new(io::ErrorKind::Other, "disk unplugged").into());
        }
        self.inner.load()
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        self.inner.save(bytes)
    }
}

#[test]
fn test_fresh_store_starts_at_setup() {
    let engine = GameEngine::with_config(MemoryStore::new(), config());
    assert_eq!(engine.stage(), Stage::Setup);
    // Reset wrote the initial snapshot.
    assert_eq!(engine.store().save_count(), 1);
}

#[test]
fn test_reload_mid_play_resumes_at_ready() {
    init_tracing();
    let mut engine = GameEngine::with_config(MemoryStore::new(), config());
    play_a_little(&mut engine);
    assert_eq!(engine.stage(), Stage::Play);
    let saved = engine.state().clone();

    let reloaded = GameEngine::with_config(engine.into_store(), config());

    assert_eq!(reloaded.stage(), Stage::Ready);
    assert_eq!(reloaded.teams(), saved.teams());
    assert_eq!(reloaded.cards(), saved.cards.as_slice());
    assert_eq!(reloaded.round(), saved.round_info.as_ref());
}

#[test]
fn test_reload_keeps_other_stages() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config());
    engine.set_rules(Rules::new(2, 4, 30)).unwrap();
    engine.add_card(Card::new("Cat")).unwrap();

    let reloaded = GameEngine::with_config(engine.into_store(), config());

    assert_eq!(reloaded.stage(), Stage::AddCards);
    assert_eq!(reloaded.cards_needed(), 3);
}

#[test]
fn test_reload_restores_total_rounds_from_snapshot() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config().with_total_rounds(1));
    engine.set_rules(Rules::new(2, 1, 30)).unwrap();

    let reloaded = GameEngine::with_config(engine.into_store(), config());
    assert_eq!(reloaded.state().total_rounds, 1);
}

#[test]
fn test_unknown_field_snapshot_is_ignored() {
    init_tracing();
    let mut value = serde_json::to_value(GameState::default()).unwrap();
    value["stage"] = serde_json::json!("AddCards");
    value["injected"] = serde_json::json!(true);
    let store = MemoryStore::with_snapshot(serde_json::to_vec(&value).unwrap());

    let engine = GameEngine::with_config(store, config());

    assert_eq!(engine.state(), &GameState::default());
}

#[test]
fn test_inconsistent_snapshot_is_ignored() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config());
    play_a_little(&mut engine);
    let mut state = engine.state().clone();
    state.teams = None;
    let store = MemoryStore::with_snapshot(SnapshotCodec::Json.encode(&state).unwrap());

    let engine = GameEngine::with_config(store, config());

    assert_eq!(engine.stage(), Stage::Setup);
}

#[test]
fn test_unreadable_store_starts_fresh() {
    init_tracing();
    let store = FlakyStore {
        fail_loads: true,
        ..FlakyStore::default()
    };

    let engine = GameEngine::with_config(store, config());

    assert_eq!(engine.stage(), Stage::Setup);
}

#[test]
fn test_failing_saves_do_not_stop_play() {
    init_tracing();
    let store = FlakyStore {
        fail_saves: true,
        ..FlakyStore::default()
    };
    let mut engine = GameEngine::with_config(store, config());

    play_a_little(&mut engine);

    assert_eq!(engine.stage(), Stage::Play);
    assert_eq!(engine.round().unwrap().cards_left, 2);
    assert_eq!(engine.store().inner.save_count(), 0);
}

#[test]
fn test_null_store_never_resumes() {
    let mut engine = GameEngine::with_config(NullStore, config());
    play_a_little(&mut engine);

    let reloaded = GameEngine::with_config(engine.into_store(), config());
    assert_eq!(reloaded.stage(), Stage::Setup);
}

#[test]
fn test_ticks_save_on_interval() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config());
    engine.set_rules(Rules::new(2, 1, 12)).unwrap();
    engine.add_card(Card::new("Cat")).unwrap();
    engine.finalize_cards().unwrap();
    engine.start_playing().unwrap();
    let before = engine.store().save_count();

    // 12 -> 6: only 10 is a multiple of 5.
    for _ in 0..6 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.store().save_count(), before + 1);

    // 6 -> 0: 5 saves, and the expiring tick saves the team change.
    for _ in 0..6 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.store().save_count(), before + 3);
    assert_eq!(engine.round().unwrap().current_team, TeamId::new(1));
}

#[test]
fn test_custom_save_interval() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config().with_save_interval(1));
    engine.set_rules(Rules::new(2, 1, 10)).unwrap();
    engine.add_card(Card::new("Cat")).unwrap();
    engine.finalize_cards().unwrap();
    engine.start_playing().unwrap();
    let before = engine.store().save_count();

    for _ in 0..3 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.store().save_count(), before + 3);
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let binary = config().with_codec(SnapshotCodec::Binary);

    let mut engine = GameEngine::with_config(FileStore::in_dir(dir.path()), binary.clone());
    play_a_little(&mut engine);
    let saved = engine.state().clone();
    drop(engine);

    let reloaded = GameEngine::with_config(FileStore::in_dir(dir.path()), binary);
    assert_eq!(reloaded.stage(), Stage::Ready);
    assert_eq!(reloaded.round(), saved.round_info.as_ref());
}

#[test]
fn test_codec_mismatch_starts_fresh() {
    let mut engine = GameEngine::with_config(MemoryStore::new(), config());
    play_a_little(&mut engine);

    let reloaded = GameEngine::with_config(
        engine.into_store(),
        config().with_codec(SnapshotCodec::Binary),
    );
    assert_eq!(reloaded.stage(), Stage::Setup);
}
