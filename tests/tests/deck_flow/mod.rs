use aulos::{
    Deck, DeckConfig, InputError,
    history::{HistoryStore, JsonFileHistoryStore, MAX_ENTRIES},
    play::{
        EngineEvent, PathKind, SessionState, SurfaceEvent,
        testing::{Call, FakeCapability},
    },
};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{Fakes, fakes, temp_dir};

fn deck(fakes: &Fakes, store: JsonFileHistoryStore) -> Deck<FakeCapability, JsonFileHistoryStore> {
    Deck::new(
        fakes.capability.clone(),
        fakes.surface.clone(),
        store,
        DeckConfig::default(),
    )
}

#[rstest]
fn history_survives_a_restart(temp_dir: TempDir, fakes: Fakes) {
    let path = temp_dir.path().join("history.json");
    {
        let mut deck = deck(&fakes, JsonFileHistoryStore::new(&path));
        deck.submit("https://s3-store.flyooo.uk/a/index.m3u8").unwrap();
        deck.submit("https://s3-store.flyooo.uk/b/index.m3u8").unwrap();
    }

    let reopened = deck(&fakes, JsonFileHistoryStore::new(&path));
    assert_eq!(
        reopened.history().entries(),
        [
            "http://localhost:3001/proxy/b/index.m3u8",
            "http://localhost:3001/proxy/a/index.m3u8",
        ]
    );
}

#[rstest]
fn corrupt_history_file_starts_empty(temp_dir: TempDir, fakes: Fakes) {
    let path = temp_dir.path().join("history.json");
    std::fs::write(&path, b"{ definitely not json").unwrap();

    let mut deck = deck(&fakes, JsonFileHistoryStore::new(&path));
    assert!(deck.history().is_empty());

    deck.submit("https://cdn.example/live.m3u8").unwrap();
    assert_eq!(JsonFileHistoryStore::new(&path).load().unwrap().len(), 1);
}

#[rstest]
fn history_is_capped_on_disk(temp_dir: TempDir, fakes: Fakes) {
    let store = JsonFileHistoryStore::new(temp_dir.path().join("history.json"));
    let mut deck = deck(&fakes, store.clone());
    for n in 0..(MAX_ENTRIES + 3) {
        deck.submit(&format!("https://cdn.example/{n}.m3u8")).unwrap();
    }
    let saved = store.load().unwrap();
    assert_eq!(saved.len(), MAX_ENTRIES);
    assert_eq!(saved[0], format!("http://localhost:3001/proxy/{}.m3u8", MAX_ENTRIES + 2));
}

#[rstest]
fn invalid_input_leaves_the_playing_session_alone(temp_dir: TempDir, fakes: Fakes) {
    let mut deck = deck(&fakes, JsonFileHistoryStore::new(temp_dir.path().join("h.json")));
    let id = deck.submit("https://cdn.example/live.m3u8").unwrap();
    deck.controller_mut().on_engine_event(id, EngineEvent::ManifestParsed);
    deck.controller_mut().on_surface_event(SurfaceEvent::Play);

    assert!(matches!(deck.submit("nope"), Err(InputError::Invalid { .. })));
    assert_eq!(deck.submit("   "), Err(InputError::Empty));

    assert_eq!(deck.controller().state(), SessionState::Playing);
    assert!(!fakes.log.contains(&Call::Destroy(1)));
}

#[rstest]
fn extensionless_manifest_goes_to_the_engine(temp_dir: TempDir, fakes: Fakes) {
    let surface = fakes.surface.clone().with_native_types(&["video/mp4"]);
    let mut deck = Deck::new(
        fakes.capability.clone(),
        surface,
        JsonFileHistoryStore::new(temp_dir.path().join("h.json")),
        DeckConfig::default(),
    );
    deck.submit("https://s3-store.flyooo.uk/live/playlist?format=hls")
        .unwrap();

    assert_eq!(
        deck.controller().session().map(|s| s.path()),
        Some(PathKind::EngineAttached)
    );
    assert!(fakes.log.contains(&Call::LoadSource(
        1,
        "http://localhost:3001/proxy/live/playlist?format=hls".into()
    )));
}
