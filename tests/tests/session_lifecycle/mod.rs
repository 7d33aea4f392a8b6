use aulos_play::{
    EngineEvent, EngineFault, ErrorCategory, FaultDetail, FaultKind, PathKind, PlaybackRequest,
    SessionConfig, SessionController, SessionEvent, SessionState, SurfaceEvent,
    testing::{Call, FakeCapability},
};
use rstest::rstest;
use tokio::sync::broadcast;

use crate::common::{Fakes, fakes, tracing_setup};

const STREAM: &str = "https://cdn.example/live/master.m3u8";

fn controller(fakes: &Fakes) -> SessionController<FakeCapability> {
    SessionController::new(
        fakes.capability.clone(),
        fakes.surface.clone(),
        SessionConfig::default(),
    )
}

fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[rstest]
fn engine_session_from_request_to_unmount(_tracing_setup: (), fakes: Fakes) {
    let mut controller = controller(&fakes);
    let id = controller.request(PlaybackRequest::detect(STREAM)).unwrap();

    controller.on_engine_event(id, EngineEvent::ManifestParsed);
    controller.on_surface_event(SurfaceEvent::Play);
    fakes.surface.set_duration(600.0);
    controller.on_surface_event(SurfaceEvent::DurationChange);

    controller.transport().seek(30.0);
    controller.on_surface_event(SurfaceEvent::TimeUpdate);
    controller.transport().play_pause();
    controller.on_surface_event(SurfaceEvent::Pause);

    let session = controller.session().unwrap();
    assert_eq!(session.state(), SessionState::Paused);
    assert!((session.current_time() - 30.0).abs() < 1e-9);
    assert!((session.duration() - 600.0).abs() < 1e-9);

    controller.unmount();
    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(
        fakes.log.calls(),
        vec![
            Call::EngineCreated(1),
            Call::AttachMedia(1),
            Call::LoadSource(1, STREAM.into()),
            Call::Play,
            Call::Seek(30.0),
            Call::Pause,
            Call::Destroy(1),
            Call::ClearSource,
        ]
    );
}

#[rstest]
fn rapid_url_changes_keep_one_engine_alive(fakes: Fakes) {
    let mut controller = controller(&fakes);
    for n in 0..5 {
        controller.request(PlaybackRequest::detect(&format!(
            "https://cdn.example/{n}/index.m3u8"
        )));
    }
    assert_eq!(fakes.capability.created(), 5);
    assert_eq!(fakes.capability.max_live(), 1);
    assert_eq!(fakes.log.count(|c| matches!(c, Call::Destroy(_))), 4);
}

#[rstest]
fn impossible_media_recovery_is_fatal_at_once(fakes: Fakes) {
    let capability = fakes.capability.clone().failing_recovery();
    let mut controller =
        SessionController::new(capability, fakes.surface.clone(), SessionConfig::default());
    let id = controller.request(PlaybackRequest::detect(STREAM)).unwrap();

    controller.on_engine_event(
        id,
        EngineFault::fatal(FaultKind::Media, FaultDetail::BufferStalledError).into(),
    );

    let error = controller.session().unwrap().error().cloned().unwrap();
    assert_eq!(error.category, ErrorCategory::Media);
    assert!(error.fatal);
    assert!(!error.remediation().is_empty());
    assert_eq!(fakes.log.count(|c| *c == Call::RecoverMediaError(1)), 1);
    assert_eq!(fakes.capability.live(), 0);
}

#[rstest]
fn fatal_fault_is_published_once_and_late_events_are_ignored(fakes: Fakes) {
    let mut controller = controller(&fakes);
    let id = controller.request(PlaybackRequest::detect(STREAM)).unwrap();
    let mut rx = controller.subscribe();

    let fault = EngineFault::fatal(FaultKind::Network, FaultDetail::ManifestLoadTimeout);
    controller.on_engine_event(id, fault.clone().into());
    controller.on_engine_event(id, fault.into());
    controller.on_engine_event(id, EngineEvent::ManifestParsed);
    controller.on_surface_event(SurfaceEvent::Play);

    let events = drain(&mut rx);
    let errors = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::Error { .. }))
        .count();
    assert_eq!(errors, 1);
    assert!(events.contains(&SessionEvent::StateChanged {
        session: id,
        state: SessionState::ErrorFatal,
    }));
    assert_eq!(controller.state(), SessionState::ErrorFatal);
    assert!(!fakes.log.contains(&Call::Play));
}

#[rstest]
fn progressive_file_plays_natively(fakes: Fakes) {
    let surface = fakes.surface.clone().with_native_types(&["video/mp4"]);
    let mut controller =
        SessionController::new(fakes.capability.clone(), surface, SessionConfig::default());
    controller.request(PlaybackRequest::detect("https://cdn.example/movie.mp4"));

    assert_eq!(
        controller.session().map(|s| s.path()),
        Some(PathKind::NativeAttached)
    );
    assert_eq!(fakes.capability.created(), 0);

    controller.on_surface_event(SurfaceEvent::LoadedMetadata);
    controller.on_surface_event(SurfaceEvent::Play);
    assert_eq!(controller.state(), SessionState::Playing);
}

#[rstest]
fn refused_fullscreen_surfaces_a_notice(fakes: Fakes) {
    let surface = fakes.surface.clone().rejecting_fullscreen();
    let mut controller =
        SessionController::new(fakes.capability.clone(), surface, SessionConfig::default());
    controller.request(PlaybackRequest::detect(STREAM));
    let mut rx = controller.subscribe();

    let notice = controller.transport().toggle_fullscreen().unwrap();
    assert!(notice.message.contains("fullscreen"));
    assert_eq!(drain(&mut rx), vec![SessionEvent::Notice(notice)]);
    assert_eq!(controller.session().unwrap().error(), None);
}
