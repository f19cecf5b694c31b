//! Integration tests for the playback overlay
//!
//! These tests drive the public API end to end:
//! - Player commands issued by the overlay, checked against a mock engine
//! - Full sessions against the simulated engine
//! - Layered configuration with environment overrides

use anyhow::Result;
use mockall::mock;
use mockall::predicate::eq;
use playback_overlay::overlay::PlayerOverlay;
use playback_overlay::utils::{ControlsConfig, OverlayConfig, OverlayError};
use playback_overlay::{
    PlaybackError, PlaybackTime, PlayerBackend, PlayerEvent, PlayerState, UserEvent,
    VideoFitMode,
};
use playback_overlay_integration_tests::{
    short_clip, simulated_overlay, Callback, ConfigFixture, Recording,
};
use serial_test::serial;
use std::time::Duration;

mock! {
    pub Engine {}

    impl PlayerBackend for Engine {
        fn prepare(&mut self, url: &str) -> playback_overlay::Result<()>;
        fn play(&mut self) -> playback_overlay::Result<()>;
        fn pause(&mut self) -> playback_overlay::Result<()>;
        fn seek(&mut self, position: f32) -> playback_overlay::Result<()>;
        fn reset(&mut self) -> playback_overlay::Result<()>;
        fn set_fit_mode(&mut self, mode: VideoFitMode) -> playback_overlay::Result<()>;
        fn current_state(&self) -> PlayerState;
        fn current_duration(&self) -> Option<f64>;
    }
}

/// Mock engine that accepts loading and fit mode changes
fn engine() -> MockEngine {
    let mut engine = MockEngine::new();
    engine.expect_prepare().returning(|_| Ok(()));
    engine.expect_set_fit_mode().returning(|_| Ok(()));
    engine.expect_current_duration().returning(|| None);
    engine.expect_current_state().returning(|| PlayerState::Idle);
    engine
}

fn mocked_overlay(engine: MockEngine) -> Result<(PlayerOverlay, Recording)> {
    let recording = Recording::default();
    let overlay = PlayerOverlay::builder()
        .with_view(recording.view())
        .with_delegate(recording.delegate())
        .build(move |_events| Ok(engine))?;
    Ok((overlay, recording))
}

#[tokio::test(start_paused = true)]
async fn test_scrub_issues_single_seek() -> Result<()> {
    let mut engine = engine();
    engine
        .expect_seek()
        .with(eq(0.5f32))
        .times(1)
        .returning(|_| Ok(()));
    engine.expect_reset().times(1).returning(|| Ok(()));

    let (mut overlay, _recording) = mocked_overlay(engine)?;
    overlay.load_video("https://example.com/clip.m3u8");

    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::Playing));
    overlay.dispatch(PlayerEvent::TimeUpdated(PlaybackTime::new(10.0, 100.0)));
    overlay.dispatch(UserEvent::ScrubBegin);
    overlay.dispatch(UserEvent::ScrubUpdate(0.3));
    overlay.dispatch(PlayerEvent::TimeUpdated(PlaybackTime::new(11.0, 100.0)));
    overlay.dispatch(UserEvent::ScrubUpdate(0.5));

    assert_eq!(overlay.display().elapsed_label, "00:00:50");
    assert_eq!(overlay.display().remaining_label, "00:00:50");

    overlay.dispatch(UserEvent::ScrubEnd);
    overlay.dispatch(UserEvent::ScrubEnd);

    overlay.destroy();
    overlay.destroy();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_play_pause_commands() -> Result<()> {
    let mut engine = engine();
    engine.expect_pause().times(1).returning(|| Ok(()));
    engine.expect_play().times(2).returning(|| Ok(()));
    engine.expect_reset().returning(|| Ok(()));

    let (mut overlay, _recording) = mocked_overlay(engine)?;
    overlay.load_video("https://example.com/clip.mp4");

    // Ignored while preparing
    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::Preparing));
    overlay.dispatch(UserEvent::PlayPausePressed);

    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::Playing));
    overlay.dispatch(UserEvent::PlayPausePressed);
    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::Paused));
    overlay.dispatch(UserEvent::PlayPausePressed);
    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::End));
    overlay.dispatch(UserEvent::PlayPausePressed);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_double_tap_commands_fit_mode() -> Result<()> {
    let mut engine = MockEngine::new();
    engine.expect_prepare().returning(|_| Ok(()));
    engine
        .expect_set_fit_mode()
        .with(eq(VideoFitMode::AspectFit))
        .times(2)
        .returning(|_| Ok(()));
    engine
        .expect_set_fit_mode()
        .with(eq(VideoFitMode::AspectFill))
        .times(1)
        .returning(|_| Ok(()));
    engine.expect_reset().returning(|| Ok(()));

    let (mut overlay, _recording) = mocked_overlay(engine)?;
    overlay.load_video("https://example.com/clip.mp4");
    overlay.dispatch(PlayerEvent::StateChanged(PlayerState::Playing));
    overlay.dispatch(UserEvent::DoubleTap);
    overlay.dispatch(UserEvent::DoubleTap);

    assert_eq!(overlay.display().fit_mode, VideoFitMode::AspectFit);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_prepare_error_reported_once() -> Result<()> {
    let mut engine = MockEngine::new();
    engine
        .expect_prepare()
        .times(1)
        .returning(|_| Err(OverlayError::load_error("403 Forbidden")));
    engine.expect_set_fit_mode().returning(|_| Ok(()));
    engine.expect_play().never();
    engine.expect_reset().returning(|| Ok(()));

    let (mut overlay, recording) = mocked_overlay(engine)?;
    overlay.load_video("https://example.com/private.mp4");

    assert_eq!(
        recording.count(&Callback::Failed(PlaybackError::Load(
            "403 Forbidden".to_string()
        ))),
        1
    );
    assert!(!overlay.visibility().auto_hide_armed);

    // Controls must not hide themselves after a failure
    overlay.run_until(tokio::time::sleep(Duration::from_secs(10))).await;
    assert!(overlay.visibility().visible);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_simulated_session_plays_to_end() -> Result<()> {
    let controls = ControlsConfig {
        auto_hide_secs: 1.0,
        ..ControlsConfig::default()
    };
    let (mut overlay, recording) = simulated_overlay(controls, short_clip(3.0))?;

    overlay.load_video("sim://three-seconds");
    overlay
        .run_until(tokio::time::sleep(Duration::from_secs(10)))
        .await;

    assert_eq!(
        recording.states(),
        vec![PlayerState::Preparing, PlayerState::Playing, PlayerState::End]
    );
    assert_eq!(recording.count(&Callback::Finished), 1);
    assert_eq!(recording.count(&Callback::Visibility(false)), 1);
    assert_eq!(recording.count(&Callback::Visibility(true)), 1);

    let display = overlay.display();
    assert!(display.controls_visible);
    assert!(display.bottom_bar_visible);
    assert!(display.thumb_visible);
    assert_eq!(display.slider_value, 1.0);
    assert_eq!(display.elapsed_label, "00:00:03");
    assert_eq!(display.remaining_label, "00:00:00");
    assert!(!overlay.visibility().auto_hide_armed);

    overlay.destroy();
    assert!(!overlay.visibility().visible);
    assert_eq!(overlay.display().elapsed_label, "00:00:00");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_simulated_load_failure() -> Result<()> {
    let (mut overlay, recording) =
        simulated_overlay(ControlsConfig::default(), short_clip(3.0))?;

    overlay.load_video("fail:missing.mp4");
    overlay
        .run_until(tokio::time::sleep(Duration::from_secs(10)))
        .await;

    let failures: Vec<_> = recording
        .callbacks()
        .into_iter()
        .filter(|c| matches!(c, Callback::Failed(PlaybackError::Load(_))))
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(overlay.visibility().visible);
    assert_eq!(recording.count(&Callback::Finished), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reload_after_destroy() -> Result<()> {
    let (mut overlay, recording) =
        simulated_overlay(ControlsConfig::default(), short_clip(2.0))?;

    overlay.load_video("sim://first");
    overlay
        .run_until(tokio::time::sleep(Duration::from_millis(500)))
        .await;
    // Queued but never handled by the first session
    overlay.events().time_updated(1.5, 2.0);
    overlay
        .events()
        .failed(PlaybackError::Decode("stale frame".to_string()));
    overlay.destroy();

    overlay.load_video("sim://second");
    overlay
        .run_until(tokio::time::sleep(Duration::from_secs(5)))
        .await;

    assert_eq!(recording.count(&Callback::Finished), 1);
    assert_eq!(overlay.player_state(), PlayerState::End);
    assert_eq!(
        recording.states(),
        vec![
            PlayerState::Preparing,
            PlayerState::Playing,
            PlayerState::Preparing,
            PlayerState::Playing,
            PlayerState::End,
        ]
    );
    assert!(!recording
        .callbacks()
        .iter()
        .any(|c| matches!(c, Callback::Failed(_))));
    assert!(!overlay.reconciler().has_failed());
    Ok(())
}

#[test]
#[serial]
fn test_env_overrides_file() -> Result<()> {
    let fixture = ConfigFixture::new("[controls]\nauto_hide_secs = 6.0\nfade_duration_ms = 150\n")?;

    std::env::set_var("PLAYBACK_OVERLAY_AUTO_HIDE_SECS", "2.5");
    let config = OverlayConfig::load_from(fixture.path());
    std::env::remove_var("PLAYBACK_OVERLAY_AUTO_HIDE_SECS");

    let config = config?;
    assert_eq!(config.controls.auto_hide_secs, 2.5);
    assert_eq!(config.controls.fade_duration_ms, 150);
    assert_eq!(config.controls.auto_hide_delay(), Duration::from_millis(2500));
    Ok(())
}

#[test]
#[serial]
fn test_invalid_env_value_rejected() -> Result<()> {
    let fixture = ConfigFixture::new("")?;

    std::env::set_var("PLAYBACK_OVERLAY_FADE_MS", "slow");
    let result = OverlayConfig::load_from(fixture.path());
    std::env::remove_var("PLAYBACK_OVERLAY_FADE_MS");

    assert!(matches!(result, Err(OverlayError::Config(_))));
    Ok(())
}

#[test]
#[serial]
fn test_invalid_file_value_rejected() -> Result<()> {
    let fixture = ConfigFixture::new("[controls]\nauto_hide_secs = -1.0\n")?;
    assert!(OverlayConfig::load_from(fixture.path()).is_err());

    let fixture = ConfigFixture::new("[general]\nlog_level = \"chatty\"\n")?;
    assert!(OverlayConfig::load_from(fixture.path()).is_err());
    Ok(())
}
