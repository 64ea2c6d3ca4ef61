//! Integration tests for the scene storyboard and renderers

use convergeviz::cli::Config;
use convergeviz::export::FrameExport;
use convergeviz::plot::Axes;
use convergeviz::render::{
    RecordingRenderer, RenderCommand, TerminalOptions, TerminalRenderer,
};
use convergeviz::scene::{ConvergenceScene, PlaybackTimings};
use convergeviz::series::{BaselSeries, SeriesKind};
use convergeviz::timeline::{ConvergenceTimeline, IdentityMapper, TimelinePhase};

#[test]
fn test_marker_follows_frames() {
    let axes = Axes::default();
    let timeline = ConvergenceTimeline::initialize(BaselSeries, 5).unwrap();
    let mut scene = ConvergenceScene::new(timeline, axes.clone());
    let mut renderer = RecordingRenderer::new();
    scene.play(&mut renderer).unwrap();

    let targets: Vec<_> = renderer
        .commands()
        .iter()
        .filter_map(|c| match c {
            RenderCommand::PlaceMarker { at } => Some(*at),
            RenderCommand::MoveMarker { to, .. } => Some(*to),
            _ => None,
        })
        .collect();

    let mut reference = ConvergenceTimeline::initialize(BaselSeries, 5).unwrap();
    let expected: Vec<_> = reference
        .run_to_end(&axes)
        .unwrap()
        .into_iter()
        .map(|f| f.position)
        .collect();

    assert_eq!(targets, expected);
    assert_eq!(renderer.marker(), expected.last().copied());
}

#[test]
fn test_scene_from_config() {
    let mut config = Config::default();
    config.timeline.series = SeriesKind::PSeries { p: 4.0 };
    config.timeline.max_index = 6;

    let series = config.timeline.series.build().unwrap();
    let timeline = ConvergenceTimeline::initialize(series, config.timeline.max_index).unwrap();
    let mut scene = ConvergenceScene::new(timeline, config.axes().unwrap())
        .with_timings(config.timings());

    let mut renderer = RecordingRenderer::new();
    let summary = scene.play(&mut renderer).unwrap();

    assert_eq!(summary.frames, 6);
    assert_eq!(summary.final_phase, TimelinePhase::Terminal);
    assert!(summary.final_label.starts_with("π⁴/90 ≈ "));
}

#[test]
fn test_terminal_playback_without_pacing() {
    let timeline = ConvergenceTimeline::initialize(BaselSeries, 3).unwrap();
    let mut scene = ConvergenceScene::new(timeline, Axes::default())
        .with_timings(PlaybackTimings::default());

    let options = TerminalOptions {
        color: false,
        speed: 0.0,
        clear_screen: false,
        ..Default::default()
    };
    let mut renderer = TerminalRenderer::new(Vec::new(), options);
    let summary = scene.play(&mut renderer).unwrap();
    assert_eq!(summary.final_label, "π²/6 ≈ 1.3611");

    let output = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(output.contains("1/3^2 = 0.1111"));
    assert!(output.contains("Total: 1.3611"));
    assert!(output.contains("π²/6 ≈ 1.3611"));
}

#[test]
fn test_export_agrees_with_scene() {
    let mut timeline = ConvergenceTimeline::initialize(BaselSeries, 8).unwrap();
    let export = FrameExport::collect(&mut timeline, &IdentityMapper, |_| {}).unwrap();

    let timeline = ConvergenceTimeline::initialize(BaselSeries, 8).unwrap();
    let mut scene = ConvergenceScene::new(timeline, Axes::default());
    let summary = scene.play(&mut RecordingRenderer::new()).unwrap();

    assert_eq!(export.final_frame().unwrap().state, summary.final_state);
    assert_eq!(scene.telemetry().sum_trace().len(), export.frames.len());
}
