//! End-to-end tests for the host: scripts in, project files and images out.

use clap::Parser;
use inkboard_cli::{commands, CanvasSession, CliArgs, HostConfig, SessionError};
use inkboard_core::{codec, BrushSettings, DrawableObject, Point, PointerEvent};
use inkboard_renderer::export::{DocumentExporter, ExportConfig};
use inkboard_renderer::{RasterSurface, RecordingSurface};

const SCRIPT: &str = r##"[
    {"type": "brush", "color": "#ff0000", "size": 6},
    {"type": "press", "x": 10, "y": 10},
    {"type": "move", "x": 60, "y": 10},
    {"type": "move", "x": 60, "y": 60},
    {"type": "release"},
    {"type": "brush", "color": "blue", "size": 2},
    {"type": "press", "x": 5, "y": 90},
    {"type": "release"}
]"##;

fn small_config() -> HostConfig {
    HostConfig {
        width: 100,
        height: 100,
        ..HostConfig::default()
    }
}

#[tokio::test]
async fn test_replay_writes_project_and_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("script.json");
    let project = dir.path().join("drawing.json");
    let png = dir.path().join("drawing.png");
    tokio::fs::write(&script, SCRIPT).await.expect("write script");

    let saved = commands::replay(&small_config(), &script, Some(&project), Some(&png))
        .await
        .expect("replay");
    assert_eq!(saved, project);

    let summary = commands::info(&project).await.expect("info");
    assert_eq!(summary.objects, 2);
    assert_eq!(summary.strokes, 2);
    assert_eq!(summary.points, 4);
    assert_eq!(summary.brush.color, "blue");
    assert!((summary.brush.size - 2.0).abs() < f64::EPSILON);

    let bytes = tokio::fs::read(&png).await.expect("read png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_render_project_to_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("script.json");
    let project = dir.path().join("drawing.json");
    let svg = dir.path().join("drawing.svg");
    tokio::fs::write(&script, SCRIPT).await.expect("write script");

    commands::replay(&small_config(), &script, Some(&project), None)
        .await
        .expect("replay");
    commands::render(&small_config(), &project, &svg)
        .await
        .expect("render");

    let text = tokio::fs::read_to_string(&svg).await.expect("read svg");
    assert!(text.starts_with("<svg"));
    // The single-point stroke is kept in the project but never drawn.
    assert_eq!(text.matches("<path").count(), 1);
}

#[tokio::test]
async fn test_load_file_into_live_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("project.json");

    let mut first = CanvasSession::new(RecordingSurface::new(100, 100));
    first.handle_pointer(PointerEvent::Press(Point::new(0.0, 0.0)));
    first.handle_pointer(PointerEvent::Move(Point::new(20.0, 20.0)));
    first.handle_pointer(PointerEvent::Release);
    first.save_project_file(&path).await.expect("save");

    let mut second = CanvasSession::new(RasterSurface::new(100, 100).expect("surface"));
    second.load_project_file(&path).await.expect("load");
    assert_eq!(second.document().len(), 1);
    assert_eq!(second.last_render().drawn, 1);
    assert!(matches!(
        second.document().objects()[0],
        DrawableObject::Stroke(_)
    ));
    assert!(second.renderer().surface().painted_pixel_count() > 0);
}

#[tokio::test]
async fn test_failed_load_leaves_session_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("bad.json");
    tokio::fs::write(&bad, r#"{"objects": "nope"}"#)
        .await
        .expect("write");

    let mut session = CanvasSession::new(RecordingSurface::new(100, 100));
    session.handle_pointer(PointerEvent::Press(Point::new(1.0, 1.0)));
    session.handle_pointer(PointerEvent::Move(Point::new(9.0, 9.0)));
    session.handle_pointer(PointerEvent::Release);
    let before = session.save_project().expect("save");

    assert!(session.load_project_file(&bad).await.is_err());
    assert!(session
        .load_project_file(&dir.path().join("missing.json"))
        .await
        .is_err());
    assert_eq!(session.save_project().expect("save"), before);
}

#[tokio::test]
async fn test_render_rejects_unknown_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = dir.path().join("p.json");
    tokio::fs::write(&project, r#"{"objects": []}"#)
        .await
        .expect("write");

    let err = commands::render(&small_config(), &project, &dir.path().join("out.gif"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("out.gif"));
}

#[tokio::test]
async fn test_replay_png_matches_fresh_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("script.json");
    let project = dir.path().join("drawing.json");
    let png = dir.path().join("drawing.png");
    tokio::fs::write(&script, SCRIPT).await.expect("write script");

    let config = small_config();
    commands::replay(&config, &script, Some(&project), Some(&png))
        .await
        .expect("replay");

    let text = tokio::fs::read_to_string(&project).await.expect("read");
    let document = codec::load(&text, &BrushSettings::default()).expect("load");
    let exported = DocumentExporter::new(ExportConfig {
        width: config.width,
        height: config.height,
        background: config.background,
    })
    .render_to_png(document.objects())
    .expect("export");

    assert_eq!(tokio::fs::read(&png).await.expect("read png"), exported);
}

#[tokio::test]
async fn test_replay_rejects_image_extension_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("script.json");
    let project = dir.path().join("drawing.json");
    tokio::fs::write(&script, SCRIPT).await.expect("write script");

    let result = commands::replay(
        &small_config(),
        &script,
        Some(&project),
        Some(&dir.path().join("drawing.gif")),
    )
    .await;
    assert!(matches!(result, Err(SessionError::Config(_))));
    assert!(!project.exists());
}

#[tokio::test]
async fn test_info_ignores_surface_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = dir.path().join("p.json");
    tokio::fs::write(&project, r#"{"objects": [{"id": "x", "kind": "text"}]}"#)
        .await
        .expect("write");
    let project_arg = project.to_str().expect("utf8 path");

    let args = CliArgs::try_parse_from([
        "inkboard",
        "--background",
        "not-a-color",
        "info",
        project_arg,
    ])
    .expect("valid args");
    let output = commands::run(&args).await.expect("info runs");
    assert!(output.contains("objects: 1"));
    assert!(output.contains("other:   text x1"));

    let args = CliArgs::try_parse_from([
        "inkboard",
        "--background",
        "not-a-color",
        "render",
        project_arg,
        "-o",
        "out.png",
    ])
    .expect("valid args");
    assert!(matches!(
        commands::run(&args).await,
        Err(SessionError::Config(_))
    ));
}
