use super::*;

const CHART: &str = r#"{"title":"T","data":[{"name":"A","value":10},{"name":"B","value":20}]}"#;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_session").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn one_second() -> DisplayOptions {
    DisplayOptions {
        duration_secs: 1,
        ..DisplayOptions::default()
    }
}

#[test]
fn fresh_session_has_nothing_to_export() {
    let session = Session::default();
    assert!(!session.export_enabled());
    assert!(session.render_preview().is_none());
    let err = session
        .run_export(&ExportRequest::new(out_dir("nothing")), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn successful_load_replaces_document_and_enables_export() {
    let mut session = Session::default();
    session.load_str(r#"{"a":1}"#, &ContentType::json()).unwrap();
    session.load_str(CHART, &ContentType::json()).unwrap();
    assert!(session.export_enabled());
    assert_eq!(session.document().unwrap().title(), "T");
    assert!(session.render_preview().unwrap().contains("\"title\": \"T\""));
}

#[test]
fn failed_loads_keep_the_previous_document() {
    let mut session = Session::default();
    session.load_str(CHART, &ContentType::json()).unwrap();
    let before = session.document().cloned();

    let err = session
        .load_str("{broken", &ContentType::json())
        .unwrap_err();
    assert!(matches!(err, ReelError::Parse(_)));
    assert_eq!(session.document().cloned(), before);

    let err = session
        .load_str("{}", &ContentType::new("text/plain"))
        .unwrap_err();
    assert!(matches!(err, ReelError::InvalidInputType { .. }));
    assert_eq!(session.document().cloned(), before);
}

#[test]
fn invalid_type_on_empty_session_leaves_it_empty() {
    let mut session = Session::default();
    assert!(
        session
            .load_document(Path::new("target/whatever.txt"), None)
            .is_err()
    );
    assert!(!session.export_enabled());
}

#[test]
fn render_frame_checks_bounds() {
    let mut session = Session::new(one_second());
    session.load_str(CHART, &ContentType::json()).unwrap();
    assert!(matches!(
        session.render_frame(FrameIndex(30)),
        Err(ReelError::Validation(_))
    ));
    let frame = session.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((frame.width, frame.height), (1920, 1080));
}

#[test]
fn run_export_writes_png_and_reports_lifecycle() {
    let mut session = Session::new(one_second());
    session.load_str(CHART, &ContentType::json()).unwrap();

    let dir = out_dir("run");
    let mut events = Vec::new();
    let report = session
        .run_export(&ExportRequest::new(&dir), &mut |e| events.push(e))
        .unwrap();

    assert_eq!(report.frames_rendered, 30);
    assert_eq!(report.artifact.content_type, "image/png");
    assert!(report.artifact.path.starts_with(&dir));
    let name = report.artifact.path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("json-video-") && name.ends_with(".png"));

    let img = image::open(&report.artifact.path).unwrap();
    assert_eq!((img.width(), img.height()), (1920, 1080));

    assert_eq!(
        events.first(),
        Some(&ExportEvent::Started { total_frames: 30 })
    );
    assert_eq!(events.last(), Some(&ExportEvent::Finished { ok: true }));
    let progress = events
        .iter()
        .filter(|e| matches!(e, ExportEvent::Progress { .. }))
        .count();
    assert_eq!(progress, 3);
}

#[test]
fn failed_export_still_reports_finished() {
    let mut session = Session::new(DisplayOptions {
        duration_secs: 0,
        ..DisplayOptions::default()
    });
    session.load_str(CHART, &ContentType::json()).unwrap();

    let mut events = Vec::new();
    let err = session
        .run_export(&ExportRequest::new(out_dir("fail")), &mut |e| events.push(e))
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert_eq!(events.last(), Some(&ExportEvent::Finished { ok: false }));
}

#[test]
fn spawned_export_streams_events_and_joins() {
    let mut session = Session::new(one_second());
    session.load_str(r#"{"foo":"bar"}"#, &ContentType::json()).unwrap();

    let dir = out_dir("spawn");
    let mut request = ExportRequest::new(&dir);
    request.frames_dir = Some(dir.join("frames"));
    let handle = session.spawn_export(request).unwrap();

    let events: Vec<ExportEvent> = handle.events().iter().collect();
    let report = handle.join().unwrap();

    assert_eq!(events.last(), Some(&ExportEvent::Finished { ok: true }));
    assert_eq!(report.frames_rendered, 30);
    assert!(report.artifact.path.is_file());
    let frames = std::fs::read_dir(dir.join("frames")).unwrap().count();
    assert_eq!(frames, 30);
}
