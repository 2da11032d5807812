use super::*;

#[test]
fn missing_font_file_is_an_error() {
    let err = FontSource::from_path(Path::new("target/no-such-font.ttf")).unwrap_err();
    assert!(err.to_string().contains("no-such-font.ttf"));
}

#[test]
fn empty_font_file_is_rejected() {
    let dir = PathBuf::from("target").join("unit_text");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.ttf");
    std::fs::write(&path, b"").unwrap();
    assert!(matches!(
        FontSource::from_path(&path),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn garbage_bytes_register_no_family() {
    let src = FontSource::from_bytes(vec![0u8; 64], "garbage");
    assert!(TextLayoutEngine::new(&src).is_err());
}

#[test]
fn explicit_font_path_wins_over_config() {
    let cli = Some(PathBuf::from("a.ttf"));
    let cfg = Some(PathBuf::from("b.ttf"));
    assert_eq!(pick_font_path(cli, cfg.clone()), Some(PathBuf::from("a.ttf")));
    assert_eq!(pick_font_path(None, cfg), Some(PathBuf::from("b.ttf")));
    assert_eq!(pick_font_path(None, None), None);
}

#[test]
fn system_font_lays_out_when_available() {
    // Hosts without fonts skip the shaping check.
    let Some(font) = FontSource::system_sans() else {
        return;
    };
    let Ok(mut engine) = TextLayoutEngine::new(&font) else {
        return;
    };
    let line = engine
        .layout_line("Hello", 32.0, false, TextBrushRgba8::default())
        .unwrap();
    assert!(line.width > 0.0);
    assert!(line.baseline > 0.0);
    assert!(
        engine
            .layout_line("x", 0.0, false, TextBrushRgba8::default())
            .is_err()
    );
}
