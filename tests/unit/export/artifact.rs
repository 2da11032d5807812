use super::*;

fn solid(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![v, v, v, 255],
        premultiplied: true,
    }
}

#[test]
fn file_name_is_timestamped_and_matches_content_type() {
    assert_eq!(
        artifact_file_name(1_700_000_000_123, ArtifactKind::Png),
        "json-video-1700000000123.png"
    );
    assert_eq!(ArtifactKind::Png.content_type(), "image/png");
}

#[test]
fn empty_sequence_is_an_export_error() {
    assert!(matches!(export_artifact(&[]), Err(ReelError::Export(_))));
}

#[test]
fn only_the_last_frame_is_kept() {
    let art = export_artifact(&[solid(10), solid(20), solid(30)]).unwrap();
    let img = image::load_from_memory(&art.bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [30, 30, 30, 255]);
    assert_eq!(art.content_type(), "image/png");
    assert!(art.file_name().starts_with("json-video-"));
    assert!(art.file_name().ends_with(".png"));
}

#[test]
fn timestamp_is_recent() {
    let before = now_unix_millis();
    let art = Artifact::from_frame(&solid(1), now_unix_millis()).unwrap();
    assert!(art.created_at_ms >= before);
}
