use super::*;
use crate::export::artifact::ArtifactKind;

fn artifact(ms: i64) -> Artifact {
    Artifact {
        bytes: vec![1, 2, 3],
        kind: ArtifactKind::Png,
        created_at_ms: ms,
    }
}

#[test]
fn writes_under_generated_name() {
    let dir = PathBuf::from("target").join("unit_presenter").join("fresh");
    let _ = std::fs::remove_dir_all(&dir);
    let shown = present_artifact(&artifact(42), &dir).unwrap();
    assert_eq!(shown.path, dir.join("json-video-42.png"));
    assert_eq!(shown.content_type, "image/png");
    assert_eq!(shown.size, 3);
    assert_eq!(std::fs::read(&shown.path).unwrap(), vec![1, 2, 3]);
}

#[test]
fn refuses_to_replace_existing_file() {
    let dir = PathBuf::from("target").join("unit_presenter").join("clash");
    let _ = std::fs::remove_dir_all(&dir);
    present_artifact(&artifact(7), &dir).unwrap();
    assert!(matches!(
        present_artifact(&artifact(7), &dir),
        Err(ReelError::Export(_))
    ));
}
