use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
    assert_eq!(
        r.iter().collect::<Vec<_>>(),
        vec![FrameIndex(2), FrameIndex(3), FrameIndex(4)]
    );
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(1)).is_err());
    assert!(
        FrameRange::new(FrameIndex(1), FrameIndex(1))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_counts_frames_for_whole_seconds() {
    assert_eq!(Fps::FIXED.frames_for_secs(1), 30);
    assert_eq!(Fps::FIXED.frames_for_secs(7), 210);
    assert!(Fps::new(0).is_err());
}

#[test]
fn progress_starts_at_zero_and_stays_below_one() {
    assert_eq!(progress_at(FrameIndex(0), 30), 0.0);
    assert!((progress_at(FrameIndex(15), 30) - 0.5).abs() < 1e-12);
    assert!(progress_at(FrameIndex(29), 30) < 1.0);
    assert_eq!(progress_at(FrameIndex(0), 0), 0.0);
}

#[test]
fn canvas_hd_geometry() {
    let c = Canvas::HD;
    assert_eq!(c.center_x(), 960.0);
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 1920.0, 1080.0));
}
