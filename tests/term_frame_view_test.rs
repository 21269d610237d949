use tui_spin::core::FrameBuffer;
use tui_spin::term::{AnchorY, CellStyle, FrameView, Rgb, StatusView, Viewport};
use tui_spin::types::RotationState;

fn frame_with_marker() -> FrameBuffer {
    let mut fb = FrameBuffer::new(80, 22);
    fb.try_write(40, 11, 1.0, '@');
    fb
}

fn row_text(fb: &tui_spin::term::CellBuffer, y: u16) -> String {
    (0..fb.width())
        .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
        .collect()
}

#[test]
fn frame_is_centered_with_status_below() {
    let frame = frame_with_marker();
    let status = StatusView {
        scene: "cube",
        frame: 42,
        rotation: RotationState::new(std::f32::consts::PI, 0.0),
        paused: true,
    };
    let green = Rgb::new(0, 255, 0);
    let fb = FrameView::default().render(
        &frame.snapshot(),
        green,
        Some(&status),
        Viewport::new(100, 30),
    );

    // 80x22 frame plus one status row inside 100x30: origin (10, 3).
    let marker = fb.get(50, 14).unwrap();
    assert_eq!(marker.ch, '@');
    assert_eq!(marker.style, CellStyle::fg(green));

    let line = row_text(&fb, 25);
    assert_eq!(line.trim_end(), format!("{}cube  #42  A 180° B 0°  PAUSED", " ".repeat(10)));
}

#[test]
fn top_anchor_without_status() {
    let frame = frame_with_marker();
    let view = FrameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&frame.snapshot(), Rgb::new(1, 2, 3), None, Viewport::new(80, 24));

    assert_eq!(fb.get(40, 11).unwrap().ch, '@');
    assert!(row_text(&fb, 22).trim().is_empty());
}

#[test]
fn small_terminal_clips_instead_of_panicking() {
    let frame = frame_with_marker();
    let status = StatusView {
        scene: "donut",
        frame: 1,
        rotation: RotationState::default(),
        paused: false,
    };
    let fb = FrameView::default().render(
        &frame.snapshot(),
        Rgb::new(0, 255, 0),
        Some(&status),
        Viewport::new(20, 5),
    );
    assert_eq!(fb.width(), 20);
    assert_eq!(fb.height(), 5);
    assert!(fb.cells().iter().all(|c| c.ch == ' '));
}
