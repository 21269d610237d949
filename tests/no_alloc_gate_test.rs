use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_spin::core::{FrameRenderer, Scene};
use tui_spin::term::{CellBuffer, FrameView, StatusView, Viewport};
use tui_spin::types::SceneKind;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// One test per binary: the counter is global, so parallel tests would
// count each other's allocations.
#[test]
fn frame_and_view_are_allocation_free_after_warmup() {
    let scenes: Vec<Scene> = SceneKind::ALL.iter().map(|&k| Scene::builtin(k)).collect();
    let view = FrameView::default();
    let viewport = Viewport::new(100, 30);
    let mut cells = CellBuffer::new(viewport.width, viewport.height);
    let mut renderer = FrameRenderer::new(80, 22);

    let mut rotations: Vec<_> = scenes.iter().map(|s| s.initial_rotation()).collect();

    // Warm-up.
    for (scene, rotation) in scenes.iter().zip(rotations.iter_mut()) {
        let (frame, next) = renderer.render_frame(scene, *rotation);
        view.render_into(&frame, scene.color, None, viewport, &mut cells);
        *rotation = next;
    }

    let allocs = with_alloc_counting(|| {
        for frame_no in 0..20u32 {
            for (scene, rotation) in scenes.iter().zip(rotations.iter_mut()) {
                let (frame, next) = renderer.render_frame(scene, *rotation);
                let status = StatusView {
                    scene: scene.kind.as_str(),
                    frame: frame_no,
                    rotation: *rotation,
                    paused: false,
                };
                view.render_into(&frame, scene.color, Some(&status), viewport, &mut cells);
                *rotation = next;
            }
        }
    });

    assert_eq!(allocs, 0);
}
