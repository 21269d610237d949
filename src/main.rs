//! Terminal viewer (default binary).
//!
//! Renders the selected scene at a fixed frame interval. Interactive mode uses
//! the alternate screen with diff redraws; `--plain` streams whole frames to
//! stdout like the classic donut programs.

mod cli;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_spin::config::{RunConfig, Settings};
use tui_spin::core::{FrameRenderer, Scene};
use tui_spin::input::{handle_key_event, should_quit};
use tui_spin::term::{
    CellBuffer, FramePacer, FrameView, PlainRenderer, StatusView, TerminalRenderer, Viewport,
};
use tui_spin::types::ViewerAction;

use cli::Cli;

/// What a finished run reports.
struct RunSummary {
    frames: u64,
    elapsed: Duration,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let run = cli.load_settings()?.resolve()?;
    log::info!(
        "scene={} frame_ms={} run_ms={:?} max_frames={:?}",
        run.scene.kind.as_str(),
        run.scene.frame_ms,
        run.run_ms,
        run.max_frames
    );

    let summary = if cli.plain {
        run_plain(run)?
    } else {
        let mut term = TerminalRenderer::new();
        term.enter()?;

        let result = run_interactive(&mut term, run, !cli.no_status);

        // Always try to restore terminal state.
        let _ = term.exit();
        result?
    };

    log::info!(
        "rendered {} frames in {:.2}s",
        summary.frames,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn run_interactive(
    term: &mut TerminalRenderer,
    run: RunConfig,
    show_status: bool,
) -> Result<RunSummary> {
    let RunConfig {
        mut scene,
        run_ms,
        max_frames,
        settings,
    } = run;

    let start = Instant::now();
    let mut pacer = FramePacer::new(scene.frame_ms, run_ms).with_max_frames(max_frames);
    let mut renderer = FrameRenderer::for_scene(&scene);
    let view = FrameView::default();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut cells = CellBuffer::new(w, h);

    let mut rotation = scene.initial_rotation();
    let mut paused = false;

    loop {
        let now = elapsed_ms(start);
        if pacer.should_stop(now) {
            break;
        }

        if pacer.is_due(now) {
            let (frame, next) = renderer.render_frame(&scene, rotation);
            let status = StatusView {
                scene: scene.kind.as_str(),
                frame: u32::try_from(pacer.frames()).unwrap_or(u32::MAX),
                rotation,
                paused,
            };
            let status = show_status.then_some(&status);
            view.render_into(&frame, scene.color, status, viewport, &mut cells);
            term.draw_swap(&mut cells)?;

            if !paused {
                rotation = next;
            }
            pacer.frame_presented(elapsed_ms(start));
        }

        let timeout = Duration::from_millis(pacer.wait_ms(elapsed_ms(start)));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    break;
                }
                match handle_key_event(key) {
                    Some(ViewerAction::TogglePause) => paused = !paused,
                    Some(ViewerAction::ResetRotation) => rotation = scene.initial_rotation(),
                    Some(ViewerAction::NextScene) => match switch_scene(&settings, &scene) {
                        Ok(next) => {
                            scene = next;
                            pacer.set_frame_ms(scene.frame_ms);
                            rotation = scene.initial_rotation();
                        }
                        Err(err) => log::warn!("keeping {}: {:#}", scene.kind.as_str(), err),
                    },
                    None => {}
                }
            }
            Event::Resize(w, h) => {
                log::debug!("terminal resized to {}x{}", w, h);
                viewport = Viewport::new(w, h);
                term.invalidate();
            }
            _ => {}
        }
    }

    Ok(RunSummary {
        frames: pacer.frames(),
        elapsed: start.elapsed(),
    })
}

fn switch_scene(settings: &Settings, current: &Scene) -> Result<Scene> {
    let kind = current.kind.next();
    log::debug!("switching scene {} -> {}", current.kind.as_str(), kind.as_str());
    settings.build_scene(kind)
}

fn run_plain(run: RunConfig) -> Result<RunSummary> {
    let RunConfig {
        scene,
        run_ms,
        max_frames,
        ..
    } = run;

    let start = Instant::now();
    let mut pacer = FramePacer::new(scene.frame_ms, run_ms).with_max_frames(max_frames);
    let mut renderer = FrameRenderer::for_scene(&scene);
    let mut out = PlainRenderer::new();
    let mut rotation = scene.initial_rotation();

    out.begin()?;
    loop {
        let now = elapsed_ms(start);
        if pacer.should_stop(now) {
            break;
        }
        if pacer.is_due(now) {
            let (frame, next) = renderer.render_frame(&scene, rotation);
            out.draw(&frame, scene.color)?;
            rotation = next;
            pacer.frame_presented(elapsed_ms(start));
        }
        thread::sleep(Duration::from_millis(pacer.wait_ms(elapsed_ms(start))));
    }
    out.finish()?;

    Ok(RunSummary {
        frames: pacer.frames(),
        elapsed: start.elapsed(),
    })
}
