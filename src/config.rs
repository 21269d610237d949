//! Run configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in scene defaults ([`Scene::builtin`])
//! 2. a JSON config file (`--config PATH`)
//! 3. environment variables (`SPIN_SCENE`, `SPIN_DURATION_SECS`, `SPIN_COLOR`,
//!    `SPIN_FRAME_MS`)
//! 4. command-line flags
//!
//! Every layer is a [`Settings`] with optional fields; [`Settings::merge`]
//! stacks them and [`Settings::resolve`] validates the result into a
//! [`RunConfig`].
//!
//! # Example file
//!
//! ```json
//! {
//!   "scene": "donut",
//!   "color": "#ff8800",
//!   "duration_secs": 0,
//!   "ramp": ".:-=+*#%@"
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GlyphRamp, Scene};
use crate::types::{AngleSteps, Rgb, SceneKind, Vec3, RUN_DURATION_SECS};

/// Finest accepted `sample_step`; the cube already has 6 * 401 * 401 samples.
pub const MIN_SAMPLE_STEP: f32 = 0.005;

/// One configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scene: Option<String>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub width_scale: Option<f32>,
    pub height_scale: Option<f32>,
    pub camera_offset: Option<f32>,
    pub ramp: Option<String>,
    pub light: Option<[f32; 3]>,
    pub angle_step_a: Option<f32>,
    pub angle_step_b: Option<f32>,
    pub sample_step: Option<f32>,
    pub color: Option<String>,
    pub frame_ms: Option<u64>,
    /// Total run length; `0` runs until quit.
    pub duration_secs: Option<u64>,
    pub frames: Option<u64>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scene: Scene,
    /// `None` runs until quit.
    pub run_ms: Option<u64>,
    pub max_frames: Option<u64>,
    /// The layers the scene was built from; reused when switching scenes.
    pub settings: Settings,
}

impl Settings {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Read the `SPIN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read `SPIN_*` variables through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    log::warn!("ignoring {}={:?}: not a number", key, raw);
                    None
                }
            }
        };
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            scene: text("SPIN_SCENE"),
            color: text("SPIN_COLOR"),
            duration_secs: number("SPIN_DURATION_SECS"),
            frame_ms: number("SPIN_FRAME_MS"),
            ..Self::default()
        }
    }

    /// Stack `over` on top of `self`; fields set in `over` win.
    pub fn merge(self, over: Settings) -> Settings {
        Settings {
            scene: over.scene.or(self.scene),
            width: over.width.or(self.width),
            height: over.height.or(self.height),
            width_scale: over.width_scale.or(self.width_scale),
            height_scale: over.height_scale.or(self.height_scale),
            camera_offset: over.camera_offset.or(self.camera_offset),
            ramp: over.ramp.or(self.ramp),
            light: over.light.or(self.light),
            angle_step_a: over.angle_step_a.or(self.angle_step_a),
            angle_step_b: over.angle_step_b.or(self.angle_step_b),
            sample_step: over.sample_step.or(self.sample_step),
            color: over.color.or(self.color),
            frame_ms: over.frame_ms.or(self.frame_ms),
            duration_secs: over.duration_secs.or(self.duration_secs),
            frames: over.frames.or(self.frames),
        }
    }

    pub fn scene_kind(&self) -> Result<SceneKind> {
        match &self.scene {
            None => Ok(SceneKind::Cube),
            Some(name) => match SceneKind::from_str(name) {
                Some(kind) => Ok(kind),
                None => bail!("unknown scene {:?} (expected cube, donut, pyramid or quad)", name),
            },
        }
    }

    /// Build `kind` with every override in these settings applied.
    pub fn build_scene(&self, kind: SceneKind) -> Result<Scene> {
        let mut scene = Scene::builtin(kind);

        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(scene.projection.width);
            let height = self.height.unwrap_or(scene.projection.height);
            if width == 0 || height == 0 {
                bail!("grid must be at least 1x1, got {}x{}", width, height);
            }
            scene.projection = scene.projection.with_size(width, height);
        }
        if let Some(s) = self.width_scale {
            scene.projection.width_scale = s;
        }
        if let Some(s) = self.height_scale {
            scene.projection.height_scale = s;
        }
        if let Some(offset) = self.camera_offset {
            scene.projection.camera_offset = offset;
        }
        if let Some(ramp) = &self.ramp {
            scene.ramp = match GlyphRamp::new(ramp) {
                Some(ramp) => ramp,
                None => bail!("glyph ramp must not be empty"),
            };
        }
        if let Some([x, y, z]) = self.light {
            let light = Vec3::new(x, y, z);
            if light.length() == 0.0 || !light.length().is_finite() {
                bail!("light direction must be a finite non-zero vector");
            }
            scene = scene.with_light(light);
        }
        if self.angle_step_a.is_some() || self.angle_step_b.is_some() {
            scene.steps = AngleSteps::new(
                self.angle_step_a.unwrap_or(scene.steps.a),
                self.angle_step_b.unwrap_or(scene.steps.b),
            );
        }
        if let Some(step) = self.sample_step {
            if !(step >= MIN_SAMPLE_STEP) {
                bail!("sample_step must be at least {}, got {}", MIN_SAMPLE_STEP, step);
            }
            scene = scene.with_sample_step(step);
        }
        if let Some(color) = &self.color {
            scene.color = match Rgb::parse(color) {
                Some(rgb) => rgb,
                None => bail!("invalid color {:?} (expected #RRGGBB or 0xRRGGBB)", color),
            };
        }
        if let Some(frame_ms) = self.frame_ms {
            scene.frame_ms = frame_ms;
        }

        // Every rotated point must keep `z + camera_offset` positive.
        let radius = scene.bounding_radius();
        let offset = scene.projection.camera_offset;
        if !(offset > radius) {
            bail!(
                "camera_offset must exceed the {} scene's radius {:.4}, got {}",
                kind.as_str(),
                radius,
                offset
            );
        }

        Ok(scene)
    }

    /// Validate and build the run configuration.
    pub fn resolve(self) -> Result<RunConfig> {
        let scene = self.build_scene(self.scene_kind()?)?;
        let run_ms = match self.duration_secs.unwrap_or(RUN_DURATION_SECS) {
            0 => None,
            secs => Some(secs.saturating_mul(1000)),
        };
        Ok(RunConfig {
            scene,
            run_ms,
            max_frames: self.frames,
            settings: self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_resolve_to_ten_second_cube() {
        let run = Settings::default().resolve().unwrap();
        assert_eq!(run.scene.kind, SceneKind::Cube);
        assert_eq!(run.run_ms, Some(10_000));
        assert_eq!(run.max_frames, None);
    }

    #[test]
    fn later_layers_win() {
        let file = Settings {
            scene: Some("donut".into()),
            color: Some("#112233".into()),
            ..Settings::default()
        };
        let cli = Settings {
            color: Some("#445566".into()),
            ..Settings::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.scene.as_deref(), Some("donut"));
        assert_eq!(merged.color.as_deref(), Some("#445566"));
    }

    #[test]
    fn env_lookup_reads_spin_vars() {
        let vars: HashMap<&str, &str> = [
            ("SPIN_SCENE", "pyramid"),
            ("SPIN_DURATION_SECS", "0"),
            ("SPIN_FRAME_MS", "soon"),
        ]
        .into_iter()
        .collect();
        let s = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(s.scene.as_deref(), Some("pyramid"));
        assert_eq!(s.duration_secs, Some(0));
        assert_eq!(s.frame_ms, None);
        assert_eq!(s.resolve().unwrap().run_ms, None);
    }

    #[test]
    fn json_rejects_unknown_keys() {
        let err = serde_json::from_str::<Settings>(r#"{"scene":"cube","speed":3}"#);
        assert!(err.is_err());
        let ok: Settings = serde_json::from_str(r#"{"light":[0,1,-1],"frames":5}"#).unwrap();
        assert_eq!(ok.light, Some([0.0, 1.0, -1.0]));
        assert_eq!(ok.frames, Some(5));
    }

    fn rejected(edit: impl FnOnce(&mut Settings)) -> bool {
        let mut settings = Settings::default();
        edit(&mut settings);
        settings.resolve().is_err()
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(rejected(|s| s.scene = Some("teapot".into())));
        assert!(rejected(|s| s.ramp = Some(String::new())));
        assert!(rejected(|s| s.light = Some([0.0; 3])));
        assert!(rejected(|s| s.color = Some("green".into())));
        assert!(rejected(|s| s.width = Some(0)));
        assert!(rejected(|s| s.camera_offset = Some(-1.0)));
        assert!(rejected(|s| s.camera_offset = Some(f32::NAN)));
        assert!(rejected(|s| s.sample_step = Some(0.0)));
        assert!(!rejected(|s| s.sample_step = Some(0.5)));
    }

    #[test]
    fn camera_must_clear_the_geometry() {
        // The pyramid's base corners sit √3 from the origin.
        assert!(rejected(|s| {
            s.scene = Some("pyramid".into());
            s.camera_offset = Some(1.73);
        }));
        assert!(!rejected(|s| {
            s.scene = Some("pyramid".into());
            s.camera_offset = Some(1.75);
        }));
        // The donut reaches radius 3.
        assert!(rejected(|s| {
            s.scene = Some("donut".into());
            s.camera_offset = Some(2.5);
        }));
    }

    #[test]
    fn sample_step_has_a_floor() {
        assert!(rejected(|s| s.sample_step = Some(1e-9)));
        assert!(rejected(|s| s.sample_step = Some(MIN_SAMPLE_STEP / 2.0)));
        let run = Settings {
            scene: Some("quad".into()),
            sample_step: Some(MIN_SAMPLE_STEP),
            ..Settings::default()
        }
        .resolve()
        .unwrap();
        let surface = run.scene.surface.unwrap();
        assert_eq!(surface.patches()[0].u.step, MIN_SAMPLE_STEP);
    }

    #[test]
    fn overrides_reach_the_scene() {
        let run = Settings {
            scene: Some("quad".into()),
            width: Some(40),
            color: Some("0xFF0000".into()),
            angle_step_b: Some(0.5),
            frame_ms: Some(33),
            ..Settings::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(run.scene.projection.width, 40);
        assert_eq!(run.scene.projection.height, 22);
        assert_eq!(run.scene.color, Rgb::new(255, 0, 0));
        assert_eq!(run.scene.steps, AngleSteps::new(0.03, 0.5));
        assert_eq!(run.scene.frame_ms, 33);
    }
}
