use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{StagelintError, StagelintResult},
    geom::Frame,
    playback::SimulatedPlayback,
    registry::SceneRegistry,
    report::{IssueTracker, Severity},
    scan::ScanConfig,
    scene::{Scene, SceneDef, Stage},
};

#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Restrict validation to one scene by name.
    pub scene: Option<String>,
    pub scan: ScanConfig,
    pub frame: Frame,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            scene: None,
            scan: ScanConfig::default(),
            frame: Frame::default(),
        }
    }
}

/// Runs every selected scene through the completion-biased simulation
/// and aggregates findings into one tracker.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Validates the selected scenes sequentially, each with a fresh
    /// stage, step counter and dedup scope. Returns the shared tracker;
    /// discovery failures are the only fatal errors.
    #[tracing::instrument(skip(self, registry))]
    pub fn run(&self, registry: &SceneRegistry) -> StagelintResult<IssueTracker> {
        if registry.is_empty() {
            return Err(StagelintError::discovery("no scene definitions registered"));
        }

        let selected: Vec<&dyn SceneDef> = match &self.config.scene {
            Some(name) => {
                let def = registry.get(name).ok_or_else(|| {
                    StagelintError::discovery(format!("scene '{name}' not found"))
                })?;
                vec![def]
            }
            None => registry.iter().collect(),
        };

        let tracker = Rc::new(RefCell::new(IssueTracker::new()));

        for def in selected {
            tracing::info!(scene = def.name(), "validating");
            let hook = SimulatedPlayback::new(def.name(), self.config.scan, Rc::clone(&tracker));
            let mut scene = Scene::new(Stage::new(self.config.frame), Box::new(hook));

            // A failing content routine is a single finding for this
            // scene; the remaining scenes still run.
            if let Err(err) = def.construct(&mut scene) {
                tracker.borrow_mut().add(
                    Severity::Error,
                    def.name(),
                    scene.step(),
                    format!("construct failed: {err}"),
                );
            }

            scene.finalize();
            tracing::info!(
                scene = def.name(),
                steps = scene.step(),
                elements = scene.stage().len(),
                "done"
            );
        }

        Ok(tracker.take())
    }
}
