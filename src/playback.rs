use std::{cell::RefCell, rc::Rc};

use crate::{
    anim::Animation,
    error::StagelintResult,
    report::IssueTracker,
    scan::{FrameScanner, ScanConfig},
    scene::Stage,
};

/// Playback policy a [`Scene`](crate::scene::Scene) is constructed with.
///
/// A renderer would implement this with real-time sampling; the
/// validator installs [`SimulatedPlayback`] instead.
pub trait PlaybackHook {
    fn play(&mut self, stage: &mut Stage, batch: Vec<Animation>);

    fn wait(&mut self, stage: &mut Stage, seconds: f64);

    /// Called once after the content-description routine returns.
    fn finalize(&mut self, stage: &mut Stage);

    /// Steps of animation progress counted so far.
    fn step(&self) -> u64;
}

/// Completion-biased simulation: every animation is driven straight to
/// its terminal interpolation value, every wait is skipped, and each
/// processed batch is followed by a frame scan.
pub struct SimulatedPlayback {
    scene_name: String,
    step: u64,
    scanner: FrameScanner,
    tracker: Rc<RefCell<IssueTracker>>,
}

impl SimulatedPlayback {
    pub fn new(
        scene_name: impl Into<String>,
        config: ScanConfig,
        tracker: Rc<RefCell<IssueTracker>>,
    ) -> Self {
        Self {
            scene_name: scene_name.into(),
            step: 0,
            scanner: FrameScanner::new(config),
            tracker,
        }
    }

    fn run_lifecycle(anim: &mut Animation, stage: &mut Stage) -> StagelintResult<()> {
        anim.setup(stage)?;
        anim.begin()?;
        anim.interpolate(1.0)?;
        anim.finish(stage)?;
        Ok(())
    }

    fn scan(&mut self, stage: &Stage) {
        self.scanner.scan(
            stage,
            &self.scene_name,
            self.step,
            &mut self.tracker.borrow_mut(),
        );
    }
}

impl PlaybackHook for SimulatedPlayback {
    fn play(&mut self, stage: &mut Stage, batch: Vec<Animation>) {
        for mut anim in batch {
            stage.add(anim.target());

            // One broken transition must not blind the validator to the
            // rest of the scene.
            if let Err(err) = Self::run_lifecycle(&mut anim, stage) {
                tracing::debug!(
                    scene = %self.scene_name,
                    animation = ?anim,
                    %err,
                    "animation lifecycle failed, skipping"
                );
            }

            // Finish cleanup may have detached the target; the scanner
            // must see the elements the author intended to remain
            // visible, not transient bookkeeping.
            stage.add(anim.target());
        }

        self.step += 1;
        self.scan(stage);
    }

    fn wait(&mut self, _stage: &mut Stage, seconds: f64) {
        // No time elapses and no scan runs beyond the prior batch's.
        tracing::trace!(scene = %self.scene_name, seconds, "skipping wait");
    }

    fn finalize(&mut self, stage: &mut Stage) {
        self.step += 1;
        tracing::debug!(
            scene = %self.scene_name,
            elements = stage.len(),
            "final frame"
        );
        for el in stage.elements() {
            tracing::debug!(scene = %self.scene_name, "  {}", el.describe());
        }
        self.scan(stage);
    }

    fn step(&self) -> u64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anim::AnimEffect,
        element::Element,
        error::StagelintError,
        geom::{BBox, Frame},
    };
    use kurbo::Vec2;

    struct Failing;

    impl AnimEffect for Failing {
        fn interpolate(&mut self, _target: &Element, _t: f64) -> StagelintResult<()> {
            Err(StagelintError::animation("broken transition"))
        }
    }

    fn leaf(label: &str, l: f64, r: f64, b: f64, t: f64) -> Element {
        Element::with_box(label, BBox::from_extents(l, r, b, t).unwrap())
    }

    fn playback() -> (SimulatedPlayback, Rc<RefCell<IssueTracker>>) {
        let tracker = Rc::new(RefCell::new(IssueTracker::new()));
        let hook = SimulatedPlayback::new("Test", ScanConfig::default(), Rc::clone(&tracker));
        (hook, tracker)
    }

    #[test]
    fn play_registers_targets_and_counts_one_step_per_batch() {
        let (mut hook, _tracker) = playback();
        let mut stage = Stage::new(Frame::default());
        let a = leaf("a", -3.0, -1.0, 0.0, 1.0);
        let b = leaf("b", 1.0, 3.0, 0.0, 1.0);

        hook.play(
            &mut stage,
            vec![Animation::appear(&a), Animation::appear(&b)],
        );

        assert_eq!(hook.step(), 1);
        assert!(stage.contains(&a));
        assert!(stage.contains(&b));
    }

    #[test]
    fn wait_advances_nothing() {
        let (mut hook, _tracker) = playback();
        let mut stage = Stage::new(Frame::default());
        hook.wait(&mut stage, 5.0);
        assert_eq!(hook.step(), 0);
    }

    #[test]
    fn failed_lifecycle_does_not_abort_the_batch() {
        let (mut hook, tracker) = playback();
        let mut stage = Stage::new(Frame::default());
        let broken = leaf("broken", -3.0, -1.0, 0.0, 1.0);
        let moved = leaf("moved", 1.0, 3.0, 0.0, 1.0);

        hook.play(
            &mut stage,
            vec![
                Animation::new(&broken, Box::new(Failing)),
                Animation::shift_by(&moved, Vec2::new(0.0, 2.0)),
            ],
        );

        // The second animation still reached its terminal state.
        let c = moved.bbox().unwrap().center();
        assert_eq!((c.x, c.y), (2.0, 2.5));
        assert_eq!(hook.step(), 1);
        assert!(tracker.borrow().is_clean());
    }

    #[test]
    fn finish_detach_is_undone_by_reregistration() {
        let (mut hook, _tracker) = playback();
        let mut stage = Stage::new(Frame::default());
        let el = leaf("fades", 0.0, 1.0, 0.0, 1.0);

        hook.play(&mut stage, vec![Animation::disappear(&el)]);

        assert!(stage.contains(&el));
    }

    #[test]
    fn finalize_scans_and_bumps_step() {
        let (mut hook, tracker) = playback();
        let mut stage = Stage::new(Frame::new(7.11, 4.0));
        stage.add(&leaf("runaway", -8.0, -6.0, -1.0, 1.0));

        hook.finalize(&mut stage);

        assert_eq!(hook.step(), 1);
        let tracker = tracker.borrow();
        assert_eq!(tracker.issues().len(), 1);
        assert!(tracker.issues()[0].message.contains("[OOB]"));
    }

    #[test]
    fn findings_dedupe_across_play_and_finalize() {
        let (mut hook, tracker) = playback();
        let mut stage = Stage::new(Frame::default());
        let a = leaf("a", 0.0, 2.0, 0.0, 1.0);
        let b = leaf("b", 0.0, 2.0, 0.0, 1.0);

        hook.play(&mut stage, vec![Animation::appear(&a), Animation::appear(&b)]);
        hook.play(&mut stage, vec![Animation::appear(&a)]);
        hook.finalize(&mut stage);

        assert_eq!(tracker.borrow().issues().len(), 1);
    }
}
