use kurbo::{Point, Vec2};

use crate::{element::Element, error::StagelintResult, geom::BBox, scene::Stage};

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_bbox(a: &BBox, b: &BBox, t: f64) -> Option<BBox> {
    BBox::from_extents(
        lerp(a.left, b.left, t),
        lerp(a.right, b.right, t),
        lerp(a.bottom, b.bottom, t),
        lerp(a.top, b.top, t),
    )
}

/// One visual transition's lifecycle, driven by a playback policy.
///
/// Stages run in order: `setup` (against the scene context), `begin`,
/// `interpolate` at one or more parameter values in `[0, 1]`, `finish`.
/// Every stage returns a `Result` so a broken transition can be skipped
/// without aborting the batch it belongs to.
pub trait AnimEffect {
    fn setup(&mut self, _stage: &mut Stage, _target: &Element) -> StagelintResult<()> {
        Ok(())
    }

    fn begin(&mut self, _target: &Element) -> StagelintResult<()> {
        Ok(())
    }

    fn interpolate(&mut self, target: &Element, t: f64) -> StagelintResult<()>;

    fn finish(&mut self, _stage: &mut Stage, _target: &Element) -> StagelintResult<()> {
        Ok(())
    }
}

/// A target element plus the effect applied to it.
pub struct Animation {
    target: Element,
    effect: Box<dyn AnimEffect>,
}

impl Animation {
    pub fn new(target: &Element, effect: Box<dyn AnimEffect>) -> Self {
        Self {
            target: target.clone(),
            effect,
        }
    }

    /// Fade/write-style entrance: the terminal state is the element as
    /// constructed, so the effect itself is geometry-neutral.
    pub fn appear(target: &Element) -> Self {
        Self::new(target, Box::new(Appear))
    }

    pub fn shift_by(target: &Element, delta: Vec2) -> Self {
        Self::new(target, Box::new(ShiftBy { delta, start: None }))
    }

    pub fn move_to(target: &Element, dest: Point) -> Self {
        Self::new(target, Box::new(MoveTo { dest, start: None }))
    }

    pub fn scale_to(target: &Element, factor: f64) -> Self {
        Self::new(
            target,
            Box::new(ScaleTo {
                factor,
                applied: 1.0,
            }),
        )
    }

    /// Retargets the element's own extent toward `dest`.
    pub fn morph_to(target: &Element, dest: BBox) -> Self {
        Self::new(target, Box::new(MorphTo { dest, start: None }))
    }

    /// Fade-out: `finish` detaches the target from the stage.
    pub fn disappear(target: &Element) -> Self {
        Self::new(target, Box::new(Disappear))
    }

    pub fn target(&self) -> &Element {
        &self.target
    }

    pub fn setup(&mut self, stage: &mut Stage) -> StagelintResult<()> {
        self.effect.setup(stage, &self.target)
    }

    pub fn begin(&mut self) -> StagelintResult<()> {
        self.effect.begin(&self.target)
    }

    pub fn interpolate(&mut self, t: f64) -> StagelintResult<()> {
        self.effect.interpolate(&self.target, t)
    }

    pub fn finish(&mut self, stage: &mut Stage) -> StagelintResult<()> {
        self.effect.finish(stage, &self.target)
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Animation({})", self.target.display_label())
    }
}

struct Appear;

impl AnimEffect for Appear {
    fn interpolate(&mut self, _target: &Element, _t: f64) -> StagelintResult<()> {
        Ok(())
    }
}

struct ShiftBy {
    delta: Vec2,
    start: Option<Point>,
}

impl AnimEffect for ShiftBy {
    fn begin(&mut self, target: &Element) -> StagelintResult<()> {
        self.start = target.bbox().map(|b| b.center());
        Ok(())
    }

    fn interpolate(&mut self, target: &Element, t: f64) -> StagelintResult<()> {
        if let Some(start) = self.start {
            target.move_to(start + self.delta * t);
        }
        Ok(())
    }
}

struct MoveTo {
    dest: Point,
    start: Option<Point>,
}

impl AnimEffect for MoveTo {
    fn begin(&mut self, target: &Element) -> StagelintResult<()> {
        self.start = target.bbox().map(|b| b.center());
        Ok(())
    }

    fn interpolate(&mut self, target: &Element, t: f64) -> StagelintResult<()> {
        if let Some(start) = self.start {
            target.move_to(Point::new(
                lerp(start.x, self.dest.x, t),
                lerp(start.y, self.dest.y, t),
            ));
        }
        Ok(())
    }
}

struct ScaleTo {
    factor: f64,
    applied: f64, // cumulative scale already applied to the target
}

impl AnimEffect for ScaleTo {
    fn interpolate(&mut self, target: &Element, t: f64) -> StagelintResult<()> {
        let want = lerp(1.0, self.factor, t);
        if self.applied.abs() > f64::EPSILON {
            target.scale(want / self.applied);
        }
        self.applied = want;
        Ok(())
    }
}

struct MorphTo {
    dest: BBox,
    start: Option<BBox>,
}

impl AnimEffect for MorphTo {
    fn begin(&mut self, target: &Element) -> StagelintResult<()> {
        self.start = target.bbox();
        Ok(())
    }

    fn interpolate(&mut self, target: &Element, t: f64) -> StagelintResult<()> {
        let from = self.start.unwrap_or(self.dest);
        target.set_extent(lerp_bbox(&from, &self.dest, t));
        Ok(())
    }
}

struct Disappear;

impl AnimEffect for Disappear {
    fn interpolate(&mut self, _target: &Element, _t: f64) -> StagelintResult<()> {
        Ok(())
    }

    fn finish(&mut self, stage: &mut Stage, target: &Element) -> StagelintResult<()> {
        stage.remove(target);
        Ok(())
    }
}
