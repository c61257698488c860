use crate::{
    anim::Animation, element::Element, error::StagelintResult, geom::Frame,
    playback::PlaybackHook,
};

/// The live set of top-level elements attached to a scene session, plus
/// the frame geometry. Membership is pointer identity; adding an element
/// that is already attached is a no-op.
pub struct Stage {
    frame: Frame,
    roots: Vec<Element>,
}

impl Stage {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            roots: Vec::new(),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn elements(&self) -> &[Element] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.roots.iter().any(|e| e.ptr_eq(element))
    }

    pub fn add(&mut self, element: &Element) {
        if !self.contains(element) {
            self.roots.push(element.clone());
        }
    }

    pub fn remove(&mut self, element: &Element) {
        self.roots.retain(|e| !e.ptr_eq(element));
    }
}

/// A scene session. Scene definitions attach elements and issue
/// `play`/`wait` calls; both delegate to the playback hook the session
/// was constructed with, so a policy (real-time playback, simulation)
/// is an injected dependency rather than a patched method.
pub struct Scene {
    stage: Stage,
    hook: Box<dyn PlaybackHook>,
}

impl Scene {
    pub fn new(stage: Stage, hook: Box<dyn PlaybackHook>) -> Self {
        Self { stage, hook }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn add(&mut self, element: &Element) {
        self.stage.add(element);
    }

    pub fn remove(&mut self, element: &Element) {
        self.stage.remove(element);
    }

    /// Plays a batch of simultaneous animations.
    pub fn play(&mut self, batch: Vec<Animation>) {
        self.hook.play(&mut self.stage, batch);
    }

    pub fn wait(&mut self, seconds: f64) {
        self.hook.wait(&mut self.stage, seconds);
    }

    /// Steps of animation progress so far, as counted by the hook.
    pub fn step(&self) -> u64 {
        self.hook.step()
    }

    /// Signals the end of the content-description routine.
    pub fn finalize(&mut self) {
        self.hook.finalize(&mut self.stage);
    }
}

/// A named scene definition. Implementations register themselves in a
/// [`SceneRegistry`](crate::registry::SceneRegistry) and describe their
/// content by playing animations against the session they are given.
pub trait SceneDef {
    fn name(&self) -> &str;

    fn construct(&self, scene: &mut Scene) -> StagelintResult<()>;
}
