#![forbid(unsafe_code)]

pub mod anim;
pub mod driver;
pub mod element;
pub mod error;
pub mod geom;
pub mod playback;
pub mod registry;
pub mod report;
pub mod scan;
pub mod scene;
pub mod scenes;

pub use anim::{AnimEffect, Animation};
pub use driver::{Driver, DriverConfig};
pub use element::Element;
pub use error::{StagelintError, StagelintResult};
pub use geom::{BBox, Edge, EdgeViolation, Frame, out_of_frame, overlap_ratio};
pub use playback::{PlaybackHook, SimulatedPlayback};
pub use registry::SceneRegistry;
pub use report::{Issue, IssueTracker, Severity};
pub use scan::{FrameScanner, ScanConfig};
pub use scene::{Scene, SceneDef, Stage};
