use std::collections::HashSet;

use crate::{
    element::Element,
    geom::{self, BBox, Edge, EDGE_TOLERANCE},
    report::{IssueTracker, Severity},
    scene::Stage,
};

/// Overlap ratios above this are always escalated to ERROR.
pub const ERROR_RATIO: f64 = 0.60;

#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    /// Minimum overlap ratio worth reporting.
    pub overlap_threshold: f64,
    /// Slop for the out-of-frame edge checks.
    pub edge_tolerance: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.30,
            edge_tolerance: EDGE_TOLERANCE,
        }
    }
}

/// Scans a stage snapshot for out-of-frame and overlapping elements.
///
/// Owns the per-scene deduplication state: a given finding (keyed by
/// display labels, not element identity) is reported at most once per
/// scene run, no matter how many steps re-trigger it.
pub struct FrameScanner {
    config: ScanConfig,
    seen_oob: HashSet<(String, Vec<Edge>)>,
    seen_overlaps: HashSet<(String, String)>,
}

impl FrameScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            seen_oob: HashSet::new(),
            seen_overlaps: HashSet::new(),
        }
    }

    /// Runs both checks over every top-level element with a measurable
    /// box and records previously unseen findings in `tracker`.
    pub fn scan(&mut self, stage: &Stage, scene: &str, step: u64, tracker: &mut IssueTracker) {
        let measured: Vec<(&Element, BBox)> = stage
            .elements()
            .iter()
            .filter_map(|el| el.bbox().map(|b| (el, b)))
            .collect();

        self.check_out_of_frame(stage, &measured, scene, step, tracker);
        self.check_overlaps(&measured, scene, step, tracker);
    }

    fn check_out_of_frame(
        &mut self,
        stage: &Stage,
        measured: &[(&Element, BBox)],
        scene: &str,
        step: u64,
        tracker: &mut IssueTracker,
    ) {
        for (el, bbox) in measured {
            let violations = geom::out_of_frame(bbox, stage.frame(), self.config.edge_tolerance);
            if violations.is_empty() {
                continue;
            }
            let label = el.display_label();
            let mut edges: Vec<Edge> = violations.iter().map(|v| v.edge).collect();
            edges.sort();
            if !self.seen_oob.insert((label.clone(), edges)) {
                continue;
            }
            let details = violations
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            tracker.add(
                Severity::Error,
                scene,
                step,
                format!(
                    "[OOB] {label} bbox=({:.1},{:.1})-({:.1},{:.1}) -> {details}",
                    bbox.left, bbox.bottom, bbox.right, bbox.top
                ),
            );
        }
    }

    fn check_overlaps(
        &mut self,
        measured: &[(&Element, BBox)],
        scene: &str,
        step: u64,
        tracker: &mut IssueTracker,
    ) {
        // Pairwise over top-level elements; O(n^2) is fine at scene-graph
        // sizes (tens of elements). Container/content pairs are exempt
        // since a container's box necessarily encloses its children's.
        for i in 0..measured.len() {
            for j in (i + 1)..measured.len() {
                let (el_i, bbox_i) = &measured[i];
                let (el_j, bbox_j) = &measured[j];

                if el_i.is_ancestor_of(el_j) || el_j.is_ancestor_of(el_i) {
                    continue;
                }

                let ratio = geom::overlap_ratio(bbox_i, bbox_j);
                if ratio <= self.config.overlap_threshold {
                    continue;
                }

                let mut pair = [el_i.display_label(), el_j.display_label()];
                pair.sort();
                let [first, second] = pair;
                if !self
                    .seen_overlaps
                    .insert((first.clone(), second.clone()))
                {
                    continue;
                }

                let severity = if ratio > ERROR_RATIO {
                    Severity::Error
                } else {
                    Severity::Warn
                };
                tracker.add(
                    severity,
                    scene,
                    step,
                    format!("[OVERLAP {:.0}%] {first} <-> {second}", ratio * 100.0),
                );
            }
        }
    }
}
