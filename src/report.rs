use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Error,
    Warn,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warn => f.write_str("WARN"),
        }
    }
}

/// One recorded finding. Immutable once added to the tracker.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub scene: String,
    pub step: u64,
    pub message: String,
}

/// Append-only log of findings across all validated scenes.
///
/// Deduplication is the scanner's responsibility; the tracker records
/// everything it is handed.
#[derive(Debug, Default, Clone)]
pub struct IssueTracker {
    issues: Vec<Issue>,
}

impl IssueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        severity: Severity,
        scene: impl Into<String>,
        step: u64,
        message: impl Into<String>,
    ) {
        self.issues.push(Issue {
            severity,
            scene: scene.into(),
            step,
            message: message.into(),
        });
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// True iff zero issues were recorded across the whole run.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable, severity-grouped, per-scene breakdown with totals.
    pub fn write_report(&self, out: &mut impl io::Write) -> io::Result<()> {
        if self.issues.is_empty() {
            writeln!(out, "\nall scenes validated clean, no issues found")?;
            return Ok(());
        }

        let rule = "=".repeat(70);
        writeln!(out, "\n{rule}")?;
        writeln!(out, "  validation report - {} issue(s)", self.issues.len())?;
        writeln!(out, "{rule}")?;

        // Group by scene, preserving first-appearance order.
        let mut scenes: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !scenes.contains(&issue.scene.as_str()) {
                scenes.push(&issue.scene);
            }
        }

        for scene in scenes {
            writeln!(out, "\n  {scene}:")?;
            for severity in [Severity::Error, Severity::Warn] {
                for issue in self
                    .issues
                    .iter()
                    .filter(|i| i.scene == scene && i.severity == severity)
                {
                    writeln!(
                        out,
                        "    {:5} step {}: {}",
                        issue.severity.to_string(),
                        issue.step,
                        issue.message
                    )?;
                }
            }
        }

        let errors = self
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warnings = self.issues.len() - errors;
        writeln!(out, "\n  total: {errors} error(s), {warnings} warning(s)")?;
        writeln!(out, "{rule}")?;
        Ok(())
    }

    /// The report as a string, for callers that do not stream it.
    pub fn render_report(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec<u8> cannot fail.
        self.write_report(&mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("report is UTF-8")
    }
}
