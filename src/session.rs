//! Generation context.
//!
//! Holds the most recently generated program so it can be exported later.
//! The context belongs to the caller; planners never see it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use millpath_camtools::{CamToolError, CamToolResult, PathPlanner, Pattern, ToolpathPlan};

/// Export file name for `pattern` generated at `timestamp`.
///
/// The timestamp is ISO-8601 UTC with `:` and `.` removed, e.g.
/// `c_shape_gcode_2026-10-18T123456789Z.txt`.
pub fn export_file_name(pattern: Pattern, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.txt",
        pattern.file_prefix(),
        timestamp.format("%Y-%m-%dT%H%M%S%3fZ")
    )
}

/// Last successful plan and its program text
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    last: Option<Generated>,
}

#[derive(Debug, Clone)]
struct Generated {
    plan: ToolpathPlan,
    program: String,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan with `planner` and keep the result.
    ///
    /// A failed plan leaves the previously generated program in place.
    pub fn generate(&mut self, planner: &dyn PathPlanner) -> CamToolResult<&ToolpathPlan> {
        let plan = planner.plan()?;
        let program = plan.to_gcode();
        tracing::debug!(
            pattern = plan.pattern.name(),
            bytes = program.len(),
            "program generated"
        );
        let generated = self.last.insert(Generated { plan, program });
        Ok(&generated.plan)
    }

    pub fn plan(&self) -> Option<&ToolpathPlan> {
        self.last.as_ref().map(|g| &g.plan)
    }

    /// Program text of the last successful generation
    pub fn program(&self) -> Option<&str> {
        self.last.as_ref().map(|g| g.program.as_str())
    }

    pub fn pattern(&self) -> Option<Pattern> {
        self.last.as_ref().map(|g| g.plan.pattern)
    }

    /// Write the last program into `directory` under a timestamped name
    pub fn export(&self, directory: &Path) -> CamToolResult<PathBuf> {
        self.export_at(directory, Utc::now())
    }

    /// Like [`export`](Self::export) with an explicit timestamp
    pub fn export_at(&self, directory: &Path, timestamp: DateTime<Utc>) -> CamToolResult<PathBuf> {
        let generated = self.last.as_ref().ok_or(CamToolError::NoProgramGenerated)?;

        std::fs::create_dir_all(directory)?;
        let path = directory.join(export_file_name(generated.plan.pattern, timestamp));
        std::fs::write(&path, &generated.program)?;

        tracing::info!(
            pattern = generated.plan.pattern.name(),
            path = %path.display(),
            "program exported"
        );
        Ok(path)
    }
}
