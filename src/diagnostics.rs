// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that don't fail a deployment but are shown at the end.

/// Collects non-fatal warnings during deployment operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The change set also touches resources other than the target.
    pub fn collateral_changes(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CollateralChanges,
            message: message.into(),
        }
    }

    /// The change set removes the target resource.
    pub fn target_removed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::TargetRemoved,
            message: message.into(),
        }
    }

    /// The change-set description was clipped to the platform limit.
    pub fn description_truncated(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DescriptionTruncated,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    CollateralChanges,
    TargetRemoved,
    DescriptionTruncated,
}
