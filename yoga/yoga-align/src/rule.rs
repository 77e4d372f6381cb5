//! Declarative alignment rules.

use std::fmt;

use serde::Serialize;
use yoga_types::Joint;

use crate::angle::AngleSpec;

/// The single tip returned when no rule fires.
pub const PERFECT_ALIGNMENT_TIP: &str = "Perfect alignment! Keep it up.";

/// How a measured angle is compared against a rule's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Fires when the angle is strictly below the threshold.
    LessThan,
    /// Fires when the angle is strictly above the threshold.
    GreaterThan,
}

impl Comparator {
    /// Returns `true` if `degrees` violates `threshold` under this comparator.
    #[must_use]
    pub fn holds(self, degrees: f64, threshold: f64) -> bool {
        match self {
            Self::LessThan => degrees < threshold,
            Self::GreaterThan => degrees > threshold,
        }
    }

    /// Returns the comparison symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A threshold check over one joint angle that yields a corrective tip.
///
/// # Example
///
/// ```
/// use yoga_align::{AlignmentRule, AngleSpec, Comparator};
/// use yoga_types::Joint;
///
/// const WRIST: AlignmentRule = AlignmentRule::new(
///     "wrist",
///     AngleSpec::new(Joint::LeftElbow, Joint::LeftWrist, Joint::LeftIndex),
///     Comparator::LessThan,
///     160.0,
///     "Keep your wrists in line with your forearms.",
/// );
///
/// assert!(WRIST.fires(120.0));
/// assert!(!WRIST.fires(170.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentRule {
    /// Short identifier used in logs and reports.
    pub name: &'static str,
    /// The angle this rule measures.
    pub angle: AngleSpec,
    /// How the angle is compared.
    pub comparator: Comparator,
    /// Threshold in degrees.
    pub threshold: f64,
    /// Tip emitted when the rule fires.
    pub tip: &'static str,
}

impl AlignmentRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(
        name: &'static str,
        angle: AngleSpec,
        comparator: Comparator,
        threshold: f64,
        tip: &'static str,
    ) -> Self {
        Self {
            name,
            angle,
            comparator,
            threshold,
            tip,
        }
    }

    /// Returns `true` if a measured angle triggers this rule.
    #[must_use]
    pub fn fires(&self, degrees: f64) -> bool {
        self.comparator.holds(degrees, self.threshold)
    }
}

impl fmt::Display for AlignmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: angle({}, {}, {}) {} {} -> \"{}\"",
            self.name,
            self.angle.neighbor_a,
            self.angle.vertex,
            self.angle.neighbor_b,
            self.comparator,
            self.threshold,
            self.tip
        )
    }
}

/// Arm bent at the elbow.
pub const ELBOW_RULE: AlignmentRule = AlignmentRule::new(
    "elbow",
    AngleSpec::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
    Comparator::LessThan,
    150.0,
    "Straighten your arms.",
);

/// Knee locked out.
pub const KNEE_RULE: AlignmentRule = AlignmentRule::new(
    "knee",
    AngleSpec::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
    Comparator::GreaterThan,
    160.0,
    "Bend your knees slightly.",
);

/// Torso folded at the hip.
pub const BACK_RULE: AlignmentRule = AlignmentRule::new(
    "back",
    AngleSpec::new(Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee),
    Comparator::LessThan,
    150.0,
    "Keep your back straight.",
);

/// The shipped rule table, in feedback order.
///
/// Only left-side joints are measured. Right-side-dominant poses are not
/// mirrored.
pub static DEFAULT_RULES: [AlignmentRule; 3] = [ELBOW_RULE, KNEE_RULE, BACK_RULE];
