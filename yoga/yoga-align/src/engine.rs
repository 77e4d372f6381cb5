//! Rule evaluation over a skeleton.

use tracing::debug;
use yoga_types::Skeleton;

use crate::angle::{AngleMeasurement, measure};
use crate::error::AlignError;
use crate::rule::{AlignmentRule, DEFAULT_RULES, PERFECT_ALIGNMENT_TIP};

/// What happened to one rule during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    /// The angle violated the threshold; the rule's tip applies.
    Triggered {
        /// The rule that fired.
        rule: &'static AlignmentRule,
        /// The measured angle.
        measurement: AngleMeasurement,
    },
    /// The angle was within the threshold.
    Satisfied {
        /// The rule that held.
        rule: &'static AlignmentRule,
        /// The measured angle.
        measurement: AngleMeasurement,
    },
    /// The rule could not be evaluated and was left out.
    Skipped {
        /// The rule that was skipped.
        rule: &'static AlignmentRule,
        /// Why it was skipped.
        reason: AlignError,
    },
}

impl RuleOutcome {
    /// Returns the rule this outcome belongs to.
    #[must_use]
    pub const fn rule(&self) -> &'static AlignmentRule {
        match *self {
            Self::Triggered { rule, .. }
            | Self::Satisfied { rule, .. }
            | Self::Skipped { rule, .. } => rule,
        }
    }

    /// Returns the measured angle, if the rule was evaluated.
    #[must_use]
    pub const fn measurement(&self) -> Option<&AngleMeasurement> {
        match self {
            Self::Triggered { measurement, .. } | Self::Satisfied { measurement, .. } => {
                Some(measurement)
            }
            Self::Skipped { .. } => None,
        }
    }

    /// Returns `true` if the rule fired.
    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    /// Returns `true` if the rule was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Per-rule results of one evaluation, in rule order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    outcomes: Vec<RuleOutcome>,
}

impl Evaluation {
    /// Returns every outcome in rule order.
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Returns the outcome for a rule by name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule().name == name)
    }

    /// Iterates over the rules that fired.
    pub fn triggered(&self) -> impl Iterator<Item = &'static AlignmentRule> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.is_triggered())
            .map(RuleOutcome::rule)
    }

    /// Number of rules that could not be evaluated.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Returns the feedback tips: the tips of every fired rule, or the
    /// single affirmation when none fired.
    #[must_use]
    pub fn tips(&self) -> Vec<String> {
        let mut tips: Vec<String> = self.triggered().map(|r| r.tip.to_owned()).collect();
        if tips.is_empty() {
            tips.push(PERFECT_ALIGNMENT_TIP.to_owned());
        }
        tips
    }
}

/// Evaluates an ordered rule table against skeletons.
///
/// The engine is immutable and can be shared freely between threads.
///
/// # Example
///
/// ```
/// use yoga_align::{AlignmentEngine, PERFECT_ALIGNMENT_TIP};
/// use yoga_types::Skeleton;
///
/// let engine = AlignmentEngine::new();
///
/// // Every rule is skipped on an empty skeleton.
/// let tips = engine.evaluate(&Skeleton::new());
/// assert_eq!(tips, vec![PERFECT_ALIGNMENT_TIP.to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentEngine {
    rules: &'static [AlignmentRule],
    min_visibility: f32,
}

impl AlignmentEngine {
    /// Creates an engine over [`DEFAULT_RULES`] with no visibility gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: &DEFAULT_RULES,
            min_visibility: 0.0,
        }
    }

    /// Replaces the rule table.
    #[must_use]
    pub const fn with_rules(mut self, rules: &'static [AlignmentRule]) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the minimum joint visibility a rule needs to be evaluated.
    #[must_use]
    pub const fn with_min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    /// Returns the rule table.
    #[must_use]
    pub const fn rules(&self) -> &'static [AlignmentRule] {
        self.rules
    }

    /// Returns the visibility gate.
    #[must_use]
    pub const fn min_visibility(&self) -> f32 {
        self.min_visibility
    }

    /// Returns the feedback tips for a skeleton.
    ///
    /// Tips appear in rule declaration order. The result is never empty.
    #[must_use]
    pub fn evaluate(&self, skeleton: &Skeleton) -> Vec<String> {
        self.evaluate_detailed(skeleton).tips()
    }

    /// Evaluates every rule and reports each outcome.
    ///
    /// Rules that reference a missing, under-visible, or non-finite joint,
    /// or whose landmarks coincide, are skipped without affecting the
    /// others.
    #[must_use]
    pub fn evaluate_detailed(&self, skeleton: &Skeleton) -> Evaluation {
        let rules: &'static [AlignmentRule] = self.rules;
        let outcomes = rules
            .iter()
            .map(|rule| match measure(skeleton, &rule.angle, self.min_visibility) {
                Ok(measurement) if rule.fires(measurement.degrees) => RuleOutcome::Triggered {
                    rule,
                    measurement,
                },
                Ok(measurement) => RuleOutcome::Satisfied { rule, measurement },
                Err(reason) => {
                    debug!(rule = rule.name, %reason, "skipping alignment rule");
                    RuleOutcome::Skipped { rule, reason }
                }
            })
            .collect();

        Evaluation { outcomes }
    }
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
