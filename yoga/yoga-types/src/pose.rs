//! Pose classes and classifier output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};

/// The closed set of yoga poses the classifier distinguishes.
///
/// Variant order is the classifier's output order: score `i` belongs to
/// `PoseClass::ALL[i]`.
///
/// # Example
///
/// ```
/// use yoga_types::PoseClass;
///
/// assert_eq!(PoseClass::from_index(1), Some(PoseClass::Tree));
/// assert_eq!(PoseClass::DownwardDog.to_string(), "DownwardDog");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoseClass {
    /// Warrior (Virabhadrasana).
    Warrior,
    /// Tree (Vrksasana).
    Tree,
    /// Cobra (Bhujangasana).
    Cobra,
    /// Downward-facing dog (Adho Mukha Svanasana).
    DownwardDog,
    /// Chair (Utkatasana).
    Chair,
}

impl PoseClass {
    /// Number of pose classes.
    pub const COUNT: usize = 5;

    /// All classes in classifier output order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Warrior,
        Self::Tree,
        Self::Cobra,
        Self::DownwardDog,
        Self::Chair,
    ];

    /// Looks up a class by output index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the output index of this class.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the display name of this class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Tree => "Tree",
            Self::Cobra => "Cobra",
            Self::DownwardDog => "DownwardDog",
            Self::Chair => "Chair",
        }
    }
}

impl fmt::Display for PoseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoseClass {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.name() == s)
            .ok_or_else(|| TypesError::unknown_pose_class(s))
    }
}

/// The label and probability a classifier assigns to one image.
///
/// # Example
///
/// ```
/// use yoga_types::{ClassificationResult, PoseClass};
///
/// let result = ClassificationResult::new(PoseClass::Tree, 0.873)?;
/// assert!(result.is_confident(0.7));
/// # Ok::<(), yoga_types::TypesError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The arg-max class.
    pub label: PoseClass,
    /// The arg-max probability `[0, 1]`.
    pub confidence: f64,
}

impl ClassificationResult {
    /// Creates a classification result.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidConfidence`] if `confidence` is not a
    /// probability.
    pub fn new(label: PoseClass, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(TypesError::invalid_confidence(confidence));
        }
        Ok(Self { label, confidence })
    }

    /// Returns `true` if the confidence meets the threshold.
    #[must_use]
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    /// Returns the confidence as a percentage rounded to two decimals.
    #[must_use]
    pub fn confidence_percent(&self) -> f64 {
        (self.confidence * 100.0 * 100.0).round() / 100.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn class_order() {
        let names: Vec<_> = PoseClass::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Warrior", "Tree", "Cobra", "DownwardDog", "Chair"]);
        for (i, class) in PoseClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
        assert_eq!(PoseClass::from_index(5), None);
    }

    #[test]
    fn class_parse() {
        assert_eq!("Cobra".parse::<PoseClass>().ok(), Some(PoseClass::Cobra));
        assert!("Crow".parse::<PoseClass>().is_err());
    }

    #[test]
    fn class_serde_uses_display_name() {
        let json = serde_json::to_string(&PoseClass::DownwardDog).unwrap_or_default();
        assert_eq!(json, "\"DownwardDog\"");
    }

    #[test]
    fn result_rejects_out_of_range() {
        assert!(ClassificationResult::new(PoseClass::Tree, 1.2).is_err());
        assert!(ClassificationResult::new(PoseClass::Tree, -0.1).is_err());
        assert!(ClassificationResult::new(PoseClass::Tree, f64::NAN).is_err());
    }

    #[test]
    fn result_percent_rounding() {
        let r = ClassificationResult {
            label: PoseClass::Tree,
            confidence: 0.873,
        };
        assert_eq!(r.confidence_percent(), 87.3);

        let r = ClassificationResult {
            label: PoseClass::Chair,
            confidence: 0.123_456,
        };
        assert_eq!(r.confidence_percent(), 12.35);
    }

    #[test]
    fn result_confidence_gate() {
        let r = ClassificationResult {
            label: PoseClass::Warrior,
            confidence: 0.7,
        };
        assert!(r.is_confident(0.7));
        assert!(!r.is_confident(0.71));
    }
}
