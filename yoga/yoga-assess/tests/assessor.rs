//! End-to-end tests for the assessment pipeline with counting test doubles.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;
use yoga_assess::{
    AssessError, Assessor, AssessorConfig, DEFAULT_CONFIDENCE_THRESHOLD, Exclusive,
    LandmarkEstimator, LandmarkEstimatorMut, ReplayEstimator,
};
use yoga_models::{ClassificationAdapter, ModelError, PoseClassifier, ScoreModel};
use yoga_types::{
    AssessmentResponse, ChannelOrder, ClassificationResult, ImageTensor, InputSpec, Joint,
    LandmarkPoint, PoseClass, RgbFrame, Skeleton,
};

// =============================================================================
// Test doubles
// =============================================================================

/// Replays a fixed result and counts calls.
struct CountingEstimator {
    skeleton: Option<Skeleton>,
    calls: AtomicUsize,
}

impl CountingEstimator {
    fn new(skeleton: Option<Skeleton>) -> Self {
        Self {
            skeleton,
            calls: AtomicUsize::new(0),
        }
    }
}

impl LandmarkEstimator for CountingEstimator {
    fn extract(&self, _: &RgbFrame) -> yoga_assess::Result<Option<Skeleton>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.skeleton.clone())
    }
}

/// Returns a fixed classification, records the tensors it sees, and
/// counts calls.
struct StubClassifier {
    spec: InputSpec,
    label: PoseClass,
    confidence: f64,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubClassifier {
    fn new(label: PoseClass, confidence: f64) -> Self {
        Self {
            spec: InputSpec::square(32),
            label,
            confidence,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn with_spec(mut self, spec: InputSpec) -> Self {
        self.spec = spec;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PoseClassifier for StubClassifier {
    fn input_spec(&self) -> InputSpec {
        self.spec
    }

    fn classify(&self, tensor: &ImageTensor) -> yoga_models::Result<ClassificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(tensor.describe());
        Ok(ClassificationResult::new(self.label, self.confidence).unwrap())
    }
}

/// Advertises one input geometry but wraps a model that needs another.
struct MisreportedSpec<M> {
    advertised: InputSpec,
    inner: ClassificationAdapter<M>,
}

impl<M: ScoreModel> PoseClassifier for MisreportedSpec<M> {
    fn input_spec(&self) -> InputSpec {
        self.advertised
    }

    fn classify(&self, tensor: &ImageTensor) -> yoga_models::Result<ClassificationResult> {
        self.inner.classify(tensor)
    }
}

struct Uniform(InputSpec);

impl ScoreModel for Uniform {
    fn input_spec(&self) -> InputSpec {
        self.0
    }

    fn scores(&self, _: &ImageTensor) -> yoga_models::Result<Vec<f32>> {
        Ok(vec![0.2; PoseClass::COUNT])
    }
}

/// An estimator that keeps mutable state between calls.
struct Sequenced {
    frames: usize,
    skeleton: Skeleton,
}

impl LandmarkEstimatorMut for Sequenced {
    fn extract(&mut self, _: &RgbFrame) -> yoga_assess::Result<Option<Skeleton>> {
        self.frames += 1;
        Ok(Some(self.skeleton.clone()))
    }
}

struct Broken;

impl LandmarkEstimator for Broken {
    fn extract(&self, _: &RgbFrame) -> yoga_assess::Result<Option<Skeleton>> {
        Err(AssessError::estimator("pose model not loaded"))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn polar(origin: (f32, f32), degrees: f32, length: f32) -> (f32, f32) {
    let r = degrees.to_radians();
    (origin.0 + length * r.cos(), origin.1 + length * r.sin())
}

/// A left-side skeleton with elbow 90, knee 170, and back 140 degrees.
fn slouched_skeleton() -> Skeleton {
    let (elbow, knee, back) = (90.5_f32, 170.5_f32, 140.5_f32);
    let hip = (0.5, 0.6);
    let shoulder = polar(hip, -90.0, 0.3);
    let knee_pos = polar(hip, -90.0 + back, 0.25);
    let ankle = polar(knee_pos, 90.0 + back - knee, 0.25);
    let elbow_pos = polar(shoulder, 0.0, 0.15);
    let wrist = polar(elbow_pos, 180.0 - elbow, 0.15);

    let point = |joint, (x, y): (f32, f32)| LandmarkPoint::new(joint, x, y, 0.95);
    Skeleton::from_points(vec![
        point(Joint::LeftShoulder, shoulder),
        point(Joint::LeftElbow, elbow_pos),
        point(Joint::LeftWrist, wrist),
        point(Joint::LeftHip, hip),
        point(Joint::LeftKnee, knee_pos),
        point(Joint::LeftAnkle, ankle),
    ])
    .unwrap()
}

fn frame() -> RgbFrame {
    RgbFrame::filled(120, 90, [180, 140, 100]).unwrap()
}

const ALL_TIPS: [&str; 3] = [
    "Straighten your arms.",
    "Bend your knees slightly.",
    "Keep your back straight.",
];

// =============================================================================
// Short-circuit on no detection
// =============================================================================

#[test]
fn no_person_never_invokes_classifier() {
    let assessor = Assessor::new(
        CountingEstimator::new(None),
        StubClassifier::new(PoseClass::Tree, 0.873),
    );

    let err = assessor.assess(&frame()).unwrap_err();
    assert!(matches!(err, AssessError::NoPersonDetected));
    assert_eq!(assessor.estimator().calls.load(Ordering::SeqCst), 1);
    assert_eq!(assessor.classifier().calls(), 0);
}

#[test]
fn no_person_is_a_structured_response() {
    let assessor = Assessor::new(
        ReplayEstimator::nobody(),
        StubClassifier::new(PoseClass::Tree, 0.873),
    );

    let response = assessor.respond(&frame()).unwrap();
    assert!(response.is_error());
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "No person detected"})
    );
    assert_eq!(assessor.classifier().calls(), 0);
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn tree_at_87_3_percent() {
    let assessor = Assessor::new(
        ReplayEstimator::detected(slouched_skeleton()),
        StubClassifier::new(PoseClass::Tree, 0.873),
    );

    let assessment = assessor.assess(&frame()).unwrap();
    assert_eq!(assessment.pose, PoseClass::Tree);
    assert_eq!(assessment.confidence, 87.3);
    assert_eq!(assessment.feedback, ALL_TIPS);

    let response = assessor.respond(&frame()).unwrap();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "pose": "Tree",
            "confidence": 87.3,
            "feedback": ALL_TIPS,
        })
    );
}

#[test]
fn classifier_sees_its_own_geometry() {
    let spec = InputSpec::square(24).with_channel_order(ChannelOrder::Bgr);
    let assessor = Assessor::new(
        ReplayEstimator::detected(slouched_skeleton()),
        StubClassifier::new(PoseClass::Cobra, 0.5).with_spec(spec),
    );

    assessor.assess(&frame()).unwrap();
    let seen = assessor.classifier().seen.lock().unwrap().clone();
    assert_eq!(seen, vec!["24x24x3 bgr".to_string()]);
}

#[test]
fn partial_skeleton_skips_unmeasurable_rules() {
    let mut skeleton = slouched_skeleton();
    skeleton.remove(Joint::LeftAnkle);

    let assessor = Assessor::new(
        ReplayEstimator::detected(skeleton),
        StubClassifier::new(PoseClass::Chair, 0.41),
    );

    let assessment = assessor.assess(&frame()).unwrap();
    assert_eq!(
        assessment.feedback,
        vec!["Straighten your arms.", "Keep your back straight."]
    );
    assert_eq!(assessment.confidence, 41.0);
}

#[test]
fn confidence_rounds_to_two_decimals() {
    let assessor = Assessor::new(
        ReplayEstimator::detected(slouched_skeleton()),
        StubClassifier::new(PoseClass::Warrior, 0.123_456),
    );
    assert_eq!(assessor.assess(&frame()).unwrap().confidence, 12.35);
}

#[test]
fn held_follows_configured_threshold() {
    let assessor = Assessor::new(
        ReplayEstimator::detected(slouched_skeleton()),
        StubClassifier::new(PoseClass::Tree, 0.9),
    );
    assert_eq!(assessor.confidence_threshold(), DEFAULT_CONFIDENCE_THRESHOLD);

    let at_bar = ClassificationResult::new(PoseClass::Tree, 0.7).unwrap();
    let below = ClassificationResult::new(PoseClass::Tree, 0.699).unwrap();
    assert!(assessor.is_held(&at_bar));
    assert!(!assessor.is_held(&below));

    let config = AssessorConfig::default().with_confidence_threshold(0.8);
    let strict = assessor.with_confidence_threshold(config.confidence_threshold);
    assert!(!strict.is_held(&at_bar));
    assert!(strict.is_held(&ClassificationResult::new(PoseClass::Tree, 0.8).unwrap()));
}

// =============================================================================
// Hard failures
// =============================================================================

#[test]
fn shape_mismatch_is_a_hard_error() {
    let classifier = MisreportedSpec {
        advertised: InputSpec::square(8),
        inner: ClassificationAdapter::new(Uniform(InputSpec::square(16))),
    };
    let assessor = Assessor::new(ReplayEstimator::detected(slouched_skeleton()), classifier);

    assert!(matches!(
        assessor.assess(&frame()),
        Err(AssessError::Classification(ModelError::InvalidInputShape { .. }))
    ));
    assert!(assessor.respond(&frame()).is_err());
}

#[test]
fn estimator_failure_is_a_hard_error() {
    let assessor = Assessor::new(Broken, StubClassifier::new(PoseClass::Tree, 0.9));

    assert!(matches!(
        assessor.respond(&frame()),
        Err(AssessError::Estimator(_))
    ));
    assert_eq!(assessor.classifier().calls(), 0);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_requests_share_one_assessor() {
    let estimator = Arc::new(Exclusive::new(Sequenced {
        frames: 0,
        skeleton: slouched_skeleton(),
    }));
    let assessor = Arc::new(Assessor::new(
        Arc::clone(&estimator),
        StubClassifier::new(PoseClass::DownwardDog, 0.66),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let assessor = Arc::clone(&assessor);
            thread::spawn(move || {
                (0..5)
                    .map(|_| assessor.respond(&frame()).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for response in handle.join().unwrap() {
            let assessment = response.assessment().unwrap();
            assert_eq!(assessment.pose, PoseClass::DownwardDog);
            assert_eq!(assessment.feedback, ALL_TIPS);
        }
    }

    assert_eq!(assessor.classifier().calls(), 20);
    drop(assessor);

    let sequenced = Arc::try_unwrap(estimator).ok().unwrap().into_inner().unwrap();
    assert_eq!(sequenced.frames, 20);
}

#[test]
fn responses_match_wire_shape() {
    let detected: AssessmentResponse = serde_json::from_value(json!({
        "pose": "Cobra",
        "confidence": 55.5,
        "feedback": ["Perfect alignment! Keep it up."],
    }))
    .unwrap();
    assert_eq!(detected.assessment().unwrap().pose, PoseClass::Cobra);

    let nobody: AssessmentResponse =
        serde_json::from_value(json!({"error": "No person detected"})).unwrap();
    assert_eq!(nobody, AssessmentResponse::no_person_detected());
}
