//! Snapshot change detection.

use focuswatch_types::StatusSnapshot;

/// Returns true when `incoming` must be rendered.
///
/// Compares the four fields one by one. With no previous snapshot the answer
/// is always true, so the first successful poll always renders.
pub fn has_changed(previous: Option<&StatusSnapshot>, incoming: &StatusSnapshot) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    previous.status != incoming.status
        || previous.concentration_score != incoming.concentration_score
        || previous.gaze_status != incoming.gaze_status
        || previous.face_detected != incoming.face_detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuswatch_types::{FocusStatus, GazeStatus};

    fn sample() -> StatusSnapshot {
        StatusSnapshot::new(FocusStatus::Focusing, 82, GazeStatus::Center, true)
    }

    #[test]
    fn test_first_snapshot_always_changes() {
        assert!(has_changed(None, &sample()));
        assert!(has_changed(None, &StatusSnapshot::default()));
    }

    #[test]
    fn test_identical_snapshot_is_unchanged() {
        let a = sample();
        assert!(!has_changed(Some(&a), &a));
        assert!(!has_changed(Some(&a), &a.clone()));
    }

    #[test]
    fn test_each_field_counts() {
        let base = sample();

        let mut other = base.clone();
        other.status = FocusStatus::PartiallyFocusing;
        assert!(has_changed(Some(&base), &other));

        let mut other = base.clone();
        other.concentration_score = 83;
        assert!(has_changed(Some(&base), &other));

        let mut other = base.clone();
        other.gaze_status = GazeStatus::Left;
        assert!(has_changed(Some(&base), &other));

        let mut other = base.clone();
        other.face_detected = false;
        assert!(has_changed(Some(&base), &other));
    }

    #[test]
    fn test_distinct_unrecognized_values_differ() {
        let mut a = sample();
        a.status = FocusStatus::from("Eyes closed");
        let mut b = sample();
        b.status = FocusStatus::from("Face not detected");

        assert!(has_changed(Some(&a), &b));
        assert!(!has_changed(Some(&a), &a.clone()));
    }

    #[test]
    fn test_agrees_with_equality_on_all_field_combinations() {
        let statuses = [FocusStatus::Focusing, FocusStatus::NoFace];
        let scores = [0, 82];
        let gazes = [GazeStatus::Center, GazeStatus::Up];
        let faces = [true, false];

        let mut all = Vec::new();
        for s in &statuses {
            for score in scores {
                for g in &gazes {
                    for face in faces {
                        all.push(StatusSnapshot::new(s.clone(), score, g.clone(), face));
                    }
                }
            }
        }

        for a in &all {
            for b in &all {
                assert_eq!(has_changed(Some(a), b), a != b);
            }
        }
    }
}
