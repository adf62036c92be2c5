//! The status board: what the dashboard currently shows.
//!
//! Rendering a snapshot only touches fields whose display text actually
//! changes. Each touched field is highlighted for a short pulse that clears
//! itself; untouched fields keep their text and pulse state, while their
//! colour follows the latest status.

use std::time::{Duration, Instant};

use focuswatch_types::{FocusStatus, GazeStatus, StatusSnapshot};

use super::labels::Locale;

/// One of the fields on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    Score,
    Gaze,
    Face,
}

/// Colour class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Focusing,
    Partial,
    NotFocusing,
    Neutral,
    Error,
}

impl Tone {
    pub fn for_status(status: &FocusStatus) -> Self {
        match status {
            FocusStatus::Focusing => Tone::Focusing,
            FocusStatus::PartiallyFocusing => Tone::Partial,
            FocusStatus::NotFocusing => Tone::NotFocusing,
            _ => Tone::Neutral,
        }
    }

    pub fn for_face(detected: bool) -> Self {
        if detected {
            Tone::Focusing
        } else {
            Tone::NotFocusing
        }
    }
}

/// Displayed state of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub text: String,
    pub tone: Tone,
    pulse_until: Option<Instant>,
}

impl FieldView {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Neutral,
            pulse_until: None,
        }
    }

    /// Whether the change highlight is still showing at `now`.
    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    /// Set new text and tone. Returns false when the text is already shown;
    /// the tone still follows but the field does not pulse.
    fn update(&mut self, text: &str, tone: Tone, pulse_until: Option<Instant>) -> bool {
        if self.text == text {
            self.tone = tone;
            return false;
        }
        self.text = text.to_string();
        self.tone = tone;
        self.pulse_until = pulse_until;
        true
    }
}

/// Everything the dashboard draws for one monitored child.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    locale: Locale,
    pulse: Duration,
    status: FieldView,
    score: FieldView,
    gaze: FieldView,
    face: FieldView,
    /// Progress bar width in percent.
    pub progress: u16,
    /// Whether the face row is part of this view.
    pub show_face: bool,
    verbatim: bool,
    in_error: bool,
    last_rendered: Option<Instant>,
}

impl StatusBoard {
    pub fn new(locale: Locale, pulse: Duration) -> Self {
        Self {
            locale,
            pulse,
            status: FieldView::new(locale.checking_status()),
            score: FieldView::new("0"),
            gaze: FieldView::new(locale.checking_gaze()),
            face: FieldView::new(locale.checking_gaze()),
            progress: 0,
            show_face: true,
            verbatim: false,
            in_error: false,
            last_rendered: None,
        }
    }

    /// Hide the face row (the parent endpoint does not report it).
    pub fn without_face(mut self) -> Self {
        self.show_face = false;
        self
    }

    /// Show unrecognised status and gaze values as the server sent them.
    ///
    /// The parent endpoint sends labels that are already translated.
    pub fn verbatim_labels(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn field(&self, field: Field) -> &FieldView {
        match field {
            Field::Status => &self.status,
            Field::Score => &self.score,
            Field::Gaze => &self.gaze,
            Field::Face => &self.face,
        }
    }

    /// Whether the error markers are currently displayed.
    pub fn in_error(&self) -> bool {
        self.in_error
    }

    /// When a snapshot was last rendered.
    pub fn last_rendered(&self) -> Option<Instant> {
        self.last_rendered
    }

    /// Show `snapshot`, touching only fields whose text differs.
    ///
    /// Returns the fields that changed, in board order.
    pub fn render(&mut self, snapshot: &StatusSnapshot, now: Instant) -> Vec<Field> {
        let pulse_until = Some(now + self.pulse);
        let locale = self.locale;
        let mut changed = Vec::new();

        let (status_text, tone) = match &snapshot.status {
            FocusStatus::Unrecognized(label) if self.verbatim && !label.trim().is_empty() => {
                let tone = Locale::status_for_label(label.trim())
                    .map_or(Tone::Neutral, |status| Tone::for_status(&status));
                (label.trim(), tone)
            }
            status => (locale.status_text(status), Tone::for_status(status)),
        };
        if self.status.update(status_text, tone, pulse_until) {
            changed.push(Field::Status);
        }

        let score_text = snapshot.concentration_score.to_string();
        if self.score.update(&score_text, tone, pulse_until) {
            self.progress = snapshot.progress_percent();
            changed.push(Field::Score);
        }

        let gaze_text = match &snapshot.gaze_status {
            GazeStatus::Unrecognized(label) if self.verbatim && !label.trim().is_empty() => {
                label.trim()
            }
            gaze => locale.gaze_text(gaze),
        };
        if self.gaze.update(gaze_text, Tone::Neutral, pulse_until) {
            changed.push(Field::Gaze);
        }

        if self.show_face
            && self.face.update(
                locale.face_text(snapshot.face_detected),
                Tone::for_face(snapshot.face_detected),
                pulse_until,
            )
        {
            changed.push(Field::Face);
        }

        self.in_error = false;
        self.last_rendered = Some(now);
        changed
    }

    /// Replace every field with the error markers.
    pub fn render_error(&mut self) {
        let locale = self.locale;
        self.status.update(locale.error_marker(), Tone::Error, None);
        self.score.update("0", Tone::Error, None);
        self.progress = 0;
        self.gaze.update(locale.error_marker(), Tone::Error, None);
        self.face.update(locale.unavailable_marker(), Tone::Error, None);
        self.in_error = true;
    }

    /// Whether any field is mid-pulse; the UI redraws faster while true.
    pub fn any_pulsing(&self, now: Instant) -> bool {
        [&self.status, &self.score, &self.gaze, &self.face]
            .iter()
            .any(|f| f.is_pulsing(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuswatch_types::StatusPayload;

    fn sample(score: u32) -> StatusSnapshot {
        StatusSnapshot::new(FocusStatus::Focusing, score, GazeStatus::Center, true)
    }

    fn board() -> StatusBoard {
        StatusBoard::new(Locale::En, Duration::from_millis(500))
    }

    #[test]
    fn test_initial_board_shows_checking() {
        let board = board();
        assert_eq!(board.field(Field::Status).text, "Checking status...");
        assert_eq!(board.field(Field::Score).text, "0");
        assert_eq!(board.progress, 0);
        assert!(board.last_rendered().is_none());
    }

    #[test]
    fn test_first_render_updates_every_field() {
        let mut board = board();
        let changed = board.render(&sample(82), Instant::now());

        assert_eq!(changed, vec![Field::Status, Field::Score, Field::Gaze, Field::Face]);
        assert_eq!(board.field(Field::Status).text, "Focusing");
        assert_eq!(board.field(Field::Status).tone, Tone::Focusing);
        assert_eq!(board.field(Field::Score).text, "82");
        assert_eq!(board.progress, 82);
        assert_eq!(board.field(Field::Gaze).text, "Center");
        assert_eq!(board.field(Field::Face).text, "Detected");
    }

    #[test]
    fn test_score_change_touches_only_score() {
        let mut board = board();
        let t0 = Instant::now();
        board.render(&sample(82), t0);

        let t1 = t0 + Duration::from_secs(2);
        let changed = board.render(&sample(83), t1);

        assert_eq!(changed, vec![Field::Score]);
        assert_eq!(board.field(Field::Score).text, "83");
        assert_eq!(board.progress, 83);
        assert!(board.field(Field::Score).is_pulsing(t1));
        assert!(!board.field(Field::Status).is_pulsing(t1));
        assert!(!board.field(Field::Gaze).is_pulsing(t1));
    }

    #[test]
    fn test_pulse_clears_after_duration() {
        let mut board = board();
        let t0 = Instant::now();
        board.render(&sample(50), t0);

        assert!(board.any_pulsing(t0 + Duration::from_millis(499)));
        assert!(!board.any_pulsing(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_same_text_is_not_touched() {
        let mut board = board();
        let t0 = Instant::now();
        board.render(&sample(50), t0);

        // Two unrecognised statuses render as the same "checking" text
        let mut a = sample(50);
        a.status = FocusStatus::from("Eyes closed");
        let mut b = a.clone();
        b.status = FocusStatus::from("Looking away");

        assert_eq!(board.render(&a, t0), vec![Field::Status]);
        assert!(board.render(&b, t0).is_empty());
    }

    #[test]
    fn test_error_markers_and_recovery() {
        let mut board = board();
        let t0 = Instant::now();
        board.render(&sample(82), t0);

        board.render_error();
        assert!(board.in_error());
        assert_eq!(board.field(Field::Status).text, "Error");
        assert_eq!(board.field(Field::Score).text, "0");
        assert_eq!(board.progress, 0);
        assert_eq!(board.field(Field::Gaze).text, "Error");
        assert_eq!(board.field(Field::Face).text, "Unavailable");
        assert_eq!(board.field(Field::Status).tone, Tone::Error);

        let changed = board.render(&sample(82), t0);
        assert_eq!(changed.len(), 4);
        assert!(!board.in_error());
        assert_eq!(board.progress, 82);
    }

    #[test]
    fn test_parent_board_skips_face() {
        let mut board = board().without_face();
        let changed = board.render(&sample(20), Instant::now());
        assert!(!changed.contains(&Field::Face));
    }

    #[test]
    fn test_recovery_to_zero_score_drops_error_tone() {
        let mut board = board();
        let t0 = Instant::now();
        let distracted = |score| {
            StatusSnapshot::new(FocusStatus::NotFocusing, score, GazeStatus::Center, true)
        };
        board.render(&distracted(40), t0);
        board.render_error();
        assert_eq!(board.field(Field::Score).tone, Tone::Error);

        let changed = board.render(&distracted(0), t0);
        assert!(!changed.contains(&Field::Score));
        assert!(!board.in_error());
        assert_eq!(board.field(Field::Score).text, "0");
        assert_eq!(board.field(Field::Score).tone, Tone::NotFocusing);
        assert!(!board.field(Field::Score).is_pulsing(t0));
    }

    #[test]
    fn test_status_change_recolours_unchanged_score() {
        let mut board = board();
        let t0 = Instant::now();
        board.render(&sample(50), t0);

        let t1 = t0 + Duration::from_secs(2);
        let mut distracted = sample(50);
        distracted.status = FocusStatus::NotFocusing;
        let changed = board.render(&distracted, t1);

        assert_eq!(changed, vec![Field::Status]);
        assert_eq!(board.field(Field::Score).tone, Tone::NotFocusing);
        assert!(!board.field(Field::Score).is_pulsing(t1));
    }

    #[test]
    fn test_parent_board_shows_translated_labels() {
        let body = r#"{
            "success": true,
            "child_code": "STU-40fb-c5ff",
            "child_name": "minji",
            "status": "집중",
            "concentration_score": 88,
            "gaze_status": "왼쪽 응시",
            "face_detected": false,
            "timestamp": "2024-05-01T10:00:00"
        }"#;
        let payload: StatusPayload = serde_json::from_str(body).unwrap();
        let snapshot = payload.into_snapshot().unwrap();

        let mut board = StatusBoard::new(Locale::Ko, Duration::from_millis(500))
            .without_face()
            .verbatim_labels();
        board.render(&snapshot, Instant::now());

        assert_eq!(board.field(Field::Status).text, "집중");
        assert_eq!(board.field(Field::Status).tone, Tone::Focusing);
        assert_eq!(board.field(Field::Score).text, "88");
        assert_eq!(board.field(Field::Gaze).text, "왼쪽 응시");
    }

    #[test]
    fn test_child_board_keeps_checking_for_unknown_labels() {
        let mut board = board();
        let mut snapshot = sample(10);
        snapshot.status = FocusStatus::from("집중");
        snapshot.gaze_status = GazeStatus::from("");
        board.render(&snapshot, Instant::now());

        assert_eq!(board.field(Field::Status).text, "Checking status...");
        assert_eq!(board.field(Field::Gaze).text, "Checking...");

        let mut parent = StatusBoard::new(Locale::Ko, Duration::from_millis(500)).verbatim_labels();
        parent.render(&snapshot, Instant::now());
        assert_eq!(parent.field(Field::Status).text, "집중");
        assert_eq!(parent.field(Field::Gaze).text, "확인 중...");
    }
}
