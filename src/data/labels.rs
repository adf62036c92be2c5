//! Display text for statuses, markers and fallback messages.
//!
//! Every status and gaze value maps to some text. Values the client does not
//! recognise show the "checking" text instead of an empty label.

use serde::Deserialize;

use focuswatch_types::{FocusStatus, GazeStatus};

use super::board::Field;
use crate::error::{ApiError, FetchError};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

/// User-facing operations that can fail with a server message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ChildLogin,
    ChildRegister,
    ParentLogin,
    ParentRegister,
    AddChild,
    Logout,
}

impl Locale {
    pub fn status_text(self, status: &FocusStatus) -> &'static str {
        match (self, status) {
            (Locale::En, FocusStatus::Focusing) => "Focusing",
            (Locale::En, FocusStatus::PartiallyFocusing) => "Partially focusing",
            (Locale::En, FocusStatus::NotFocusing) => "Distracted",
            (Locale::En, FocusStatus::NoFace) => "No face",
            (Locale::En, FocusStatus::Unknown) => "Unknown",
            (Locale::Ko, FocusStatus::Focusing) => "집중",
            (Locale::Ko, FocusStatus::PartiallyFocusing) => "부분 집중",
            (Locale::Ko, FocusStatus::NotFocusing) => "주의 산만",
            (Locale::Ko, FocusStatus::NoFace) => "얼굴 없음",
            (Locale::Ko, FocusStatus::Unknown) => "알 수 없음",
            (_, FocusStatus::Unrecognized(_)) => self.checking_status(),
        }
    }

    pub fn gaze_text(self, gaze: &GazeStatus) -> &'static str {
        match (self, gaze) {
            (Locale::En, GazeStatus::Center) => "Center",
            (Locale::En, GazeStatus::Left) => "Left",
            (Locale::En, GazeStatus::Right) => "Right",
            (Locale::En, GazeStatus::Up) => "Up",
            (Locale::En, GazeStatus::Down) => "Down",
            (Locale::En, GazeStatus::Unknown) => "Unknown",
            (Locale::Ko, GazeStatus::Center) => "정면",
            (Locale::Ko, GazeStatus::Left) => "왼쪽",
            (Locale::Ko, GazeStatus::Right) => "오른쪽",
            (Locale::Ko, GazeStatus::Up) => "위쪽",
            (Locale::Ko, GazeStatus::Down) => "아래쪽",
            (Locale::Ko, GazeStatus::Unknown) => "알 수 없음",
            (_, GazeStatus::Unrecognized(_)) => self.checking_gaze(),
        }
    }

    /// Find the status a translated label stands for, in either language.
    pub fn status_for_label(label: &str) -> Option<FocusStatus> {
        if label == "집중하지 않음" {
            return Some(FocusStatus::NotFocusing);
        }
        [
            FocusStatus::Focusing,
            FocusStatus::PartiallyFocusing,
            FocusStatus::NotFocusing,
            FocusStatus::NoFace,
            FocusStatus::Unknown,
        ]
        .into_iter()
        .find(|status| {
            [Locale::En, Locale::Ko]
                .iter()
                .any(|locale| locale.status_text(status) == label)
        })
    }

    pub fn face_text(self, detected: bool) -> &'static str {
        match (self, detected) {
            (Locale::En, true) => "Detected",
            (Locale::En, false) => "Not detected",
            (Locale::Ko, true) => "감지됨",
            (Locale::Ko, false) => "감지되지 않음",
        }
    }

    /// Heading shown above a board field.
    pub fn field_title(self, field: Field) -> &'static str {
        match (self, field) {
            (Locale::En, Field::Status) => "Status",
            (Locale::En, Field::Score) => "Concentration",
            (Locale::En, Field::Gaze) => "Gaze",
            (Locale::En, Field::Face) => "Face",
            (Locale::Ko, Field::Status) => "상태",
            (Locale::Ko, Field::Score) => "집중도",
            (Locale::Ko, Field::Gaze) => "시선",
            (Locale::Ko, Field::Face) => "얼굴 감지",
        }
    }

    pub fn checking_status(self) -> &'static str {
        match self {
            Locale::En => "Checking status...",
            Locale::Ko => "상태 확인 중...",
        }
    }

    pub fn checking_gaze(self) -> &'static str {
        match self {
            Locale::En => "Checking...",
            Locale::Ko => "확인 중...",
        }
    }

    /// Marker shown in status fields once polling has failed too often.
    pub fn error_marker(self) -> &'static str {
        match self {
            Locale::En => "Error",
            Locale::Ko => "오류 발생",
        }
    }

    /// Marker shown for face detection in the error state.
    pub fn unavailable_marker(self) -> &'static str {
        match self {
            Locale::En => "Unavailable",
            Locale::Ko => "확인 불가",
        }
    }

    /// Generic message for replies that could not be understood.
    pub fn server_error(self) -> &'static str {
        match self {
            Locale::En => "A server error occurred.",
            Locale::Ko => "서버 오류가 발생했습니다.",
        }
    }

    pub fn session_expired(self) -> &'static str {
        match self {
            Locale::En => "Session expired, please log in again.",
            Locale::Ko => "인증이 만료되었습니다. 다시 로그인해주세요.",
        }
    }

    /// Message used when the server rejected `action` without saying why.
    pub fn fallback(self, action: Action) -> &'static str {
        match (self, action) {
            (Locale::En, Action::ChildLogin) => "Face recognition failed.",
            (Locale::En, Action::ChildRegister) => "Face registration failed.",
            (Locale::En, Action::ParentLogin) => "Username or password is incorrect.",
            (Locale::En, Action::ParentRegister) => "Registration failed.",
            (Locale::En, Action::AddChild) => "Could not add the child.",
            (Locale::En, Action::Logout) => "Logout failed.",
            (Locale::Ko, Action::ChildLogin) => "얼굴 인식 실패",
            (Locale::Ko, Action::ChildRegister) => "얼굴 등록에 실패했습니다.",
            (Locale::Ko, Action::ParentLogin) => "아이디 또는 비밀번호가 일치하지 않습니다.",
            (Locale::Ko, Action::ParentRegister) => "회원가입 중 오류 발생.",
            (Locale::Ko, Action::AddChild) => "자녀 추가에 실패했습니다.",
            (Locale::Ko, Action::Logout) => "로그아웃 오류",
        }
    }

    /// What to tell the user when `action` failed with `err`.
    ///
    /// Server messages are shown as sent; a rejection without one gets the
    /// per-action fallback.
    pub fn api_error_message(self, action: Action, err: &ApiError) -> String {
        match err {
            ApiError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Rejected { .. } => self.fallback(action).to_string(),
            ApiError::Malformed(raw) if !raw.trim().is_empty() => {
                format!("{} {}", self.server_error(), raw.trim())
            }
            ApiError::Malformed(_) => self.server_error().to_string(),
            ApiError::Fetch(FetchError::SessionExpired) => self.session_expired().to_string(),
            ApiError::Fetch(FetchError::Malformed(_)) => self.server_error().to_string(),
            ApiError::Validation(e) => e.to_string(),
            ApiError::Fetch(e) => format!("{} ({})", self.fallback(action), e),
            ApiError::Session(e) => e.to_string(),
        }
    }
}
