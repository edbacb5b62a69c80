use furi_core::speech::Utterance;

/// Page coordinates (viewport position plus scroll offset), in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Viewport-relative bounding box of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Where the selection sits and how far the page is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionGeometry {
    pub bounds: Rect,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Monotonically assigned per trigger activation; a response is only applied
/// if its id is still the one the popup waits for.
pub type RequestId = u64;

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Page,
    TriggerButton,
    Popup,
}

/// Inputs to the controller's transition function.
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    /// Pointer released after selecting; `text` is the raw selection.
    SelectionEnd {
        text: String,
        geometry: SelectionGeometry,
        target: EventTarget,
    },
    /// Pointer pressed somewhere; outside our UI this dismisses everything.
    PointerDown { target: EventTarget },
    /// The trigger button was activated with the current selection text.
    TriggerActivated { text: String },
    /// A background annotation finished.
    AnnotationReady { request: RequestId, html: String },
    /// The popup's speak control was used.
    SpeakRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    ButtonVisible {
        position: Position,
    },
    PopupLoading {
        text: String,
        request: RequestId,
        anchor: Position,
    },
    PopupShown {
        text: String,
        html: String,
        anchor: Position,
    },
}

impl UiState {
    /// Position of the trigger button whenever it is on screen.
    pub fn button_position(&self) -> Option<Position> {
        match self {
            Self::Idle => None,
            Self::ButtonVisible { position } => Some(*position),
            Self::PopupLoading { anchor, .. } | Self::PopupShown { anchor, .. } => Some(*anchor),
        }
    }

    pub fn popup_text(&self) -> Option<&str> {
        match self {
            Self::PopupLoading { text, .. } | Self::PopupShown { text, .. } => Some(text),
            Self::Idle | Self::ButtonVisible { .. } => None,
        }
    }
}

/// Trigger button action.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    Keep,
    Show(Position),
    Hide,
}

/// Popup surface action.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    Keep,
    /// Show the popup with the interim loading message.
    Loading { position: Position, message: String },
    Show { position: Position, html: String },
    Hide,
}

/// Work the caller must start on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub id: RequestId,
    pub text: String,
}

/// Result of one transition, applied by the host to its surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct UiResponse {
    pub button: ButtonAction,
    pub popup: PopupAction,
    pub request: Option<AnnotationRequest>,
    /// Fire-and-forget speech side effect.
    pub speak: Option<Utterance>,
}

impl UiResponse {
    pub(crate) fn unchanged() -> Self {
        Self {
            button: ButtonAction::Keep,
            popup: PopupAction::Keep,
            request: None,
            speak: None,
        }
    }

    pub(crate) fn hidden() -> Self {
        Self {
            button: ButtonAction::Hide,
            popup: PopupAction::Hide,
            ..Self::unchanged()
        }
    }

    pub fn is_unchanged(&self) -> bool {
        *self == Self::unchanged()
    }
}
