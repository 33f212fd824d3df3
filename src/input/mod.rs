use egui::Pos2;

mod gestures;

pub use gestures::{
    GestureConfig, GestureContext, GestureEvent, GestureInterpreter, ViewportUpdate,
};

/// Lifecycle phase of one touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// One finger on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    /// Screen-space position.
    pub pos: Pos2,
}

/// Page flip requested by a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNavigation {
    Next,
    Previous,
}
