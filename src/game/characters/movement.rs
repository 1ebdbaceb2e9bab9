// Movement events derived from authoritative updates

use log::trace;
use std::fmt;

/// Events understood by the character state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementEvent {
    Walk,
    Stop,
    Run,
    Hide,
    Jump,
    Grounded,
    StepUp,
    StepDown,
}

impl MovementEvent {
    /// Event name as used in the state tree
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Stop => "STOP",
            Self::Run => "RUN",
            Self::Hide => "HIDE",
            Self::Jump => "JUMP",
            Self::Grounded => "GROUNDED",
            Self::StepUp => "STEP_UP",
            Self::StepDown => "STEP_DOWN",
        }
    }
}

impl fmt::Display for MovementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement mode codes sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementMode {
    Grounded = 0,
    Jump = 1,
    StepUp = 2,
    StepDown = 3,
    Hide = 4,
}

impl MovementMode {
    /// Decode a mode code; unknown codes have no mode
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Grounded),
            1 => Some(Self::Jump),
            2 => Some(Self::StepUp),
            3 => Some(Self::StepDown),
            4 => Some(Self::Hide),
            _ => None,
        }
    }

    /// Event sent to the state machine for this mode
    pub fn event(&self) -> MovementEvent {
        match self {
            Self::Grounded => MovementEvent::Grounded,
            Self::Jump => MovementEvent::Jump,
            Self::StepUp => MovementEvent::StepUp,
            Self::StepDown => MovementEvent::StepDown,
            Self::Hide => MovementEvent::Hide,
        }
    }
}

/// What a position update means for the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub event: MovementEvent,
    /// New facing when the character moved horizontally (`true` when it
    /// moved left); `None` keeps the current facing
    pub flip_x: Option<bool>,
}

/// Infer walking or stopping from the horizontal displacement.
///
/// Vertical displacement never counts as movement.
pub fn translate_position(current_x: f32, new_x: f32) -> PositionUpdate {
    let update = if (new_x - current_x).abs() > 0.0 {
        PositionUpdate {
            event: MovementEvent::Walk,
            flip_x: Some(new_x < current_x),
        }
    } else {
        PositionUpdate {
            event: MovementEvent::Stop,
            flip_x: None,
        }
    };
    trace!("x {} -> {}: {:?}", current_x, new_x, update);
    update
}
