/// Lifecycle of one capability's result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState<T> {
    #[default]
    Idle,
    InFlight,
    Success(T),
    Failed,
}

impl<T> FlowState<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FlowState::InFlight)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FlowState::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// The translation currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub original: String,
    pub text: String,
    pub language: String,
}
