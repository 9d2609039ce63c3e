pub mod language;
pub mod orchestrator;
pub mod preprocess;
pub mod session;
pub mod speech;
pub mod state;

pub use orchestrator::Orchestrator;
pub use session::{Completion, FlowRequest, FlowResult, Outcome, PendingCall, Rejection, Session};
pub use speech::{SpeechError, Speaker};
pub use state::{FlowState, Translation};
