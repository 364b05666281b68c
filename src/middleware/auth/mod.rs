pub mod bypass;
pub mod gate;

pub use bypass::BypassList;
pub use gate::{AuthGate, GateDecision};
