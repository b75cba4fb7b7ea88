//! Conversation engine: state machine, slots, parsers, and sessions

pub mod dispatch;
pub mod parse;
pub mod payload;
pub mod script;
pub mod session;
pub mod slots;
pub mod state;

pub use dispatch::{Dispatcher, Turn};
pub use payload::OrderPayload;
pub use session::{SessionRegistry, TurnAdmission};
pub use slots::{OrderSnapshot, SlotStore, StoredTurn};
pub use state::Step;
