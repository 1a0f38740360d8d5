//! Event system: input model, crossterm adapter, hit-testing, dispatch,
//! focus order and the cross-thread queue.

pub mod dispatch;
pub mod focus;
pub mod hit;
pub mod input;
pub mod queue;

pub use dispatch::{DispatchOutcome, Dispatcher, Phase};
pub use focus::FocusChain;
pub use hit::{hit_test, Hit};
pub use input::{translate, Event, Key, KeyEvent, Modifiers, PointerButton};
pub use queue::{EventQueue, EventSender};
