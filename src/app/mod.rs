//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! repository/domain layers. It implements the event-driven architecture
//! that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Web replies / timer events ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Debouncing on top of non-cancellable timers
//! - [`detail`]: Detail screen state
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`list`]: List screen state and the pagination/search controller
//! - [`modes`]: Screen and input mode types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod detail;
pub mod handler;
pub mod list;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use detail::DetailScreen;
pub use handler::{handle_event, Event};
pub use list::{ListPhase, ListScreen, PagingConfig, WebAccess};
pub use modes::{InputMode, Screen, SearchFocus};
pub use state::AppState;
