//! Two-button parameter menu for the brewpanel.
//!
//! This crate sits between [`brewpanel_input`] (debounced buttons and
//! commands) and [`brewpanel_params`] (the parameter repository). It decides
//! when the menu is visible, moves the cursor, and runs the single in-place
//! edit session that lets the same two buttons change a value instead of
//! the selection.
//!
//! # Architecture
//!
//! - **[`MenuActivationGate`]** opens the menu after a press followed by a
//!   full release, and closes it after an exit request once every button
//!   is released.
//! - **[`EditModeCoordinator`]** owns the one optional [`EditSession`]. While
//!   a session is open, `Previous`/`Next` step the snapshot value and never
//!   reach the cursor.
//! - **[`MenuController`]** runs one tick in a fixed order (input, gate,
//!   coordinator, navigation) and produces [`MenuEvent`]s and
//!   [`MenuFrame`]s for the renderer.
//!
//! ```text
//!  raw levels ──► InputPanel ──► MenuActivationGate
//!                     │                 │
//!                     └──► commands ──► EditModeCoordinator ──► ParameterRepository
//!                                       │
//!                                       └──► MenuCursor / actions
//! ```
//!
//! Menu content is data: parameters are added by registering a
//! [`ParamBinding`] `{id, label, step}` on [`MenuLines`].
//!
//! # Features
//!
//! - **`defmt`** — structured logging of gate transitions, edit sessions and
//!   repository failures. Forwards to the input and parameter crates.

#![no_std]

mod config;
mod controller;
mod cursor;
mod edit;
mod error;
mod frame;
mod gate;
mod lines;

pub use config::{Boundary, ExitPolicy, MenuConfig};
pub use controller::{MenuController, MenuEvent, MenuEvents, TickReport};
pub use cursor::MenuCursor;
pub use edit::{EditModeCoordinator, EditOutcome, EditSession};
pub use error::MenuError;
pub use frame::{FrameChanges, FrameLine, LineText, MenuFrame, LINE_TEXT_CAPACITY};
pub use gate::{GateState, GateTransition, MenuActivationGate};
pub use lines::{MenuAction, MenuLine, MenuLines, ParamBinding, MAX_LABEL_LEN, MAX_MENU_LINES};
