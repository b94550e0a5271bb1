//! # TUI Components
//!
//! All UI components for the triage panel.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: endpoint and status line
//! - `ConfigNotice`: banner shown while the service URL is unset
//! - `ControlBar`: key hints and the submit control label
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `MessageEditor`: ordered list of editable customer messages
//! - `TriagePanel`: scrollable result, error or placeholder
//!
//! Stateful components split into a persistent `*State` owned by `TuiState`
//! and a transient wrapper built per frame with borrowed props.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── config_notice.rs
//! ├── control_bar.rs
//! ├── triage_panel.rs
//! └── message_editor/   (editor, cursor, wrapping)
//! ```

mod config_notice;
mod control_bar;
mod title_bar;

pub mod message_editor;
pub mod triage_panel;

pub use config_notice::{ConfigNotice, NOTICE_HEIGHT};
pub use control_bar::ControlBar;
pub use message_editor::{EditorEvent, MessageEditor, MessageEditorState};
pub use title_bar::TitleBar;
pub use triage_panel::{TriagePanel, TriagePanelState};
