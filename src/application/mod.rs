//! Application layer: the two firmware main loops

pub mod access_panel;
pub mod meeting_calc;

pub use access_panel::{AccessPanel, PanelState, Passcode, ResetCause, Stages, Switches};
pub use meeting_calc::{EntryBuffer, MeetingCalc, Meter};
