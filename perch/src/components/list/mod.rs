//! Selection list - keyboard navigable options with checkbox-style selection.
//!
//! # Example
//!
//! ```ignore
//! use perch::prelude::*;
//!
//! let list = SelectionList::new().with_options(vec![
//!     ListOption::new("Inbox"),
//!     ListOption::new("Starred").with_selected(true),
//!     ListOption::new("Archive").with_disabled(true),
//! ]);
//!
//! list.focus();
//! list.keydown(&mut KeyEvent::new(Key::Space));
//!
//! assert_eq!(list.selected_values(), vec!["Starred", "Inbox"]);
//! ```

mod option;
mod state;

pub use option::{CheckboxPosition, FOCUSED_CLASS, ListOption, OptionEvent, OptionId};
pub use state::{ListId, SelectionList};
