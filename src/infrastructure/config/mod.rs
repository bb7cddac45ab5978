//! Infrastructure configuration modules.

pub mod alert;
pub mod http;
pub mod logging;
pub mod settings;
pub mod state;
