mod config;
mod mru;
mod session;
mod state;
mod tab;

pub use config::*;
pub use mru::*;
pub use session::*;
pub use state::*;
pub use tab::*;
