pub mod command;
pub mod event;
pub mod request;

pub use command::{Command, MruInfo, Response, SessionInfo, TabDescriptor};
pub use event::{HostEvent, TabInfo, WindowInfo};
pub use request::{HostRequest, RequestFilter, SubscribeRequest};
