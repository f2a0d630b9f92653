mod bridge;
mod mirror;

pub use bridge::BridgeManipulator;
pub use mirror::TabMirror;
