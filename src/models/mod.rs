pub mod politician;
pub mod protocol;
pub mod sample;

pub use politician::*;
pub use protocol::*;
pub use sample::*;
