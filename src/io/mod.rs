pub mod input;
pub mod layout;
pub mod listing;
pub mod output;
pub mod protocol;

pub use input::*;
pub use layout::*;
pub use listing::*;
pub use output::*;
pub use protocol::*;
