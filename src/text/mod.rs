pub mod chunking;
pub mod sentences;
pub mod talk_show;
pub mod timestamps;

pub use chunking::*;
pub use sentences::*;
pub use talk_show::*;
pub use timestamps::*;
