pub mod stage0_links;
pub mod stage1_speeches;
pub mod stage2_clean;
pub mod stage3_assemble;

pub use stage0_links::*;
pub use stage1_speeches::*;
pub use stage2_clean::*;
pub use stage3_assemble::*;
