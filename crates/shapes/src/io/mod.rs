pub mod encode;
pub mod descriptor;

pub use encode::*;
pub use descriptor::*;
