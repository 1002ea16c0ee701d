pub mod binarize;
pub mod detection;
pub mod filter;
pub mod rasterize;
pub mod composite;
pub mod background;

pub use binarize::*;
pub use detection::*;
pub use filter::*;
pub use rasterize::*;
pub use composite::*;
pub use background::*;
