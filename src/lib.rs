pub mod collision;
pub mod core;
pub mod geom;
pub mod shape;
pub mod util;
