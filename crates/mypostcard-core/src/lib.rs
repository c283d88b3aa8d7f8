pub mod consts;
pub mod error;
pub mod state;
pub mod geometry;
pub mod filter;
pub mod scene;
pub mod template;
pub mod fonts;
pub mod raster;
pub mod export;
