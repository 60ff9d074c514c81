//! CPU raster output: the owned drawing surface and the contain-fit blit the
//! player draws frames with.

pub mod blit;
pub mod surface;
