pub(crate) mod blit;
pub(crate) mod convert;
pub(crate) mod image;
pub(crate) mod raster;
