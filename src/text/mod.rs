pub(crate) mod glyph;
pub(crate) mod label;
pub(crate) mod mask;
pub(crate) mod raster;
pub(crate) mod svg;
