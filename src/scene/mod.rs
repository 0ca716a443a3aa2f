pub(crate) mod banner;
pub(crate) mod config;
pub(crate) mod metadata;
