pub(crate) mod field;
pub(crate) mod particle;
pub(crate) mod sampler;
