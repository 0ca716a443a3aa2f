pub(crate) mod animation;
pub(crate) mod scheduler;
pub(crate) mod teardown;
