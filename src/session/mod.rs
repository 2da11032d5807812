#[allow(clippy::module_inception)]
pub(crate) mod session;
pub(crate) mod synth;
