pub(crate) mod loader;
pub(crate) mod model;
pub(crate) mod preview;
