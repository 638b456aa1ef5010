pub(crate) mod ease;
pub(crate) mod idle;
pub(crate) mod phase;
pub(crate) mod size;
pub(crate) mod timeline;
