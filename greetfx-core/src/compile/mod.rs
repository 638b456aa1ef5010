pub(crate) mod filter;
pub(crate) mod overlay;
