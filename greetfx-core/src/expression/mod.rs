pub(crate) mod ast;
pub(crate) mod eval;
pub(crate) mod render;
