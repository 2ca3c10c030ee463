pub(crate) mod build;
pub(crate) mod compare;
pub(crate) mod rules;
pub(crate) mod shared;
