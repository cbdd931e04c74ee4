pub(crate) mod measure;
pub(crate) mod shape;
