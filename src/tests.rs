mod strategy;
pub(crate) mod utils;
