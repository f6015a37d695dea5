pub mod domain;
pub mod fonts;
pub mod model;
