// Domain layer: models and ports. Components under core depend on these, never the reverse.

pub mod model;
pub mod ports;
