// Domain layer: core models and ports (interfaces). No dependencies on the
// process or config adapters.

pub mod model;
pub mod ports;
