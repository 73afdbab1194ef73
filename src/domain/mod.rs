// Domain layer: patient records, dispatch results and the config port. No I/O here.

pub mod model;
pub mod ports;
