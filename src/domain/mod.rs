// Domain layer: models, ports and the export transform. No I/O here.

pub mod exporter;
pub mod model;
pub mod ports;
