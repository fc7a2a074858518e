// Domain layer: plain data and the ports through which the core reaches the outside world.

pub mod model;
pub mod ports;
