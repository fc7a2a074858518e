// Adapters layer: concrete implementations of the domain ports (serial port, badge server, terminal).

pub mod console;
pub mod feedback;
pub mod http;
pub mod serial;
