pub mod chunk;
pub mod transport;
