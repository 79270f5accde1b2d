//! 传输层：把「一次 HTTP 交换」抽象成 trait，工作器只依赖该 trait。

pub mod http_transport;
pub mod reqwest_transport;
pub mod sticky_error_reader;
pub mod transport_error;
