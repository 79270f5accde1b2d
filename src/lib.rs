/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 单分片下载：请求描述、工作器、结果接收端与并发池。
pub mod chunk {
    use crate::internal;
    // 结构体模型
    pub use internal::chunk::structs::*;
    // 结果接收端、取消探针、分块发射
    pub use internal::chunk::traits::*;
    // 纯函数与流读取
    pub use internal::chunk::functions::adaptive_reader::*;
    pub use internal::chunk::functions::content_range::*;
}

/// HTTP 传输层：对外提供 trait 以便替换实现，默认实现基于 reqwest。
pub mod transport {
    use crate::internal;
    pub use internal::transport::http_transport::*;
    pub use internal::transport::reqwest_transport::*;
    pub use internal::transport::sticky_error_reader::*;
    pub use internal::transport::transport_error::*;
}
