//! 单分片下载领域模块：一次 HTTP 交换 + 响应校验 + 流式回传 + 唯一一次终态上报。
//!
//! 对外导出以 [`crate::chunk`] 为准，此处仅做模块划分。

pub mod functions;
pub mod structs;
pub mod traits;
