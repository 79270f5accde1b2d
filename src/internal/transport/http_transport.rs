//! 传输层 trait：发送一个已准备好的请求，返回响应头与可读的响应体。

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use tokio::io::AsyncRead;

use super::transport_error::TransportError;

/// 响应体读取端。持有底层连接，drop 即释放连接。
pub type BodyReader = Box<dyn AsyncRead + Send + Unpin>;

/// 已准备好的请求：方法、URL、请求头与（可选）定长请求体。
#[derive(Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// 请求体的所有权随请求一起移交给传输层，发送后即释放。
    pub body: Option<Vec<u8>>,
}

/// 响应头信息。
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: HeaderMap,
    /// 传输层给出的内容长度，未知时为 `None`
    pub content_length: Option<u64>,
}

impl ResponseHead {
    /// 读取字符串形式的响应头；不存在或非 ASCII 时返回 `None`。
    pub fn header_str(&self, name: impl reqwest::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// 一次 HTTP 交换的结果。
pub struct TransportResponse {
    pub head: ResponseHead,
    pub body: BodyReader,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("head", &self.head)
            .field("body", &"<BodyReader>")
            .finish()
    }
}

/// HTTP 传输：每次调用对应一次独立的 HTTP 交换。
///
/// 连接与超时策略由实现决定；超时应以错误形式返回，而不是挂起。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: PreparedRequest,
    ) -> Result<TransportResponse, TransportError>;
}
