//! 基于 reqwest 的默认传输实现。

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::Client;
use tokio_util::io::StreamReader;

use super::http_transport::{
    HttpTransport, PreparedRequest, ResponseHead, TransportResponse,
};
use super::sticky_error_reader::StickyErrorReader;
use super::transport_error::TransportError;

/// 建立连接的超时时间
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// 两次读取之间的超时时间
pub const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// reqwest 传输。`Client` 内部是 Arc，clone 开销很小，可在多个工作器间共享。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 使用固定的连接/读取超时创建客户端。
    ///
    /// 关闭透明解压，保证 `Content-Length` 与实际收到的字节一致。
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .no_gzip()
            .build()?;
        Ok(Self { client })
    }

    /// 复用外部已配置好的客户端。
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: PreparedRequest,
    ) -> Result<TransportResponse, TransportError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            // Vec<u8> 转成定长请求体，reqwest 会据此设置 Content-Length
            builder = builder.body(body);
        }

        let resp = builder.send().await?;

        let head = ResponseHead {
            status: resp.status().as_u16(),
            headers: resp.headers().clone(),
            content_length: resp.content_length(),
        };

        // 响应体出错后不可续读，错误必须保持到读取结束
        let stream = Box::pin(resp.bytes_stream().map_err(io::Error::other));
        Ok(TransportResponse {
            head,
            body: Box::new(StickyErrorReader::new(StreamReader::new(stream))),
        })
    }
}
