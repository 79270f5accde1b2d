//! 构建请求：校验 URL、设置请求头、移交请求体。

use reqwest::header::{
    CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA, RANGE, USER_AGENT,
};
use reqwest::Method;
use url::Url;

use crate::internal::chunk::structs::chunk_error::ChunkError;
use crate::internal::chunk::structs::range_request_spec::RangeRequestSpec;
use crate::internal::transport::http_transport::PreparedRequest;
use crate::internal::transport::transport_error::TransportError;

/// 解析目标 URL，只接受 http/https 的绝对地址。
pub(super) fn parse_target_url(raw: &str) -> Result<Url, ChunkError> {
    let url = Url::parse(raw).map_err(|e| ChunkError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(ChunkError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("不支持的协议: {}", scheme),
        }),
    }
}

/// 生成本次请求要发送的请求头：User-Agent、禁用缓存、按需设置 Range。
pub(super) fn build_headers(spec: &RangeRequestSpec) -> Result<HeaderMap, ChunkError> {
    let mut headers = HeaderMap::new();

    let user_agent =
        HeaderValue::from_str(spec.user_agent()).map_err(TransportError::from)?;
    headers.insert(USER_AGENT, user_agent);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    if let Some(range) = spec.chunk_range().header_value() {
        let value = HeaderValue::from_str(&range).map_err(TransportError::from)?;
        headers.insert(RANGE, value);
    }

    Ok(headers)
}

/// 构建请求并取走请求体的所有权；有请求体时使用 POST。
pub(super) fn build_request(spec: &mut RangeRequestSpec) -> Result<PreparedRequest, ChunkError> {
    let url = parse_target_url(spec.url())?;
    let headers = build_headers(spec)?;
    let body = spec.take_body();
    let method = if body.is_some() {
        Method::POST
    } else {
        Method::GET
    };

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}
