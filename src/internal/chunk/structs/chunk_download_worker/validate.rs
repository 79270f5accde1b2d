//! 响应校验：状态码与资源总大小。

use reqwest::header::{CONTENT_RANGE, HeaderMap};

use crate::internal::chunk::functions::content_range::resolve_total_size;
use crate::internal::chunk::structs::chunk_error::ChunkError;
use crate::internal::chunk::structs::range_request_spec::RangeRequestSpec;
use crate::internal::transport::http_transport::ResponseHead;

const HTTP_OK: u16 = 200;
const HTTP_PARTIAL_CONTENT: u16 = 206;

/// Range 请求必须返回 206，整文件请求必须返回 200。
pub(super) fn validate_status(
    spec: &RangeRequestSpec,
    head: &ResponseHead,
    sent_headers: HeaderMap,
) -> Result<(), ChunkError> {
    let expected = if spec.is_range_request() {
        HTTP_PARTIAL_CONTENT
    } else {
        HTTP_OK
    };

    if head.status == expected {
        return Ok(());
    }

    log::warn!(
        "{}: 服务器返回状态码 {}（期望 {}），放弃下载。已发送请求头: {:?}",
        spec.url(),
        head.status,
        expected,
        sent_headers
    );
    Err(ChunkError::UnexpectedStatus {
        status: head.status,
        expected,
        sent_headers,
    })
}

/// 设置了期望总大小时，总大小必须完全一致；无法确定总大小同样视为不一致，
/// 以免把网关或代理返回的页面当成目标文件。
pub(super) fn validate_total_size(
    spec: &RangeRequestSpec,
    head: &ResponseHead,
) -> Result<(), ChunkError> {
    let Some(expected) = spec.expected_size() else {
        return Ok(());
    };

    let actual = resolve_total_size(head.header_str(CONTENT_RANGE), head.content_length);
    if actual == Some(expected) {
        return Ok(());
    }

    log::warn!(
        "{}: 文件大小不符（收到 {:?}，期望 {}），放弃下载",
        spec.url(),
        actual,
        expected
    );
    Err(ChunkError::SizeMismatch { expected, actual })
}
