//! 单分片请求描述：由调度方创建一次、被工作器消费一次。

use serde::{Deserialize, Serialize};

/// 分片字节区间 `[start, end]`，`end` 为 `None` 表示一直读到资源末尾。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRange {
    /// 起始偏移（含）
    pub start: u64,
    /// 结束偏移（含），`None` 表示不设上界
    pub end: Option<u64>,
}

impl ChunkRange {
    /// 整个资源：从 0 开始且不设上界。
    pub fn whole() -> Self {
        Self { start: 0, end: None }
    }

    /// 是否为 Range 请求。只有「从 0 开始且无上界」才视为整文件请求。
    ///
    /// 该判断同时决定是否发送 `Range` 头以及期望的成功状态码（206 或 200）。
    pub fn is_range_request(&self) -> bool {
        !(self.start == 0 && self.end.is_none())
    }

    /// 生成 `Range` 请求头的值；整文件请求返回 `None`。
    pub fn header_value(&self) -> Option<String> {
        if !self.is_range_request() {
            return None;
        }
        Some(match self.end {
            Some(end) => format!("bytes={}-{}", self.start, end),
            None => format!("bytes={}-", self.start),
        })
    }
}

/// 单分片请求描述。
///
/// 请求体只能被消费一次：工作器通过 [`RangeRequestSpec::take_body`] 取走所有权后即不再持有。
#[derive(Debug, Clone)]
pub struct RangeRequestSpec {
    url: String,
    range: ChunkRange,
    expected_total_size: Option<u64>,
    body: Option<Vec<u8>>,
    user_agent: String,
}

impl RangeRequestSpec {
    /// 创建整文件请求；可链式设置区间、期望总大小和请求体。
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            range: ChunkRange::whole(),
            expected_total_size: None,
            body: None,
            user_agent: user_agent.into(),
        }
    }

    /// 按有符号的旧约定构建：`end < 0` 表示无上界，`expected_total_size <= 0` 表示不校验总大小。
    ///
    /// 负的 `beg` 不合法，会被截断为 0 并记录警告；若同时 `end < 0`，结果就是整文件请求。
    pub fn from_legacy(
        url: impl Into<String>,
        user_agent: impl Into<String>,
        beg: i64,
        end: i64,
        expected_total_size: i64,
    ) -> Self {
        let url = url.into();
        if beg < 0 {
            log::warn!("{}: 起始偏移 {} 为负数，按 0 处理", url, beg);
        }
        let spec = Self::new(url, user_agent).range(
            beg.max(0) as u64,
            (end >= 0).then_some(end as u64),
        );
        if expected_total_size > 0 {
            spec.expected_total_size(expected_total_size as u64)
        } else {
            spec
        }
    }

    /// 设置字节区间。
    pub fn range(mut self, start: u64, end: Option<u64>) -> Self {
        self.range = ChunkRange { start, end };
        self
    }

    /// 设置期望的资源总大小；传 0 表示不校验。
    pub fn expected_total_size(mut self, size: u64) -> Self {
        self.expected_total_size = (size > 0).then_some(size);
        self
    }

    /// 设置请求体；存在请求体时使用 POST 并以定长方式上传。
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn chunk_range(&self) -> ChunkRange {
        self.range
    }

    pub fn expected_size(&self) -> Option<u64> {
        self.expected_total_size
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn is_range_request(&self) -> bool {
        self.range.is_range_request()
    }

    /// 取走请求体的所有权，之后本描述不再持有请求体。
    pub(crate) fn take_body(&mut self) -> Option<Vec<u8>> {
        self.body.take()
    }
}
