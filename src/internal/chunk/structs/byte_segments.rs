//! 分片回传的分段字节：按 offset 排序，支持按偏移读取与连续性检查。

/// 单段字节：在整个资源中的起始偏移及其数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSegment {
    /// 该段在整个资源中的起始偏移（字节）
    pub offset: u64,
    /// 该段的数据
    pub data: Vec<u8>,
}

impl ByteSegment {
    /// 该段之后的第一个偏移。
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.data.len() as u64)
    }
}

/// 分段字节集合，各段按 `offset` 升序。
#[derive(Debug, Clone, Default)]
pub struct ByteSegments {
    segments: Vec<ByteSegment>,
    /// 最后一段的结束偏移，或 0
    total_len: u64,
}

impl ByteSegments {
    /// 从任意顺序的分段构建，内部按 offset 排序。不校验重叠。
    pub fn new(mut segments: Vec<ByteSegment>) -> Self {
        segments.sort_by_key(|s| s.offset);
        let total_len = segments.iter().map(ByteSegment::end).max().unwrap_or(0);
        Self {
            segments,
            total_len,
        }
    }

    pub fn segments(&self) -> &[ByteSegment] {
        &self.segments
    }

    /// 覆盖范围的结束偏移。
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// 各段数据长度之和。
    pub fn byte_count(&self) -> u64 {
        self.segments.iter().map(|s| s.data.len() as u64).sum()
    }

    /// 从 `start` 起各段首尾相接：无空洞、无重叠。
    pub fn is_contiguous_from(&self, start: u64) -> bool {
        let mut expected = start;
        for seg in &self.segments {
            if seg.offset != expected {
                return false;
            }
            expected = seg.end();
        }
        true
    }

    /// 按偏移读取：从 `offset` 起最多读 `len` 字节，返回新分配的字节。
    /// 若 `offset >= total_len` 返回空 Vec；若超出末尾则只读到末尾；空洞部分被跳过。
    pub fn read_at(&self, offset: u64, len: usize) -> Vec<u8> {
        if offset >= self.total_len || len == 0 {
            return Vec::new();
        }
        let end = offset.saturating_add(len as u64).min(self.total_len);
        let mut out = Vec::with_capacity((end - offset) as usize);

        for seg in &self.segments {
            let seg_end = seg.end();
            if seg_end <= offset || seg.offset >= end {
                continue;
            }
            let read_start = (offset.max(seg.offset) - seg.offset) as usize;
            let read_end = (end.min(seg_end) - seg.offset) as usize;
            out.extend_from_slice(&seg.data[read_start..read_end]);
        }
        out
    }
}
