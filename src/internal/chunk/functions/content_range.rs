//! `Content-Range` 解析与资源总大小推断。

/// 解析 `Content-Range` 的总大小：`<unit> <range>/<total>` 中最后一个 `/` 之后的非负整数。
///
/// 头不存在、没有 `/`、总大小为 `*` 或无法解析时返回 `None`（未知），这不是错误。
pub fn parse_content_range_total(value: Option<&str>) -> Option<u64> {
    let value = value?;
    let slash = value.rfind('/')?;
    value[slash + 1..].parse::<u64>().ok()
}

/// 推断资源总大小：优先使用 `Content-Range`，未知时回退到传输层给出的内容长度。
pub fn resolve_total_size(
    content_range: Option<&str>,
    content_length: Option<u64>,
) -> Option<u64> {
    parse_content_range_total(content_range).or(content_length)
}
