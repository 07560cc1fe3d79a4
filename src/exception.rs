// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了解析标头值与执行内容协商时可能出现的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：涵盖了语法错误（媒体类型、参数、Link 框架）、严格模式下的语义错误，
//!   以及内容协商失败。
//! - **携带上下文**：每个变体都保存了出错的原始片段，便于日志定位。
//! - **用户友好**：通过实现 `std::fmt::Display`，确保错误信息可以被安全地记录到日志或返回给调用方。

use std::fmt;

/// 解析或协商过程中发生的异常类型。
///
/// 该枚举通常作为 `Result` 的 `Err` 部分返回，用于指示处理失败的具体原因。
#[derive(Debug, Clone, PartialEq)]
pub enum Exception {
    /// 媒体类型无法拆分为 `type/subtype`（例如 `Content-Type: *`）。携带原始值。
    MalformedContentType(String),
    /// 参数片段缺少 `=`。携带出错的片段。
    MalformedToken(String),
    /// `q` 参数无法解析为浮点数。携带原始的 `q` 值。
    InvalidQuality(String),
    /// Link 标头缺少 `<...>` 框架，或参数列表没有以 `;` 开头。
    /// 第一个字段为原因描述，第二个字段为尚未消费的剩余输入。
    MalformedLinkValue(String, String),
    /// 严格模式下检测到非标准的标头内容（例如 `Forwarded` 中的非标准参数名）。
    StrictHeaderParsingFailure {
        header_name: String,
        header_value: String,
    },
    /// 内容协商没有找到可接受的候选类型，包括质量值为 0 的精确匹配。
    NoMatch,
    /// 调用方传入了不合法的参数（例如默认类型不在可用列表中）。
    InvalidArgument(String),
    /// 分发器不认识该标头名称。
    UnsupportedHeader(String),
    /// 配置文件无法读取：(路径, 原因)。
    ConfigUnreadable(String, String),
}

use Exception::*;

impl Exception {
    /// 返回与该异常相关的标头名称（仅对能够确定标头的变体有效）。
    pub fn header_name(&self) -> Option<&str> {
        match self {
            MalformedContentType(_) => Some("content-type"),
            StrictHeaderParsingFailure { header_name, .. } => Some(header_name),
            MalformedLinkValue(..) => Some("link"),
            _ => None,
        }
    }

    /// 返回触发异常的原始标头值。
    pub fn header_value(&self) -> Option<&str> {
        match self {
            MalformedContentType(value) => Some(value),
            StrictHeaderParsingFailure { header_value, .. } => Some(header_value),
            _ => None,
        }
    }
}

/// 为 `Exception` 实现 `Display` 特性，使其支持字符串格式化输出。
impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedContentType(value) => write!(f, "Malformed content type: {:?}", value),
            MalformedToken(piece) => write!(f, "Parameter is missing '=': {:?}", piece),
            InvalidQuality(value) => write!(f, "Quality value is not a number: {:?}", value),
            MalformedLinkValue(reason, rest) => {
                if rest.is_empty() {
                    write!(f, "{}", reason)
                } else {
                    write!(f, "{}: {:?}", reason, rest)
                }
            }
            StrictHeaderParsingFailure {
                header_name,
                header_value,
            } => write!(
                f,
                "Non-standard value in {} header: {:?}",
                header_name, header_value
            ),
            NoMatch => write!(f, "No acceptable content type"),
            InvalidArgument(reason) => write!(f, "Invalid argument: {}", reason),
            UnsupportedHeader(name) => write!(f, "No parser for header {:?}", name),
            ConfigUnreadable(path, reason) => {
                write!(f, "Couldn't read config file {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for Exception {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_error_reports_header() {
        let e = MalformedContentType("*".to_string());
        assert_eq!(e.header_name(), Some("content-type"));
        assert_eq!(e.header_value(), Some("*"));
    }

    #[test]
    fn test_strict_failure_reports_header() {
        let e = StrictHeaderParsingFailure {
            header_name: "Forwarded".to_string(),
            header_value: "for=127.0.0.1;one=2".to_string(),
        };
        assert_eq!(e.header_name(), Some("Forwarded"));
        assert_eq!(e.header_value(), Some("for=127.0.0.1;one=2"));
        assert!(e.to_string().contains("Forwarded"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(NoMatch.to_string(), "No acceptable content type");
        assert_eq!(
            MalformedLinkValue("Malformed link header".to_string(), String::new()).to_string(),
            "Malformed link header"
        );
        assert!(MalformedToken("charset".to_string())
            .to_string()
            .contains("charset"));
    }
}
