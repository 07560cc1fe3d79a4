// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协议参数与常量模块
//!
//! 该模块定义了标头解析器共享的协议常量和数据结构，包括：
//! - 受支持的标头名称及其强类型枚举。
//! - `Cache-Control` 中的布尔型指令表与 `Forwarded` 的标准参数名。
//! - 常用的媒体类型常量。

use std::{fmt, str::FromStr};

use lazy_static::lazy_static;

use crate::{content_type::ContentType, exception::Exception};

/// 质量值低于该阈值的元素被视为客户端明确拒绝。
pub const SMALLEST_QUALITY: f64 = 0.001;

/// 出现但没有值时被解释为 `true` 的 `Cache-Control` 指令。
pub const CACHE_CONTROL_BOOLEAN_DIRECTIVES: [&str; 8] = [
    "must-revalidate",
    "no-cache",
    "no-store",
    "no-transform",
    "only-if-cached",
    "public",
    "private",
    "proxy-revalidate",
];

/// RFC 7239 定义的 `Forwarded` 参数名。
pub const STANDARD_FORWARDED_PARAMETERS: [&str; 4] = ["for", "proto", "by", "host"];

pub const ACCEPT: &str = "Accept";
pub const ACCEPT_CHARSET: &str = "Accept-Charset";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORWARDED: &str = "Forwarded";
pub const LINK: &str = "Link";

lazy_static! {
    /// JSON 数据交换格式（RFC 8259）
    pub static ref APPLICATION_JSON: ContentType = ContentType::new("application", "json");

    /// 互联网默认的二进制类型（RFC 2045）
    pub static ref APPLICATION_OCTET_STREAM: ContentType =
        ContentType::new("application", "octet-stream");

    /// HTTP API 错误文档（RFC 9457）
    pub static ref APPLICATION_PROBLEM_JSON: ContentType =
        ContentType::new("application", "problem").with_suffix("json");

    /// XML 文档（RFC 7303）
    pub static ref APPLICATION_XML: ContentType = ContentType::new("application", "xml");

    pub static ref TEXT_HTML: ContentType =
        ContentType::new("text", "html").with_parameter("charset", "utf-8");

    /// ECMAScript（RFC 9239）
    pub static ref TEXT_JAVASCRIPT: ContentType =
        ContentType::new("text", "javascript").with_parameter("charset", "utf-8");

    /// Markdown 文档（RFC 7763）
    pub static ref TEXT_MARKDOWN: ContentType =
        ContentType::new("text", "markdown").with_parameter("charset", "utf-8");

    pub static ref TEXT_PLAIN: ContentType = ContentType::new("text", "plain");
}

/// 受支持的结构化标头
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Accept,
    AcceptCharset,
    AcceptEncoding,
    AcceptLanguage,
    CacheControl,
    ContentType,
    Forwarded,
    Link,
}

impl HeaderKind {
    /// 标头的规范名称
    pub fn name(&self) -> &'static str {
        match *self {
            HeaderKind::Accept => ACCEPT,
            HeaderKind::AcceptCharset => ACCEPT_CHARSET,
            HeaderKind::AcceptEncoding => ACCEPT_ENCODING,
            HeaderKind::AcceptLanguage => ACCEPT_LANGUAGE,
            HeaderKind::CacheControl => CACHE_CONTROL,
            HeaderKind::ContentType => CONTENT_TYPE,
            HeaderKind::Forwarded => FORWARDED,
            HeaderKind::Link => LINK,
        }
    }
}

impl FromStr for HeaderKind {
    type Err = Exception;

    /// 按不区分大小写的标头名称查找解析器
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(HeaderKind::Accept),
            "accept-charset" => Ok(HeaderKind::AcceptCharset),
            "accept-encoding" => Ok(HeaderKind::AcceptEncoding),
            "accept-language" => Ok(HeaderKind::AcceptLanguage),
            "cache-control" => Ok(HeaderKind::CacheControl),
            "content-type" => Ok(HeaderKind::ContentType),
            "forwarded" => Ok(HeaderKind::Forwarded),
            "link" => Ok(HeaderKind::Link),
            _ => Err(Exception::UnsupportedHeader(s.to_string())),
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
