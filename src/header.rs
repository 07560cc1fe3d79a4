// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 标头分发模块
//!
//! 根据标头名称选择对应的解析器，并按 [`Config`] 中的选项执行解析。

use log::{debug, warn};
use serde_derive::Serialize;

use crate::{
    accept::{parse_accept, parse_accept_charset, parse_accept_encoding, parse_accept_language},
    cache_control::{parse_cache_control, CacheControl},
    config::Config,
    content_type::{parse_content_type, ContentType},
    exception::Exception,
    forwarded::{parse_forwarded, ForwardedElement},
    link::{parse_link, LinkHeader},
    param::HeaderKind,
    tokenizer::split_list,
};

/// 一个标头的解析结果，序列化为 `{"kind": ..., "value": ...}`。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ParsedHeader {
    Accept(Vec<ContentType>),
    AcceptCharset(Vec<String>),
    AcceptEncoding(Vec<String>),
    AcceptLanguage(Vec<String>),
    CacheControl(CacheControl),
    ContentType(ContentType),
    Forwarded(Vec<ForwardedElement>),
    Link(Vec<LinkHeader>),
    /// 没有专用解析器的标头，按逗号列表拆分
    List(Vec<String>),
    /// 解析失败，保留原始值
    Raw(String),
}

/// 使用 `kind` 对应的解析器解析标头值。
pub fn parse_header(
    kind: HeaderKind,
    header_value: &str,
    config: &Config,
) -> Result<ParsedHeader, Exception> {
    let parsed = match kind {
        HeaderKind::Accept => {
            ParsedHeader::Accept(parse_accept(header_value, config.strict_accept())?)
        }
        HeaderKind::AcceptCharset => {
            ParsedHeader::AcceptCharset(parse_accept_charset(header_value))
        }
        HeaderKind::AcceptEncoding => {
            ParsedHeader::AcceptEncoding(parse_accept_encoding(header_value))
        }
        HeaderKind::AcceptLanguage => {
            ParsedHeader::AcceptLanguage(parse_accept_language(header_value))
        }
        HeaderKind::CacheControl => ParsedHeader::CacheControl(parse_cache_control(header_value)),
        HeaderKind::ContentType => ParsedHeader::ContentType(parse_content_type(
            header_value,
            config.normalize_parameter_values(),
        )?),
        HeaderKind::Forwarded => ParsedHeader::Forwarded(parse_forwarded(
            header_value,
            config.only_standard_forwarded(),
        )?),
        HeaderKind::Link => ParsedHeader::Link(parse_link(header_value, config.strict_link())?),
    };
    debug!("{}标头解析完成", kind);
    Ok(parsed)
}

/// 与 [`parse_header`] 相同，但解析失败时返回 [`ParsedHeader::Raw`]。
pub fn parse_header_or_raw(kind: HeaderKind, header_value: &str, config: &Config) -> ParsedHeader {
    match parse_header(kind, header_value, config) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("{}标头解析失败，保留原始值：{}", kind, e);
            ParsedHeader::Raw(header_value.to_string())
        }
    }
}

/// 按标头名称解析。没有专用解析器的标头按逗号列表拆分。
pub fn parse_named_header(name: &str, header_value: &str, config: &Config) -> ParsedHeader {
    match name.parse::<HeaderKind>() {
        Ok(kind) => parse_header_or_raw(kind, header_value, config),
        Err(_) => ParsedHeader::List(split_list(header_value)),
    }
}
