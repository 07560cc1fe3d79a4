// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 标头分词模块
//!
//! 所有结构化标头解析器共享的底层分词逻辑：
//! 1. 按顶层逗号拆分列表（引号内的逗号不参与拆分）。
//! 2. 按分号拆分 `name=value` 参数，并根据 [`ParameterOptions`] 进行规范化。
//! 3. 去除 RFC 2045 风格的行内注释 `(...)`。
//! 4. 去除整体包裹的一对双引号。

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::exception::Exception;

lazy_static! {
    /// 行内注释。贪婪匹配：从第一个 `(` 到其后最后一个 `)`，不支持嵌套。
    static ref COMMENT_RE: Regex = Regex::new(r"\(.*\)").unwrap();
}

/// 参数解析选项。
///
/// 不同的标头对参数名与参数值的大小写、空白处理有不同的要求，
/// 各解析器通过预设常量选择自己的规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterOptions {
    /// 参数名转为小写
    pub normalize_names: bool,
    /// 参数值转为小写
    pub normalize_values: bool,
    /// 去除 `=` 两侧的空白
    pub strip_interior_whitespace: bool,
}

impl Default for ParameterOptions {
    fn default() -> Self {
        Self {
            normalize_names: false,
            normalize_values: true,
            strip_interior_whitespace: false,
        }
    }
}

impl ParameterOptions {
    /// `Forwarded`：参数名小写，参数值保持原样。
    pub const FORWARDED: Self = Self {
        normalize_names: true,
        normalize_values: false,
        strip_interior_whitespace: false,
    };

    /// `Link`：参数名与参数值都转为小写，允许 `rel = "next"` 这样的写法。
    pub const LINK: Self = Self {
        normalize_names: true,
        normalize_values: true,
        strip_interior_whitespace: true,
    };

    /// `Accept-Charset` 等限定列表使用的参数规则。
    pub const QUALIFIED: Self = Self {
        normalize_names: true,
        normalize_values: true,
        strip_interior_whitespace: true,
    };

    /// 媒体类型参数：参数名总是小写，参数值是否小写由调用方决定。
    pub const fn content_type(normalize_values: bool) -> Self {
        Self {
            normalize_names: true,
            normalize_values,
            strip_interior_whitespace: false,
        }
    }
}

/// 去除第一个行内注释。
pub fn remove_comment(value: &str) -> Cow<'_, str> {
    COMMENT_RE.replace(value, "")
}

/// 如果整个字符串被一对双引号包裹，则去掉这对引号。
///
/// ```
/// use headerparse::tokenizer::dequote;
/// assert_eq!(dequote("\"value\""), "value");
/// assert_eq!(dequote("not=\"quoted\""), "not=\"quoted\"");
/// assert_eq!(dequote("\" with spaces \""), " with spaces ");
/// ```
pub fn dequote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// 查找第一个不在引号内的分隔符，返回其字节位置。
///
/// 只有能找到配对引号的 `"` 才会开启引用区；孤立的引号按普通字符处理。
/// 分隔符必须是 ASCII 字符。
pub fn find_unquoted(value: &str, delimiter: u8) -> Option<usize> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' {
            if let Some(offset) = bytes[i + 1..].iter().position(|&c| c == b'"') {
                i += offset + 1;
            }
        } else if b == delimiter {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// 按分隔符拆分字符串，跳过引号内的分隔符（规则同 [`find_unquoted`]）。
pub fn split_unquoted(value: &str, delimiter: u8) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = value;
    while let Some(index) = find_unquoted(rest, delimiter) {
        pieces.push(&rest[..index]);
        rest = &rest[index + 1..];
    }
    pieces.push(rest);
    pieces
}

/// 拆分逗号分隔的列表标头。
///
/// 每个元素会去除首尾空白，整体被引号包裹的元素会去掉引号。空元素被忽略。
pub fn split_list(value: &str) -> Vec<String> {
    split_list_elements(value)
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// 与 [`split_list`] 相同，但保留 `a,,b` 中的空元素，供需要逐个检查元素的解析器使用。
///
/// 空白的标头值返回空列表。
pub fn split_list_elements(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    split_unquoted(value, b',')
        .into_iter()
        .map(|piece| dequote(piece.trim()).to_string())
        .collect()
}

/// 解析 `name=value` 形式的参数片段序列，保持原有顺序。
///
/// 空片段被跳过；非空片段缺少 `=` 时返回 [`Exception::MalformedToken`]。
/// 参数值总是去除首尾空白并去掉包裹的引号。
pub fn split_parameters<'a, I>(
    pieces: I,
    options: ParameterOptions,
) -> Result<Vec<(String, String)>, Exception>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parameters = Vec::new();
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let (name, value) = piece
            .split_once('=')
            .ok_or_else(|| Exception::MalformedToken(piece.to_string()))?;
        let name = if options.strip_interior_whitespace {
            name.trim()
        } else {
            name
        };
        let name = if options.normalize_names {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        };
        let value = dequote(value.trim());
        let value = if options.normalize_values {
            value.to_ascii_lowercase()
        } else {
            value.to_string()
        };
        parameters.push((name, value));
    }
    Ok(parameters)
}
