// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 媒体类型模块
//!
//! 定义 `Content-Type` 形式的媒体类型值（RFC 2045 / RFC 6839），以及对应的解析函数。
//!
//! 媒体类型的排序只用于让候选集合的遍历顺序稳定，**不是**协商质量的排序：
//! - 主类型为 `*` 的排在任何具体主类型之前；
//! - 子类型为 `*` 的排在任何具体子类型之前；
//! - 参数少的排在前面；
//! - 其余按主类型、子类型的字典序排列。

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde_derive::Serialize;

use crate::{
    exception::Exception,
    tokenizer::{remove_comment, split_parameters, split_unquoted, ParameterOptions},
};

/// 一个媒体类型，例如 `application/vnd.github.v3+json; charset=utf-8`。
///
/// 主类型、子类型、后缀与参数名在构造时统一转为小写并去除空白。
/// `quality` 只有在经过 `Accept` 解析后才有意义，未设置时视为 `1.0`。
#[derive(Debug, Clone, Serialize)]
pub struct ContentType {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(rename = "subtype")]
    content_subtype: String,
    #[serde(rename = "suffix", skip_serializing_if = "Option::is_none")]
    content_suffix: Option<String>,
    parameters: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<f64>,
}

impl ContentType {
    pub fn new(content_type: &str, content_subtype: &str) -> Self {
        Self {
            content_type: content_type.trim().to_ascii_lowercase(),
            content_subtype: content_subtype.trim().to_ascii_lowercase(),
            content_suffix: None,
            parameters: BTreeMap::new(),
            quality: None,
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.content_suffix = Some(suffix.trim().to_ascii_lowercase());
        self
    }

    /// 添加一个参数。参数名会被转为小写，参数值只去除首尾空白。
    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        self
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub(crate) fn take_parameter(&mut self, name: &str) -> Option<String> {
        self.parameters.remove(name)
    }
}

// --- Getter 访问器实现 ---

impl ContentType {
    /// 主类型，例如 `text`
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// 子类型，例如 `html`
    pub fn content_subtype(&self) -> &str {
        &self.content_subtype
    }

    /// RFC 6839 结构化语法后缀，例如 `json`
    pub fn content_suffix(&self) -> Option<&str> {
        self.content_suffix.as_deref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// 质量值，未设置时为 `1.0`
    pub fn quality(&self) -> f64 {
        self.quality.unwrap_or(1.0)
    }

    pub fn explicit_quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn is_wildcard_type(&self) -> bool {
        self.content_type == "*"
    }

    pub fn is_wildcard_subtype(&self) -> bool {
        self.content_subtype == "*"
    }
}

/// 判断两个媒体类型是否相等：比较主类型、子类型、后缀与全部参数，不比较质量值。
pub fn content_types_equal(left: &ContentType, right: &ContentType) -> bool {
    left.content_type == right.content_type
        && left.content_subtype == right.content_subtype
        && left.content_suffix == right.content_suffix
        && left.parameters == right.parameters
}

/// 媒体类型的确定性排序（见模块文档）。
///
/// 在模块文档描述的规则都相同时，继续比较后缀和参数，
/// 使得只有 [`content_types_equal`] 成立时才返回 `Ordering::Equal`。
pub fn compare_content_types(left: &ContentType, right: &ContentType) -> Ordering {
    let left_concrete = (!left.is_wildcard_type(), !left.is_wildcard_subtype());
    let right_concrete = (!right.is_wildcard_type(), !right.is_wildcard_subtype());
    left_concrete
        .0
        .cmp(&right_concrete.0)
        .then(left_concrete.1.cmp(&right_concrete.1))
        .then(left.parameters.len().cmp(&right.parameters.len()))
        .then_with(|| left.content_type.cmp(&right.content_type))
        .then_with(|| left.content_subtype.cmp(&right.content_subtype))
        .then_with(|| left.content_suffix.cmp(&right.content_suffix))
        .then_with(|| left.parameters.iter().cmp(right.parameters.iter()))
}

impl PartialEq for ContentType {
    fn eq(&self, other: &Self) -> bool {
        content_types_equal(self, other)
    }
}

impl Eq for ContentType {}

impl Hash for ContentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content_type.hash(state);
        self.content_subtype.hash(state);
        self.content_suffix.hash(state);
        self.parameters.hash(state);
    }
}

impl PartialOrd for ContentType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContentType {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_content_types(self, other)
    }
}

/// 与字符串比较时先解析字符串；无法解析的字符串永远不相等。
impl PartialEq<str> for ContentType {
    fn eq(&self, other: &str) -> bool {
        match parse_content_type(other, true) {
            Ok(parsed) => content_types_equal(self, &parsed),
            Err(_) => false,
        }
    }
}

impl PartialEq<&str> for ContentType {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '(' | ')' | '='))
}

impl fmt::Display for ContentType {
    /// 参数按名称排序输出；含分隔符或空白的参数值会加上双引号。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content_type, self.content_subtype)?;
        if let Some(suffix) = &self.content_suffix {
            write!(f, "+{}", suffix)?;
        }
        for (name, value) in &self.parameters {
            if needs_quotes(value) && !value.contains('"') {
                write!(f, "; {}=\"{}\"", name, value)?;
            } else {
                write!(f, "; {}={}", name, value)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ContentType {
    type Err = Exception;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_content_type(s, true)
    }
}

/// 解析一个 `Content-Type` 形式的值。
///
/// # 参数
/// * `content_type` - 待解析的文本，可以包含行内注释。
/// * `normalize_parameter_values` - 为 `false` 时参数值保持原有大小写（严格遵循 RFC 2045）。
///
/// # 错误处理
/// 当 `type/subtype` 无法拆分时返回 [`Exception::MalformedContentType`]（例如 `*`）；
/// 参数缺少 `=` 时返回 [`Exception::MalformedToken`]。
pub fn parse_content_type(
    content_type: &str,
    normalize_parameter_values: bool,
) -> Result<ContentType, Exception> {
    let sanitized = remove_comment(content_type);
    let mut parts = split_unquoted(&sanitized, b';').into_iter();
    let type_spec = parts.next().unwrap_or_default();

    let (primary, subtype) = match type_spec.split_once('/') {
        Some((primary, subtype)) if !subtype.contains('/') => (primary, subtype),
        _ => return Err(Exception::MalformedContentType(content_type.to_string())),
    };

    let parameters = split_parameters(
        parts,
        ParameterOptions::content_type(normalize_parameter_values),
    )?;

    let mut parsed = match subtype.rsplit_once('+') {
        Some((subtype, suffix)) => ContentType::new(primary, subtype).with_suffix(suffix),
        None => ContentType::new(primary, subtype),
    };
    for (name, value) in parameters {
        parsed = parsed.with_parameter(&name, &value);
    }
    Ok(parsed)
}
