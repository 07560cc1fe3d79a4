// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Accept 系列标头解析模块
//!
//! 负责内容协商相关的请求标头（RFC 7231 第 5.3 节）：
//! 1. `Accept`：媒体类型列表，每个元素附带质量值，结果按优先级排序。
//! 2. `Accept-Charset` / `Accept-Encoding` / `Accept-Language`：普通令牌列表，按质量值排序，
//!    质量值低于 0.001 的令牌被视为拒绝，排在通配符 `*` 之后。

use log::{debug, warn};

use crate::{
    content_type::{compare_content_types, parse_content_type, ContentType},
    exception::Exception,
    param::SMALLEST_QUALITY,
    tokenizer::{dequote, split_list, split_list_elements, split_unquoted},
};

/// 第一个显式 `q=1.0` 元素获得的合成质量值，之后每个显式 `q=1.0` 依次递减。
const EXPLICIT_HIGHEST_QUALITY: f64 = 2.0;

/// 返回比 `value` 小的下一个浮点数（`value` 必须为正的有限数）。
fn next_smaller(value: f64) -> f64 {
    f64::from_bits(value.to_bits() - 1)
}

fn parse_quality(raw: &str) -> Result<f64, Exception> {
    match raw.trim().parse::<f64>() {
        Ok(quality) if quality.is_finite() => Ok(quality),
        _ => Err(Exception::InvalidQuality(raw.to_string())),
    }
}

/// 解析 HTTP `Accept` 标头。
///
/// 每个元素都会被解析为 [`ContentType`]，其 `q` 参数被移除并转换为质量值。
/// 返回值按以下规则排序：
/// - 质量值高的在前；
/// - 质量值相同时，更具体的媒体类型在前（见 [`compare_content_types`]）；
/// - 显式声明 `q=1.0` 的元素排在隐式默认 `1.0` 的元素之前，且彼此之间保持声明顺序。
///
/// # 参数
/// * `header_value` - 标头值，例如 `audio/*;q=0.2, audio/basic`
/// * `strict` - 为 `true` 时，任何无法解析的元素（包括 `a/b,,c/d` 中的空元素）都会使整个解析失败；
///   否则该元素被忽略。空白的标头值总是得到空列表。
pub fn parse_accept(header_value: &str, strict: bool) -> Result<Vec<ContentType>, Exception> {
    let mut next_explicit = EXPLICIT_HIGHEST_QUALITY;
    let mut headers = Vec::new();

    for element in split_list_elements(header_value) {
        if element.is_empty() && !strict {
            continue;
        }
        let parsed = parse_content_type(&element, true).and_then(|mut content_type| {
            let quality = match content_type.take_parameter("q") {
                None => 1.0,
                Some(raw) => parse_quality(&raw)?,
            };
            Ok((content_type, quality))
        });
        let (content_type, quality) = match parsed {
            Ok(pair) => pair,
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!("忽略无法解析的Accept元素 {:?}：{}", element, e);
                continue;
            }
        };

        // 只有显式写出 q 且等于 1.0 的元素才使用合成质量值
        let explicit_one = element_has_explicit_q(&element) && quality == 1.0;
        let quality = if explicit_one {
            let synthetic = next_explicit;
            next_explicit = next_smaller(next_explicit);
            synthetic
        } else {
            quality
        };
        headers.push(content_type.with_quality(quality));
    }

    headers.sort_by(|left, right| {
        right
            .quality()
            .total_cmp(&left.quality())
            .then_with(|| compare_content_types(right, left))
    });
    debug!("Accept解析完成，共{}个元素", headers.len());
    Ok(headers)
}

fn element_has_explicit_q(element: &str) -> bool {
    split_unquoted(element, b';').into_iter().skip(1).any(|piece| {
        piece
            .split_once('=')
            .map_or(false, |(name, _)| name.trim().eq_ignore_ascii_case("q"))
    })
}

/// 解析 `Accept-Charset` 标头，返回按优先级从高到低排列的字符集列表。
///
/// 如果包含通配符 `*`，它会排在所有被拒绝（质量值低于 0.001）的字符集**之前**。
pub fn parse_accept_charset(header_value: &str) -> Vec<String> {
    parse_qualified_list(header_value)
}

/// 解析 `Accept-Encoding` 标头，返回按优先级从高到低排列的编码列表。
pub fn parse_accept_encoding(header_value: &str) -> Vec<String> {
    parse_qualified_list(header_value)
}

/// 解析 `Accept-Language` 标头，返回按优先级从高到低排列的语言标签列表。
pub fn parse_accept_language(header_value: &str) -> Vec<String> {
    parse_qualified_list(header_value)
}

/// 解析逗号分隔的限定令牌列表。
///
/// 排名规则：
/// - 未写 `q` 的令牌按声明位置获得递减的隐式排名，总是高于任何 `[0, 1]` 内的显式质量值；
/// - 显式 `q=1.0` 的令牌排名高于所有隐式令牌，彼此之间保持声明顺序；
/// - 其余显式质量值直接作为排名；排名相同的令牌按令牌文本逆序排列；
/// - 质量值低于 0.001 或无法解析的令牌被放入拒绝列表。
///
/// 输出顺序：接受的令牌（排名从高到低），然后是 `*`（如果出现过），最后是被拒绝的令牌（原始顺序）。
pub fn parse_qualified_list(header_value: &str) -> Vec<String> {
    let elements = split_list(header_value);
    let mut implicit = (elements.len() + 1) as f64;
    let highest = implicit + 1.0;
    let mut found_wildcard = false;
    let mut accepted: Vec<(f64, String)> = Vec::new();
    let mut rejected = Vec::new();

    for element in &elements {
        let compact: String = element.chars().filter(|c| *c != ' ').collect();
        let mut pieces = split_unquoted(&compact, b';').into_iter();
        let token = pieces.next().unwrap_or_default();
        if token.is_empty() {
            continue;
        }
        if token == "*" {
            found_wildcard = true;
            continue;
        }

        let explicit = pieces
            .filter_map(|piece| piece.split_once('='))
            .filter(|(name, _)| name.eq_ignore_ascii_case("q"))
            .last()
            .map(|(_, value)| parse_quality(dequote(value)));

        match explicit {
            None => accepted.push((implicit, token.to_string())),
            Some(Ok(quality)) if quality < SMALLEST_QUALITY => rejected.push(token.to_string()),
            Some(Ok(quality)) if quality == 1.0 => {
                accepted.push((highest + implicit, token.to_string()))
            }
            Some(Ok(quality)) => accepted.push((quality, token.to_string())),
            Some(Err(e)) => {
                warn!("{}，令牌 {:?} 被视为拒绝", e, token);
                rejected.push(token.to_string());
            }
        }
        implicit -= 1.0;
    }

    accepted.sort_by(|left, right| right.0.total_cmp(&left.0).then_with(|| right.1.cmp(&left.1)));
    let mut parsed: Vec<String> = accepted.into_iter().map(|(_, token)| token).collect();
    if found_wildcard {
        parsed.push("*".to_string());
    }
    parsed.extend(rejected);
    parsed
}
