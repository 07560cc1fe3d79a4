// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 内容协商模块
//!
//! 实现 RFC 7231 第 3.4.1 与 5.3 节描述的主动内容协商（Proactive Content Negotiation）：
//! 根据客户端 `Accept` 中带权重的偏好，从服务端能够生成的媒体类型中挑选一个。
//!
//! ## 选择规则
//! 1. 按质量值从高到低遍历客户端的模式，对每个模式按 [`ContentType`] 的自然顺序遍历候选；
//! 2. 候选与模式完全相同（包括参数）时立即选中，但如果该模式的质量值为 `0.0`，则协商失败；
//! 3. 其余匹配记录为 [`Match`]，最终选择通配程度最低、参数距离最小、出现最早的一个。

use std::fmt;

use log::debug;

use crate::{accept::parse_accept, content_type::ContentType, exception::Exception};

/// 模式的通配程度，数值越小越具体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchType {
    /// `type/subtype`
    FullType = 0,
    /// `type/*`
    Partial = 1,
    /// `*/*`
    Wildcard = 2,
}

impl MatchType {
    fn of(pattern: &ContentType) -> Self {
        if pattern.is_wildcard_type() && pattern.is_wildcard_subtype() {
            MatchType::Wildcard
        } else if pattern.is_wildcard_subtype() {
            MatchType::Partial
        } else {
            MatchType::FullType
        }
    }
}

/// 一个候选与一个模式之间的非精确匹配。
#[derive(Debug, Clone)]
pub struct Match<'a> {
    pub candidate: &'a ContentType,
    pub pattern: &'a ContentType,
    pub match_type: MatchType,
    /// 从候选参数个数开始，每个值相同的共有参数减一，值不同的共有参数加一
    pub parameter_distance: i64,
}

impl<'a> Match<'a> {
    fn new(candidate: &'a ContentType, pattern: &'a ContentType) -> Self {
        let mut parameter_distance = candidate.parameters().len() as i64;
        for (name, value) in candidate.parameters() {
            match pattern.parameter(name) {
                Some(expected) if expected == value => parameter_distance -= 1,
                Some(_) => parameter_distance += 1,
                None => {}
            }
        }
        Self {
            candidate,
            pattern,
            match_type: MatchType::of(pattern),
            parameter_distance,
        }
    }

    fn rank(&self) -> (MatchType, i64) {
        (self.match_type, self.parameter_distance)
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <- {} ({:?}, {})",
            self.candidate, self.pattern, self.match_type, self.parameter_distance
        )
    }
}

/// 候选的主类型与子类型分别等于模式对应的值，或模式对应的值为 `*`。
fn content_type_matches(candidate: &ContentType, pattern: &ContentType) -> bool {
    (pattern.is_wildcard_type() || candidate.content_type() == pattern.content_type())
        && (pattern.is_wildcard_subtype()
            || candidate.content_subtype() == pattern.content_subtype())
}

/// 选择最合适的媒体类型。
///
/// # 参数
/// * `requested` - 客户端的偏好，通常来自 [`parse_accept`]。
/// * `available` - 服务端能够生成的媒体类型。
/// * `default` - 没有任何匹配时使用的类型，必须是 `available` 中的一员。
///
/// # 返回值
/// `(选中的候选, 匹配到的模式)`。回退到默认值时两者都是默认值。
///
/// # 错误处理
/// - `default` 不在 `available` 中：[`Exception::InvalidArgument`]；
/// - 没有匹配且没有默认值，或质量值为 0 的模式精确命中候选：[`Exception::NoMatch`]。
pub fn select_content_type(
    requested: &[ContentType],
    available: &[ContentType],
    default: Option<&ContentType>,
) -> Result<(ContentType, ContentType), Exception> {
    if let Some(default) = default {
        if !available.contains(default) {
            return Err(Exception::InvalidArgument(format!(
                "default content type {} is not in the available list",
                default
            )));
        }
    }

    let mut patterns: Vec<&ContentType> = requested.iter().collect();
    patterns.sort_by(|left, right| right.quality().total_cmp(&left.quality()));
    let mut candidates: Vec<&ContentType> = available.iter().collect();
    candidates.sort();

    let mut matches = Vec::new();
    for &pattern in &patterns {
        for &candidate in &candidates {
            if !content_type_matches(candidate, pattern) {
                continue;
            }
            if candidate == pattern {
                if pattern.quality() == 0.0 {
                    debug!("{} 被质量值为0的模式明确拒绝", candidate);
                    return Err(Exception::NoMatch);
                }
                debug!("精确匹配：{}", candidate);
                return Ok((candidate.clone(), pattern.clone()));
            }
            matches.push(Match::new(candidate, pattern));
        }
    }

    if let Some(best) = matches.iter().min_by_key(|m| m.rank()) {
        debug!("协商结果：{}，共{}个候选匹配", best, matches.len());
        return Ok((best.candidate.clone(), best.pattern.clone()));
    }

    match default {
        Some(default) => {
            debug!("没有匹配的媒体类型，使用默认值 {}", default);
            Ok((default.clone(), default.clone()))
        }
        None => Err(Exception::NoMatch),
    }
}

/// 直接使用 `Accept` 标头文本进行协商。
///
/// 标头以非严格模式解析；`None` 等同于空的偏好列表。
pub fn select_content_type_from_header(
    accept: Option<&str>,
    available: &[ContentType],
    default: Option<&ContentType>,
) -> Result<(ContentType, ContentType), Exception> {
    let requested = match accept {
        Some(header_value) => parse_accept(header_value, false)?,
        None => Vec::new(),
    };
    select_content_type(&requested, available, default)
}
