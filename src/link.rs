// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Link 解析模块
//!
//! 解析 RFC 8288 `Link` 标头：
//! `<target>; name=value; ..., <target>; ...`
//!
//! 扫描器逐个读取 `<...>` 目标，然后读取到下一个不在引号内的逗号为止的参数列表。
//! 引号内的逗号与分号不会打断扫描。
//!
//! 严格模式下 `rel`、`media`、`type`、`title`、`title*` 只保留第一次出现的值，
//! 并且同时存在 `title` 与 `title*` 时以 `title*` 为准。

use std::{fmt, str::FromStr};

use log::debug;
use serde_derive::Serialize;

use crate::{
    exception::Exception,
    tokenizer::{find_unquoted, remove_comment, split_parameters, split_unquoted, ParameterOptions},
};

/// `Link` 标头中的一个链接。
///
/// 相等比较只看目标和参数的多重集合，不看参数顺序，
/// 因此格式化（参数会被排序）后重新解析得到的链接与原链接相等。
#[derive(Debug, Clone, Eq, Serialize)]
pub struct LinkHeader {
    target: String,
    parameters: Vec<(String, String)>,
}

impl LinkHeader {
    pub fn new(target: &str, parameters: Vec<(String, String)>) -> Self {
        Self {
            target: target.to_string(),
            parameters,
        }
    }

    /// 链接目标，原样保存，不做 URI 校验
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 按声明顺序排列的参数，可能包含重复的名称
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// 所有 `rel` 值以空格连接
    pub fn rel(&self) -> String {
        self.get("rel").join(" ").trim().to_string()
    }

    /// 返回某个参数的全部值，不存在时为空
    pub fn get(&self, name: &str) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.iter().any(|(n, _)| n == name)
    }

    fn sorted_parameters(&self) -> Vec<&(String, String)> {
        let mut sorted: Vec<_> = self.parameters.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for LinkHeader {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && self.parameters.len() == other.parameters.len()
            && self.sorted_parameters() == other.sorted_parameters()
    }
}

impl fmt::Display for LinkHeader {
    /// `rel` 紧跟在目标之后，其余参数按格式化后的文本排序，值总是加双引号。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.target)?;
        let rel = self.rel();
        if !rel.is_empty() {
            write!(f, "; rel=\"{}\"", rel)?;
        }
        let mut formatted: Vec<String> = self
            .parameters
            .iter()
            .filter(|(name, _)| name != "rel")
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect();
        formatted.sort();
        for parameter in formatted {
            write!(f, "; {}", parameter)?;
        }
        Ok(())
    }
}

impl FromStr for LinkHeader {
    type Err = Exception;

    /// 以严格模式解析恰好包含一个链接的文本
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut links = parse_link(s, true)?;
        match links.len() {
            1 => Ok(links.remove(0)),
            n => Err(Exception::MalformedLinkValue(
                format!("Expected exactly one link, found {}", n),
                s.to_string(),
            )),
        }
    }
}

/// 严格模式下需要去重的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedParameter {
    Rel,
    Media,
    Type,
    Title,
    TitleStar,
}

impl TrackedParameter {
    const COUNT: usize = 5;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "rel" => Some(TrackedParameter::Rel),
            "media" => Some(TrackedParameter::Media),
            "type" => Some(TrackedParameter::Type),
            "title" => Some(TrackedParameter::Title),
            "title*" => Some(TrackedParameter::TitleStar),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// 单个链接的参数状态机。
struct ParameterParser {
    strict: bool,
    values: Vec<(String, String)>,
    tracked: [Option<String>; TrackedParameter::COUNT],
}

impl ParameterParser {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            values: Vec::new(),
            tracked: Default::default(),
        }
    }

    fn add_value(&mut self, name: String, value: String) {
        if let Some(tracked) = TrackedParameter::from_name(&name) {
            let slot = &mut self.tracked[tracked.index()];
            if slot.is_none() {
                *slot = Some(value.clone());
            } else if self.strict {
                debug!("忽略重复的Link参数：{}={}", name, value);
                return;
            }
            // 严格模式下 title 与 title* 在结束时统一追加
            let is_title = matches!(tracked, TrackedParameter::Title | TrackedParameter::TitleStar);
            if self.strict && is_title {
                return;
            }
        }
        self.values.push((name, value));
    }

    fn into_values(mut self) -> Vec<(String, String)> {
        if self.strict {
            let title = self.tracked[TrackedParameter::Title.index()].take();
            let title_star = self.tracked[TrackedParameter::TitleStar.index()].take();
            match (title, title_star) {
                (title, Some(title_star)) => {
                    self.values.push(("title*".to_string(), title_star.clone()));
                    if title.is_some() {
                        self.values.push(("title".to_string(), title_star));
                    }
                }
                (Some(title), None) => self.values.push(("title".to_string(), title)),
                (None, None) => {}
            }
        }
        self.values
    }
}

fn malformed(reason: &str, rest: &str) -> Exception {
    Exception::MalformedLinkValue(reason.to_string(), rest.to_string())
}

/// 解析 `Link` 标头。
///
/// # 参数
/// * `header_value` - 标头值，可以包含一个行内注释。
/// * `strict` - 是否执行 RFC 8288 的参数去重规则。语法错误在两种模式下都会返回错误。
///
/// # 错误处理
/// - 缺少 `<...>` 或参数列表没有以 `;` 开头时返回 [`Exception::MalformedLinkValue`]；
/// - 参数缺少 `=` 时返回 [`Exception::MalformedToken`]。
pub fn parse_link(header_value: &str, strict: bool) -> Result<Vec<LinkHeader>, Exception> {
    let sanitized = remove_comment(header_value);
    let mut rest: &str = &sanitized;
    let mut links = Vec::new();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let after_open = rest
            .strip_prefix('<')
            .ok_or_else(|| malformed("Malformed link header", rest))?;
        let (target, tail) = after_open
            .split_once('>')
            .ok_or_else(|| malformed("Malformed link header", rest))?;
        let tail = tail.trim_start();

        let (params, remaining) = match find_unquoted(tail, b',') {
            Some(index) => (&tail[..index], &tail[index + 1..]),
            None => (tail, ""),
        };
        let params = params.trim_end();

        let mut parser = ParameterParser::new(strict);
        if !params.is_empty() {
            let params = params
                .strip_prefix(';')
                .ok_or_else(|| malformed("Param list missing opening semicolon", params))?;
            for (name, value) in
                split_parameters(split_unquoted(params, b';'), ParameterOptions::LINK)?
            {
                parser.add_value(name, value);
            }
        }

        links.push(LinkHeader {
            target: target.trim().to_string(),
            parameters: parser.into_values(),
        });
        rest = remaining;
    }

    Ok(links)
}
