// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Forwarded 解析模块
//!
//! 解析 RFC 7239 `Forwarded` 标头。每个逗号分隔的元素对应一跳代理，
//! 元素内部是 `;` 连接的 `name=value` 参数。参数名转为小写，参数值保持原样。

use std::collections::BTreeMap;

use serde_derive::Serialize;

use crate::{
    exception::Exception,
    param::{FORWARDED, STANDARD_FORWARDED_PARAMETERS},
    tokenizer::{split_list_elements, split_parameters, split_unquoted, ParameterOptions},
};

/// `Forwarded` 标头中的单个元素。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ForwardedElement {
    parameters: BTreeMap<String, String>,
}

impl ForwardedElement {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// 发起请求的客户端（`for`）
    pub fn forwarded_for(&self) -> Option<&str> {
        self.get("for")
    }

    /// 接收请求的代理接口（`by`）
    pub fn by(&self) -> Option<&str> {
        self.get("by")
    }

    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    pub fn proto(&self) -> Option<&str> {
        self.get("proto")
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

/// 解析 `Forwarded` 标头，按从左到右的顺序返回每一跳的参数。
///
/// # 参数
/// * `header_value` - 标头值
/// * `only_standard_parameters` - 为 `true` 时，出现 `for`、`proto`、`by`、`host`
///   以外的参数名会返回 [`Exception::StrictHeaderParsingFailure`]。
///
/// 同一元素内重复出现的参数以最后一次为准。`a,,b` 中的空元素对应一个没有参数的跳，
/// 因此结果的长度与代理链的跳数一致。
pub fn parse_forwarded(
    header_value: &str,
    only_standard_parameters: bool,
) -> Result<Vec<ForwardedElement>, Exception> {
    let mut result = Vec::new();
    for entry in split_list_elements(header_value) {
        let pairs = split_parameters(split_unquoted(&entry, b';'), ParameterOptions::FORWARDED)?;
        if only_standard_parameters
            && pairs
                .iter()
                .any(|(name, _)| !STANDARD_FORWARDED_PARAMETERS.contains(&name.as_str()))
        {
            return Err(Exception::StrictHeaderParsingFailure {
                header_name: FORWARDED.to_string(),
                header_value: header_value.to_string(),
            });
        }
        result.push(ForwardedElement {
            parameters: pairs.into_iter().collect(),
        });
    }
    Ok(result)
}
