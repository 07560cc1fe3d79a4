// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Cache-Control 解析模块
//!
//! 将 `Cache-Control` 标头（RFC 9111）解析为指令表。
//! 没有值的布尔型指令（如 `public`、`no-cache`）被解释为 `true`，
//! 完全由数字组成的值被转换为整数。

use std::collections::BTreeMap;

use log::debug;
use serde_derive::Serialize;

use crate::{
    param::CACHE_CONTROL_BOOLEAN_DIRECTIVES,
    tokenizer::{dequote, split_list},
};

/// 单个指令的值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    /// 出现但没有值的非布尔型指令
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

/// 解析后的 `Cache-Control` 指令集合，指令名均为小写。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CacheControl {
    directives: BTreeMap<String, DirectiveValue>,
}

impl CacheControl {
    pub fn get(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// 布尔型指令是否被设置
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.directives.get(name), Some(DirectiveValue::Bool(true)))
    }

    /// 读取以秒为单位的指令，例如 `max-age`
    pub fn seconds(&self, name: &str) -> Option<i64> {
        match self.directives.get(name) {
            Some(DirectiveValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.directives
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// 解析 `Cache-Control` 标头。
///
/// - `name` 形式的指令记为 [`DirectiveValue::Null`]，属于布尔型指令表时改为 `true`；
/// - `name=value` 形式的指令去掉引号后保存，整数值转为 [`DirectiveValue::Int`]；
/// - `name=`（值为空）的指令被忽略。
pub fn parse_cache_control(header_value: &str) -> CacheControl {
    let mut directives = BTreeMap::new();

    for segment in split_list(header_value) {
        let (name, value) = match segment.split_once('=') {
            Some((name, value)) => (name, Some(value.trim())),
            None => (segment.as_str(), None),
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        match value {
            None => {
                directives.insert(name, DirectiveValue::Null);
            }
            Some("") => debug!("忽略空值的Cache-Control指令：{}", name),
            Some(value) => {
                let value = dequote(value);
                let parsed = match value.parse::<i64>() {
                    Ok(number) => DirectiveValue::Int(number),
                    Err(_) => DirectiveValue::Text(value.to_string()),
                };
                directives.insert(name, parsed);
            }
        }
    }

    for name in CACHE_CONTROL_BOOLEAN_DIRECTIVES {
        if let Some(value) = directives.get_mut(name) {
            if *value == DirectiveValue::Null {
                *value = DirectiveValue::Bool(true);
            }
        }
    }

    CacheControl { directives }
}
