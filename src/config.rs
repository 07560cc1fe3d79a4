use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;

use crate::{
    content_type::{parse_content_type, ContentType},
    exception::Exception,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    strict_accept: bool,
    #[serde(default = "default_strict_link")]
    strict_link: bool,
    #[serde(default)]
    only_standard_forwarded: bool,
    #[serde(default = "default_normalize_parameter_values")]
    normalize_parameter_values: bool,
    #[serde(default)]
    available: Vec<String>,
    #[serde(default)]
    default_content_type: Option<String>,
    #[serde(default)]
    pretty: bool,
}

fn default_strict_link() -> bool {
    true
}

fn default_normalize_parameter_values() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            strict_accept: false,
            strict_link: default_strict_link(),
            only_standard_forwarded: false,
            normalize_parameter_values: default_normalize_parameter_values(),
            available: Vec::new(),
            default_content_type: None,
            pretty: false,
        }
    }

    /// 从 TOML 文件载入配置。
    ///
    /// 文件无法读取时返回 [`Exception::ConfigUnreadable`]；
    /// 内容不是合法的配置时记录错误并使用默认配置。
    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = File::open(filename)
            .map_err(|e| Exception::ConfigUnreadable(filename.to_string(), e.to_string()))?;
        let mut str_val = String::new();
        file.read_to_string(&mut str_val)
            .map_err(|e| Exception::ConfigUnreadable(filename.to_string(), e.to_string()))?;

        let mut raw_config = match Self::from_toml_str(&str_val) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        if let Some(default) = raw_config.parsed_default_content_type() {
            if !raw_config.available_content_types().contains(&default) {
                warn!("default_content_type {} 不在available列表中，该值将被忽略。", default);
                raw_config.default_content_type = None;
            }
        }
        Ok(raw_config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn with_strict_accept(mut self, strict_accept: bool) -> Self {
        self.strict_accept = strict_accept;
        self
    }

    pub fn with_strict_link(mut self, strict_link: bool) -> Self {
        self.strict_link = strict_link;
        self
    }

    pub fn with_only_standard_forwarded(mut self, only_standard_forwarded: bool) -> Self {
        self.only_standard_forwarded = only_standard_forwarded;
        self
    }

    pub fn with_normalize_parameter_values(mut self, normalize_parameter_values: bool) -> Self {
        self.normalize_parameter_values = normalize_parameter_values;
        self
    }
}

impl Config {
    pub fn strict_accept(&self) -> bool {
        self.strict_accept
    }

    pub fn strict_link(&self) -> bool {
        self.strict_link
    }

    pub fn only_standard_forwarded(&self) -> bool {
        self.only_standard_forwarded
    }

    pub fn normalize_parameter_values(&self) -> bool {
        self.normalize_parameter_values
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn default_content_type(&self) -> Option<&str> {
        self.default_content_type.as_deref()
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// 解析 `available` 列表，无法解析的条目被跳过
    pub fn available_content_types(&self) -> Vec<ContentType> {
        self.available
            .iter()
            .filter_map(|value| match parse_content_type(value, true) {
                Ok(content_type) => Some(content_type),
                Err(e) => {
                    warn!("忽略available中无法解析的媒体类型 {}：{}", value, e);
                    None
                }
            })
            .collect()
    }

    pub fn parsed_default_content_type(&self) -> Option<ContentType> {
        let value = self.default_content_type.as_deref()?;
        match parse_content_type(value, true) {
            Ok(content_type) => Some(content_type),
            Err(e) => {
                warn!("忽略无法解析的default_content_type {}：{}", value, e);
                None
            }
        }
    }
}
