// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 标头解析命令行工具
//!
//! 逐行读取 `Name: value` 形式的标头（来自文件或标准输入），
//! 使用对应的解析器解析后以 JSON 的形式逐行输出。
//! - 没有专用解析器的标头按逗号列表拆分；
//! - 解析失败的标头以 `raw` 形式原样输出；
//! - 配置了 `available` 时，`Accept` 标头还会输出内容协商的结果。

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};
use serde_json::{json, Value};

use headerparse::{
    parse_named_header, select_content_type_from_header, Config, ContentType, HeaderKind,
};

const LOG_CONFIG: &str = "config/log4rs.yaml";
const DEFAULT_CONFIG: &str = "config/headerparse.toml";

#[derive(Parser)]
#[command(name = "headerparse", version)]
#[command(about = "Parse IETF header values into JSON", long_about = None)]
struct Cli {
    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<String>,

    /// 输入文件，缺省或 `-` 表示标准输入
    inputs: Vec<PathBuf>,
}

/// 内容协商所需的服务端候选
struct Negotiation {
    available: Vec<ContentType>,
    default: Option<ContentType>,
}

fn main() {
    // 1. 初始化日志系统：优先使用 YAML 配置，缺失时退回到输出到 stderr 的控制台日志
    init_logging();

    // 2. 解析命令行参数并载入配置
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    info!("配置文件已载入");

    let negotiation = Negotiation {
        available: config.available_content_types(),
        default: config.parsed_default_content_type(),
    };
    if !negotiation.available.is_empty() {
        info!("内容协商已启用，共{}个候选类型", negotiation.available.len());
    }

    // 3. 逐个处理输入源
    let inputs = if cli.inputs.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.inputs
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;
    for input in &inputs {
        if let Err(e) = process_input(input, &config, &negotiation, &mut out) {
            error!("处理输入{}时遇到错误：{}", input.display(), e);
            failed = true;
        }
    }
    if failed {
        process::exit(1);
    }
}

fn init_logging() {
    let e = match log4rs::init_file(LOG_CONFIG, Default::default()) {
        Ok(()) => return,
        Err(e) => e,
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let fallback = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match fallback {
        Ok(fallback) => {
            if log4rs::init_config(fallback).is_ok() {
                debug!("无法载入{}：{}，使用控制台日志", LOG_CONFIG, e);
            }
        }
        Err(errors) => eprintln!("无法初始化日志系统：{}", errors),
    }
}

fn load_config(path: Option<&str>) -> Config {
    match path {
        Some(path) => match Config::from_toml(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                eprintln!("{}", e);
                process::exit(2);
            }
        },
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
                warn!("{}，使用默认配置", e);
                Config::new()
            })
        }
        None => Config::new(),
    }
}

fn process_input(
    input: &Path,
    config: &Config,
    negotiation: &Negotiation,
    out: &mut impl Write,
) -> io::Result<()> {
    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };
    debug!("开始读取{}", input.display());

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => {
                warn!("{}第{}行不是标头：{}", input.display(), number + 1, line);
                continue;
            }
        };

        let output = render_header(name, value, config, negotiation)?;
        let text = if config.pretty() {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

/// 解析单个标头并生成输出对象
fn render_header(
    name: &str,
    value: &str,
    config: &Config,
    negotiation: &Negotiation,
) -> serde_json::Result<Value> {
    let parsed = parse_named_header(name, value, config);
    let mut output = serde_json::to_value(&parsed)?;
    output["header"] = json!(name);

    let is_accept = matches!(name.parse::<HeaderKind>(), Ok(HeaderKind::Accept));
    if is_accept && !negotiation.available.is_empty() {
        output["selected"] = match select_content_type_from_header(
            Some(value),
            &negotiation.available,
            negotiation.default.as_ref(),
        ) {
            Ok((selected, matched)) => {
                debug!("协商结果：{}（匹配{}）", selected, matched);
                json!({"content_type": selected.to_string(), "pattern": matched.to_string()})
            }
            Err(e) => json!({"error": e.to_string()}),
        };
    }
    Ok(output)
}
