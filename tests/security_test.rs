// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod security_tests {
    //! # 畸形输入回归测试套件
    //!
    //! 标头值来自不可信的客户端。本模块验证解析器面对以下输入时只返回错误而不会崩溃：
    //! - 不成对的引号与括号
    //! - 超长输入与大量元素
    //! - 非 ASCII 文本与控制字符
    //! - 非法的质量值（NaN、无穷大、超出范围）

    use headerparse::{
        parse_accept, parse_accept_charset, parse_cache_control, parse_content_type,
        parse_forwarded, parse_link, select_content_type, split_list, ContentType, Exception,
    };

    #[test]
    fn test_unbalanced_quotes() {
        assert_eq!(split_list("a, \"b, c"), vec!["a", "\"b", "c"]);
        assert!(parse_link("<a>; title=\"unterminated, <b>", true).is_ok());
        assert!(parse_forwarded("for=\"unterminated", false).is_ok());
        assert!(parse_content_type("text/plain; a=\"b", true).is_ok());
    }

    #[test]
    fn test_unbalanced_parentheses() {
        // 没有闭合的括号不是注释，按普通文本保留
        assert_eq!(
            parse_content_type("text/plain (comment", true)
                .unwrap()
                .content_subtype(),
            "plain (comment"
        );
        assert_eq!(
            parse_content_type("text/plain; a=b) (", true).unwrap().parameter("a"),
            Some("b) (")
        );
        assert!(parse_link("<a> (x", true).is_err());
    }

    /// 非有限的质量值在严格模式下被拒绝，在非严格模式下被忽略
    #[test]
    fn test_non_finite_quality() {
        for value in ["NaN", "inf", "-inf", "1e999"] {
            let header = format!("text/html;q={}", value);
            assert!(
                matches!(parse_accept(&header, true), Err(Exception::InvalidQuality(_))),
                "{}",
                value
            );
            assert!(parse_accept(&header, false).unwrap().is_empty(), "{}", value);
        }
        assert_eq!(parse_accept_charset("utf-8;q=NaN, latin1"), vec!["latin1", "utf-8"]);
    }

    #[test]
    fn test_out_of_range_quality_does_not_panic() {
        let parsed = parse_accept("a/b;q=5, c/d;q=-1, e/f", false).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], "a/b");
        let available = vec![ContentType::new("c", "d")];
        assert!(select_content_type(&parsed, &available, None).is_ok());
    }

    #[test]
    fn test_many_explicit_top_qualities() {
        let header = vec!["x/y;q=1"; 5000].join(", ");
        let parsed = parse_accept(&header, true).unwrap();
        assert_eq!(parsed.len(), 5000);
        assert!(parsed.windows(2).all(|w| w[0].quality() > w[1].quality()));
    }

    #[test]
    fn test_oversized_values() {
        let long = "a".repeat(100_000);
        let content_type = format!("text/{}; p={}", long, long);
        assert_eq!(
            parse_content_type(&content_type, true).unwrap().content_subtype().len(),
            100_000
        );
        let links = format!("<{}>; rel={}", long, long);
        assert_eq!(parse_link(&links, true).unwrap()[0].target().len(), 100_000);
        let directives = vec!["no-cache"; 10_000].join(",");
        assert_eq!(parse_cache_control(&directives).len(), 1);
    }

    #[test]
    fn test_non_ascii_text() {
        let parsed = parse_forwarded("for=\"客户端\";host=例子.测试", false).unwrap();
        assert_eq!(parsed[0].forwarded_for(), Some("客户端"));
        assert_eq!(parsed[0].host(), Some("例子.测试"));
        let parsed = parse_link("<https://例子.测试/路径>; title=\"标题；内容\"", true).unwrap();
        assert_eq!(parsed[0].get("title"), vec!["标题；内容"]);
        assert!(parse_content_type("テキスト/プレーン", true).is_ok());
    }

    #[test]
    fn test_control_characters() {
        assert!(parse_cache_control("max-age=\u{0}, \r\nno-store").contains("no-store"));
        assert!(parse_accept("text/html\u{0};q=0.5", false).is_ok());
        assert!(parse_link("<a>\r\n; rel=x", true).is_ok());
    }
}

#[cfg(test)]
mod property_tests {
    //! # 属性测试
    //!
    //! 使用 proptest 生成任意输入，验证解析器不会崩溃以及媒体类型的往返一致性。

    use headerparse::{
        parse_accept, parse_accept_charset, parse_cache_control, parse_content_type,
        parse_forwarded, parse_link, select_content_type, split_list, ContentType,
    };
    use proptest::prelude::*;

    fn token() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9.-]{0,11}"
    }

    proptest! {
        #[test]
        fn parsers_never_panic(input in "\\PC{0,200}") {
            let _ = split_list(&input);
            let _ = parse_content_type(&input, true);
            let _ = parse_accept(&input, false);
            let _ = parse_accept(&input, true);
            let _ = parse_accept_charset(&input);
            let _ = parse_cache_control(&input);
            let _ = parse_forwarded(&input, true);
            let _ = parse_link(&input, true);
            let _ = parse_link(&input, false);
        }

        #[test]
        fn structured_noise_never_panics(input in "[<>;,=\"() a-z*/+q0-9.]{0,120}") {
            let _ = parse_accept(&input, false);
            let _ = parse_link(&input, true);
            let _ = parse_forwarded(&input, false);
            let _ = parse_content_type(&input, false);
        }

        #[test]
        fn content_type_round_trip(
            primary in token(),
            subtype in token(),
            suffix in proptest::option::of(token()),
            parameters in proptest::collection::btree_map(token(), "[a-zA-Z0-9 ._-]{0,12}", 0..4),
        ) {
            let mut content_type = ContentType::new(&primary, &subtype);
            if let Some(suffix) = &suffix {
                content_type = content_type.with_suffix(suffix);
            }
            for (name, value) in &parameters {
                content_type = content_type.with_parameter(name, value);
            }
            let reparsed = parse_content_type(&content_type.to_string(), false).unwrap();
            prop_assert_eq!(reparsed, content_type);
        }

        #[test]
        fn accept_is_sorted_by_quality(qualities in proptest::collection::vec(0u32..=1000, 1..20)) {
            let header = qualities
                .iter()
                .enumerate()
                .map(|(i, q)| format!("type{}/sub;q={}", i, *q as f64 / 1000.0))
                .collect::<Vec<_>>()
                .join(", ");
            let parsed = parse_accept(&header, true).unwrap();
            prop_assert_eq!(parsed.len(), qualities.len());
            prop_assert!(parsed.windows(2).all(|w| w[0].quality() >= w[1].quality()));
        }

        #[test]
        fn negotiation_selects_an_available_type(
            requested in proptest::collection::vec((token(), token(), 0u32..=10), 0..8),
            available in proptest::collection::vec((token(), token()), 1..8),
        ) {
            let requested: Vec<ContentType> = requested
                .iter()
                .map(|(t, s, q)| ContentType::new(t, s).with_quality(*q as f64 / 10.0))
                .chain(std::iter::once(ContentType::new("*", "*").with_quality(0.01)))
                .collect();
            let available: Vec<ContentType> = available
                .iter()
                .map(|(t, s)| ContentType::new(t, s))
                .collect();
            if let Ok((selected, _)) = select_content_type(&requested, &available, None) {
                prop_assert!(available.contains(&selected));
            }
        }
    }
}
