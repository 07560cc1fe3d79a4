pub mod accept;
pub mod cache_control;
pub mod config;
pub mod content_type;
pub mod exception;
pub mod forwarded;
pub mod header;
pub mod link;
pub mod negotiation;
pub mod param;
pub mod tokenizer;

pub use accept::{
    parse_accept, parse_accept_charset, parse_accept_encoding, parse_accept_language,
    parse_qualified_list,
};
pub use cache_control::{parse_cache_control, CacheControl, DirectiveValue};
pub use config::Config;
pub use content_type::{compare_content_types, content_types_equal, parse_content_type, ContentType};
pub use exception::Exception;
pub use forwarded::{parse_forwarded, ForwardedElement};
pub use header::{parse_header, parse_header_or_raw, parse_named_header, ParsedHeader};
pub use link::{parse_link, LinkHeader};
pub use negotiation::{select_content_type, select_content_type_from_header, Match, MatchType};
pub use param::HeaderKind;
pub use tokenizer::{split_list, ParameterOptions};
