#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_empty_body, get_header, parse_json_body};
