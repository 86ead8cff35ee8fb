use crate::core::types::FormBody;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's `encodeURIComponent`
pub static COMPONENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Content type of every encoded body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Percent-encode keys and values independently and join them as
/// `key=value` pairs with `&`, keeping insertion order.
pub fn encode_body(body: &FormBody) -> String {
    body.iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, &COMPONENT_ENCODE_SET),
                utf8_percent_encode(value, &COMPONENT_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Standard form decoding of an encoded body
pub fn decode_body(encoded: &str) -> FormBody {
    form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
