//! Parser for one-line literal records such as
//! `{u'user': {u'screen_name': u'alice', u'id': 42}, u'retweeted': False}`.
//!
//! Records become [`serde_json::Value`] trees: dicts map to objects (keys are
//! rendered to strings), lists, tuples and sets to arrays, `None` to null.
//!
//! Known limits:
//! - keys are stringified, so `{1: 'a', '1': 'b'}` keeps a single key `"1"`
//!   (the later entry wins)
//! - only one-letter string prefixes (`u`, `b`, `r`) are accepted; `ur`, `br`
//!   and `rb` lines are malformed
//! - bytes literals become plain strings, so `b'x'` reads as `x`
//! - integers beyond the `u64` range are stored as `f64` and lose precision

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Parser)]
#[grammar = "streaming/literal.pest"]
struct LiteralParser;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("bad escape sequence {0:?}")]
    Escape(String),
    #[error("number out of range: {0}")]
    Number(String),
}

pub fn parse(input: &str) -> Result<Value, LiteralError> {
    let mut pairs = LiteralParser::parse(Rule::record, input)
        .map_err(|e| LiteralError::Syntax(e.to_string()))?;

    let value = pairs
        .next()
        .and_then(|record| record.into_inner().next())
        .ok_or_else(|| LiteralError::Syntax("empty record".to_string()))?;

    convert(value)
}

fn convert(pair: Pair<'_, Rule>) -> Result<Value, LiteralError> {
    match pair.as_rule() {
        Rule::dict => {
            let mut map = Map::new();
            for entry in pair.into_inner() {
                let mut kv = entry.into_inner();
                let (Some(key), Some(value)) = (kv.next(), kv.next()) else {
                    return Err(LiteralError::Syntax("incomplete dict entry".to_string()));
                };
                map.insert(key_string(convert(key)?), convert(value)?);
            }
            Ok(Value::Object(map))
        }
        Rule::list | Rule::tuple | Rule::set => pair
            .into_inner()
            .map(convert)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Rule::string => parse_string(pair.as_str()).map(Value::String),
        Rule::number => parse_number(pair.as_str()),
        Rule::boolean => Ok(Value::Bool(pair.as_str() == "True")),
        Rule::none => Ok(Value::Null),
        other => Err(LiteralError::Syntax(format!("unexpected {:?}", other))),
    }
}

/// Renders a scalar the way it would print, so `True` stays `True` rather
/// than becoming `true`.
pub fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null => Some("None".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn key_string(key: Value) -> String {
    match display_scalar(&key) {
        Some(s) => s,
        None => key.to_string(),
    }
}

fn parse_number(text: &str) -> Result<Value, LiteralError> {
    let is_float = text.contains(['.', 'e', 'E']);
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Number(n.into()));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Ok(Value::Number(n.into()));
        }
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| LiteralError::Number(text.to_string()))
}

fn parse_string(text: &str) -> Result<String, LiteralError> {
    let mut raw = false;
    let mut body = text;
    if let Some(first) = body.chars().next() {
        if first != '\'' && first != '"' {
            raw = first.eq_ignore_ascii_case(&'r');
            body = &body[first.len_utf8()..];
        }
    }
    // strip the quotes
    let body = &body[1..body.len() - 1];

    if raw {
        Ok(body.to_string())
    } else {
        unescape(body)
    }
}

fn unescape(body: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            return Err(LiteralError::Escape("\\".to_string()));
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '\\' | '\'' | '"' => out.push(esc),
            '\n' => {}
            'x' => out.push(hex_escape(&mut chars, 2, 'x')?),
            'u' => out.push(hex_escape(&mut chars, 4, 'u')?),
            'U' => out.push(hex_escape(&mut chars, 8, 'U')?),
            '0'..='7' => {
                let mut code = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                let ch = char::from_u32(code)
                    .ok_or_else(|| LiteralError::Escape(format!("\\{:o}", code)))?;
                out.push(ch);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    tag: char,
) -> Result<char, LiteralError> {
    let hex: String = chars.by_ref().take(digits).collect();
    let bad = || LiteralError::Escape(format!("\\{}{}", tag, hex));
    if hex.len() != digits {
        return Err(bad());
    }
    let code = u32::from_str_radix(&hex, 16).map_err(|_| bad())?;
    char::from_u32(code).ok_or_else(bad)
}
