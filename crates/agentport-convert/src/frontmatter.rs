//! Header block parser for agent and skill markdown documents.
//!
//! A document may open with a metadata header delimited by `---` lines:
//!
//! ```text
//! ---
//! name: code-reviewer
//! description: "Reviews code for quality"
//! tools: Read, Grep
//! mcpServers:
//!   github:
//!     command: npx
//!     args: ["-y", "@modelcontextprotocol/server-github"]
//! ---
//!
//! You are a senior reviewer...
//! ```
//!
//! The header decoder is not a YAML implementation. It accepts the subset
//! real agent and skill headers use:
//!
//! - `key: scalar` (plain, single- or double-quoted, bool, null, number)
//! - `key:` followed by an indented nested mapping
//! - `key:` followed by `- item` lines (scalar items only)
//! - inline flow lists `[a, "b"]` and inline JSON objects
//! - `|` and `>` block scalars
//!
//! Anything else is a decode error. A missing, unterminated or undecodable
//! header is never fatal: the document degrades to empty metadata with the
//! whole text as body.

use serde_json::{Map, Value};

use crate::types::Metadata;

const DELIMITER: &str = "---";

/// How header content is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFlavor {
    /// Indentation-aware decoding with lists and nested mappings
    /// (Claude Code agent headers).
    Rich,
    /// One `key: value` per line, every value a string (skill headers).
    Flat,
}

/// The result of splitting a document into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub metadata: Metadata,

    /// Text after the header, trimmed. The original text when there is no
    /// usable header.
    pub body: String,

    /// Set when a delimited header was found but could not be decoded.
    pub header_error: Option<String>,
}

/// Split `content` into header metadata and body.
pub fn parse_document(content: &str, flavor: HeaderFlavor) -> ParsedDocument {
    let Some((header, body)) = split_header(content) else {
        return ParsedDocument {
            metadata: Metadata::new(),
            body: content.to_owned(),
            header_error: None,
        };
    };

    let decoded = match flavor {
        HeaderFlavor::Rich => decode_rich(header),
        HeaderFlavor::Flat => Ok(decode_flat(header)),
    };

    match decoded {
        Ok(map) => ParsedDocument {
            metadata: Metadata::from(map),
            body: body.trim().to_owned(),
            header_error: None,
        },
        Err(reason) => {
            tracing::debug!(reason = %reason, "header decode failed, using whole text as body");
            ParsedDocument {
                metadata: Metadata::new(),
                body: content.to_owned(),
                header_error: Some(reason),
            }
        }
    }
}

/// Locate the header block.
///
/// Returns `(header, body)` when the first line is the delimiter and a
/// closing delimiter line follows. Neither delimiter line is included in
/// the returned slices.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&content[header_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

// ---------------------------------------------------------------------------
// Flat decoding
// ---------------------------------------------------------------------------

fn decode_flat(header: &str) -> Map<String, Value> {
    let mut map = Map::new();
    for line in header.trim().lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            map.insert(key.trim().to_owned(), Value::String(value.to_owned()));
        }
    }
    map
}

// ---------------------------------------------------------------------------
// Rich decoding
// ---------------------------------------------------------------------------

type DecodeResult<T> = std::result::Result<T, String>;

fn decode_rich(header: &str) -> DecodeResult<Map<String, Value>> {
    let lines: Vec<&str> = header.lines().collect();
    decode_mapping(&lines, 0)
}

/// Decode a block of lines as a mapping. `first_line` is the line number
/// of `lines[0]` within the header, used for error messages.
fn decode_mapping(lines: &[&str], first_line: usize) -> DecodeResult<Map<String, Value>> {
    let mut map = Map::new();
    let mut base_indent = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        let line_no = first_line + i + 1;

        if is_insignificant(trimmed) {
            i += 1;
            continue;
        }

        let indent = indent_of(line);
        let base = *base_indent.get_or_insert(indent);
        if indent != base {
            return Err(format!("line {line_no}: unexpected indentation"));
        }
        if trimmed == "-" || trimmed.starts_with("- ") {
            return Err(format!("line {line_no}: list item outside a list"));
        }

        let (key, rest) = split_key(trimmed)
            .ok_or_else(|| format!("line {line_no}: expected `key: value`"))?;

        i += 1;
        let value = match rest {
            "" => {
                let next = next_significant(lines, i);
                match next {
                    Some(j) if is_list_item(lines[j]) && indent_of(lines[j]) >= indent => {
                        let end = list_end(lines, i, indent);
                        let list = decode_list(&lines[i..end], first_line + i)?;
                        i = end;
                        list
                    }
                    Some(j) if indent_of(lines[j]) > indent => {
                        let end = block_end(lines, i, indent);
                        let nested = decode_mapping(&lines[i..end], first_line + i)?;
                        i = end;
                        Value::Object(nested)
                    }
                    _ => Value::Null,
                }
            }
            "|" | "|-" | ">" | ">-" => {
                let end = block_end(lines, i, indent);
                let text = block_scalar(&lines[i..end], rest.starts_with('>'));
                i = end;
                Value::String(text)
            }
            inline => parse_scalar(inline).map_err(|e| format!("line {line_no}: {e}"))?,
        };

        map.insert(key, value);
    }

    Ok(map)
}

fn decode_list(lines: &[&str], first_line: usize) -> DecodeResult<Value> {
    let mut items = Vec::new();
    for (offset, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if is_insignificant(trimmed) {
            continue;
        }
        let item = trimmed
            .strip_prefix('-')
            .map(str::trim)
            .ok_or_else(|| format!("line {}: expected list item", first_line + offset + 1))?;
        let value = parse_scalar(item)
            .map_err(|e| format!("line {}: {e}", first_line + offset + 1))?;
        items.push(value);
    }
    Ok(Value::Array(items))
}

/// Join the lines of a `|` (literal) or `>` (folded) block scalar.
fn block_scalar(lines: &[&str], folded: bool) -> String {
    let dedent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);
    let stripped: Vec<&str> = lines
        .iter()
        .map(|l| l.get(dedent..).unwrap_or(""))
        .collect();
    let separator = if folded { " " } else { "\n" };
    stripped.join(separator).trim_end().to_owned()
}

fn split_key(trimmed: &str) -> Option<(String, &str)> {
    let colon = trimmed
        .char_indices()
        .find(|&(pos, c)| c == ':' && trimmed[pos + 1..].chars().next().is_none_or(char::is_whitespace))
        .map(|(pos, _)| pos)?;
    let key = trimmed[..colon]
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    if key.is_empty() {
        return None;
    }
    Some((key.to_owned(), trimmed[colon + 1..].trim()))
}

fn parse_scalar(s: &str) -> DecodeResult<Value> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix('"') {
        let inner = rest
            .strip_suffix('"')
            .filter(|inner| !inner.ends_with('\\') || inner.ends_with("\\\\"))
            .ok_or("unterminated double-quoted string")?;
        return Ok(Value::String(unescape(inner)));
    }
    if let Some(rest) = s.strip_prefix('\'') {
        let inner = rest
            .strip_suffix('\'')
            .ok_or("unterminated single-quoted string")?;
        return Ok(Value::String(inner.replace("''", "'")));
    }

    if let Some(inner) = s.strip_prefix('[') {
        let inner = inner.strip_suffix(']').ok_or("unterminated flow list")?;
        if let Ok(v) = serde_json::from_str::<Value>(s) {
            return Ok(v);
        }
        let inner = inner.trim();
        if inner.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        let items = inner
            .split(',')
            .map(|item| {
                let item = item.trim().trim_matches('"').trim_matches('\'');
                Value::String(item.to_owned())
            })
            .collect();
        return Ok(Value::Array(items));
    }

    if s.starts_with('{')
        && s.ends_with('}')
        && let Ok(v) = serde_json::from_str::<Value>(s)
    {
        return Ok(v);
    }

    match s {
        "true" | "yes" | "on" => return Ok(Value::Bool(true)),
        "false" | "no" | "off" => return Ok(Value::Bool(false)),
        "null" | "~" => return Ok(Value::Null),
        _ => {}
    }

    if let Ok(n) = s.parse::<i64>() {
        return Ok(Value::Number(n.into()));
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(n)
    {
        return Ok(Value::Number(n));
    }

    Ok(Value::String(s.to_owned()))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn is_insignificant(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "-" || trimmed.starts_with("- ")
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn next_significant(lines: &[&str], start: usize) -> Option<usize> {
    (start..lines.len()).find(|&j| !is_insignificant(lines[j].trim()))
}

/// End of the block of lines indented deeper than `parent_indent`.
fn block_end(lines: &[&str], start: usize, parent_indent: usize) -> usize {
    let mut end = start;
    while end < lines.len() {
        let line = lines[end];
        if !line.trim().is_empty() && indent_of(line) <= parent_indent {
            break;
        }
        end += 1;
    }
    end
}

/// End of a `- item` run belonging to a key at `parent_indent`. Items may
/// sit at the key's own indentation.
fn list_end(lines: &[&str], start: usize, parent_indent: usize) -> usize {
    let mut end = start;
    while end < lines.len() {
        let line = lines[end];
        let trimmed = line.trim();
        if !is_insignificant(trimmed) && (!is_list_item(line) || indent_of(line) < parent_indent) {
            break;
        }
        end += 1;
    }
    end
}
