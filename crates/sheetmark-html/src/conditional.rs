//! `data-xls-conditional` mini-language
//!
//! ```text
//! value>100|bg:FFC7CE|font:9C0006
//! value<0|font:FF0000|bold
//! between:10:20|bg:FFFF00
//! ```

use lazy_regex::regex_captures;
use sheetmark_core::{Color, ConditionalRule, StyleDescriptor};

use crate::validator::is_hex_color;

/// Parse a rule; `None` when the condition or any directive is malformed
pub fn parse_conditional(raw: &str) -> Option<ConditionalRule> {
    let mut parts = raw.split('|').map(str::trim);
    let rule = parse_condition(parts.next()?)?;

    let mut format = StyleDescriptor::new();
    let mut directives = 0;
    for directive in parts {
        format = apply_directive(format, directive)?;
        directives += 1;
    }
    if directives == 0 {
        return None;
    }

    Some(rule.with_format(format))
}

fn parse_condition(condition: &str) -> Option<ConditionalRule> {
    if let Some((_, op, n)) = regex_captures!(r"^value\s*([<>])\s*([+-]?\d+(?:\.\d+)?)$", condition) {
        let threshold: f64 = n.parse().ok()?;
        return Some(match op {
            ">" => ConditionalRule::greater_than(threshold),
            _ => ConditionalRule::less_than(threshold),
        });
    }
    let (_, low, high) = regex_captures!(
        r"^between:([+-]?\d+(?:\.\d+)?):([+-]?\d+(?:\.\d+)?)$",
        condition
    )?;
    Some(ConditionalRule::between(low.parse().ok()?, high.parse().ok()?))
}

fn apply_directive(format: StyleDescriptor, directive: &str) -> Option<StyleDescriptor> {
    if directive == "bold" {
        return Some(format.bold(true));
    }
    let (key, value) = directive.split_once(':')?;
    let value = value.trim();
    if !is_hex_color(value) {
        return None;
    }
    let color = Color::from_hex(value)?;
    match key.trim() {
        "bg" => Some(format.fill_color(color)),
        "font" => Some(format.font_color(color)),
        _ => None,
    }
}
