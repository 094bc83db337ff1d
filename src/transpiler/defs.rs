use regex::Regex;

use super::types::ConvertState;

/// Translate `def`/`class` headers left in place by the block stage.
///
/// Priority per line: constructor, then method (leading `self`/`cls`
/// dropped), then free function, then class header. Parameter defaults are
/// truncated to the bare name and base-class lists are discarded; both are
/// deliberate lossy rewrites.
pub fn translate_definitions(code: &str, state: &mut ConvertState) -> String {
    let def_re = Regex::new(r"^(\s*)(async\s+)?def\s+(\w+)\s*\((.*)\)\s*:\s*$").unwrap();
    let class_re = Regex::new(r"^(\s*)class\s+(\w+)\s*(?:\(([^)]*)\))?\s*:\s*$").unwrap();

    let lines: Vec<&str> = code.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = def_re.captures(line) {
            let pad = caps.get(1).map_or("", |m| m.as_str());
            let name = &caps[3];
            let is_async = caps.get(2).is_some() || body_awaits(line, &lines[i + 1..]);

            let mut params = clean_params(&caps[4]);
            let has_self = params
                .first()
                .is_some_and(|p| p == "self" || p == "cls");
            if has_self {
                params.remove(0);
            }
            let plist = params.join(", ");

            if is_async {
                state.async_needed = true;
            }

            let header = if name == "__init__" && has_self {
                format!("{pad}constructor({plist}) {{")
            } else if has_self {
                if is_async {
                    format!("{pad}async {name}({plist}) {{")
                } else {
                    format!("{pad}{name}({plist}) {{")
                }
            } else if is_async {
                format!("{pad}async function {name}({plist}) {{")
            } else {
                format!("{pad}function {name}({plist}) {{")
            };
            out.push(header);
        } else if let Some(caps) = class_re.captures(line) {
            let pad = caps.get(1).map_or("", |m| m.as_str());
            out.push(format!("{pad}class {} {{", &caps[2]));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

/// Bare parameter names: defaults are dropped, not translated.
fn clean_params(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.split('=').next().unwrap_or(p).trim().to_string())
        .collect()
}

/// Whether the header line or its textual body (the following lines indented
/// deeper than the header) mentions an awaited-style call.
fn body_awaits(header: &str, rest: &[&str]) -> bool {
    if has_await_marker(header) {
        return true;
    }
    let header_indent = indent_of(header);
    for line in rest {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) <= header_indent {
            break;
        }
        if has_await_marker(line) {
            return true;
        }
    }
    false
}

fn has_await_marker(line: &str) -> bool {
    line.contains("await") || line.contains("requests.")
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
