use super::types::{BlockHeader, Frame, FrameKind};

/// Convert indentation-delimited blocks to braced blocks in a single pass.
///
/// Non-blank lines first close every frame opened at a deeper indentation,
/// one brace per frame at the frame's own indent; `elif`/`else`/`except`/
/// `finally` close and reopen the frame they continue instead of nesting a
/// new one. End of input closes all remaining frames, so output braces
/// always balance, even for unterminated input.
pub fn rebrace_blocks(code: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for line in code.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(line.to_string());
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        while stack.last().is_some_and(|f| f.indent > indent) {
            let frame = stack.pop().unwrap();
            out.push(closing_brace(frame.indent));
        }

        let header = recognize_header(trimmed);
        if opens_frame(header.as_ref()) {
            // a sibling block at the same width ends the previous one; the
            // stack stays strictly increasing
            while stack.last().is_some_and(|f| f.indent >= indent) {
                let frame = stack.pop().unwrap();
                out.push(closing_brace(frame.indent));
            }
        }

        let pad = &line[..indent];
        match header {
            Some(BlockHeader::If(cond)) => {
                out.push(format!("{pad}if ({cond}) {{"));
                stack.push(Frame { indent, kind: FrameKind::Conditional });
            }
            Some(BlockHeader::Elif(cond)) => {
                // continues the conditional frame opened by `if`; no push
                out.push(format!("{pad}}} else if ({cond}) {{"));
            }
            Some(BlockHeader::Else) => {
                out.push(format!("{pad}}} else {{"));
            }
            Some(BlockHeader::ForRange { var, bound }) => {
                out.push(format!("{pad}for (let {var} = 0; {var} < {bound}; {var}++) {{"));
                stack.push(Frame { indent, kind: FrameKind::Loop });
            }
            Some(BlockHeader::ForEach { var, iterable }) => {
                out.push(format!("{pad}for (const {var} of {iterable}) {{"));
                stack.push(Frame { indent, kind: FrameKind::Loop });
            }
            Some(BlockHeader::While(cond)) => {
                out.push(format!("{pad}while ({cond}) {{"));
                stack.push(Frame { indent, kind: FrameKind::Loop });
            }
            Some(BlockHeader::Try) => {
                out.push(format!("{pad}try {{"));
                stack.push(Frame { indent, kind: FrameKind::Exception });
            }
            Some(BlockHeader::Except(name)) => {
                out.push(format!("{pad}}} catch ({}) {{", catch_binding(name.as_deref())));
            }
            Some(BlockHeader::Finally) => {
                out.push(format!("{pad}}} finally {{"));
            }
            Some(BlockHeader::Def) | Some(BlockHeader::Class) => {
                // header text is translated by the definition stage; the
                // frame is tracked here so the body gets its closing brace
                out.push(line.to_string());
                stack.push(Frame { indent, kind: FrameKind::Definition });
            }
            None => out.push(line.to_string()),
        }
    }

    while let Some(frame) = stack.pop() {
        out.push(closing_brace(frame.indent));
    }

    out.join("\n")
}

/// Whether a recognized header opens a frame of its own. `elif`/`else`/
/// `except`/`finally` continue the frame already on the stack instead.
fn opens_frame(header: Option<&BlockHeader>) -> bool {
    matches!(
        header,
        Some(
            BlockHeader::If(_)
                | BlockHeader::ForRange { .. }
                | BlockHeader::ForEach { .. }
                | BlockHeader::While(_)
                | BlockHeader::Try
                | BlockHeader::Def
                | BlockHeader::Class
        )
    )
}

/// Recognize a block-opening header in a trimmed line. A header-shaped line
/// that fits no rule returns `None` and stays passthrough: it opens no frame
/// and its indented body is left un-rebraced.
pub fn recognize_header(trimmed: &str) -> Option<BlockHeader> {
    if let Some(cond) = clause(trimmed, "if ") {
        return Some(BlockHeader::If(cond));
    }
    if let Some(cond) = clause(trimmed, "elif ") {
        return Some(BlockHeader::Elif(cond));
    }
    if trimmed == "else:" {
        return Some(BlockHeader::Else);
    }
    if let Some(head) = clause(trimmed, "for ") {
        if let Some((var, iterable)) = head.split_once(" in ") {
            let var = var.trim().to_string();
            let iterable = iterable.trim().to_string();
            if let Some(bound) = single_range_bound(&iterable) {
                return Some(BlockHeader::ForRange { var, bound });
            }
            return Some(BlockHeader::ForEach { var, iterable });
        }
        return None;
    }
    if let Some(cond) = clause(trimmed, "while ") {
        return Some(BlockHeader::While(cond));
    }
    if trimmed.starts_with("try:") {
        return Some(BlockHeader::Try);
    }
    if trimmed == "except:" {
        return Some(BlockHeader::Except(None));
    }
    if let Some(rest) = trimmed.strip_prefix("except ") {
        if let Some(name) = rest.strip_suffix(':') {
            let name = name.trim();
            return Some(BlockHeader::Except(
                (!name.is_empty()).then(|| name.to_string()),
            ));
        }
        // `except` without its colon: passthrough, opens no frame
        return None;
    }
    if trimmed == "finally:" {
        return Some(BlockHeader::Finally);
    }
    if is_def_header(trimmed) {
        return Some(BlockHeader::Def);
    }
    if is_class_header(trimmed) {
        return Some(BlockHeader::Class);
    }
    None
}

/// `<keyword> <text>:` shape, returning the trimmed text.
fn clause(trimmed: &str, keyword: &str) -> Option<String> {
    let rest = trimmed.strip_prefix(keyword)?;
    let text = rest.strip_suffix(':')?;
    Some(text.trim().to_string())
}

/// `range(<expr>)` with a single expression; two-argument ranges fall
/// through to element iteration like any other iterable.
fn single_range_bound(iterable: &str) -> Option<String> {
    let inner = iterable.strip_prefix("range(")?.strip_suffix(')')?;
    if inner.contains(',') {
        return None;
    }
    Some(inner.trim().to_string())
}

fn is_def_header(trimmed: &str) -> bool {
    let rest = trimmed
        .strip_prefix("async def ")
        .or_else(|| trimmed.strip_prefix("def "));
    match rest {
        Some(rest) => rest.contains('(') && rest.contains(')') && trimmed.ends_with(':'),
        None => false,
    }
}

fn is_class_header(trimmed: &str) -> bool {
    trimmed.strip_prefix("class ").is_some_and(|_| trimmed.ends_with(':'))
}

/// Lowercase local binding derived from the exception name; `error` when the
/// clause names none.
fn catch_binding(name: Option<&str>) -> String {
    match name.and_then(|n| n.split_whitespace().next()) {
        Some(first) => first.to_lowercase(),
        None => "error".to_string(),
    }
}

fn closing_brace(indent: usize) -> String {
    format!("{}{}", " ".repeat(indent), '}')
}
