use regex::{Captures, Regex};

/// Context-free token and phrase substitutions. Pure text transform;
/// anything no rule matches passes through unchanged.
///
/// Rule order matters only where patterns overlap: formatted strings are
/// rewritten before quoted object keys so their embedded expressions survive.
pub fn rewrite_tokens(source: &str) -> String {
    let mut code = sub(source, r"#(.+)", "//$1");
    code = sub(&code, r"\bprint\s*\(", "console.log(");

    code = sub(&code, r"\bTrue\b", "true");
    code = sub(&code, r"\bFalse\b", "false");
    code = sub(&code, r"\bNone\b", "null");

    code = sub(&code, r"\band\b", "&&");
    code = sub(&code, r"\bor\b", "||");
    code = sub(&code, r"\bnot\b", "!");

    code = rewrite_fstrings(&code);
    code = sub(&code, r"'(\w+)':", "\"$1\":");

    code = sub(&code, r"\.append\(", ".push(");
    code = sub(&code, r"\.extend\(", ".push(...");

    code = sub(&code, r"\.strip\(\)", ".trim()");
    code = sub(&code, r"\.lower\(\)", ".toLowerCase()");
    code = sub(&code, r"\.upper\(\)", ".toUpperCase()");

    code = sub(&code, r"\blen\(([^)]+)\)", "${1}.length");
    code
}

fn sub(code: &str, pattern: &str, replacement: &str) -> String {
    Regex::new(pattern)
        .unwrap()
        .replace_all(code, replacement)
        .into_owned()
}

/// Formatted-string literals become backquoted templates, each `{expr}`
/// placeholder becoming `${expr}`.
fn rewrite_fstrings(code: &str) -> String {
    let double = Regex::new(r#"f"([^"]*\{[^}]*\}[^"]*)""#).unwrap();
    let single = Regex::new(r"f'([^']*\{[^}]*\}[^']*)'").unwrap();
    let placeholder = Regex::new(r"\{([^}]+)\}").unwrap();

    let template = |caps: &Captures| -> String {
        format!("`{}`", placeholder.replace_all(&caps[1], "$${${1}}"))
    };

    let code = double.replace_all(code, template);
    single.replace_all(&code, template).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_and_operators() {
        assert_eq!(rewrite_tokens("x = True and not False"), "x = true && ! false");
        assert_eq!(rewrite_tokens("y = None or 1"), "y = null || 1");
    }

    #[test]
    fn fstring_becomes_template() {
        assert_eq!(rewrite_tokens(r#"f"Hello {name}""#), "`Hello ${name}`");
        assert_eq!(rewrite_tokens("f'{a} + {b}'"), "`${a} + ${b}`");
    }

    #[test]
    fn method_idioms() {
        assert_eq!(rewrite_tokens("xs.append(1)"), "xs.push(1)");
        assert_eq!(rewrite_tokens("xs.extend(ys)"), "xs.push(...ys)");
        assert_eq!(rewrite_tokens("s.strip().lower()"), "s.trim().toLowerCase()");
        assert_eq!(rewrite_tokens("n = len(items)"), "n = items.length");
    }

    #[test]
    fn comment_marker() {
        assert_eq!(rewrite_tokens("# hello"), "// hello");
    }

    #[test]
    fn converted_text_is_stable() {
        let converted = "// note\nconsole.log(`Hi ${name}`);\nif (a && ! b) {\n  xs.push(x);\n}";
        assert_eq!(rewrite_tokens(converted), converted, "rules must be idempotent");
    }
}
