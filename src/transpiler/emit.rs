use chrono::Local;
use regex::Regex;

use super::libpatterns::client_class;
use super::types::{Capability, ConvertState};

/// Assemble the final output: header comment, import/setup preamble derived
/// from the accumulated capabilities, and the rewritten body, wrapped in a
/// synthesized entry point when nothing in it is callable from outside.
pub fn emit_output(code: &str, lib_name: &str, ref_url: &str, state: &ConvertState) -> String {
    let body = wrap_entry_point(&cleanup(code), state.async_needed);

    let mut parts: Vec<String> = vec![header(lib_name, ref_url)];
    let imports = import_lines(lib_name, state);
    if !imports.is_empty() {
        parts.push(imports.join("\n"));
    }
    if state.requires(Capability::CredentialProvider) {
        parts.push(credential_setup());
    }
    parts.push(body);

    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

fn header(lib_name: &str, ref_url: &str) -> String {
    format!(
        "// Converted from Python to JavaScript\n\
         // Target library: {lib_name}\n\
         // API Reference: {ref_url}\n\
         // Generated on: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// One import per capability, in fixed order. The JSON codec needs none:
/// `JSON` is a global in the target language.
fn import_lines(lib_name: &str, state: &ConvertState) -> Vec<String> {
    let mut lines = Vec::new();

    if state.requires(Capability::TargetLibrary) {
        lines.push(format!(
            "const {{ {} }} = require('{lib_name}');",
            client_class(lib_name)
        ));
    }
    if state.requires(Capability::CredentialProvider) {
        lines.push("const { DefaultAzureCredential } = require('@azure/identity');".to_string());
    }
    if state.requires(Capability::HttpClient) {
        lines.push("const axios = require('axios');".to_string());
    }
    if state.requires(Capability::FileSystem) {
        lines.push("const fs = require('fs');".to_string());
    }
    if state.requires(Capability::PathModule) {
        lines.push("const path = require('path');".to_string());
    }
    lines
}

fn credential_setup() -> String {
    "const credential = new DefaultAzureCredential();\n\
     const endpoint = process.env.AZURE_ENDPOINT || 'https://your-resource.azure.com';"
        .to_string()
}

/// Collapse runs of blank lines and trim the edges.
fn cleanup(code: &str) -> String {
    Regex::new(r"\n\s*\n\s*\n")
        .unwrap()
        .replace_all(code, "\n\n")
        .trim()
        .to_string()
}

/// Wrap free-standing top-level statements in a `main` function when the
/// body declares no function, class, or module export of its own. The async
/// variant gets an error handler on the trailing invocation.
fn wrap_entry_point(body: &str, is_async: bool) -> String {
    let declares = Regex::new(r"function\s+\w+|class\s+\w+|module\.exports").unwrap();
    if declares.is_match(body) {
        return body.to_string();
    }

    let indented = indent(body, 2);
    if is_async {
        format!("async function main() {{\n{indented}\n}}\n\nmain().catch(console.error);")
    } else {
        format!("function main() {{\n{indented}\n}}\n\nmain();")
    }
}

fn indent(code: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_statements_get_wrapped() {
        let state = ConvertState::new();
        let out = emit_output("console.log(1);", "lodash", "https://example.com/docs", &state);
        assert!(out.contains("function main() {\n  console.log(1);\n}"));
        assert!(out.contains("\nmain();"));
        assert!(!out.contains("catch(console.error)"));
    }

    #[test]
    fn async_flag_attaches_error_handler() {
        let mut state = ConvertState::new();
        state.async_needed = true;
        let out = emit_output("await go();", "lodash", "u", &state);
        assert!(out.contains("async function main() {"));
        assert!(out.contains("main().catch(console.error);"));
    }

    #[test]
    fn declared_function_prevents_wrapping() {
        let state = ConvertState::new();
        let out = emit_output("function go() {\n  return 1;\n}", "lodash", "u", &state);
        assert!(!out.contains("function main()"));
    }

    #[test]
    fn imports_follow_capability_order() {
        let mut state = ConvertState::new();
        state.require(Capability::HttpClient);
        state.require(Capability::TargetLibrary);
        state.require(Capability::CredentialProvider);
        let out = emit_output("function f() {}", "@azure/ai-agents", "u", &state);

        let agents = out.find("const { AgentsClient } = require('@azure/ai-agents');").unwrap();
        let identity = out.find("const { DefaultAzureCredential }").unwrap();
        let axios = out.find("const axios = require('axios');").unwrap();
        assert!(agents < identity && identity < axios, "fixed deterministic order");
        assert!(out.contains("const credential = new DefaultAzureCredential();"));
        assert!(out.contains("process.env.AZURE_ENDPOINT"));
    }

    #[test]
    fn header_names_library_and_reference() {
        let state = ConvertState::new();
        let out = emit_output("function f() {}", "lodash", "https://example.com/api", &state);
        assert!(out.starts_with("// Converted from Python to JavaScript\n"));
        assert!(out.contains("// Target library: lodash\n"));
        assert!(out.contains("// API Reference: https://example.com/api\n"));
        assert!(out.contains("// Generated on: "));
    }
}
