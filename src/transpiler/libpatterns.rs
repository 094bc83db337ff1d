use regex::{Captures, Regex};

use super::types::{Capability, ConvertState};
use crate::docs::ApiMethod;

/// Client class for a cloud-SDK library name; unrecognized names fall back
/// to the generic class.
pub fn client_class(lib_name: &str) -> &'static str {
    match lib_name {
        "@azure/ai-agents" => "AgentsClient",
        "@azure/openai" => "OpenAIClient",
        "@azure/storage-blob" => "BlobServiceClient",
        "@azure/cosmos" => "CosmosClient",
        _ => "Client",
    }
}

/// Rewrite source-ecosystem library idioms to their target-library
/// equivalents, accumulating the capabilities the emitted preamble will
/// need. Detection is textual: presence of the idiom token is sufficient to
/// trigger rewriting, no semantic verification is attempted.
pub fn translate_library_calls(
    code: &str,
    lib_name: &str,
    api_methods: &[ApiMethod],
    state: &mut ConvertState,
) -> String {
    let mut code = code.to_string();

    if code.contains("requests.") {
        state.require(Capability::HttpClient);
        state.async_needed = true;

        code = sub(&code, r"requests\.get\(([^)]+)\)", "await axios.get(${1})");
        code = sub(&code, r"requests\.post\(([^)]+)\)", "await axios.post(${1})");
        code = sub(&code, r"\.status_code\b", ".status");
        code = sub(&code, r"\.text\b", ".data");
    }

    if code.contains("json.") {
        state.require(Capability::JsonCodec);
        code = sub(&code, r"json\.loads\(", "JSON.parse(");
        code = sub(&code, r"json\.dumps\(", "JSON.stringify(");
    }

    if !api_methods.is_empty() {
        code = match_discovered_methods(&code, api_methods);
    }

    if lib_name.starts_with("@azure/") {
        state.require(Capability::TargetLibrary);
        state.require(Capability::CredentialProvider);

        let verbs = ["get", "post", "create", "list"];
        if !code.contains("client") && verbs.iter().any(|v| code.contains(v)) {
            code = format!(
                "const client = new {}(endpoint, credential);\n\n{code}",
                client_class(lib_name)
            );
        }
    }

    if code.contains("fs.") || code.to_lowercase().contains("file") {
        state.require(Capability::FileSystem);
    }
    if code.contains("path.") || code.contains("os.path") {
        state.require(Capability::PathModule);
    }

    code
}

/// Best-effort use of methods discovered from reference documentation:
/// a snake_case call through a client receiver is renamed to its camelCase
/// form when the documentation lists that name.
fn match_discovered_methods(code: &str, api_methods: &[ApiMethod]) -> String {
    let call = Regex::new(r"client\.([a-z][a-z0-9]*(?:_[a-z0-9]+)+)\s*\(").unwrap();
    call.replace_all(code, |caps: &Captures| {
        let camel = camel_case(&caps[1]);
        if api_methods.iter().any(|m| m.name == camel) {
            format!("client.{camel}(")
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}

fn camel_case(snake: &str) -> String {
    let mut parts = snake.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn sub(code: &str, pattern: &str, replacement: &str) -> String {
    Regex::new(pattern)
        .unwrap()
        .replace_all(code, replacement)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_idiom_becomes_awaited_axios() {
        let mut state = ConvertState::new();
        let out = translate_library_calls(
            "r = requests.get(url)\nprint(r.status_code, r.text)",
            "lodash",
            &[],
            &mut state,
        );
        assert!(out.contains("r = await axios.get(url)"));
        assert!(out.contains("r.status, r.data"));
        assert!(state.async_needed);
        assert!(state.requires(Capability::HttpClient));
    }

    #[test]
    fn member_rewrite_respects_word_boundary() {
        let mut state = ConvertState::new();
        let out = translate_library_calls(
            "requests.get(u)\nmsg.text_messages",
            "lodash",
            &[],
            &mut state,
        );
        assert!(out.contains("msg.text_messages"), "`.text_messages` is not a body access");
    }

    #[test]
    fn json_idiom_maps_to_global_json() {
        let mut state = ConvertState::new();
        let out = translate_library_calls("d = json.loads(s)\ns = json.dumps(d)", "lodash", &[], &mut state);
        assert_eq!(out, "d = JSON.parse(s)\ns = JSON.stringify(d)");
        assert!(state.requires(Capability::JsonCodec));
    }

    #[test]
    fn azure_library_synthesizes_client() {
        let mut state = ConvertState::new();
        let out = translate_library_calls("create_thing()", "@azure/openai", &[], &mut state);
        assert!(out.starts_with("const client = new OpenAIClient(endpoint, credential);"));
        assert!(state.requires(Capability::TargetLibrary));
        assert!(state.requires(Capability::CredentialProvider));
    }

    #[test]
    fn existing_client_suppresses_synthesis() {
        let mut state = ConvertState::new();
        let out = translate_library_calls("client.get(x)", "@azure/openai", &[], &mut state);
        assert!(!out.contains("new OpenAIClient"));
    }

    #[test]
    fn discovered_methods_rename_client_calls() {
        let methods = vec![ApiMethod {
            name: "createAgent".to_string(),
            description: String::new(),
            signature: "createAgent()".to_string(),
        }];
        let mut state = ConvertState::new();
        let out = translate_library_calls(
            "agents_client.create_agent(model)\nclient.delete_thing(x)",
            "lodash",
            &methods,
            &mut state,
        );
        assert!(out.contains("agents_client.createAgent(model)"));
        assert!(out.contains("client.delete_thing(x)"), "undocumented names stay put");
    }
}
