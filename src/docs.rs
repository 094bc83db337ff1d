use std::collections::HashSet;

use log::{info, warn};
use regex::Regex;

/// One API method discovered from reference documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMethod {
    pub name: String,
    pub description: String,
    pub signature: String,
}

/// Cap on discovered methods, to keep the lookup bounded.
const METHOD_LIMIT: usize = 50;

/// Longest name accepted as a plausible method name.
const MAX_NAME_LEN: usize = 50;

/// Fetch and scan an API documentation page. Any failure degrades to an
/// empty list; discovered metadata is an enhancement, never a requirement.
pub fn fetch_api_methods(docs_url: &str) -> Vec<ApiMethod> {
    if docs_url.is_empty() {
        return Vec::new();
    }
    info!("parsing API documentation from {docs_url}");

    let agent = ureq::AgentBuilder::new()
        .user_agent(crate::fetch::USER_AGENT)
        .build();
    let html = match agent.get(docs_url).call().map(|r| r.into_string()) {
        Ok(Ok(html)) => html,
        Ok(Err(e)) => {
            warn!("failed to read API docs: {e}");
            return Vec::new();
        }
        Err(e) => {
            warn!("failed to fetch API docs: {e}");
            return Vec::new();
        }
    };

    let methods = extract_api_methods(&html);
    info!("found {} API methods", methods.len());
    methods
}

/// Extract method records from HTML, best effort: headings, code spans, and
/// function definitions that look like `name(`. Duplicates keep their first
/// occurrence.
pub fn extract_api_methods(html: &str) -> Vec<ApiMethod> {
    let patterns = [
        r"(?i)<h[2-4][^>]*>([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
        r"(?i)<code[^>]*>([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
        r"(?i)function\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
    ];

    let mut seen: HashSet<String> = HashSet::new();
    let mut methods = Vec::new();

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        for caps in re.captures_iter(html) {
            let name = caps[1].to_string();
            if name.len() >= MAX_NAME_LEN || !seen.insert(name.clone()) {
                continue;
            }
            methods.push(ApiMethod {
                description: "Method discovered from documentation".to_string(),
                signature: format!("{name}()"),
                name,
            });
        }
    }

    methods.truncate(METHOD_LIMIT);
    methods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_code_and_functions_are_scanned() {
        let html = "<h2>createAgent(</h2>\n<code>listThreads(</code>\nfunction deleteAgent(x) {}";
        let names: Vec<String> = extract_api_methods(html).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["createAgent", "listThreads", "deleteAgent"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let html = "<h2>create(</h2><code>create(</code>";
        assert_eq!(extract_api_methods(html).len(), 1);
    }

    #[test]
    fn discovery_is_capped() {
        let mut html = String::new();
        for i in 0..80 {
            html.push_str(&format!("<h2>method{i}(</h2>\n"));
        }
        assert_eq!(extract_api_methods(&html).len(), 50);
    }
}
