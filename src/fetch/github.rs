use log::{info, warn};
use serde::Deserialize;

use super::{FetchError, SourceDoc, USER_AGENT};

/// One entry of the GitHub contents-API response.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
    url: String,
}

/// Convert a GitHub repository URL to its contents-API URL.
///
/// Accepts plain repository URLs, `/tree/<branch>/<path>` URLs (the branch
/// segment is skipped), `.git` suffixes, and pre-formed `api.github.com`
/// URLs, which pass through untouched.
pub fn to_api_url(repo_url: &str) -> Result<String, FetchError> {
    let url = repo_url.trim();

    if url.contains("api.github.com") {
        return Ok(url.to_string());
    }
    if !url.contains("github.com") {
        return Err(FetchError::UnsupportedUrl(url.to_string()));
    }

    let stripped = url
        .replace("https://github.com/", "")
        .replace("http://github.com/", "");
    let parts: Vec<&str> = stripped.split('/').collect();
    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(FetchError::UnsupportedUrl(url.to_string()));
    }

    let owner = parts[0];
    let repo = parts[1].trim_end_matches(".git");

    let api_path = if parts.len() > 2 && parts[2] == "tree" {
        // skip `tree` and the branch name
        if parts.len() > 4 {
            format!("/{}", parts[4..].join("/"))
        } else {
            String::new()
        }
    } else if parts.len() > 2 {
        format!("/{}", parts[2..].join("/"))
    } else {
        String::new()
    };

    Ok(format!(
        "https://api.github.com/repos/{owner}/{repo}/contents{api_path}"
    ))
}

/// Fetches Python samples from GitHub repositories over the contents API.
pub struct GithubFetcher {
    agent: ureq::Agent,
}

impl GithubFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    /// Fetch every `.py` file reachable from `repo_url`, walking
    /// subdirectories recursively.
    pub fn fetch_python_samples(&self, repo_url: &str) -> Result<Vec<SourceDoc>, FetchError> {
        info!("fetching Python samples from {repo_url}");
        let api_url = to_api_url(repo_url)?;

        let mut docs = Vec::new();
        self.fetch_directory(&api_url, &mut docs)?;
        info!("found {} Python files", docs.len());
        Ok(docs)
    }

    fn fetch_directory(&self, api_url: &str, docs: &mut Vec<SourceDoc>) -> Result<(), FetchError> {
        let entries: Vec<ContentEntry> = self.get(api_url)?.into_json()?;

        for entry in entries {
            if entry.kind == "file" && entry.name.ends_with(".py") {
                let Some(download) = entry.download_url.as_deref() else {
                    continue;
                };
                let content = self.get(download)?.into_string()?;
                info!("found Python file: {}", entry.path);
                docs.push(SourceDoc {
                    name: entry.name,
                    content,
                    path: entry.path,
                });
            } else if entry.kind == "dir" {
                // one unreadable subdirectory must not sink the whole walk
                if let Err(e) = self.fetch_directory(&entry.url, docs) {
                    warn!("skipping subdirectory {}: {e}", entry.path);
                }
            }
        }
        Ok(())
    }

    fn get(&self, url: &str) -> Result<ureq::Response, FetchError> {
        match self.agent.get(url).call() {
            Ok(resp) => Ok(resp),
            Err(ureq::Error::Status(404, _)) => Err(FetchError::NotFound),
            Err(ureq::Error::Status(403, _)) => Err(FetchError::RateLimited),
            Err(ureq::Error::Status(code, _)) => Err(FetchError::Status(code)),
            Err(e) => Err(FetchError::Http(Box::new(e))),
        }
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_repository_url() {
        assert_eq!(
            to_api_url("https://github.com/user/repo").unwrap(),
            "https://api.github.com/repos/user/repo/contents"
        );
    }

    #[test]
    fn tree_url_skips_branch_segment() {
        assert_eq!(
            to_api_url("https://github.com/user/repo/tree/main/samples/agents").unwrap(),
            "https://api.github.com/repos/user/repo/contents/samples/agents"
        );
    }

    #[test]
    fn git_suffix_is_dropped() {
        assert_eq!(
            to_api_url("https://github.com/user/repo.git").unwrap(),
            "https://api.github.com/repos/user/repo/contents"
        );
    }

    #[test]
    fn api_urls_pass_through() {
        let url = "https://api.github.com/repos/user/repo/contents/x";
        assert_eq!(to_api_url(url).unwrap(), url);
    }

    #[test]
    fn non_github_urls_are_rejected() {
        assert!(matches!(
            to_api_url("https://gitlab.com/user/repo"),
            Err(FetchError::UnsupportedUrl(_))
        ));
        assert!(matches!(
            to_api_url("https://github.com/justowner"),
            Err(FetchError::UnsupportedUrl(_))
        ));
    }
}
