//! Python-to-JavaScript sample converter.
//!
//! Rewrites restricted-subset Python samples into JavaScript targeting a
//! configurable library. The core is a five-stage, line-pattern-based
//! transpiler (lexical rewriting, block re-bracing, definition translation,
//! library pattern translation, import/setup emission); around it sit a
//! GitHub sample fetcher, an API-documentation scanner, a batch orchestrator,
//! and directory/archive packaging.

pub mod batch;
pub mod docs;
pub mod fetch;
pub mod package;
pub mod transpiler;

pub use batch::{convert_documents, ConvertedSample};
pub use docs::ApiMethod;
pub use fetch::{GithubFetcher, SourceDoc};
pub use transpiler::{convert_text, convert_with_methods};
