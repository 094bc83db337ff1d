use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{info, warn};

use crate::docs::ApiMethod;
use crate::fetch::SourceDoc;
use crate::transpiler;

/// One converted sample. The original text is retained for error stand-ins
/// and for callers that archive both sides.
#[derive(Debug, Clone)]
pub struct ConvertedSample {
    pub original_name: String,
    pub original_path: String,
    pub js_name: String,
    pub js_code: String,
    pub python_code: String,
}

/// Convert a batch of documents, each one independently.
///
/// `__init__.py` files are skipped. A document whose conversion fails is
/// replaced by a clearly marked error stand-in; it never aborts its
/// siblings.
pub fn convert_documents(
    docs: &[SourceDoc],
    lib_name: &str,
    ref_url: &str,
    api_methods: &[ApiMethod],
) -> Vec<ConvertedSample> {
    let mut samples = Vec::with_capacity(docs.len());

    for (i, doc) in docs.iter().enumerate() {
        if doc.name == "__init__.py" {
            continue;
        }
        info!("converting sample {}/{}: {}", i + 1, docs.len(), doc.name);

        let converted = panic::catch_unwind(AssertUnwindSafe(|| {
            transpiler::convert_with_methods(&doc.content, lib_name, ref_url, api_methods)
        }));

        let js_code = match converted {
            Ok(code) => code,
            Err(cause) => {
                let reason = panic_message(cause.as_ref());
                warn!("error converting {}: {}", doc.name, reason);
                error_stand_in(&doc.name, &reason, &doc.content)
            }
        };

        samples.push(ConvertedSample {
            original_name: doc.name.clone(),
            original_path: doc.path.clone(),
            js_name: js_name_for(&doc.name),
            js_code,
            python_code: doc.content.clone(),
        });
    }

    info!("conversion completed: {} samples processed", samples.len());
    samples
}

/// Target file name for a source document (`foo.py` → `foo.js`).
pub fn js_name_for(name: &str) -> String {
    match name.strip_suffix(".py") {
        Some(stem) => format!("{stem}.js"),
        None => format!("{name}.js"),
    }
}

/// Stand-in emitted for a failed conversion: the failure as a comment, the
/// original source preserved in a block comment.
pub fn error_stand_in(name: &str, reason: &str, python_code: &str) -> String {
    format!(
        "// Error converting {name}: {reason}\n// Original Python code:\n/*\n{python_code}\n*/"
    )
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "conversion panicked".to_string()
    }
}
