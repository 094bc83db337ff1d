mod blocks;
mod defs;
mod emit;
mod lexical;
mod libpatterns;
mod types;

pub use blocks::rebrace_blocks;
pub use defs::translate_definitions;
pub use emit::emit_output;
pub use lexical::rewrite_tokens;
pub use libpatterns::{client_class, translate_library_calls};
pub use types::{BlockHeader, Capability, ConvertState, Frame, FrameKind};

use crate::docs::ApiMethod;

/// Convert one Python sample to JavaScript targeting `lib_name`.
///
/// `ref_url` is embedded verbatim into the generated header comment; it is
/// never validated or fetched here. Unrecognized constructs pass through
/// unchanged, so this never fails.
pub fn convert_text(source: &str, lib_name: &str, ref_url: &str) -> String {
    convert_with_methods(source, lib_name, ref_url, &[])
}

/// Like [`convert_text`], additionally consulting API methods discovered from
/// reference documentation for best-effort client-call name matching.
pub fn convert_with_methods(
    source: &str,
    lib_name: &str,
    ref_url: &str,
    api_methods: &[ApiMethod],
) -> String {
    let mut state = ConvertState::new();

    let text = rewrite_tokens(source);
    let text = rebrace_blocks(&text);
    let text = translate_definitions(&text, &mut state);
    let text = translate_library_calls(&text, lib_name, api_methods, &mut state);
    emit_output(&text, lib_name, ref_url, &state)
}
