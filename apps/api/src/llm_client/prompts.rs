// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it;
// this file holds only cross-cutting pieces.

/// Appended to prompts whose answer is parsed as JSON.
pub const JSON_ARRAY_ONLY: &str =
    "Return ONLY a JSON array of strings. No preamble, no markdown fences, no explanation.";

/// Output discipline for generated documents.
pub const NO_PREAMBLE: &str = "start immediately, no preamble";

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted values are never re-scanned, so user text containing
/// `{placeholder}` stays literal. Unknown placeholders are left untouched.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after
            .find('}')
            .and_then(|end| {
                let key = &after[..end];
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| (*v, end))
            });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
