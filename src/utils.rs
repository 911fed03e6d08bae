use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;

/// The url that marks scripts evaluated by this crate in stack traces
pub const SOURCE_URL: &str = "cdp:internal";

static SOURCE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[\x20\t]*//[@#] sourceURL=\s{0,10}(\S*?)\s{0,10}$")
        .expect("valid source url regex")
});

/// Creates a javascript function string as `(<function>)("<param 1>", "<param
/// 2>")`
pub fn evaluation_string(function: impl AsRef<str>, params: &[impl AsRef<str>]) -> String {
    let params = params
        .iter()
        .map(|s| format!("\"{}\"", s.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    format!("({})({})", function.as_ref(), params)
}

/// Tries to identify whether this a javascript function
pub fn is_likely_js_function(function: impl AsRef<str>) -> bool {
    let mut fun = function.as_ref().trim_start();
    if fun.is_empty() {
        return false;
    }
    if let Some(rest) = fun.strip_prefix("async") {
        if rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            fun = rest.trim_start();
        }
    }

    if fun.starts_with("function ") || fun.starts_with("function(") {
        return true;
    }
    // attempt to detect arrow functions by stripping the leading arguments and
    // looking for the arrow
    if skip_args(&mut fun) || skip_identifier(&mut fun) {
        return fun.trim_start().starts_with("=>");
    }
    false
}

/// Strips a single leading identifier, the parameter of `a => ...`
fn skip_identifier(input: &mut &str) -> bool {
    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(input.len());
    if end == 0 || input.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    *input = &input[end..];
    true
}

/// This attempts to strip any leading pair of parentheses from the input
///
/// `()=>` -> `=>`
/// `(abc, def)=>` -> `=>`
fn skip_args(input: &mut &str) -> bool {
    if !input.starts_with('(') {
        return false;
    }
    let mut open = 1;
    let mut closed = 0;
    *input = &input[1..];
    while !input.is_empty() && open != closed {
        if let Some(idx) = input.find(&['(', ')'] as &[_]) {
            if &input[idx..=idx] == ")" {
                closed += 1;
            } else {
                open += 1;
            }
            *input = &input[idx + 1..];
        } else {
            break;
        }
    }

    open == closed
}

/// Whether the script already carries a `//# sourceURL=` comment
pub fn has_source_url(script: &str) -> bool {
    SOURCE_URL_REGEX.is_match(script)
}

/// Appends the `//# sourceURL=` comment for `url` unless the script already
/// has one
pub fn with_source_url(script: String, url: &str) -> String {
    if has_source_url(&script) {
        script
    } else {
        format!("{}\n//# sourceURL={}\n", script, url)
    }
}

/// A random name of 10 to 20 lowercase alphanumeric chars
pub fn random_binding_name() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(10..=20);
    (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}
