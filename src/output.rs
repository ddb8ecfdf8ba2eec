// Response printing. Most endpoints return JSON, which we pretty-print;
// anything that does not parse is shown verbatim instead of failing the
// run.

use serde_json::Value;

/// Render a response body for the terminal: pretty-printed JSON when
/// the body parses, the raw text otherwise.
pub fn render(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Print a response body to stdout.
pub fn print_response(body: &str) {
    println!("{}", render(body));
}
