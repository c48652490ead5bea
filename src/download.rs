use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// HTML anchor that downloads `data` as `filename` via a base64 data URI.
///
/// `filename` and `text` are inserted as given.
pub fn download_link(data: &str, filename: &str, text: &str) -> String {
    let b64 = BASE64.encode(data.as_bytes());
    format!(
        r#"<a href="data:file/txt;base64,{}" download="{}">{}</a>"#,
        b64, filename, text
    )
}
