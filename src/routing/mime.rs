//! Extension → content type lookup.

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_CSS: &str = "text/css";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub const APPLICATION_JSON: &str = "application/json";
pub const IMAGE_SVG: &str = "image/svg+xml";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_JPG: &str = "image/jpg";
pub const IMAGE_GIF: &str = "image/gif";

/// Content type for `path`, from its lowercase file extension.
///
/// Unknown and missing extensions map to `text/plain`. Both `/` and `\` count
/// as separators, so a dot in a directory name is never taken as an extension.
pub fn content_type_for(path: &str) -> &'static str {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return TEXT_PLAIN;
    };

    match ext.to_ascii_lowercase().as_str() {
        "htm" | "html" => TEXT_HTML,
        "js" => APPLICATION_JAVASCRIPT,
        "css" => TEXT_CSS,
        "svg" => IMAGE_SVG,
        "png" => IMAGE_PNG,
        "jpg" => IMAGE_JPG,
        "gif" => IMAGE_GIF,
        _ => TEXT_PLAIN,
    }
}
