//! MIME type detection module
//!
//! Returns the Content-Type served for a file extension.

/// Get the Content-Type for a file extension
///
/// The table covers exactly the asset types the site ships, with the values
/// the original deployment served. Anything unknown (or extension-less page
/// routes) is treated as HTML.
///
/// # Examples
/// ```
/// use folio::http::mime::content_type_for;
/// assert_eq!(content_type_for(Some("css")), "text/css");
/// assert_eq!(content_type_for(Some("mp4")), "video/mp4");
/// assert_eq!(content_type_for(None), "text/html");
/// ```
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("woff") => "application/font-woff",
        Some("ttf") => "application/font-ttf",
        Some("eot") => "application/vnd.ms-fontobject",
        Some("otf") => "application/font-otf",
        Some("ico") => "image/x-icon",
        // html, htm and everything unrecognized
        _ => "text/html",
    }
}
