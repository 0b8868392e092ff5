//! Content type inference from file extensions.

use atelier_core::constants::DEFAULT_CONTENT_TYPE;
use std::path::Path;

/// Guess the media type of `path` from its extension.
///
/// Falls back to `model/gltf-binary` when the extension is missing or unknown.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // 3D models
        "glb" => "model/gltf-binary",
        "gltf" => "model/gltf+json",
        "obj" => "model/obj",
        "stl" => "model/stl",
        "usdz" => "model/vnd.usdz+zip",
        // Textures and previews
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "hdr" => "image/vnd.radiance",
        "ktx2" => "image/ktx2",
        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        // Everything else
        "bin" => "application/octet-stream",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
