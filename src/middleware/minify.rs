use std::sync::LazyLock;

use axum::{
    body::{Body, to_bytes},
    http::header,
    response::Response,
};

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        const ENABLED: bool = false;
    } else {
        const ENABLED: bool = true;
    }
}

static MINIFY_CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| minify_html::Cfg {
    keep_closing_tags: true,
    keep_html_and_head_opening_tags: true,
    minify_doctype: false,
    minify_css: true,
    ..Default::default()
});

pub fn minify_page(html: &[u8]) -> Vec<u8> {
    minify_html::minify(html, &MINIFY_CFG)
}

fn is_html(response: &Response<Body>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("text/html"))
}

/// Minifies rendered pages in release builds.
pub async fn minify_html_middleware(response: Response<Body>) -> Response<Body> {
    if !ENABLED || !is_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(minify_page(&bytes)))
        }
        Err(e) => {
            tracing::error!("Failed to read page body for minification: {e}");
            Response::from_parts(parts, Body::empty())
        }
    }
}
