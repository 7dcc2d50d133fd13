mod thumbs;
mod viewer;

pub use thumbs::thumbs_page;
pub use viewer::{viewer_layout_page, viewer_page};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use maud::{Markup, PreEscaped, html};

use crate::AppState;

/// Default response for any path outside the fixed set of pages
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found...")
}

// Shared <head> content
pub(crate) fn page_head(title: &str) -> Markup {
    html! {
        head {
            title { (title) }
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            style { (PreEscaped(CSS)) }
        }
    }
}

/// Script block that opens the control channel back to the manager.
/// Every page embeds this so the browser hears about directory changes.
pub(crate) fn control_script(state: &AppState) -> Markup {
    html! {
        script { (PreEscaped(CONTROL_JS)) }
        script {
            (PreEscaped(format!(
                "connect_control(\"{}\", {});",
                state.config.advertised_ip,
                state.config.control_port()
            )))
        }
    }
}

// Shared CSS constant
pub const CSS: &str = r#"
    body {
        font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
        background: #1f2430;
        color: #e6e1cf;
        margin: 0;
    }

    header {
        padding: 0.75rem 1rem;
        background: #141820;
        border-bottom: 1px solid #2d3440;
    }

    header h1 {
        font-size: 1.1rem;
        margin: 0;
    }

    .figure-list, #thumbnails {
        display: flex;
        flex-wrap: wrap;
        gap: 1rem;
        padding: 1rem;
    }

    .figure-frame {
        border: 1px solid #2d3440;
        background: #ffffff;
    }

    .thumbnail {
        border: 1px solid #2d3440;
        border-radius: 4px;
        padding: 0.5rem;
        background: #141820;
    }

    .thumbnail-caption {
        font-size: 0.8rem;
        color: #9da5b4;
        margin-bottom: 0.25rem;
    }

    .thumbnail canvas {
        background: #ffffff;
    }

    .empty-state {
        padding: 3rem 1rem;
        text-align: center;
        color: #9da5b4;
    }
"#;

// Shared control-channel script. The manager only ever sends small
// directives (update_thumbnails();), which are executed as received.
pub const CONTROL_JS: &str = r#"
    var control_channel = null;

    function connect_control(host, port) {
        control_channel = new WebSocket("ws://" + host + ":" + port + "/");
        control_channel.onmessage = function (event) {
            eval(event.data);
        };
        control_channel.onopen = function () {
            control_channel.send("/base args='')");
        };
    }

    function update_thumbnails() {
        window.location.reload();
    }

    function set_layout(layout) {
        document.body.setAttribute("data-layout", layout);
    }
"#;
