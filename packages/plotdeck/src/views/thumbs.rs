use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use maud::{DOCTYPE, PreEscaped, html};

use crate::{AppState, render};

/// GET `/thumbs` - the aggregated thumbnail page, one fragment per
/// registered figure in ascending port order
pub async fn thumbs_page(State(state): State<AppState>) -> impl IntoResponse {
    let figures = state.registry.snapshot().await;
    let body = render::render_thumbnails(&figures);

    let markup = html! {
        (DOCTYPE)
        html {
            (super::page_head("Plotdeck - Thumbnails"))
            body {
                header {
                    h1 { "Plotdeck - " (figures.len()) " active plots" }
                }
                @if body.is_empty() {
                    div class="empty-state" {
                        p { "No plots registered yet." }
                    }
                }
                div id="thumbnails" {
                    (PreEscaped(body))
                }
                (super::control_script(&state))
            }
        }
    };

    Html(markup.into_string())
}
