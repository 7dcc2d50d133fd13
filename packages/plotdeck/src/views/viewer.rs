use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use maud::{DOCTYPE, PreEscaped, html};

use crate::{AppState, render};

/// GET `/` - the full viewer page, no layout directive
pub async fn viewer_page(State(state): State<AppState>) -> impl IntoResponse {
    render_viewer(&state, None).await
}

/// GET `/{N}` - the viewer page with a requested layout. Only an
/// all-digits identifier matches; anything else falls through to the
/// not-found default, mirroring the fixed-path checks in order.
pub async fn viewer_layout_page(
    State(state): State<AppState>,
    Path(layout): Path<String>,
) -> Response {
    if layout.is_empty() || !layout.chars().all(|c| c.is_ascii_digit()) {
        return super::not_found().await.into_response();
    }
    render_viewer(&state, Some(&layout)).await.into_response()
}

async fn render_viewer(state: &AppState, layout: Option<&str>) -> Html<String> {
    let ports = state.registry.list_ports().await;
    let directive = render::layout_directive(layout);
    let ip = &state.config.advertised_ip;

    let markup = html! {
        (DOCTYPE)
        html {
            (super::page_head("Plotdeck"))
            body {
                header {
                    h1 { "Plotdeck" }
                }
                @if ports.is_empty() {
                    div class="empty-state" {
                        p { "No plots registered yet." }
                        p { "Figures appear here as backends register them." }
                    }
                } @else {
                    div class="figure-list" {
                        @for port in &ports {
                            iframe class="figure-frame"
                                id=(format!("figure_{port}"))
                                src=(format!("http://{ip}:{port}/")) {}
                        }
                    }
                }
                (super::control_script(state))
                @if !directive.is_empty() {
                    script { (PreEscaped(directive)) }
                }
            }
        }
    };

    Html(markup.into_string())
}
