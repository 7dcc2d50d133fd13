//! Preview renderer.
//!
//! Builds the aggregated thumbnail page body: every registered figure is
//! rendered into a self-contained fragment, with script identifiers
//! namespaced per render slot so many figures can coexist on one page.

use figure_registry::FigureHandle;
use maud::{Markup, PreEscaped, html};

/// Rewrite a serialized draw script so that every reference to the
/// drawing surface `c` targets the surface for thumbnail slot `slot`
/// instead. Embedded newlines are stripped so the result stays a
/// single-line-safe embeddable snippet.
pub fn namespace_script(script: &str, slot: usize) -> String {
    let surface = format!("c_t_{slot}");
    let flat = script.replace('\n', "");
    let mut out = flat
        .replace(";c.", &format!(";{surface}."))
        .replace("{ c", &format!("{{ {surface}"));
    if let Some(rest) = out.strip_prefix("c.") {
        out = format!("{surface}.{rest}");
    }
    out
}

/// One figure's preview fragment: a sized canvas, its port caption, and
/// the namespaced setup + draw script targeting that canvas.
pub fn thumbnail_fragment(slot: usize, port: u16, figure: &FigureHandle) -> Markup {
    let content = format!(
        "{}{}",
        namespace_script(&figure.header, slot),
        namespace_script(&figure.frame, slot)
    );
    html! {
        div class="thumbnail" id=(format!("thumbnail_{slot}")) data-port=(port) {
            div class="thumbnail-caption" { "Figure on port " (port) }
            canvas id=(format!("canvas_t_{slot}")) width=(figure.width) height=(figure.height) {}
            script {
                (PreEscaped(format!(
                    "var c_t_{slot} = new FigureSurface('canvas_t_{slot}', {port});{content}"
                )))
            }
        }
    }
}

/// Thumbnail page body: one fragment per figure, slot indices assigned
/// in ascending port order, each fragment followed by a separator.
/// An empty directory yields an empty body.
pub fn render_thumbnails(figures: &[(u16, FigureHandle)]) -> String {
    let mut body = String::new();
    for (slot, (port, figure)) in figures.iter().enumerate() {
        body.push_str(&thumbnail_fragment(slot, *port, figure).into_string());
        body.push('\n');
    }
    body
}

/// Layout-set directive for the full viewer page. Emitted only when a
/// non-empty layout identifier came in on the request path.
pub fn layout_directive(requested: Option<&str>) -> String {
    match requested {
        Some(layout) if !layout.is_empty() => format!("set_layout({layout});"),
        _ => String::new(),
    }
}
