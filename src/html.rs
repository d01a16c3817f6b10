use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::dom::{Document, NodeId, NodeKind};
use crate::page::Page;

/// Serializes `id` and its subtree.
pub fn node(doc: &Document, id: NodeId) -> Markup {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    PreEscaped(out)
}

fn escaped(out: &mut String, value: &str) {
    value.render_to(out);
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let tag = match doc.kind(id) {
        Some(NodeKind::Element(tag)) => tag,
        Some(NodeKind::Fragment) => {
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
            return;
        }
        None => return,
    };

    out.push('<');
    out.push_str(tag);
    for (name, value) in doc.attributes(id) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escaped(out, value);
        out.push('"');
    }
    if !doc.classes(id).is_empty() {
        out.push_str(" class=\"");
        escaped(out, &doc.classes(id).join(" "));
        out.push('"');
    }
    if doc.is_disabled(id) {
        out.push_str(" disabled");
    }
    out.push('>');

    escaped(out, doc.text(id).unwrap_or_default());
    for &child in doc.children(id) {
        write_node(doc, child, out);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// The main region alone, as returned after a selection or a click.
pub fn main_region(page: &Page) -> Markup {
    node(&page.doc, page.main)
}

const SCRIPT: &str = r#"
const menu = document.getElementById("selectMenu");
menu.addEventListener("change", async () => {
    menu.disabled = true;
    try {
        const response = await fetch(`/select/${encodeURIComponent(menu.value)}`, { method: "POST" });
        document.querySelector("main").outerHTML = await response.text();
    } finally {
        menu.disabled = false;
    }
});
document.body.addEventListener("click", async (event) => {
    const button = event.target.closest("main button[data-post-id]");
    if (!button) return;
    const response = await fetch(`/click/${button.dataset.postId}`, { method: "POST" });
    if (response.ok) document.querySelector("main").outerHTML = await response.text();
});
"#;

const STYLE: &str = r#"
.comments.hidden { display: none; }
.default-text { font-style: italic; }
"#;

pub fn page(page: &Page) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en-us" {
            head {
                title { "Posts" }
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                style { (PreEscaped(STYLE)) }
            }
            body {
                @for &child in page.doc.children(page.doc.body()) {
                    (node(&page.doc, child))
                }
                script type="module" { (PreEscaped(SCRIPT)) }
            }
        }
    }
}
