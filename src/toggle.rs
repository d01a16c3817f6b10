use crate::data::PostId;
use crate::dom::{Document, NodeId, Selector};
use crate::render::{HIDE_COMMENTS, POST_ID, SHOW_COMMENTS};

fn find(doc: &Document, tag: &str, post_id: PostId) -> Option<NodeId> {
    let id = post_id.to_string();
    doc.query_selector(doc.body(), &Selector::tag(tag).with_data(POST_ID, &id))
}

fn flip_section(doc: &mut Document, section: NodeId) {
    if doc.remove_class(section, "hidden") {
        doc.add_class(section, "visible");
    } else {
        doc.remove_class(section, "visible");
        doc.add_class(section, "hidden");
    }
}

fn flip_button(doc: &mut Document, button: NodeId) {
    let label = match doc.text(button) {
        Some(SHOW_COMMENTS) => HIDE_COMMENTS,
        _ => SHOW_COMMENTS,
    };
    doc.set_text(button, label);
}

/// Flips the visibility of the comments section for `post_id`.
pub fn toggle_comment_section(doc: &mut Document, post_id: Option<PostId>) -> Option<NodeId> {
    let section = find(doc, "section", post_id?)?;
    flip_section(doc, section);
    Some(section)
}

/// Flips the label of the comments button for `post_id`.
pub fn toggle_comment_button(doc: &mut Document, post_id: Option<PostId>) -> Option<NodeId> {
    let button = find(doc, "button", post_id?)?;
    flip_button(doc, button);
    Some(button)
}

/// Moves the comments of `post_id` between hidden and visible.
///
/// The section and its button are both located before either is touched. If
/// one is missing nothing changes and the result is `None`. The current state
/// is read from the section's classes and the button's label.
pub fn toggle_comments(doc: &mut Document, post_id: Option<PostId>) -> Option<(NodeId, NodeId)> {
    let post_id = post_id?;
    let section = find(doc, "section", post_id)?;
    let button = find(doc, "button", post_id)?;

    flip_section(doc, section);
    flip_button(doc, button);
    tracing::debug!("toggled comments for post {post_id}");

    Some((section, button))
}
