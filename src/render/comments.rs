use super::*;

/// Builds the hidden `section.comments` panel for `post_id` and fills it with
/// the post's comments.
///
/// Returns `None` when `post_id` is absent or the comments could not be
/// fetched. The fetch failure has already been logged by then.
pub async fn display_comments<A: Api>(
    doc: &mut Document,
    api: &A,
    post_id: Option<PostId>,
) -> Option<NodeId> {
    let post_id = post_id?;

    let section = doc.create_element("section");
    doc.set_data(section, POST_ID, post_id.to_string());
    doc.add_class(section, "comments");
    doc.add_class(section, "hidden");

    let comments = api.post_comments(post_id).await;
    let Some(fragment) = create_comments(doc, comments.as_deref()) else {
        tracing::warn!("no comments panel for post {post_id}");
        doc.remove(section);
        return None;
    };
    doc.append_child(section, fragment);

    Some(section)
}
