use crate::data::*;
use crate::dom::{Document, NodeId};

pub use builders::{create_comments, create_elem_with_text, create_select_options};
pub use comments::display_comments;
pub use posts::create_posts;

/// Leaf helpers that build detached elements.
pub mod builders;

/// The hidden comment section embedded in every post.
pub mod comments;

/// Per-post article assembly.
pub mod posts;

/// The attribute key pairing a post's panel with its toggle button.
pub const POST_ID: &str = "post-id";

pub const SHOW_COMMENTS: &str = "Show Comments";
pub const HIDE_COMMENTS: &str = "Hide Comments";

pub const DEFAULT_TEXT: &str = "Select an Employee to display their posts.";

/// Reads the post id a panel or button was tagged with.
pub fn post_id_of(doc: &Document, node: NodeId) -> Option<PostId> {
    doc.data(node, POST_ID)?.parse().ok()
}

/// Renders `posts` into `main`.
///
/// An empty or absent post set renders the `default-text` placeholder
/// instead. Returns the nodes now appended to `main`, or `None` if the posts
/// could not be assembled, in which case `main` is untouched.
pub async fn display_posts<A: Api>(
    doc: &mut Document,
    api: &A,
    main: NodeId,
    posts: Option<&[Post]>,
) -> Option<Vec<NodeId>> {
    let element = match posts {
        Some(posts) if !posts.is_empty() => create_posts(doc, api, Some(posts)).await?,
        _ => create_elem_with_text(doc, Some("p"), Some(DEFAULT_TEXT), Some("default-text")),
    };

    // A fragment empties into main, so report the nodes it carried.
    let appended = match doc.tag(element) {
        Some(_) => vec![element],
        None => doc.children(element).to_vec(),
    };
    doc.append_child(main, element);
    Some(appended)
}
