use super::*;

/// Why a batch of posts could not be assembled.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("author {user} of post {post} could not be loaded")]
    MissingAuthor { post: PostId, user: UserId },
    #[error("comments panel for post {0} could not be built")]
    MissingPanel(PostId),
}

/// Builds one `article` per post into a fragment, in input order.
///
/// Posts are assembled one at a time: each author lookup and comments fetch
/// completes before the next post starts. Any failure abandons the whole
/// batch, frees what was built so far and yields `None`.
pub async fn create_posts<A: Api>(
    doc: &mut Document,
    api: &A,
    posts: Option<&[Post]>,
) -> Option<NodeId> {
    let posts = posts?;

    let fragment = doc.create_fragment();
    match assemble(doc, api, fragment, posts).await {
        Ok(()) => Some(fragment),
        Err(e) => {
            tracing::error!("Error creating posts: {e}");
            doc.remove(fragment);
            None
        }
    }
}

async fn assemble<A: Api>(
    doc: &mut Document,
    api: &A,
    fragment: NodeId,
    posts: &[Post],
) -> Result<(), AssemblyError> {
    for post in posts {
        let article = doc.create_element("article");
        // Attach first so an early return frees the partial article too.
        doc.append_child(fragment, article);

        let author = api
            .user(post.user_id)
            .await
            .ok_or(AssemblyError::MissingAuthor {
                post: post.id,
                user: post.user_id,
            })?;

        let title = create_elem_with_text(doc, Some("h2"), Some(&post.title), None);
        let body = create_elem_with_text(doc, Some("p"), Some(&post.body), None);
        let id = create_elem_with_text(doc, Some("p"), Some(&format!("Post ID: {}", post.id)), None);
        let author_info = create_elem_with_text(
            doc,
            Some("p"),
            Some(&format!("Author: {} with {}", author.name, author.company.name)),
            None,
        );
        let catch_phrase =
            create_elem_with_text(doc, Some("p"), Some(&author.company.catch_phrase), None);

        let button = create_elem_with_text(doc, Some("button"), Some(SHOW_COMMENTS), None);
        doc.set_data(button, POST_ID, post.id.to_string());

        for node in [title, body, id, author_info, catch_phrase, button] {
            doc.append_child(article, node);
        }

        let section = display_comments(doc, api, Some(post.id))
            .await
            .ok_or(AssemblyError::MissingPanel(post.id))?;
        doc.append_child(article, section);

        tracing::debug!("assembled post {}", post.id);
    }

    Ok(())
}
