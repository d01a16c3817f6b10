use super::*;

/// Creates a detached element carrying `text` and, if given, `class`.
///
/// The tag defaults to `p` and the text to the empty string.
pub fn create_elem_with_text(
    doc: &mut Document,
    tag: Option<&str>,
    text: Option<&str>,
    class: Option<&str>,
) -> NodeId {
    let element = doc.create_element(tag.unwrap_or("p"));
    doc.set_text(element, text.unwrap_or_default());
    if let Some(class) = class.filter(|c| !c.is_empty()) {
        doc.set_class_name(element, class);
    }
    element
}

/// One `option` per user, valued by id and labelled by name.
pub fn create_select_options(doc: &mut Document, users: Option<&[User]>) -> Option<Vec<NodeId>> {
    let users = users?;

    let options = users
        .iter()
        .map(|user| {
            let option = doc.create_element("option");
            doc.set_attribute(option, "value", user.id.to_string());
            doc.set_text(option, user.name.as_str());
            option
        })
        .collect();

    Some(options)
}

/// A fragment holding one `article` per comment.
pub fn create_comments(doc: &mut Document, comments: Option<&[Comment]>) -> Option<NodeId> {
    let comments = comments?;

    let fragment = doc.create_fragment();
    for comment in comments {
        let article = doc.create_element("article");
        let heading = create_elem_with_text(doc, Some("h3"), Some(&comment.name), None);
        let body = create_elem_with_text(doc, Some("p"), Some(&comment.body), None);
        let email = create_elem_with_text(
            doc,
            Some("p"),
            Some(&format!("From: {}", comment.email)),
            None,
        );

        doc.append_child(article, heading);
        doc.append_child(article, body);
        doc.append_child(article, email);
        doc.append_child(fragment, article);
    }

    Some(fragment)
}
