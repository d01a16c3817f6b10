use serde::{Deserialize, Serialize};

use super::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
}

/// An author whose posts can be displayed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,

    /// The display name shown in the author selector and on each post.
    pub name: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    pub company: Company,
}

/// A single article owned by one author.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: UserId,
    pub id: PostId,
    pub title: String,
    pub body: String,
}

/// Feedback left on a post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: PostId,
    pub id: CommentId,

    /// The commenter's name, used as the comment heading.
    pub name: String,

    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_api_records() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough" },
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }))
        .unwrap();
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");

        let post: Post = serde_json::from_value(json!({
            "userId": 1, "id": 3, "title": "ea molestias", "body": "et iusto"
        }))
        .unwrap();
        assert_eq!(post.user_id, UserId(1));
        assert_eq!(post.id, PostId(3));

        let comment: Comment = serde_json::from_value(json!({
            "postId": 3, "id": 11, "name": "fugit", "email": "Veronica@jaden.biz", "body": "quo"
        }))
        .unwrap();
        assert_eq!(comment.post_id, PostId(3));
        assert_eq!(comment.id, CommentId(11));
    }

    #[test]
    fn user_without_company_is_rejected() {
        let user = serde_json::from_value::<User>(json!({ "id": 1, "name": "Leanne Graham" }));
        assert!(user.is_err());
    }
}
