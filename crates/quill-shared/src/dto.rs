//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Author as submitted on create.
///
/// Fields are optional so a missing one can be reported by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request to update a post. Only `title` and `content` are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as exposed over HTTP, with the author flattened to one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_camel_case_author() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"author":{"firstName":"Jane","lastName":"Doe"},"title":"Hello World","content":"First post"}"#,
        )
        .unwrap();

        let author = req.author.unwrap();
        assert_eq!(author.first_name.as_deref(), Some("Jane"));
        assert_eq!(author.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"only"}"#).unwrap();
        assert!(req.author.is_none());
        assert!(req.content.is_none());
    }

    #[test]
    fn test_post_response_has_exact_keys() {
        let value = serde_json::to_value(PostResponse {
            id: "1".into(),
            author: "Jane Doe".into(),
            title: "t".into(),
            content: "c".into(),
            created: "2024-01-01T00:00:00Z".into(),
        })
        .unwrap();

        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);
    }
}
