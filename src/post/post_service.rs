use crate::database::DB_NAME;
use crate::post::post_model::{Post, PostAuthor, PostWithAuthor};
use crate::user::model::User;
use crate::utils::error::CustomError;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{
    Client, Collection,
    bson::{Document, doc, oid::ObjectId},
};
use std::collections::HashMap;

pub struct PostService {
    collection: Collection<Post>,
    users: Collection<User>,
}

/// Build the `$set` document for a post update. A missing field or an empty
/// string leaves the stored value alone; only `updated_at` is always written.
fn build_update_doc(title: Option<String>, content: Option<String>) -> Document {
    let mut set_doc = doc! { "updated_at": Utc::now().to_rfc3339() };

    if let Some(t) = title.filter(|t| !t.is_empty()) {
        set_doc.insert("title", t);
    }
    if let Some(c) = content.filter(|c| !c.is_empty()) {
        set_doc.insert("content", c);
    }

    doc! { "$set": set_doc }
}

fn with_author(post: Post, authors: &HashMap<ObjectId, String>) -> PostWithAuthor {
    let author = authors.get(&post.author_id).map(|username| PostAuthor {
        id: post.author_id.to_hex(),
        username: username.clone(),
    });

    PostWithAuthor {
        id: post.id.to_hex(),
        title: post.title,
        content: post.content,
        author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

impl PostService {
    pub fn new(client: &Client) -> Self {
        let db = client.database(DB_NAME);
        PostService {
            collection: db.collection::<Post>("posts"),
            users: db.collection::<User>("users"),
        }
    }

    pub async fn create_post(&self, post: Post) -> Result<Post, CustomError> {
        self.collection
            .insert_one(&post)
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to create post".into()))?;

        Ok(post)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, CustomError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| CustomError::BadRequestError("Invalid post ID".into()))?;

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to fetch post".into()))
    }

    pub async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, CustomError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to fetch posts".into()))?;

        let posts: Vec<Post> = cursor
            .try_collect()
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to collect posts".into()))?;

        let authors = self.resolve_authors(&posts).await?;

        Ok(posts.into_iter().map(|p| with_author(p, &authors)).collect())
    }

    pub async fn get_post_with_author(
        &self,
        id: &str,
    ) -> Result<Option<PostWithAuthor>, CustomError> {
        let Some(post) = self.get_post(id).await? else {
            return Ok(None);
        };

        let authors = self.resolve_authors(std::slice::from_ref(&post)).await?;

        Ok(Some(with_author(post, &authors)))
    }

    /// Map the posts' author ids to usernames in one query.
    async fn resolve_authors(
        &self,
        posts: &[Post],
    ) -> Result<HashMap<ObjectId, String>, CustomError> {
        let author_ids: Vec<ObjectId> = posts.iter().map(|p| p.author_id).collect();
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .users
            .find(doc! { "_id": { "$in": author_ids } })
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to fetch authors".into()))?;

        let users: Vec<User> = cursor
            .try_collect()
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to collect authors".into()))?;

        Ok(users
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id, u.username)))
            .collect())
    }

    pub async fn update_post(
        &self,
        id: &ObjectId,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Option<Post>, CustomError> {
        self.collection
            .find_one_and_update(doc! { "_id": id }, build_update_doc(title, content))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to update post".into()))
    }

    pub async fn delete_post(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to delete post".into()))?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_doc(update: &Document) -> &Document {
        update.get_document("$set").unwrap()
    }

    #[test]
    fn update_doc_carries_provided_fields() {
        let update = build_update_doc(Some("New title".into()), Some("New content".into()));
        let set = set_doc(&update);

        assert_eq!(set.get_str("title").unwrap(), "New title");
        assert_eq!(set.get_str("content").unwrap(), "New content");
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn update_doc_skips_missing_fields() {
        let update = build_update_doc(None, Some("New content".into()));
        let set = set_doc(&update);

        assert!(!set.contains_key("title"));
        assert_eq!(set.get_str("content").unwrap(), "New content");
    }

    #[test]
    fn update_doc_skips_empty_strings() {
        // An empty-string title is treated like a missing one and silently
        // dropped, so the stored title survives.
        let update = build_update_doc(Some(String::new()), None);
        let set = set_doc(&update);

        assert!(!set.contains_key("title"));
        assert!(!set.contains_key("content"));
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn with_author_resolves_username() {
        let author_id = ObjectId::new();
        let post = Post {
            id: ObjectId::new(),
            title: "Hello".into(),
            content: "World".into(),
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let authors = HashMap::from([(author_id, "ada".to_string())]);

        let resolved = with_author(post, &authors);

        let author = resolved.author.unwrap();
        assert_eq!(author.id, author_id.to_hex());
        assert_eq!(author.username, "ada");
    }

    #[test]
    fn with_author_is_null_for_unknown_author() {
        let post = Post {
            id: ObjectId::new(),
            title: "Hello".into(),
            content: "World".into(),
            author_id: ObjectId::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let resolved = with_author(post, &HashMap::new());

        assert!(resolved.author.is_none());
    }
}
