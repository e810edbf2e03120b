use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub contact_email: String,
}

impl Client {
    pub fn new(name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contact_email: contact_email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    /// Path relative to the media root.
    #[serde(default)]
    pub image: Option<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, category_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            slug: slug.into(),
            image: None,
            category_id,
            tag_ids: Vec::new(),
            client_id: None,
            is_published: false,
            created_at: Utc::now(),
        }
    }

    /// Replaces the tag set, dropping duplicates while keeping submission order.
    pub fn set_tags(&mut self, tag_ids: &[Uuid]) {
        self.tag_ids.clear();
        for id in tag_ids {
            if !self.tag_ids.contains(id) {
                self.tag_ids.push(*id);
            }
        }
    }

    pub fn has_tag(&self, tag_id: &Uuid) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

/// An item joined with the records it references, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    pub category: Category,
    pub tags: Vec<Tag>,
    pub client: Option<Client>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    // Never rendered; templates receive `UserSummary` instead.
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            date_joined: Utc::now(),
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            date_joined: self.date_joined,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tags_replaces_and_dedups() {
        let category = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut item = Item::new("Site", "site", category);

        item.set_tags(&[a, b, a]);
        assert_eq!(item.tag_ids, vec![a, b]);

        item.set_tags(&[b]);
        assert_eq!(item.tag_ids, vec![b]);
        assert!(!item.has_tag(&a));
    }

    #[test]
    fn new_item_is_a_draft() {
        let item = Item::new("Site", "site", Uuid::new_v4());
        assert!(!item.is_published);
        assert!(item.image.is_none());
        assert!(item.client_id.is_none());
    }
}
