use crate::model::{Id, post::PostMarker};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Id<PostMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<CommentMarker>>,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Comment {
    #[must_use]
    pub fn belongs_to(&self, post_id: Id<PostMarker>) -> bool {
        self.post_id == Some(post_id)
    }
}
