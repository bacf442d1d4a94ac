use uuid::Uuid;

/// Identifier of a backoffice user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i32);

/// Identifier of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub i32);

/// One user's subscription to one action-notification on one content node.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub node_id: NodeId,
    pub user_id: UserId,
    pub action: String,
    pub node_object_type: Uuid,
}

impl Notification {
    pub fn new(node_id: NodeId, user_id: UserId, action: &str, node_object_type: Uuid) -> Self {
        Notification {
            node_id,
            user_id,
            action: action.to_string(),
            node_object_type,
        }
    }
}
