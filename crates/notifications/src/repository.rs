//! Read/write access to notification subscription records.

use crate::database::Database;
use crate::dto::{NodeDto, NotifyDto, UserDto};
use crate::error::NotificationsError;
use crate::notification::{NodeId, Notification, UserId};
use model::core::value::Value;
use model::records::row::RowData;
use query_builder::build::select::SelectBuilder;
use query_builder::dialect::Dialect;
use query_builder::mapping::Mapped;
use tracing::debug;
use uuid::Uuid;

/// The fixed projection every notification fetch uses, so the flat rows
/// decode against one known alias list.
const NOTIFICATION_COLUMNS: &str = "DISTINCT umbracoNode.id AS nodeId, \
     umbracoUser2NodeNotify.userId AS userId, \
     umbracoNode.nodeObjectType AS nodeObjectType, \
     umbracoUser2NodeNotify.action AS action";

pub struct NotificationsRepository<'a, D: Database> {
    db: D,
    dialect: &'a dyn Dialect,
}

impl<'a, D: Database> NotificationsRepository<'a, D> {
    pub fn new(db: D, dialect: &'a dyn Dialect) -> Self {
        NotificationsRepository { db, dialect }
    }

    /// The underlying execution collaborator.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Notifications for approved users subscribed to `action` on nodes of
    /// the given object type, optionally narrowed to specific nodes.
    ///
    /// An empty `node_ids` slice means "all nodes": the `WHERE IN` clause
    /// must be omitted here because the builder does not guard empty lists.
    pub fn get_users_notifications(
        &self,
        action: &str,
        node_ids: &[NodeId],
        object_type: Uuid,
    ) -> Result<Vec<Notification>, NotificationsError> {
        let mut sql = SelectBuilder::new()
            .select_raw(NOTIFICATION_COLUMNS)
            .from::<NotifyDto>()
            .inner_join::<NodeDto>()
            .on::<NotifyDto, NodeDto>(NotifyDto::NODE_ID, NodeDto::NODE_ID)
            .inner_join::<UserDto>()
            .on::<NotifyDto, UserDto>(NotifyDto::USER_ID, UserDto::ID)
            .where_clause::<NodeDto>(NodeDto::NODE_OBJECT_TYPE.eq(object_type))
            // only approved users
            .where_clause::<UserDto>(UserDto::DISABLED.eq(false))
            .where_clause::<NotifyDto>(NotifyDto::ACTION.eq(action));
        if !node_ids.is_empty() {
            sql = sql.where_in::<NodeDto>(NodeDto::NODE_ID, node_ids.iter().map(|id| id.0));
        }
        let query = sql
            .order_by::<UserDto>(UserDto::ID)
            .order_by::<NodeDto>(NodeDto::NODE_ID)
            .build()?
            .to_sql(self.dialect);

        debug!(action, nodes = node_ids.len(), "fetching user notifications");
        let rows = self.db.fetch(&query)?;
        rows.iter().map(decode_notification).collect()
    }

    /// All of one user's subscriptions, ordered by node.
    pub fn get_user_notifications(
        &self,
        user: UserId,
    ) -> Result<Vec<Notification>, NotificationsError> {
        let query = SelectBuilder::new()
            .select_raw(NOTIFICATION_COLUMNS)
            .from::<NotifyDto>()
            .inner_join::<NodeDto>()
            .on::<NotifyDto, NodeDto>(NotifyDto::NODE_ID, NodeDto::NODE_ID)
            .where_clause::<NotifyDto>(NotifyDto::USER_ID.eq(user.0))
            .order_by::<NodeDto>(NodeDto::NODE_ID)
            .build()?
            .to_sql(self.dialect);

        debug!(user = user.0, "fetching notifications for user");
        let rows = self.db.fetch(&query)?;
        rows.iter().map(decode_notification).collect()
    }

    /// All subscriptions on one node, ordered by node.
    pub fn get_entity_notifications(
        &self,
        node: NodeId,
    ) -> Result<Vec<Notification>, NotificationsError> {
        let query = SelectBuilder::new()
            .select_raw(NOTIFICATION_COLUMNS)
            .from::<NotifyDto>()
            .inner_join::<NodeDto>()
            .on::<NotifyDto, NodeDto>(NotifyDto::NODE_ID, NodeDto::NODE_ID)
            .where_clause::<NotifyDto>(NotifyDto::NODE_ID.eq(node.0))
            .order_by::<NodeDto>(NodeDto::NODE_ID)
            .build()?
            .to_sql(self.dialect);

        debug!(node = node.0, "fetching notifications for node");
        let rows = self.db.fetch(&query)?;
        rows.iter().map(decode_notification).collect()
    }

    /// Replaces a user's subscriptions on one node with the given actions.
    pub fn set_notifications(
        &self,
        user: UserId,
        node: NodeId,
        actions: &[&str],
    ) -> Result<Vec<Notification>, NotificationsError> {
        self.delete_notifications(user, node)?;
        actions
            .iter()
            .map(|action| self.create_notification(user, node, action))
            .collect()
    }

    /// Deletes every subscription on `node`.
    pub fn delete_entity_notifications(&self, node: NodeId) -> Result<u64, NotificationsError> {
        debug!(node = node.0, "deleting notifications for node");
        let deleted = self.db.delete(
            NotifyDto::mapping().table,
            "WHERE nodeId = @nodeId",
            &[("nodeId", Value::from(node.0))],
        )?;
        Ok(deleted)
    }

    /// Deletes every subscription held by `user`.
    pub fn delete_user_notifications(&self, user: UserId) -> Result<u64, NotificationsError> {
        debug!(user = user.0, "deleting notifications for user");
        let deleted = self.db.delete(
            NotifyDto::mapping().table,
            "WHERE userId = @userId",
            &[("userId", Value::from(user.0))],
        )?;
        Ok(deleted)
    }

    /// Deletes all of `user`'s subscriptions on `node`.
    pub fn delete_notifications(
        &self,
        user: UserId,
        node: NodeId,
    ) -> Result<u64, NotificationsError> {
        debug!(user = user.0, node = node.0, "deleting notifications");
        let deleted = self.db.delete(
            NotifyDto::mapping().table,
            "WHERE userId = @userId AND nodeId = @nodeId",
            &[
                ("userId", Value::from(user.0)),
                ("nodeId", Value::from(node.0)),
            ],
        )?;
        Ok(deleted)
    }

    /// Subscribes `user` to `action` on `node`.
    pub fn create_notification(
        &self,
        user: UserId,
        node: NodeId,
        action: &str,
    ) -> Result<Notification, NotificationsError> {
        let query = SelectBuilder::new()
            .select_raw("DISTINCT nodeObjectType")
            .from::<NodeDto>()
            .where_clause::<NodeDto>(NodeDto::NODE_ID.eq(node.0))
            .build()?
            .to_sql(self.dialect);
        let node_type = self.db.execute_scalar(&query)?;
        let node_type = node_type.as_uuid().ok_or_else(|| {
            NotificationsError::Decode(format!(
                "expected uuid nodeObjectType, got {node_type:?}"
            ))
        })?;

        let dto = NotifyDto {
            user_id: user.0,
            node_id: node.0,
            action: action.to_string(),
        };
        debug!(user = user.0, node = node.0, action, "creating notification");
        self.db.insert(NotifyDto::mapping(), &dto.to_row())?;
        Ok(Notification::new(node, user, action, node_type))
    }
}

fn decode_notification(row: &RowData) -> Result<Notification, NotificationsError> {
    let node_id = field(row, "nodeId")?
        .as_i64()
        .ok_or_else(|| mistyped("nodeId"))?;
    let user_id = field(row, "userId")?
        .as_i64()
        .ok_or_else(|| mistyped("userId"))?;
    let action = field(row, "action")?
        .as_str()
        .ok_or_else(|| mistyped("action"))?
        .to_string();
    let node_object_type = field(row, "nodeObjectType")?
        .as_uuid()
        .ok_or_else(|| mistyped("nodeObjectType"))?;

    Ok(Notification {
        node_id: NodeId(node_id as i32),
        user_id: UserId(user_id as i32),
        action,
        node_object_type,
    })
}

fn field<'r>(row: &'r RowData, name: &str) -> Result<&'r Value, NotificationsError> {
    row.get(name)
        .ok_or_else(|| NotificationsError::Decode(format!("missing field `{name}`")))
}

fn mistyped(name: &str) -> NotificationsError {
    NotificationsError::Decode(format!("unexpected type for field `{name}`"))
}
