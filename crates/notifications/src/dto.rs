//! Row-level DTOs and their table mappings.
//!
//! Property names are the logical names column aliases are generated from;
//! they intentionally differ from the physical column names.

use model::core::value::Value;
use model::records::row::{FieldValue, RowData};
use query_builder::mapping::{Col, ColumnMapping, Mapped, TableMapping};

/// `umbracoUser2NodeNotify`: one row per (user, node, action) subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyDto {
    pub user_id: i32,
    pub node_id: i32,
    pub action: String,
}

impl NotifyDto {
    pub const USER_ID: Col = Col("UserId");
    pub const NODE_ID: Col = Col("NodeId");
    pub const ACTION: Col = Col("Action");

    pub fn to_row(&self) -> RowData {
        RowData::new(vec![
            FieldValue::new("UserId", Value::from(self.user_id)),
            FieldValue::new("NodeId", Value::from(self.node_id)),
            FieldValue::new("Action", Value::from(self.action.as_str())),
        ])
    }
}

impl Mapped for NotifyDto {
    fn mapping() -> &'static TableMapping {
        static MAPPING: TableMapping = TableMapping {
            table: "umbracoUser2NodeNotify",
            primary_key: "userId",
            columns: &[
                ColumnMapping {
                    property: "UserId",
                    column: "userId",
                    nullable: false,
                    auto_increment: false,
                },
                ColumnMapping {
                    property: "NodeId",
                    column: "nodeId",
                    nullable: false,
                    auto_increment: false,
                },
                ColumnMapping {
                    property: "Action",
                    column: "action",
                    nullable: false,
                    auto_increment: false,
                },
            ],
            references: &[],
        };
        &MAPPING
    }
}

/// `umbracoNode`: the slice of the content-node table these queries touch.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDto {
    pub node_id: i32,
    pub text: Option<String>,
    pub node_object_type: Option<uuid::Uuid>,
}

impl NodeDto {
    pub const NODE_ID: Col = Col("NodeId");
    pub const TEXT: Col = Col("Text");
    pub const NODE_OBJECT_TYPE: Col = Col("NodeObjectType");
}

impl Mapped for NodeDto {
    fn mapping() -> &'static TableMapping {
        static MAPPING: TableMapping = TableMapping {
            table: "umbracoNode",
            primary_key: "id",
            columns: &[
                ColumnMapping {
                    property: "NodeId",
                    column: "id",
                    nullable: false,
                    auto_increment: true,
                },
                ColumnMapping {
                    property: "Text",
                    column: "text",
                    nullable: true,
                    auto_increment: false,
                },
                ColumnMapping {
                    property: "NodeObjectType",
                    column: "nodeObjectType",
                    nullable: true,
                    auto_increment: false,
                },
            ],
            references: &[],
        };
        &MAPPING
    }
}

/// `umbracoUser`: the slice of the user table these queries touch.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub disabled: bool,
}

impl UserDto {
    pub const ID: Col = Col("Id");
    pub const DISABLED: Col = Col("Disabled");
}

impl Mapped for UserDto {
    fn mapping() -> &'static TableMapping {
        static MAPPING: TableMapping = TableMapping {
            table: "umbracoUser",
            primary_key: "id",
            columns: &[
                ColumnMapping {
                    property: "Id",
                    column: "id",
                    nullable: false,
                    auto_increment: true,
                },
                ColumnMapping {
                    property: "Disabled",
                    column: "userDisabled",
                    nullable: false,
                    auto_increment: false,
                },
            ],
            references: &[],
        };
        &MAPPING
    }
}
