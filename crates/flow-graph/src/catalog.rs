/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Static node-type catalog.
//!
//! Every concrete node type a workflow may contain is registered here
//! with its display metadata and configuration-field schema. The
//! external configuration form renders its inputs from
//! [`NodeTypeDefinition::config_fields`]; the kernel validates required
//! fields through [`validate_config`]. The table is immutable and
//! shared across all open workflows.

use serde_json::{Map, Value};

use crate::graph::{GraphError, NodeCategory};

/// Closed set of icon identifiers resolved by the rendering layer.
///
/// Kept as an enum (not free-form strings) so the renderer's lookup is
/// total; unknown persisted icons fall back per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconId {
    UserPlus,
    ClipboardList,
    Tag,
    CalendarClock,
    Mail,
    MessageCircle,
    PenLine,
    Clock,
    Bell,
    GitBranch,
    MailOpen,
    Zap,
}

impl IconId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserPlus => "user-plus",
            Self::ClipboardList => "clipboard-list",
            Self::Tag => "tag",
            Self::CalendarClock => "calendar-clock",
            Self::Mail => "mail",
            Self::MessageCircle => "message-circle",
            Self::PenLine => "pen-line",
            Self::Clock => "clock",
            Self::Bell => "bell",
            Self::GitBranch => "git-branch",
            Self::MailOpen => "mail-open",
            Self::Zap => "zap",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw {
            "user-plus" => Some(Self::UserPlus),
            "clipboard-list" => Some(Self::ClipboardList),
            "tag" => Some(Self::Tag),
            "calendar-clock" => Some(Self::CalendarClock),
            "mail" => Some(Self::Mail),
            "message-circle" => Some(Self::MessageCircle),
            "pen-line" => Some(Self::PenLine),
            "clock" => Some(Self::Clock),
            "bell" => Some(Self::Bell),
            "git-branch" => Some(Self::GitBranch),
            "mail-open" => Some(Self::MailOpen),
            "zap" => Some(Self::Zap),
            _ => None,
        }
    }

    /// Fallback icon when a persisted identifier is unknown.
    pub fn fallback(category: NodeCategory) -> Self {
        match category {
            NodeCategory::Trigger => Self::Zap,
            NodeCategory::Action => Self::Mail,
            NodeCategory::Condition => Self::GitBranch,
        }
    }
}

/// Input widget kind for a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFieldKind {
    Text,
    TextArea,
    Number,
    Select(&'static [&'static str]),
    Toggle,
}

/// One field of a node type's configuration schema.
#[derive(Debug, Clone, Copy)]
pub struct ConfigField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ConfigFieldKind,
    pub required: bool,
}

/// Immutable definition of a concrete node type.
#[derive(Debug, Clone, Copy)]
pub struct NodeTypeDefinition {
    pub type_id: &'static str,
    pub category: NodeCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: IconId,
    pub config_fields: &'static [ConfigField],
}

static CATALOG: &[NodeTypeDefinition] = &[
    // Triggers
    NodeTypeDefinition {
        type_id: "contact_created",
        category: NodeCategory::Trigger,
        name: "Contact Created",
        description: "Starts when a new contact is added to the CRM",
        icon: IconId::UserPlus,
        config_fields: &[ConfigField {
            key: "source",
            label: "Source",
            kind: ConfigFieldKind::Select(&["any", "form", "import", "api"]),
            required: false,
        }],
    },
    NodeTypeDefinition {
        type_id: "form_submitted",
        category: NodeCategory::Trigger,
        name: "Form Submitted",
        description: "Starts when a visitor submits a tracked form",
        icon: IconId::ClipboardList,
        config_fields: &[ConfigField {
            key: "form_id",
            label: "Form",
            kind: ConfigFieldKind::Text,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "tag_added",
        category: NodeCategory::Trigger,
        name: "Tag Added",
        description: "Starts when a tag is applied to a contact",
        icon: IconId::Tag,
        config_fields: &[ConfigField {
            key: "tag",
            label: "Tag",
            kind: ConfigFieldKind::Text,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "schedule",
        category: NodeCategory::Trigger,
        name: "Schedule",
        description: "Starts on a recurring schedule",
        icon: IconId::CalendarClock,
        config_fields: &[ConfigField {
            key: "cron",
            label: "Cron expression",
            kind: ConfigFieldKind::Text,
            required: true,
        }],
    },
    // Actions
    NodeTypeDefinition {
        type_id: "send_email",
        category: NodeCategory::Action,
        name: "Send Email",
        description: "Sends an email to the contact",
        icon: IconId::Mail,
        config_fields: &[
            ConfigField {
                key: "subject",
                label: "Subject",
                kind: ConfigFieldKind::Text,
                required: true,
            },
            ConfigField {
                key: "body",
                label: "Body",
                kind: ConfigFieldKind::TextArea,
                required: true,
            },
            ConfigField {
                key: "template_id",
                label: "Template",
                kind: ConfigFieldKind::Text,
                required: false,
            },
        ],
    },
    NodeTypeDefinition {
        type_id: "send_whatsapp",
        category: NodeCategory::Action,
        name: "Send WhatsApp",
        description: "Sends a WhatsApp message to the contact",
        icon: IconId::MessageCircle,
        config_fields: &[ConfigField {
            key: "message",
            label: "Message",
            kind: ConfigFieldKind::TextArea,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "update_field",
        category: NodeCategory::Action,
        name: "Update Field",
        description: "Writes a value into a contact field",
        icon: IconId::PenLine,
        config_fields: &[
            ConfigField {
                key: "field",
                label: "Field",
                kind: ConfigFieldKind::Select(&["name", "email", "phone", "stage", "owner"]),
                required: true,
            },
            ConfigField {
                key: "value",
                label: "Value",
                kind: ConfigFieldKind::Text,
                required: true,
            },
        ],
    },
    NodeTypeDefinition {
        type_id: "add_tag",
        category: NodeCategory::Action,
        name: "Add Tag",
        description: "Applies a tag to the contact",
        icon: IconId::Tag,
        config_fields: &[ConfigField {
            key: "tag",
            label: "Tag",
            kind: ConfigFieldKind::Text,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "wait",
        category: NodeCategory::Action,
        name: "Wait",
        description: "Pauses the automation for a fixed duration",
        icon: IconId::Clock,
        config_fields: &[ConfigField {
            key: "duration_minutes",
            label: "Duration (minutes)",
            kind: ConfigFieldKind::Number,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "notify_team",
        category: NodeCategory::Action,
        name: "Notify Team",
        description: "Sends an internal notification to the team",
        icon: IconId::Bell,
        config_fields: &[
            ConfigField {
                key: "channel",
                label: "Channel",
                kind: ConfigFieldKind::Select(&["email", "slack"]),
                required: true,
            },
            ConfigField {
                key: "message",
                label: "Message",
                kind: ConfigFieldKind::TextArea,
                required: true,
            },
        ],
    },
    // Conditions
    NodeTypeDefinition {
        type_id: "field_equals",
        category: NodeCategory::Condition,
        name: "Field Equals",
        description: "Branches on a contact field value",
        icon: IconId::GitBranch,
        config_fields: &[
            ConfigField {
                key: "field",
                label: "Field",
                kind: ConfigFieldKind::Text,
                required: true,
            },
            ConfigField {
                key: "value",
                label: "Value",
                kind: ConfigFieldKind::Text,
                required: true,
            },
        ],
    },
    NodeTypeDefinition {
        type_id: "has_tag",
        category: NodeCategory::Condition,
        name: "Has Tag",
        description: "Branches on whether the contact carries a tag",
        icon: IconId::Tag,
        config_fields: &[ConfigField {
            key: "tag",
            label: "Tag",
            kind: ConfigFieldKind::Text,
            required: true,
        }],
    },
    NodeTypeDefinition {
        type_id: "email_opened",
        category: NodeCategory::Condition,
        name: "Email Opened",
        description: "Branches on whether the last email was opened",
        icon: IconId::MailOpen,
        config_fields: &[ConfigField {
            key: "within_hours",
            label: "Within (hours)",
            kind: ConfigFieldKind::Number,
            required: false,
        }],
    },
];

/// Look up a node type by its stable identifier.
pub fn definition(type_id: &str) -> Option<&'static NodeTypeDefinition> {
    CATALOG.iter().find(|def| def.type_id == type_id)
}

/// All definitions in a category, in registration order.
pub fn definitions_in(category: NodeCategory) -> impl Iterator<Item = &'static NodeTypeDefinition> {
    CATALOG.iter().filter(move |def| def.category == category)
}

/// The full catalog, in registration order.
pub fn all() -> impl Iterator<Item = &'static NodeTypeDefinition> {
    CATALOG.iter()
}

/// Check a config map against a definition's required fields.
///
/// A required field is satisfied by any present, non-null value; the
/// widget kind is a rendering concern and is not re-checked here.
pub fn validate_config(
    def: &NodeTypeDefinition,
    config: &Map<String, Value>,
) -> Result<(), GraphError> {
    for field in def.config_fields {
        if !field.required {
            continue;
        }
        match config.get(field.key) {
            Some(Value::Null) | None => {
                return Err(GraphError::MissingConfigField {
                    type_id: def.type_id.to_string(),
                    key: field.key.to_string(),
                });
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(GraphError::MissingConfigField {
                    type_id: def.type_id.to_string(),
                    key: field.key.to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
