//! Per-model permission vocabulary.
//!
//! Every API model has four permissions, one per [`Action`]. A permission is
//! identified by its codename `<action>_<model>` (e.g. `view_task`) and seeded
//! in the `permissions` table with a human name (e.g. `Can view Task`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four CRUD actions a permission can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Add,
    Change,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Add, Action::Change, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Change => "change",
            Action::Delete => "delete",
        }
    }
}

/// Models guarded by the permission system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Portfolio,
    Section,
    Category,
    Task,
    #[serde(rename = "workitem")]
    WorkItem,
    Role,
    User,
}

impl ModelKind {
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Portfolio,
        ModelKind::Section,
        ModelKind::Category,
        ModelKind::Task,
        ModelKind::WorkItem,
        ModelKind::Role,
        ModelKind::User,
    ];

    /// Lowercase model key used in codenames.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Portfolio => "portfolio",
            ModelKind::Section => "section",
            ModelKind::Category => "category",
            ModelKind::Task => "task",
            ModelKind::WorkItem => "workitem",
            ModelKind::Role => "role",
            ModelKind::User => "user",
        }
    }

    /// Human-readable name used in permission names and error messages.
    pub fn verbose_name(self) -> &'static str {
        match self {
            ModelKind::Portfolio => "Portfolio",
            ModelKind::Section => "Section",
            ModelKind::Category => "Category",
            ModelKind::Task => "Task",
            ModelKind::WorkItem => "Work Item",
            ModelKind::Role => "Role",
            ModelKind::User => "User",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown model '{s}'"))
    }
}

/// A `(action, model)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub action: Action,
    pub model: ModelKind,
}

impl Permission {
    pub const fn new(action: Action, model: ModelKind) -> Self {
        Self { action, model }
    }

    /// Codename such as `change_workitem`.
    pub fn codename(&self) -> String {
        format!("{}_{}", self.action.as_str(), self.model.as_str())
    }

    /// Human name such as `Can change Work Item`.
    pub fn name(&self) -> String {
        format!("Can {} {}", self.action.as_str(), self.model.verbose_name())
    }

    /// Parse a codename back into a permission.
    pub fn parse(codename: &str) -> Option<Self> {
        let (action, model) = codename.split_once('_')?;
        let action = Action::ALL.into_iter().find(|a| a.as_str() == action)?;
        let model = model.parse().ok()?;
        Some(Self { action, model })
    }

    /// Every permission the system knows about.
    pub fn all() -> impl Iterator<Item = Permission> {
        ModelKind::ALL
            .into_iter()
            .flat_map(|m| Action::ALL.into_iter().map(move |a| Permission::new(a, m)))
    }
}
