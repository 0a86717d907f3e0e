//! GraphQL object and input types.
//!
//! Objects wrap the repository models; nested fields (a portfolio's
//! sections, a section's work items) resolve through the service layer and
//! therefore carry the same permission checks as the top-level queries.

use async_graphql::{Context, InputObject, Json, MaybeUndefined, Object, SimpleObject};
use workbound_core::types::{DbId, Timestamp};
use workbound_db::models::category::{Category, CreateCategory, UpdateCategory};
use workbound_db::models::portfolio::{CreatePortfolio, Portfolio, UpdatePortfolio};
use workbound_db::models::profile::Profile;
use workbound_db::models::role::{CreateRole, Role, RoleType, UpdateRole};
use workbound_db::models::section::{CreateSection, Section, UpdateSection};
use workbound_db::models::task::{CreateTask, Task, UpdateTask};
use workbound_db::models::user::{UpdateUserRequest, UserResponse};
use workbound_db::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItem};

use super::{actor, app_state, gql_error};
use crate::services::{categories, sections, tasks, work_items};

type JsonValue = Json<serde_json::Value>;

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

pub struct PortfolioObject(pub Portfolio);

#[Object(name = "Portfolio")]
impl PortfolioObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    /// Generated `pf_...` identifier.
    async fn public_id(&self) -> &str {
        &self.0.public_id
    }

    async fn reference(&self) -> &str {
        &self.0.reference
    }

    async fn completed_at(&self) -> Option<Timestamp> {
        self.0.completed_at
    }

    async fn meta(&self) -> Option<JsonValue> {
        self.0.meta.clone().map(Json)
    }

    async fn created_by_id(&self) -> DbId {
        self.0.created_by_id
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    /// Sections in display order.
    async fn sections(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<SectionObject>> {
        let items = sections::list_for_portfolio(app_state(ctx)?, actor(ctx)?, self.0.id)
            .await
            .map_err(gql_error)?;
        Ok(items.into_iter().map(SectionObject).collect())
    }
}

pub struct SectionObject(pub Section);

#[Object(name = "Section")]
impl SectionObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    /// Generated `sec_...` identifier.
    async fn public_id(&self) -> &str {
        &self.0.public_id
    }

    async fn sort_order(&self) -> f64 {
        self.0.sort_order
    }

    async fn portfolio_id(&self) -> DbId {
        self.0.portfolio_id
    }

    async fn category_id(&self) -> DbId {
        self.0.category_id
    }

    async fn completed_at(&self) -> Option<Timestamp> {
        self.0.completed_at
    }

    async fn meta(&self) -> Option<JsonValue> {
        self.0.meta.clone().map(Json)
    }

    async fn created_by_id(&self) -> DbId {
        self.0.created_by_id
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    async fn category(&self, ctx: &Context<'_>) -> async_graphql::Result<CategoryObject> {
        let category = categories::find(app_state(ctx)?, actor(ctx)?, self.0.category_id)
            .await
            .map_err(gql_error)?;
        Ok(CategoryObject(category))
    }

    /// Work items in display order.
    async fn work_items(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<WorkItemObject>> {
        let items = work_items::list_for_section(app_state(ctx)?, actor(ctx)?, self.0.id)
            .await
            .map_err(gql_error)?;
        Ok(items.into_iter().map(WorkItemObject).collect())
    }
}

pub struct WorkItemObject(pub WorkItem);

#[Object(name = "WorkItem")]
impl WorkItemObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    /// Generated `wi_...` identifier.
    async fn public_id(&self) -> &str {
        &self.0.public_id
    }

    async fn sort_order(&self) -> f64 {
        self.0.sort_order
    }

    async fn section_id(&self) -> DbId {
        self.0.section_id
    }

    async fn task_id(&self) -> DbId {
        self.0.task_id
    }

    async fn assigned_to_id(&self) -> Option<DbId> {
        self.0.assigned_to_id
    }

    async fn completed_at(&self) -> Option<Timestamp> {
        self.0.completed_at
    }

    async fn expected_at(&self) -> Option<Timestamp> {
        self.0.expected_at
    }

    async fn meta(&self) -> Option<JsonValue> {
        self.0.meta.clone().map(Json)
    }

    async fn created_by_id(&self) -> DbId {
        self.0.created_by_id
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    async fn task(&self, ctx: &Context<'_>) -> async_graphql::Result<TaskObject> {
        let task = tasks::find(app_state(ctx)?, actor(ctx)?, self.0.task_id)
            .await
            .map_err(gql_error)?;
        Ok(TaskObject(task))
    }
}

pub struct CategoryObject(pub Category);

#[Object(name = "Category")]
impl CategoryObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn created_by_id(&self) -> DbId {
        self.0.created_by_id
    }

    async fn archived_at(&self) -> Option<Timestamp> {
        self.0.archived_at
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }
}

pub struct TaskObject(pub Task);

#[Object(name = "Task")]
impl TaskObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    /// Typical duration in minutes.
    async fn duration(&self) -> i32 {
        self.0.duration
    }

    async fn completion_days(&self) -> i16 {
        self.0.completion_days
    }

    async fn created_by_id(&self) -> DbId {
        self.0.created_by_id
    }

    async fn archived_at(&self) -> Option<Timestamp> {
        self.0.archived_at
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }
}

pub struct RoleObject(pub Role);

#[Object(name = "Role")]
impl RoleObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    async fn user_id(&self) -> DbId {
        self.0.user_id
    }

    async fn category_id(&self) -> DbId {
        self.0.category_id
    }

    async fn role_type_id(&self) -> DbId {
        self.0.role_type_id
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }
}

pub struct RoleTypeObject(pub RoleType);

#[Object(name = "RoleType")]
impl RoleTypeObject {
    async fn id(&self) -> DbId {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn level(&self) -> f64 {
        self.0.level
    }
}

pub struct UserObject {
    pub user: UserResponse,
    pub profile: Option<Profile>,
}

impl From<UserResponse> for UserObject {
    fn from(user: UserResponse) -> Self {
        Self {
            user,
            profile: None,
        }
    }
}

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> DbId {
        self.user.id
    }

    async fn email(&self) -> &str {
        &self.user.email
    }

    async fn is_staff(&self) -> bool {
        self.user.is_staff
    }

    async fn is_superuser(&self) -> bool {
        self.user.is_superuser
    }

    async fn is_active(&self) -> bool {
        self.user.is_active
    }

    async fn date_joined(&self) -> Timestamp {
        self.user.date_joined
    }

    /// Only populated for `currentUser`.
    async fn profile(&self) -> Option<ProfileObject> {
        self.profile.clone().map(ProfileObject::from)
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Profile")]
pub struct ProfileObject {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub image_path: Option<String>,
    pub thumbnail_path: Option<String>,
}

impl From<Profile> for ProfileObject {
    fn from(profile: Profile) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            image_path: profile.image_path,
            thumbnail_path: profile.thumbnail_path,
        }
    }
}

/// One held permission in `myPermissions`.
#[derive(SimpleObject)]
pub struct PermissionObject {
    pub model: String,
    pub codename: String,
    pub verbose: String,
    pub status: bool,
}

/// Result of `tokenAuth`.
#[derive(SimpleObject)]
pub struct TokenPayload {
    pub token: String,
    pub user: UserObject,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Omitted keeps the stored value, `null` clears it.
fn tri_state<T, U>(value: MaybeUndefined<T>, f: impl FnOnce(T) -> U) -> Option<Option<U>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(f(v))),
    }
}

#[derive(InputObject)]
pub struct PortfolioInput {
    pub reference: Option<String>,
    pub completed_at: MaybeUndefined<Timestamp>,
    pub meta: MaybeUndefined<JsonValue>,
}

impl From<PortfolioInput> for CreatePortfolio {
    fn from(input: PortfolioInput) -> Self {
        Self {
            reference: input.reference,
            completed_at: tri_state(input.completed_at, |t| t).flatten(),
            meta: tri_state(input.meta, |m| m.0).flatten(),
        }
    }
}

impl From<PortfolioInput> for UpdatePortfolio {
    fn from(input: PortfolioInput) -> Self {
        Self {
            reference: input.reference,
            completed_at: tri_state(input.completed_at, |t| t),
            meta: tri_state(input.meta, |m| m.0),
        }
    }
}

#[derive(InputObject)]
pub struct CreateSectionInput {
    pub portfolio_id: DbId,
    pub category_id: DbId,
    pub sort_order: Option<f64>,
    pub completed_at: Option<Timestamp>,
    pub meta: Option<JsonValue>,
}

impl From<CreateSectionInput> for CreateSection {
    fn from(input: CreateSectionInput) -> Self {
        Self {
            portfolio_id: input.portfolio_id,
            category_id: input.category_id,
            sort_order: input.sort_order,
            completed_at: input.completed_at,
            meta: input.meta.map(|m| m.0),
        }
    }
}

#[derive(InputObject)]
pub struct UpdateSectionInput {
    pub category_id: Option<DbId>,
    pub sort_order: Option<f64>,
    pub completed_at: MaybeUndefined<Timestamp>,
    pub meta: MaybeUndefined<JsonValue>,
}

impl From<UpdateSectionInput> for UpdateSection {
    fn from(input: UpdateSectionInput) -> Self {
        Self {
            category_id: input.category_id,
            sort_order: input.sort_order,
            completed_at: tri_state(input.completed_at, |t| t),
            meta: tri_state(input.meta, |m| m.0),
        }
    }
}

#[derive(InputObject)]
pub struct CreateWorkItemInput {
    pub section_id: DbId,
    pub task_id: DbId,
    pub assigned_to_id: Option<DbId>,
    pub sort_order: Option<f64>,
    pub completed_at: Option<Timestamp>,
    pub expected_at: Option<Timestamp>,
    pub meta: Option<JsonValue>,
}

impl From<CreateWorkItemInput> for CreateWorkItem {
    fn from(input: CreateWorkItemInput) -> Self {
        Self {
            section_id: input.section_id,
            task_id: input.task_id,
            assigned_to_id: input.assigned_to_id,
            sort_order: input.sort_order,
            completed_at: input.completed_at,
            expected_at: input.expected_at,
            meta: input.meta.map(|m| m.0),
        }
    }
}

#[derive(InputObject)]
pub struct UpdateWorkItemInput {
    pub task_id: Option<DbId>,
    pub assigned_to_id: MaybeUndefined<DbId>,
    pub sort_order: Option<f64>,
    pub completed_at: MaybeUndefined<Timestamp>,
    pub expected_at: MaybeUndefined<Timestamp>,
    pub meta: MaybeUndefined<JsonValue>,
}

impl From<UpdateWorkItemInput> for UpdateWorkItem {
    fn from(input: UpdateWorkItemInput) -> Self {
        Self {
            task_id: input.task_id,
            assigned_to_id: tri_state(input.assigned_to_id, |id| id),
            sort_order: input.sort_order,
            completed_at: tri_state(input.completed_at, |t| t),
            expected_at: tri_state(input.expected_at, |t| t),
            meta: tri_state(input.meta, |m| m.0),
        }
    }
}

/// Account changes; `isActive` and `isStaff` are honoured for superusers only.
#[derive(InputObject)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

impl From<UpdateUserInput> for UpdateUserRequest {
    fn from(input: UpdateUserInput) -> Self {
        Self {
            email: input.email,
            password: input.password,
            is_active: input.is_active,
            is_staff: input.is_staff,
        }
    }
}

#[derive(InputObject)]
pub struct CategoryInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<CategoryInput> for UpdateCategory {
    fn from(input: CategoryInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
        }
    }
}

impl From<CategoryInput> for CreateCategory {
    fn from(input: CategoryInput) -> Self {
        // A missing title fails validation as an empty string.
        Self {
            title: input.title.unwrap_or_default(),
            description: input.description,
        }
    }
}

#[derive(InputObject)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub completion_days: Option<i16>,
}

impl From<TaskInput> for CreateTask {
    fn from(input: TaskInput) -> Self {
        Self {
            title: input.title.unwrap_or_default(),
            description: input.description,
            duration: input.duration.unwrap_or_default(),
            completion_days: input.completion_days,
        }
    }
}

impl From<TaskInput> for UpdateTask {
    fn from(input: TaskInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            duration: input.duration,
            completion_days: input.completion_days,
        }
    }
}

#[derive(InputObject)]
pub struct CreateRoleInput {
    pub user_id: DbId,
    pub category_id: DbId,
    pub role_type_id: DbId,
}

impl From<CreateRoleInput> for CreateRole {
    fn from(input: CreateRoleInput) -> Self {
        Self {
            user_id: input.user_id,
            category_id: input.category_id,
            role_type_id: input.role_type_id,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateRoleInput {
    pub category_id: Option<DbId>,
    pub role_type_id: Option<DbId>,
}

impl From<UpdateRoleInput> for UpdateRole {
    fn from(input: UpdateRoleInput) -> Self {
        Self {
            category_id: input.category_id,
            role_type_id: input.role_type_id,
        }
    }
}
