//! Task template operations. Deleting a task archives it.

use validator::Validate;
use workbound_core::filters::Page;
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::category::TemplateFilter;
use workbound_db::models::task::{CreateTask, Task, UpdateTask};
use workbound_db::repositories::TaskRepo;

use super::authz::authorize;
use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Task";

pub async fn create(state: &AppState, actor: &AuthUser, input: &CreateTask) -> AppResult<Task> {
    authorize(&state.pool, actor, Action::Add, ModelKind::Task).await?;
    input.validate()?;
    let task = TaskRepo::create(&state.pool, actor.user_id, input).await?;
    tracing::info!(task_id = task.id, title = %task.title, "Task created");
    Ok(task)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    filter: &TemplateFilter,
    page: Page,
) -> AppResult<Vec<Task>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Task).await?;
    Ok(TaskRepo::list(&state.pool, filter, page).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<Task> {
    authorize(&state.pool, actor, Action::View, ModelKind::Task).await?;
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateTask,
) -> AppResult<Task> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Task).await?;
    input.validate()?;
    TaskRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn archive(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::Task).await?;
    if TaskRepo::archive(&state.pool, id).await? {
        tracing::info!(task_id = id, user_id = actor.user_id, "Task archived");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}
