use async_graphql::{Context, Object};
use workbound_core::types::DbId;
use workbound_db::models::user::{RegisterUser, UserResponse};

use super::types::{
    CategoryInput, CategoryObject, CreateRoleInput, CreateSectionInput, CreateWorkItemInput,
    PortfolioInput, PortfolioObject, RoleObject, SectionObject, TaskInput, TaskObject,
    TokenPayload, UpdateRoleInput, UpdateSectionInput, UpdateUserInput, UpdateWorkItemInput,
    UserObject,
    WorkItemObject,
};
use super::{actor, app_state, gql_error};
use crate::services::accounts::{self, TokenRequest};
use crate::services::{categories, portfolios, roles, sections, tasks, users, work_items};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_portfolio(
        &self,
        ctx: &Context<'_>,
        input: PortfolioInput,
    ) -> async_graphql::Result<PortfolioObject> {
        let portfolio = portfolios::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(PortfolioObject(portfolio))
    }

    async fn update_portfolio(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: PortfolioInput,
    ) -> async_graphql::Result<PortfolioObject> {
        let portfolio = portfolios::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(PortfolioObject(portfolio))
    }

    async fn create_section(
        &self,
        ctx: &Context<'_>,
        input: CreateSectionInput,
    ) -> async_graphql::Result<SectionObject> {
        let section = sections::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(SectionObject(section))
    }

    async fn update_section(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: UpdateSectionInput,
    ) -> async_graphql::Result<SectionObject> {
        let section = sections::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(SectionObject(section))
    }

    async fn create_category(
        &self,
        ctx: &Context<'_>,
        input: CategoryInput,
    ) -> async_graphql::Result<CategoryObject> {
        let category = categories::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(CategoryObject(category))
    }

    async fn update_category(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: CategoryInput,
    ) -> async_graphql::Result<CategoryObject> {
        let category = categories::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(CategoryObject(category))
    }

    async fn create_task(
        &self,
        ctx: &Context<'_>,
        input: TaskInput,
    ) -> async_graphql::Result<TaskObject> {
        let task = tasks::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(TaskObject(task))
    }

    async fn update_task(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: TaskInput,
    ) -> async_graphql::Result<TaskObject> {
        let task = tasks::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(TaskObject(task))
    }

    async fn create_work_item(
        &self,
        ctx: &Context<'_>,
        input: CreateWorkItemInput,
    ) -> async_graphql::Result<WorkItemObject> {
        let item = work_items::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(WorkItemObject(item))
    }

    async fn update_work_item(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: UpdateWorkItemInput,
    ) -> async_graphql::Result<WorkItemObject> {
        let item = work_items::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(WorkItemObject(item))
    }

    async fn create_role(
        &self,
        ctx: &Context<'_>,
        input: CreateRoleInput,
    ) -> async_graphql::Result<RoleObject> {
        let role = roles::create(app_state(ctx)?, actor(ctx)?, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(RoleObject(role))
    }

    async fn update_role(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: UpdateRoleInput,
    ) -> async_graphql::Result<RoleObject> {
        let role = roles::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(RoleObject(role))
    }

    /// Register an account. Open to anonymous callers.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<UserObject> {
        let user = accounts::register(app_state(ctx)?, RegisterUser { email, password })
            .await
            .map_err(gql_error)?;
        Ok(UserObject::from(UserResponse::from(user)))
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        input: UpdateUserInput,
    ) -> async_graphql::Result<UserObject> {
        let user = users::update(app_state(ctx)?, actor(ctx)?, id, &input.into())
            .await
            .map_err(gql_error)?;
        Ok(UserObject::from(user))
    }

    /// Exchange email + password for an API token.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<TokenPayload> {
        let issued = accounts::issue_token(app_state(ctx)?, &TokenRequest { email, password })
            .await
            .map_err(gql_error)?;
        Ok(TokenPayload {
            token: issued.token,
            user: UserObject::from(issued.user),
        })
    }
}
