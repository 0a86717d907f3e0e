use async_graphql::{Context, Object};
use workbound_core::filters::Page;
use workbound_core::types::DbId;
use workbound_db::models::category::TemplateFilter;
use workbound_db::models::portfolio::PortfolioFilter;
use workbound_db::models::section::SectionFilter;
use workbound_db::models::work_item::WorkItemFilter;

use super::types::{
    CategoryObject, PermissionObject, PortfolioObject, RoleObject, RoleTypeObject, SectionObject,
    TaskObject, UserObject, WorkItemObject,
};
use super::{actor, app_state, gql_error};
use crate::services::{
    categories, permissions, portfolios, roles, sections, tasks, users, work_items,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn portfolio(
        &self,
        ctx: &Context<'_>,
        id: DbId,
    ) -> async_graphql::Result<PortfolioObject> {
        let portfolio = portfolios::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(PortfolioObject(portfolio))
    }

    async fn portfolios(
        &self,
        ctx: &Context<'_>,
        public_id: Option<String>,
        assigned_to_id: Option<DbId>,
        assigned_to_email: Option<String>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<PortfolioObject>> {
        let filter = PortfolioFilter {
            public_id,
            assigned_to_id,
            assigned_to_email,
            ..Default::default()
        };
        let items = portfolios::list(
            app_state(ctx)?,
            actor(ctx)?,
            &filter,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(PortfolioObject).collect())
    }

    async fn section(&self, ctx: &Context<'_>, id: DbId) -> async_graphql::Result<SectionObject> {
        let section = sections::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(SectionObject(section))
    }

    async fn sections(
        &self,
        ctx: &Context<'_>,
        portfolio_id: Option<DbId>,
        public_id: Option<String>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<SectionObject>> {
        let filter = SectionFilter {
            portfolio_id,
            public_id,
            ..Default::default()
        };
        let items = sections::list(
            app_state(ctx)?,
            actor(ctx)?,
            &filter,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(SectionObject).collect())
    }

    async fn category(&self, ctx: &Context<'_>, id: DbId) -> async_graphql::Result<CategoryObject> {
        let category = categories::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(CategoryObject(category))
    }

    async fn categories(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        #[graphql(default)] include_archived: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<CategoryObject>> {
        let filter = TemplateFilter {
            title,
            include_archived,
        };
        let items = categories::list(
            app_state(ctx)?,
            actor(ctx)?,
            &filter,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(CategoryObject).collect())
    }

    async fn task(&self, ctx: &Context<'_>, id: DbId) -> async_graphql::Result<TaskObject> {
        let task = tasks::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(TaskObject(task))
    }

    async fn tasks(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        #[graphql(default)] include_archived: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<TaskObject>> {
        let filter = TemplateFilter {
            title,
            include_archived,
        };
        let items = tasks::list(
            app_state(ctx)?,
            actor(ctx)?,
            &filter,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(TaskObject).collect())
    }

    async fn work_item(
        &self,
        ctx: &Context<'_>,
        id: DbId,
    ) -> async_graphql::Result<WorkItemObject> {
        let item = work_items::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(WorkItemObject(item))
    }

    async fn work_items(
        &self,
        ctx: &Context<'_>,
        section_id: Option<DbId>,
        assigned_to_id: Option<DbId>,
        assigned_to_email: Option<String>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<WorkItemObject>> {
        let filter = WorkItemFilter {
            section_id,
            assigned_to_id,
            assigned_to_email,
            ..Default::default()
        };
        let items = work_items::list(
            app_state(ctx)?,
            actor(ctx)?,
            &filter,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(WorkItemObject).collect())
    }

    async fn role(&self, ctx: &Context<'_>, id: DbId) -> async_graphql::Result<RoleObject> {
        let role = roles::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(RoleObject(role))
    }

    async fn roles(
        &self,
        ctx: &Context<'_>,
        category_id: Option<DbId>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<RoleObject>> {
        let items = roles::list(
            app_state(ctx)?,
            actor(ctx)?,
            category_id,
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(RoleObject).collect())
    }

    async fn role_types(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<RoleTypeObject>> {
        actor(ctx)?;
        let items = roles::role_types(app_state(ctx)?).await.map_err(gql_error)?;
        Ok(items.into_iter().map(RoleTypeObject).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: DbId) -> async_graphql::Result<UserObject> {
        let user = users::find(app_state(ctx)?, actor(ctx)?, id)
            .await
            .map_err(gql_error)?;
        Ok(UserObject::from(user))
    }

    async fn users(
        &self,
        ctx: &Context<'_>,
        email: Option<String>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> async_graphql::Result<Vec<UserObject>> {
        let items = users::list(
            app_state(ctx)?,
            actor(ctx)?,
            email.as_deref(),
            Page::from_params(page, size),
        )
        .await
        .map_err(gql_error)?;
        Ok(items.into_iter().map(UserObject::from).collect())
    }

    /// The authenticated caller with profile.
    async fn current_user(&self, ctx: &Context<'_>) -> async_graphql::Result<UserObject> {
        let detail = users::me(app_state(ctx)?, actor(ctx)?)
            .await
            .map_err(gql_error)?;
        Ok(UserObject {
            user: detail.user,
            profile: detail.profile,
        })
    }

    /// The caller's permissions, flattened.
    async fn my_permissions(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<PermissionObject>> {
        let grouped = permissions::mine(app_state(ctx)?, actor(ctx)?)
            .await
            .map_err(gql_error)?;
        Ok(grouped
            .into_iter()
            .flat_map(|(model, perms)| {
                perms.into_iter().map(move |(codename, status)| PermissionObject {
                    model: model.clone(),
                    codename,
                    verbose: status.verbose,
                    status: status.status,
                })
            })
            .collect())
    }
}
