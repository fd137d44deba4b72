//! Route handlers for categories and sub-categories.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, CategoryController, SubCategory},
    handlers::parse_payload,
    validation::ResourceKind,
};

/// The body of a request to rename a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameCategory {
    /// The new name for the category.
    pub name: String,
}

/// A route handler for creating a category, responds with the created category.
pub async fn create_category_endpoint(
    State(controller): State<CategoryController>,
    payload: Result<Json<Category>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let category = parse_payload(payload, ResourceKind::Category)?;
    let created = controller.create(category)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// A route handler for getting a category and its sub-categories.
pub async fn get_category_endpoint(
    State(controller): State<CategoryController>,
    Path(name): Path<String>,
) -> Result<Json<Category>, Error> {
    controller.get(&name).map(Json)
}

/// A route handler for listing every category.
pub async fn list_categories_endpoint(
    State(controller): State<CategoryController>,
) -> Result<Json<Vec<Category>>, Error> {
    controller.list().map(Json)
}

/// A route handler for renaming a category.
pub async fn rename_category_endpoint(
    State(controller): State<CategoryController>,
    Path(name): Path<String>,
    payload: Result<Json<RenameCategory>, JsonRejection>,
) -> Result<StatusCode, Error> {
    let RenameCategory { name: new_name } = parse_payload(payload, ResourceKind::Category)?;
    controller.rename(&name, &new_name)?;

    Ok(StatusCode::ACCEPTED)
}

/// A route handler for deleting a category and its sub-categories.
pub async fn delete_category_endpoint(
    State(controller): State<CategoryController>,
    Path(name): Path<String>,
) -> Result<StatusCode, Error> {
    controller.delete(&name)?;

    Ok(StatusCode::ACCEPTED)
}

/// A route handler for adding a sub-category to a category.
pub async fn create_sub_category_endpoint(
    State(controller): State<CategoryController>,
    payload: Result<Json<SubCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<SubCategory>), Error> {
    let sub_category = parse_payload(payload, ResourceKind::SubCategory)?;
    let created = controller.create_sub_category(sub_category)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// A route handler for deleting a sub-category.
pub async fn delete_sub_category_endpoint(
    State(controller): State<CategoryController>,
    Path((category, name)): Path<(String, String)>,
) -> Result<StatusCode, Error> {
    controller.delete_sub_category(&category, &name)?;

    Ok(StatusCode::ACCEPTED)
}
