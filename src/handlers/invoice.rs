use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Response};

use crate::actions::Actions;
use crate::models::requests::FormFields;

pub async fn create(State(actions): State<Actions>, Form(fields): Form<FormFields>) -> Response {
    actions.create_invoice(&fields).await.into_response()
}

pub async fn update(
    State(actions): State<Actions>,
    Path(id): Path<String>,
    Form(fields): Form<FormFields>,
) -> Response {
    actions.update_invoice(&id, &fields).await.into_response()
}

pub async fn delete(State(actions): State<Actions>, Form(fields): Form<FormFields>) -> Response {
    actions.delete_invoice(&fields).await.into_response()
}
