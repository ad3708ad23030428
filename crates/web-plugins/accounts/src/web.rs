pub(crate) mod handler;

use crate::{
    store::AccountStore,
    web::handler::{
        create_account, delete_account, edit_account, get_account, health_check,
        list_accounts, list_accounts_add, list_all_accounts, method_not_allowed,
        route_not_found,
    },
};
use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

pub(crate) const API_BASE_PATH: &str = "/api/v1";

/// Every response, including unknown routes and methods, is an envelope.
pub(crate) fn routes(state: Arc<AccountStore>) -> Router {
    let api = Router::new() //
        .route("/test", get(health_check).fallback(method_not_allowed))
        .route("/account/:account_id", get(get_account).fallback(method_not_allowed))
        .route("/accounts", get(list_all_accounts).fallback(method_not_allowed))
        .route("/accounts/:number", get(list_accounts).fallback(method_not_allowed))
        .route(
            "/accounts/add",
            get(list_accounts_add)
                .post(create_account)
                .fallback(method_not_allowed),
        )
        .route(
            "/accounts/edit/:account_id",
            put(edit_account).fallback(method_not_allowed),
        )
        .route(
            "/accounts/delete/:account_id",
            delete(delete_account).fallback(method_not_allowed),
        );

    Router::new()
        .nest(API_BASE_PATH, api)
        .fallback(route_not_found)
        .with_state(state)
}
