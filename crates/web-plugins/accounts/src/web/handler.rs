use crate::{
    envelope::{Envelope, Reply},
    error::AccountError,
    model::Account,
    store::AccountStore,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::Method,
};
use serde_json::{json, Value};
use std::{num::IntErrorKind, sync::Arc};

type RawPath = Result<Path<String>, PathRejection>;
type RawBody = Result<Bytes, BytesRejection>;

pub(crate) async fn health_check(State(store): State<Arc<AccountStore>>) -> Reply {
    let id = store.next_request_id();
    tracing::debug!("request {id}: health check");

    Reply::new(
        id,
        Ok(Envelope::success(id, "service is up", Some(json!({"status": "ok"})))),
    )
}

pub(crate) async fn get_account(
    State(store): State<Arc<AccountStore>>,
    account_id: RawPath,
) -> Reply {
    let id = store.next_request_id();

    let outcome = path_param(account_id).and_then(|account_id| {
        tracing::debug!("request {id}: get account {account_id}");
        store.get(&account_id)
    });
    let outcome = outcome.map(|account| {
        Envelope::success(
            id,
            format!("account {} found", account.orgno),
            Some(json!(account)),
        )
    });

    Reply::new(id, outcome)
}

pub(crate) async fn list_all_accounts(State(store): State<Arc<AccountStore>>) -> Reply {
    let id = store.next_request_id();
    tracing::debug!("request {id}: list all accounts");

    Reply::new(id, Ok(listing(id, store.list(0))))
}

pub(crate) async fn list_accounts(
    State(store): State<Arc<AccountStore>>,
    number: RawPath,
) -> Reply {
    let id = store.next_request_id();
    let outcome =
        path_param(number).and_then(|number| bounded_listing(id, &store, &number));

    Reply::new(id, outcome)
}

/// `GET /accounts/add` shares its path with account creation; the `add`
/// segment is read as a list bound.
pub(crate) async fn list_accounts_add(State(store): State<Arc<AccountStore>>) -> Reply {
    let id = store.next_request_id();

    Reply::new(id, bounded_listing(id, &store, "add"))
}

pub(crate) async fn create_account(
    State(store): State<Arc<AccountStore>>,
    body: RawBody,
) -> Reply {
    let id = store.next_request_id();
    tracing::debug!("request {id}: create account");

    let outcome = json_body(body)
        .and_then(|payload| store.create(&payload))
        .map(|account| {
            Envelope::success(
                id,
                format!("account {} created", account.orgno),
                Some(json!(account)),
            )
        });

    Reply::new(id, outcome)
}

pub(crate) async fn edit_account(
    State(store): State<Arc<AccountStore>>,
    account_id: RawPath,
    body: RawBody,
) -> Reply {
    let id = store.next_request_id();

    // A malformed body only fails once the targeted account is known to exist.
    let outcome = path_param(account_id).and_then(|account_id| {
        tracing::debug!("request {id}: edit account {account_id}");
        match json_body(body) {
            Ok(payload) => store.edit(&account_id, &payload),
            Err(err) => store.get(&account_id).and(Err(err)),
        }
    });
    let outcome = outcome.map(|(account, changed)| {
        let message = if changed {
            "successfully updated"
        } else {
            "no updated data provided"
        };
        Envelope::success(id, message, Some(json!(account)))
    });

    Reply::new(id, outcome)
}

pub(crate) async fn delete_account(
    State(store): State<Arc<AccountStore>>,
    account_id: RawPath,
) -> Reply {
    let id = store.next_request_id();

    let outcome = path_param(account_id).and_then(|account_id| {
        tracing::debug!("request {id}: delete account {account_id}");
        store.delete(&account_id)
    });
    let outcome = outcome.map(|account| {
        Envelope::success(
            id,
            format!("account {} deleted", account.orgno),
            Some(json!(account)),
        )
    });

    Reply::new(id, outcome)
}

pub(crate) async fn route_not_found(
    State(store): State<Arc<AccountStore>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Reply {
    let id = store.next_request_id();

    Reply::new(id, Err(AccountError::RouteNotFound(format!("{method} {uri}"))))
}

pub(crate) async fn method_not_allowed(
    State(store): State<Arc<AccountStore>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Reply {
    let id = store.next_request_id();

    Reply::new(id, Err(AccountError::MethodNotAllowed(format!("{method} {uri}"))))
}

fn path_param(param: RawPath) -> Result<String, AccountError> {
    param
        .map(|Path(param)| param)
        .map_err(|rejection| AccountError::InvalidPayload(rejection.body_text()))
}

/// Parses the request body as JSON whatever its declared content type.
fn json_body(body: RawBody) -> Result<Value, AccountError> {
    let body = body.map_err(|rejection| AccountError::InvalidPayload(rejection.body_text()))?;

    serde_json::from_slice(&body).map_err(|err| AccountError::InvalidPayload(err.to_string()))
}

/// Lists at most `number` accounts. A bound too large for the platform
/// still lists everything.
fn bounded_listing(
    id: u64,
    store: &AccountStore,
    number: &str,
) -> Result<Envelope, AccountError> {
    tracing::debug!("request {id}: list {number} accounts");

    let number = match number.trim().parse::<usize>() {
        Ok(number) => number,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => 0,
        Err(_) => {
            return Err(AccountError::InvalidPayload(format!(
                "number `{number}` is not a non-negative integer"
            )))
        }
    };

    Ok(listing(id, store.list(number)))
}

fn listing(id: u64, accounts: Vec<Account>) -> Envelope {
    Envelope::success(
        id,
        format!("{} accounts listed", accounts.len()),
        Some(json!(accounts)),
    )
}
