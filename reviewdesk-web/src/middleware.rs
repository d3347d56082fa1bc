//! Request authentication middleware
//!
//! Runs once per request before routing. Builds a fresh [`RequestContext`],
//! lets the authenticator fill its identity slot from the `Authorization`
//! header, and stores the context in the request extensions. Never rejects.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use reviewdesk_access::RequestContext;
use tracing::trace;

pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    // A header that is not valid UTF-8 is treated like a missing one
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut context = RequestContext::new();
    state
        .authenticator
        .authenticate_into(&mut context, authorization.as_deref())
        .await;

    trace!(
        anonymous = context.is_anonymous(),
        user_id = context.user_id(),
        "{}",
        context.summary()
    );
    request.extensions_mut().insert(context);

    next.run(request).await
}

