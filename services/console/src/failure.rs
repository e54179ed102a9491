//! Failures raised while serving console requests.
//!
//! # Purpose and responsibility
//! Defines the single failure type that handlers, cluster clients and the
//! auth engine return. Handlers never render their own error bodies: a
//! [`Failure`] converts into a placeholder response that carries the failure
//! in its extensions, and the boundary middleware renders it with the
//! request context it needs (URI, API prefix, route permissions).
//!
//! # Key invariants and assumptions
//! - A placeholder response is only ever observed when the boundary layer is
//!   missing from the router; it is a bare 500.
//! - `Failure` is `Send + Sync` so it can travel through response extensions.
//! - Panic traces carry the panic location and backtrace only once
//!   [`install_panic_hook`] has run; otherwise they hold just the payload.
use crate::boundary::extract::ExtractedMismatch;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::sync::{Arc, Once};
use thiserror::Error;

/// A failure raised anywhere in request processing.
#[derive(Debug, Error)]
pub enum Failure {
    /// A downstream cluster, registry or connect client rejected the request.
    #[error("{0}")]
    ClientRejected(String),
    /// Another writer changed the target configuration concurrently.
    #[error("{0}")]
    ConcurrentModification(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    InvalidRequest(String),
    /// The request names a cluster that is not configured.
    #[error("{0}")]
    InvalidCluster(String),
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("no route matches the request")]
    RouteNotFound,
    /// Runtime cast failure whose only detail is free text.
    #[error("{0}")]
    CastMismatch(String),
    /// Cast failure with structured detail supplied by the collaborator.
    #[error("{0}")]
    TypeMismatch(ExtractedMismatch),
    #[error("authorization failed (forbidden: {forbidden})")]
    Authorization { forbidden: bool },
    /// A handler panicked; `trace` holds the location and backtrace when known.
    #[error("{message}")]
    Panic { message: String, trace: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Failure {
    /// The caller is authenticated but lacks a permission.
    pub fn forbidden() -> Self {
        Failure::Authorization { forbidden: true }
    }

    /// The caller is not authenticated or its token expired.
    pub fn unauthenticated() -> Self {
        Failure::Authorization { forbidden: false }
    }
}

/// Response extension carrying a failure to the boundary middleware.
#[derive(Debug, Clone)]
pub struct RaisedFailure(pub Arc<Failure>);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(RaisedFailure(Arc::new(self)));
        response
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        Failure::InvalidArgument(rejection.body_text())
    }
}

thread_local! {
    static LAST_PANIC: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Record where panics happen so caught panics can report it.
///
/// # What it does
/// Installs, once per process, a panic hook that stores the panic location
/// and a captured backtrace for the panicking thread, then defers to the
/// previously installed hook.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|location| location.to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            let detail = format!("panicked at {location}\n{}", Backtrace::force_capture());
            let _ = LAST_PANIC.try_with(|slot| *slot.borrow_mut() = Some(detail));
            previous(info);
        }));
    });
}

/// Convert a caught handler panic into a raised failure.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`, which calls
/// it on the thread that panicked.
pub fn panic_failure(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else {
        "handler panicked".to_string()
    };
    let detail = LAST_PANIC
        .try_with(|slot| slot.borrow_mut().take())
        .ok()
        .flatten();
    let trace = match detail {
        Some(detail) => format!("{message}\n{detail}"),
        None => message.clone(),
    };
    Failure::Panic { message, trace }.into_response()
}
