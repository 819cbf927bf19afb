mod category_tests;
mod home_tests;
mod search_tests;

use astra::{Body, Request, Response};
use std::io::Read;
use std::sync::Arc;

use crate::router::handle;
use crate::state::{build_runtime, AppState};
use crate::tests::utils::MemoryStore;

/// App state over an in-memory store, with the production runtime setup.
pub fn app_with(store: MemoryStore) -> AppState {
    let runtime = Arc::new(build_runtime().expect("runtime"));
    AppState::new(Arc::new(store), runtime, 4, 8)
}

pub fn get(state: &AppState, uri: &str) -> Response {
    let req: Request = http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => crate::responses::html_error_response(err),
    }
}

pub fn body_string(resp: &mut Response) -> String {
    let mut body = String::new();
    resp.body_mut().reader().read_to_string(&mut body).unwrap();
    body
}
