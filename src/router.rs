use std::collections::HashMap;

use crate::domain::filter::FilterInputError;
use crate::domain::ListingType;
use crate::errors::ServerError;
use crate::responses::{html_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages;
use crate::views::{CategoryView, HomeView, SearchView};
use astra::Request;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => home(state),
        ("GET", "/search") => search(state, &parse_query(&req)),
        ("GET", "/offers") => category(
            state,
            CategoryView::offers(state.fetcher.clone(), state.category_page_limit),
        ),
        ("GET", "/category/rent") => category(
            state,
            CategoryView::of_type(state.fetcher.clone(), ListingType::Rent, state.category_page_limit),
        ),
        ("GET", "/category/sale") => category(
            state,
            CategoryView::of_type(state.fetcher.clone(), ListingType::Sale, state.category_page_limit),
        ),
        _ => Err(ServerError::NotFound),
    }
}

fn home(state: &AppState) -> ResultResp {
    let view = HomeView::new(state.fetcher.clone(), state.home_section_limit);
    state.block_on(view.load());
    let slots = view.slots();
    view.teardown();

    html_response(pages::home_page(&slots))
}

const SEARCH_PARAMS: [&str; 3] = ["location", "type", "price"];

fn search(state: &AppState, params: &HashMap<String, String>) -> ResultResp {
    let param = |key| query_param(params, key);
    let submitted = SEARCH_PARAMS.iter().any(|k| params.contains_key(*k));

    // An unknown type is rejected before anything is fetched.
    let property_type = match param("type").trim() {
        "" => None,
        raw => Some(
            ListingType::parse(raw)
                .ok_or_else(|| bad_request(FilterInputError::UnknownType(raw.to_string())))?,
        ),
    };

    let view = SearchView::new(state.fetcher.clone());
    state.block_on(view.load());

    let submission = if submitted {
        view.select_property_type(property_type);
        view.set_location(param("location"));
        view.set_price_range(param("price"));
        view.submit()
    } else {
        Ok(())
    };
    let snapshot = view.state();
    view.teardown();
    submission.map_err(bad_request)?;

    html_response(pages::search_page(&snapshot))
}

fn query_param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map_or("", String::as_str)
}

fn bad_request(err: FilterInputError) -> ServerError {
    ServerError::BadRequest(err.to_string())
}

fn category(state: &AppState, view: CategoryView) -> ResultResp {
    state.block_on(view.load());
    let slot = view.slot();
    view.teardown();

    html_response(pages::category_page(view.title(), &slot))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
