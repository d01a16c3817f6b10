use axum::extract::{Path as ReqPath, State};
use axum::http::StatusCode;

use maud::Markup;

use crate::data::PostId;
use crate::dom::Event;
use crate::html;
use crate::page::{self, ChangeEvent, SELECTION_HANDLER};
use crate::AppState;

pub async fn home(State(state): State<AppState>) -> Markup {
    let page = state.page.lock().await;
    html::page(&page)
}

pub async fn main_region(State(state): State<AppState>) -> Markup {
    let page = state.page.lock().await;
    html::main_region(&page)
}

pub async fn select_default(State(state): State<AppState>) -> Markup {
    select_author(state, None).await
}

pub async fn select(State(state): State<AppState>, ReqPath(value): ReqPath<String>) -> Markup {
    select_author(state, Some(value)).await
}

async fn select_author(state: AppState, value: Option<String>) -> Markup {
    // Taken before waiting on the page so a cycle already holding it goes stale.
    let ticket = state.generation.begin();
    let mut page = state.page.lock().await;

    let target = page.select_menu;
    page.doc.set_attribute(target, "value", value.unwrap_or_default());
    if page
        .doc
        .listeners(target, Event::Change)
        .contains(&SELECTION_HANDLER)
    {
        page::select_menu_change(&mut page, &*state.api, Some(ChangeEvent { target }), &ticket)
            .await;
    } else {
        tracing::warn!("author selector changed before it was wired");
    }

    html::main_region(&page)
}

pub async fn click(
    State(state): State<AppState>,
    ReqPath(post): ReqPath<PostId>,
) -> Result<Markup, StatusCode> {
    let mut page = state.page.lock().await;

    let Some(button) = page.button_for(post) else {
        return Err(StatusCode::NOT_FOUND);
    };
    if page.click(button) == 0 {
        tracing::warn!("click on post {post} toggled nothing");
    }

    Ok(html::main_region(&page))
}
