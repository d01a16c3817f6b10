use crate::data::*;
use crate::dom::{Document, Event, ListenerId, NodeId, Selector};
use crate::listeners::ListenerRegistry;
use crate::refresh::{refresh_posts, RefreshOutcome, Ticket};
use crate::render::{create_select_options, POST_ID};
use crate::toggle::toggle_comments;

pub const SELECT_MENU: &str = "selectMenu";

/// The selector's placeholder option, which stands for the default author.
pub const PLACEHOLDER_OPTION: &str = "Employees";

/// The change listener that runs [`select_menu_change`].
pub const SELECTION_HANDLER: ListenerId = ListenerId(0);

/// The document together with the handles the pipeline works through.
pub struct Page {
    pub doc: Document,
    pub main: NodeId,
    pub select_menu: NodeId,
    pub listeners: ListenerRegistry,

    /// Shown when the selector has no usable value.
    pub default_user: UserId,
}

impl Page {
    /// Builds the page skeleton: a header holding the author selector, and
    /// an empty main region.
    pub fn new(default_user: UserId) -> Self {
        let mut doc = Document::new();
        let body = doc.body();

        let header = doc.create_element("header");
        let select_menu = doc.create_element("select");
        doc.set_attribute(select_menu, "id", SELECT_MENU);
        doc.set_attribute(select_menu, "name", SELECT_MENU);
        let placeholder = doc.create_element("option");
        doc.set_text(placeholder, PLACEHOLDER_OPTION);
        doc.append_child(select_menu, placeholder);
        doc.append_child(header, select_menu);
        doc.append_child(body, header);

        let main = doc.create_element("main");
        doc.append_child(body, main);

        Self {
            doc,
            main,
            select_menu,
            listeners: ListenerRegistry::default(),
            default_user,
        }
    }

    /// The toggle button rendered for `post`, if any.
    pub fn button_for(&self, post: PostId) -> Option<NodeId> {
        let id = post.to_string();
        self.doc
            .query_selector(self.main, &Selector::tag("button").with_data(POST_ID, &id))
    }

    /// Dispatches a click on `node`, calling each of its click listeners.
    ///
    /// Returns how many listeners toggled a comments panel.
    pub fn click(&mut self, node: NodeId) -> usize {
        let mut toggled = 0;
        for listener in self.doc.listeners(node, Event::Click) {
            let Some(post) = self.listeners.post(listener) else {
                tracing::warn!("click listener {listener:?} is not registered");
                continue;
            };
            if toggle_comments(&mut self.doc, Some(post)).is_some() {
                toggled += 1;
            }
        }
        toggled
    }

    /// Adds one option per user to the author selector.
    pub fn populate_select_menu(&mut self, users: Option<&[User]>) -> Option<NodeId> {
        let options = create_select_options(&mut self.doc, users)?;
        for option in options {
            self.doc.append_child(self.select_menu, option);
        }
        Some(self.select_menu)
    }
}

/// Loads the authors into the selector and wires its change event to the
/// selection handler. The handler is wired even if no authors loaded.
pub async fn init_page<A: Api>(page: &mut Page, api: &A) -> Option<Vec<User>> {
    let users = api.users().await;
    if page.populate_select_menu(users.as_deref()).is_none() {
        tracing::warn!("author selector left empty");
    }
    page.doc
        .add_event_listener(page.select_menu, Event::Change, SELECTION_HANDLER);
    users
}

/// A change of the author selector.
pub struct ChangeEvent {
    pub target: NodeId,
}

/// What one selection cycle did.
#[derive(Debug)]
pub struct Selection {
    pub user: UserId,
    pub posts: Option<Vec<Post>>,
    pub refresh: Option<RefreshOutcome>,
}

/// Shows the posts of the author picked in the selector.
///
/// The selector is disabled for the whole fetch and refresh, and enabled
/// again afterwards even if the posts could not be fetched.
pub async fn select_menu_change<A: Api>(
    page: &mut Page,
    api: &A,
    event: Option<ChangeEvent>,
    ticket: &Ticket,
) -> Option<Selection> {
    let target = event?.target;

    let user = page
        .doc
        .attribute(target, "value")
        .filter(|&value| value != PLACEHOLDER_OPTION)
        .and_then(|value| value.parse().ok())
        .unwrap_or(page.default_user);

    page.doc.set_disabled(target, true);
    let posts = api.user_posts(user).await;
    let refresh = refresh_posts(page, api, posts.as_deref(), ticket).await;
    page.doc.set_disabled(target, false);

    tracing::info!("selected author {user}");
    Some(Selection {
        user,
        posts,
        refresh,
    })
}
