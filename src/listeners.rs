use std::collections::HashMap;

use crate::data::PostId;
use crate::dom::{Document, Event, ListenerId, NodeId, Selector};
use crate::render::post_id_of;

/// The click listeners installed on toggle buttons, keyed by post.
///
/// Attach and detach both go through here, so detach always removes the
/// exact [`ListenerId`] attach installed.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    by_post: HashMap<PostId, ListenerId>,
    posts: HashMap<ListenerId, PostId>,
}

impl ListenerRegistry {
    /// The listener for `post`, registering one if there is none yet.
    pub fn register(&mut self, post: PostId) -> ListenerId {
        if let Some(&listener) = self.by_post.get(&post) {
            return listener;
        }
        // Id 0 is reserved for the author selector's change listener.
        self.next_id += 1;
        let listener = ListenerId(self.next_id);
        self.by_post.insert(post, listener);
        self.posts.insert(listener, post);
        listener
    }

    #[cfg(test)]
    pub fn get(&self, post: PostId) -> Option<ListenerId> {
        self.by_post.get(&post).copied()
    }

    /// Forgets the listener for `post`, returning it.
    pub fn release(&mut self, post: PostId) -> Option<ListenerId> {
        let listener = self.by_post.remove(&post)?;
        self.posts.remove(&listener);
        Some(listener)
    }

    /// The post a fired listener toggles.
    pub fn post(&self, listener: ListenerId) -> Option<PostId> {
        self.posts.get(&listener).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_post.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_post.is_empty()
    }
}

fn tagged_buttons(doc: &Document, main: NodeId) -> Vec<(NodeId, PostId)> {
    doc.query_selector_all(main, &Selector::tag("button"))
        .into_iter()
        .filter_map(|button| Some((button, post_id_of(doc, button)?)))
        .collect()
}

/// Installs a click listener on every toggle button under `main`.
///
/// Returns every button scanned.
pub fn add_button_listeners(
    doc: &mut Document,
    registry: &mut ListenerRegistry,
    main: NodeId,
) -> Vec<NodeId> {
    let buttons = tagged_buttons(doc, main);
    for &(button, post) in &buttons {
        let listener = registry.register(post);
        doc.add_event_listener(button, Event::Click, listener);
    }
    tracing::debug!("attached {} button listeners", buttons.len());
    buttons.into_iter().map(|(button, _)| button).collect()
}

/// Removes the registered click listener from every toggle button under
/// `main` and releases it.
///
/// Returns every button scanned.
pub fn remove_button_listeners(
    doc: &mut Document,
    registry: &mut ListenerRegistry,
    main: NodeId,
) -> Vec<NodeId> {
    let buttons = tagged_buttons(doc, main);
    for &(button, post) in &buttons {
        if let Some(listener) = registry.release(post) {
            doc.remove_event_listener(button, Event::Click, listener);
        }
    }
    tracing::debug!("detached {} button listeners", buttons.len());
    buttons.into_iter().map(|(button, _)| button).collect()
}
