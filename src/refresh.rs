use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::data::{Api, Post};
use crate::dom::NodeId;
use crate::listeners::{add_button_listeners, remove_button_listeners};
use crate::page::Page;
use crate::render::display_posts;

/// Counts refresh cycles so a cycle can tell whether a newer one has started.
#[derive(Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    /// Starts a new cycle, making every earlier ticket stale.
    pub fn begin(&self) -> Ticket {
        let value = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            counter: Arc::clone(&self.0),
            value,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// The cycle a refresh belongs to.
pub struct Ticket {
    counter: Arc<AtomicU64>,
    value: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.value
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered {
        /// Buttons whose listeners were detached before clearing.
        detached: Vec<NodeId>,

        /// The nodes now in main, or `None` if the posts failed to assemble.
        rendered: Option<Vec<NodeId>>,

        /// Buttons that received a listener.
        attached: Vec<NodeId>,
    },

    /// A newer cycle started while this one was rendering. Its output was
    /// replaced by the placeholder and no listeners were attached.
    Stale,
}

/// Replaces main's content with `posts`.
///
/// Detaches every button listener, clears main, renders, then attaches
/// listeners to the new buttons, in that order. Absent `posts` is a no-op.
pub async fn refresh_posts<A: Api>(
    page: &mut Page,
    api: &A,
    posts: Option<&[Post]>,
    ticket: &Ticket,
) -> Option<RefreshOutcome> {
    let posts = posts?;
    let main = page.main;

    let detached = remove_button_listeners(&mut page.doc, &mut page.listeners, main);
    page.doc.delete_child_elements(main);
    let rendered = display_posts(&mut page.doc, api, main, Some(posts)).await;

    if !ticket.is_current() {
        tracing::info!("discarding stale refresh {}", ticket.value());
        for node in rendered.into_iter().flatten() {
            page.doc.remove(node);
        }
        // Main was already cleared, so leave the placeholder rather than nothing.
        display_posts(&mut page.doc, api, main, None).await;
        return Some(RefreshOutcome::Stale);
    }

    let attached = add_button_listeners(&mut page.doc, &mut page.listeners, main);
    tracing::info!("refreshed {} posts", posts.len());

    Some(RefreshOutcome::Rendered {
        detached,
        rendered,
        attached,
    })
}
