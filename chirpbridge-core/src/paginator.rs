// ABOUTME: Drives a SearchClient across all continuation pages of one query.
// ABOUTME: Pages arrive in API delivery order (newest first) until the chain ends.

use anyhow::Result;

use crate::traits::{SearchClient, SearchPage, SearchQuery};

/// One pass over a query's continuation chain.
///
/// Each `next_page` call performs exactly one fetch. The chain ends when a
/// response carries no continuation token; a fetch error ends it too, after
/// surfacing the error to the caller. A finished paginator stays finished —
/// callers wanting a fresh pass construct a new one.
pub struct Paginator<'a, C: ?Sized> {
    client: &'a C,
    query: SearchQuery,
    state: State,
}

enum State {
    /// Next fetch to perform: `None` for the initial query, `Some` for a
    /// continuation token merged into the same base query.
    Pending(Option<String>),
    Done,
}

impl<'a, C: SearchClient + ?Sized> Paginator<'a, C> {
    pub fn new(client: &'a C, query: SearchQuery) -> Self {
        Self {
            client,
            query,
            state: State::Pending(None),
        }
    }

    /// Fetch the next page, or `None` once the chain is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<SearchPage>> {
        let token = match &self.state {
            State::Pending(token) => token.clone(),
            State::Done => return Ok(None),
        };

        let page = match self.client.search(&self.query, token.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                self.state = State::Done;
                return Err(e);
            }
        };

        self.state = match &page.next_token {
            Some(token) => State::Pending(Some(token.clone())),
            None => State::Done,
        };

        Ok(Some(page))
    }
}
