//! Request/reply bridge between option search and the host process
//!
//! Every remote load is an explicit `PendingQuery` keyed by correlation id:
//! inserted on `issue`, removed on reply or abandon. A reply whose id is no
//! longer pending is dropped without side effects, which covers replies that
//! race a widget teardown.
use crate::config::RemoteRoute;
use crate::errors::ComboBoxError;
use crate::types::{CorrelationId, LoadedOption};
use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Callback of the enhancement library waiting for search results.
pub type LoadCallback = Box<dyn FnOnce(Vec<LoadedOption>)>;

/// Outbound event. `payload` is the raw query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRequest {
    pub event_name: String,
    pub payload: String,
    pub target: Option<String>,
    pub correlation_id: CorrelationId,
}

/// Reply shape: `{ "results": [{ "text": ..., "value": ... }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostReply {
    pub results: Vec<LoadedOption>,
}

/// Fire-and-forget channel to the host process.
pub trait HostChannel {
    fn push_event(&mut self, request: HostRequest);
}

pub struct PendingQuery {
    pub correlation_id: CorrelationId,
    pub query_text: String,
    resolve: LoadCallback,
}

impl fmt::Debug for PendingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingQuery")
            .field("correlation_id", &self.correlation_id)
            .field("query_text", &self.query_text)
            .finish_non_exhaustive()
    }
}

pub struct RemoteBridge<H: HostChannel> {
    host: H,
    route: Option<RemoteRoute>,
    pending: IndexMap<CorrelationId, PendingQuery>,
}

impl<H: HostChannel> RemoteBridge<H> {
    pub fn new(host: H, route: Option<RemoteRoute>) -> Self {
        RemoteBridge {
            host,
            route,
            pending: IndexMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn route(&self) -> Option<&RemoteRoute> {
        self.route.as_ref()
    }

    /// Routing for queries issued from now on; in-flight ones are unaffected.
    pub fn retarget(&mut self, route: Option<RemoteRoute>) {
        self.route = route;
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, correlation_id: CorrelationId) -> bool {
        self.pending.contains_key(&correlation_id)
    }

    /// Records the query and pushes it to the host without waiting. Earlier
    /// queries stay in flight; debouncing belongs to the caller.
    pub fn issue(
        &mut self,
        query_text: &str,
        resolve: LoadCallback,
    ) -> Result<CorrelationId, ComboBoxError> {
        let route = self.route.as_ref().ok_or(ComboBoxError::RemoteNotConfigured)?;

        let mut correlation_id = CorrelationId::new();
        while self.pending.contains_key(&correlation_id) {
            correlation_id = CorrelationId::new();
        }

        let request = HostRequest {
            event_name: route.event_name.clone(),
            payload: query_text.to_string(),
            target: route.target.clone(),
            correlation_id,
        };
        self.pending.insert(
            correlation_id,
            PendingQuery {
                correlation_id,
                query_text: query_text.to_string(),
                resolve,
            },
        );

        debug!(
            "combo box: issued '{}' for query {:?} ({})",
            request.event_name, query_text, correlation_id
        );
        self.host.push_event(request);
        Ok(correlation_id)
    }

    /// Resolves the matching query. Unknown ids are dropped silently.
    pub fn on_reply(&mut self, correlation_id: CorrelationId, reply: HostReply) -> bool {
        let Some(query) = self.pending.shift_remove(&correlation_id) else {
            trace!("combo box: dropping reply for non-pending {}", correlation_id);
            return false;
        };

        debug!(
            "combo box: {} result(s) for query {:?} ({})",
            reply.results.len(),
            query.query_text,
            correlation_id
        );
        (query.resolve)(reply.results);
        true
    }

    /// Like `on_reply` for a raw JSON body. The body is only decoded when the
    /// id is pending; a decode failure keeps the query pending.
    pub fn on_reply_json(
        &mut self,
        correlation_id: CorrelationId,
        raw: &str,
    ) -> Result<bool, ComboBoxError> {
        if !self.is_pending(correlation_id) {
            trace!("combo box: dropping raw reply for non-pending {}", correlation_id);
            return Ok(false);
        }
        let reply: HostReply = serde_json::from_str(raw)?;
        Ok(self.on_reply(correlation_id, reply))
    }

    /// Forgets every pending query without running its callback.
    pub fn abandon_all(&mut self) -> usize {
        let abandoned = self.pending.len();
        for (correlation_id, query) in self.pending.drain(..) {
            debug!(
                "combo box: abandoning query {:?} ({})",
                query.query_text, correlation_id
            );
        }
        abandoned
    }
}
