use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Used by clients that were not given an explicit timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any stored record must implement to be managed by [`ResourceActor`].
///
/// Every hook runs inside the owning actor, one request at a time, so a hook
/// observes and mutates the record without interference from other callers.
/// `on_update` and `handle_action` operate on a scratch copy that is only
/// committed when they return `Ok`.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type UpdateParams: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Key taken from the creation params instead of the actor's [`IdMint`].
    fn natural_id(_params: &Self::CreateParams) -> Option<Self::Id> {
        None
    }

    /// Construct the full record from its id and creation params.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Source of fresh ids for records without a natural key.
///
/// `is_taken` probes the actor's own index, so a minted id is unique at the
/// moment it is inserted. Returns the number of attempts made on failure.
pub trait IdMint<Id>: Send + 'static {
    fn mint(&mut self, is_taken: &dyn Fn(&Id) -> bool) -> Result<Id, u32>;
}

/// `<prefix>_<n>` ids from a monotonically increasing counter.
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdMint<String> for SequentialIds {
    fn mint(&mut self, is_taken: &dyn Fn(&String) -> bool) -> Result<String, u32> {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        if is_taken(&id) {
            Err(1)
        } else {
            Ok(id)
        }
    }
}

/// For stores keyed only by [`Entity::natural_id`].
pub struct NaturalKeys;

impl<Id: 'static> IdMint<Id> for NaturalKeys {
    fn mint(&mut self, _is_taken: &dyn Fn(&Id) -> bool) -> Result<Id, u32> {
        Err(0)
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the request")]
    ActorDropped,
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("No free identifier after {attempts} attempts")]
    IdExhausted { attempts: u32 },
    #[error("{0}")]
    Entity(E),
}

impl<E> FrameworkError<E> {
    /// True when the store could not be reached; the request may be retried.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped | FrameworkError::Timeout(_)
        )
    }
}

pub type Response<R, E> = oneshot::Sender<Result<R, FrameworkError<E>>>;

/// Predicate evaluated inside the actor for [`ResourceRequest::Query`].
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Records matched by a query, tagged with the store revision they were read at.
///
/// The revision counts every committed write to the store, so a later
/// snapshot always carries a strictly greater or equal revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub revision: u64,
    pub items: Vec<T>,
}

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        params: T::UpdateParams,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Snapshot<T>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one store. Records are kept in insertion order with a hash index on id.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    entries: Vec<T>,
    index: HashMap<T::Id, usize>,
    id_mint: Box<dyn IdMint<T::Id>>,
    revision: u64,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, id_mint: impl IdMint<T::Id>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: Vec::new(),
            index: HashMap::new(),
            id_mint: Box::new(id_mint),
            revision: 0,
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        debug!(entity = std::any::type_name::<T>(), "Resource actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.index.get(&id).map(|&pos| self.entries[pos].clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, params, respond_to } => {
                    let result = self.commit(&id, |item| {
                        item.on_update(params)?;
                        Ok(item.clone())
                    });
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(&id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = self.commit(&id, |item| item.handle_action(action));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.entries.iter().filter(|&item| filter(item)).cloned().collect();
                    let _ = respond_to.send(Ok(Snapshot {
                        revision: self.revision,
                        items,
                    }));
                }
            }
        }
        debug!(entity = std::any::type_name::<T>(), "Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let id = match T::natural_id(&params) {
            Some(id) => {
                if self.index.contains_key(&id) {
                    return Err(FrameworkError::AlreadyExists(id.to_string()));
                }
                id
            }
            None => {
                let index = &self.index;
                self.id_mint
                    .mint(&|candidate| index.contains_key(candidate))
                    .map_err(|attempts| FrameworkError::<T::Error>::IdExhausted { attempts })?
            }
        };

        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.index.insert(id, self.entries.len());
        self.entries.push(item.clone());
        self.revision += 1;
        Ok(item)
    }

    fn handle_delete(&mut self, id: &T::Id) -> Result<(), FrameworkError<T::Error>> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        self.entries[pos].on_delete().map_err(FrameworkError::Entity)?;
        self.entries.remove(pos);
        self.index.remove(id);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        self.revision += 1;
        Ok(())
    }

    /// Runs `f` against a copy of the record and stores the copy only on success.
    fn commit<R>(
        &mut self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> Result<R, T::Error>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut scratch = self.entries[pos].clone();
        let result = f(&mut scratch).map_err(FrameworkError::Entity)?;
        self.entries[pos] = scratch;
        self.revision += 1;
        Ok(result)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Handle to a [`ResourceActor`].
///
/// Every request is bounded by `timeout` while it waits for mailbox space.
/// Reads (`get`, `query`) are also bounded while waiting for the reply. Writes
/// wait for their reply unconditionally: once enqueued they will be applied,
/// and giving up early would hide whether they were.
///
/// The unbounded write wait relies on every [`Entity`] hook being synchronous
/// and non-blocking. A hook that awaits or blocks would make writes hang.
#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    timeout: Duration,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange<R>(
        &self,
        request: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, FrameworkError<T::Error>>>,
        bound_reply: bool,
    ) -> Result<R, FrameworkError<T::Error>> {
        if let Err(e) = self.sender.send_timeout(request, self.timeout).await {
            return Err(match e {
                SendTimeoutError::Timeout(_) => FrameworkError::Timeout(self.timeout),
                SendTimeoutError::Closed(_) => FrameworkError::ActorClosed,
            });
        }

        if bound_reply {
            match tokio::time::timeout(self.timeout, response).await {
                Ok(reply) => reply.unwrap_or(Err(FrameworkError::ActorDropped)),
                Err(_) => Err(FrameworkError::Timeout(self.timeout)),
            }
        } else {
            response.await.unwrap_or(Err(FrameworkError::ActorDropped))
        }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.exchange(ResourceRequest::Create { params, respond_to }, response, false)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.exchange(ResourceRequest::Get { id, respond_to }, response, true)
            .await
    }

    pub async fn update(
        &self,
        id: T::Id,
        params: T::UpdateParams,
    ) -> Result<T, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.exchange(ResourceRequest::Update { id, params, respond_to }, response, false)
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.exchange(ResourceRequest::Delete { id, respond_to }, response, false)
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.exchange(ResourceRequest::Action { id, action, respond_to }, response, false)
            .await
    }

    /// All records matching `filter`, in insertion order.
    pub async fn query(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError<T::Error>> {
        Ok(self.snapshot(filter).await?.items)
    }

    /// Like [`Self::query`], also reporting the store revision of the read.
    pub async fn snapshot(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Snapshot<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        let filter: Filter<T> = Box::new(filter);
        self.exchange(ResourceRequest::Query { filter, respond_to }, response, true)
            .await
    }
}

// =============================================================================
// 5. FRAMEWORK TESTS
// =============================================================================
