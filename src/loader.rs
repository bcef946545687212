// src/loader.rs
//! Keyed asynchronous resource cache.
//!
//! Every `add` starts exactly one load for its id and keeps a shared handle to
//! it until the load fails. Successful values are copied into the `loaded`
//! cache, which [`Loader::get`] reads synchronously. A failed id is removed
//! from the registry entirely, so it can be added again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use futures::task::{LocalSpawn, LocalSpawnExt};
use futures::Future;
use log::{debug, warn};

use crate::error::LoadError;

/// Shared handle to one load. Cloning it is cheap; every clone resolves to
/// the same outcome.
pub type LoadHandle<T> = Shared<LocalBoxFuture<'static, Result<T, LoadError>>>;

/// Future produced by an item loader. `Err` carries a human readable reason.
pub type ItemFuture<T> = LocalBoxFuture<'static, Result<T, String>>;

type LoadItem<T> = Box<dyn Fn(&str, &str) -> ItemFuture<T>>;

struct Request<T: Clone> {
    seq: u64,
    handle: LoadHandle<T>,
}

struct Registry<T: Clone> {
    requests: HashMap<String, Request<T>>,
    loaded: HashMap<String, T>,
    next_seq: u64,
}

/// Keyed, deduplicated cache of asynchronously loaded items.
pub struct Loader<T: Clone + 'static> {
    registry: Rc<RefCell<Registry<T>>>,
    load_item: LoadItem<T>,
    error_item: T,
    spawner: Box<dyn LocalSpawn>,
}

impl<T: Clone + 'static> Loader<T> {
    /// Creates a loader.
    ///
    /// `load_item(id, data)` performs the actual load, `error_item` is what
    /// [`Loader::get`] hands out for ids that are not loaded, and `spawner`
    /// drives each load to completion whether or not anybody awaits it.
    pub fn new<F>(load_item: F, error_item: T, spawner: impl LocalSpawn + 'static) -> Self
    where
        F: Fn(&str, &str) -> ItemFuture<T> + 'static,
    {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                requests: HashMap::new(),
                loaded: HashMap::new(),
                next_seq: 0,
            })),
            load_item: Box::new(load_item),
            error_item,
            spawner: Box::new(spawner),
        }
    }

    /// Starts loading `id` from `data`.
    ///
    /// Fails with [`LoadError::DuplicateId`] if `id` is already pending or
    /// loaded; the existing load is left untouched.
    pub fn add(&self, id: &str, data: &str) -> Result<LoadHandle<T>, LoadError> {
        if self.contains(id) {
            return Err(LoadError::DuplicateId(id.to_owned()));
        }

        let item = (self.load_item)(id, data);
        let registry = Rc::clone(&self.registry);
        let key = id.to_owned();
        let handle = async move {
            match item.await {
                Ok(value) => {
                    debug!("Loader: `{}` loaded", key);
                    registry.borrow_mut().loaded.insert(key, value.clone());
                    Ok(value)
                }
                Err(reason) => {
                    warn!("Loader: `{}` failed: {}", key, reason);
                    registry.borrow_mut().requests.remove(&key);
                    Err(LoadError::Failed { id: key, reason })
                }
            }
        }
        .boxed_local()
        .shared();

        {
            let mut registry = self.registry.borrow_mut();
            let seq = registry.next_seq;
            registry.next_seq += 1;
            registry
                .requests
                .insert(id.to_owned(), Request { seq, handle: handle.clone() });
        }

        if let Err(err) = self.spawner.spawn_local(handle.clone().map(drop)) {
            self.registry.borrow_mut().requests.remove(id);
            return Err(LoadError::Spawn { id: id.to_owned(), reason: err.to_string() });
        }
        Ok(handle)
    }

    /// The pending or settled load for `id`.
    pub fn load(&self, id: &str) -> Result<LoadHandle<T>, LoadError> {
        self.registry
            .borrow()
            .requests
            .get(id)
            .map(|request| request.handle.clone())
            .ok_or_else(|| LoadError::NotFound(id.to_owned()))
    }

    /// Waits for every load tracked right now.
    ///
    /// Resolves to the values in `add` order. Fails with the first failure
    /// without waiting for the remaining loads.
    pub fn load_all(&self) -> impl Future<Output = Result<Vec<T>, LoadError>> + 'static {
        let mut requests: Vec<(u64, LoadHandle<T>)> = self
            .registry
            .borrow()
            .requests
            .values()
            .map(|request| (request.seq, request.handle.clone()))
            .collect();
        requests.sort_by_key(|(seq, _)| *seq);
        future::try_join_all(requests.into_iter().map(|(_, handle)| handle))
    }

    /// The loaded value for `id`, or the fallback item. Never blocks.
    pub fn get(&self, id: &str) -> T {
        self.registry
            .borrow()
            .loaded
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.error_item.clone())
    }

    /// Whether `id` is pending or loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.registry.borrow().requests.contains_key(id)
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.registry.borrow().loaded.contains_key(id)
    }

    /// Number of tracked (pending or loaded) ids.
    pub fn len(&self) -> usize {
        self.registry.borrow().requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn error_item(&self) -> &T {
        &self.error_item
    }
}

impl<T: Clone + 'static> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("Loader")
            .field("tracked", &registry.requests.len())
            .field("loaded", &registry.loaded.len())
            .finish()
    }
}
