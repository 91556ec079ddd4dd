//! Definition cache
//!
//! Maps cache signatures to computed definitions. The cache is an explicit
//! object owned by the host application and passed into definition
//! resolution; it grows with the number of distinct signatures in the content
//! model and is never evicted implicitly.
//!
//! The read-check-compute-write sequence runs under one reentrant lock, so a
//! signature is computed at most once even when several threads ask for it
//! at the same time, while a stream computing its definition can still
//! resolve its children on the same thread.

use crate::definition::Definition;
use crate::error::BlockResult;
use crate::signature::CacheSignature;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
	/// Number of cache hits
	pub hits: u64,
	/// Number of cache misses (computations)
	pub misses: u64,
	/// Total number of lookups
	pub total_requests: u64,
	/// Current number of entries in cache
	pub entry_count: u64,
}

impl CacheStatistics {
	/// Calculate hit rate (0.0 to 1.0)
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::cache::CacheStatistics;
	///
	/// let stats = CacheStatistics { hits: 3, misses: 1, total_requests: 4, entry_count: 1 };
	/// assert_eq!(stats.hit_rate(), 0.75);
	/// ```
	pub fn hit_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.hits as f64 / self.total_requests as f64
		}
	}
}

type Store = HashMap<CacheSignature, Arc<Definition>>;

/// Signature-keyed store of computed definitions
pub struct DefinitionCache {
	store: ReentrantMutex<RefCell<Store>>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl DefinitionCache {
	/// Create an empty cache
	pub fn new() -> Self {
		Self {
			store: ReentrantMutex::new(RefCell::new(HashMap::new())),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
		}
	}

	/// Return the definition stored for `signature`, computing it on first use
	///
	/// A failed computation stores nothing. If `compute` itself stores an
	/// equal signature (a descendant colliding with an ancestor still being
	/// computed), the outer result replaces it.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	/// use std::sync::Arc;
	///
	/// let cache = DefinitionCache::new();
	/// let block = Block::leaf("heading");
	/// let signature = CacheSignature::for_block(&block, None);
	///
	/// let first = cache
	///     .get_or_compute(signature.clone(), || Ok(Definition::new("heading", "Heading")))
	///     .unwrap();
	/// let second = cache
	///     .get_or_compute(signature, || unreachable!("already cached"))
	///     .unwrap();
	///
	/// assert!(Arc::ptr_eq(&first, &second));
	/// ```
	pub fn get_or_compute<F>(
		&self,
		signature: CacheSignature,
		compute: F,
	) -> BlockResult<Arc<Definition>>
	where
		F: FnOnce() -> BlockResult<Definition>,
	{
		let guard = self.store.lock();

		let cached = guard.borrow().get(&signature).cloned();
		if let Some(definition) = cached {
			self.hits.fetch_add(1, Ordering::Relaxed);
			tracing::trace!("Definition cache hit for block '{}'", signature.name());
			return Ok(definition);
		}

		self.misses.fetch_add(1, Ordering::Relaxed);
		let definition = Arc::new(compute()?);
		guard
			.borrow_mut()
			.insert(signature, Arc::clone(&definition));
		Ok(definition)
	}

	/// Look up a definition without computing it
	pub fn get(&self, signature: &CacheSignature) -> Option<Arc<Definition>> {
		let guard = self.store.lock();
		let definition = guard.borrow().get(signature).cloned();
		definition
	}

	/// Whether a definition is stored for `signature`
	pub fn contains(&self, signature: &CacheSignature) -> bool {
		let guard = self.store.lock();
		let found = guard.borrow().contains_key(signature);
		found
	}

	/// Number of stored definitions
	pub fn len(&self) -> usize {
		let guard = self.store.lock();
		let len = guard.borrow().len();
		len
	}

	/// Whether the cache is empty
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drop every stored definition
	///
	/// For hosts that rebuild their content model at runtime.
	pub fn clear(&self) {
		let guard = self.store.lock();
		guard.borrow_mut().clear();
	}

	/// Get cache statistics
	pub fn statistics(&self) -> CacheStatistics {
		let hits = self.hits.load(Ordering::Relaxed);
		let misses = self.misses.load(Ordering::Relaxed);
		CacheStatistics {
			hits,
			misses,
			total_requests: hits + misses,
			entry_count: self.len() as u64,
		}
	}
}

impl Default for DefinitionCache {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for DefinitionCache {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DefinitionCache")
			.field("statistics", &self.statistics())
			.finish()
	}
}
