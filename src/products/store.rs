//! # Entity Store
//!
//! The product table and its two backends:
//! - [`MemoryStore`]: lives and dies with the process
//! - [`FileStore`]: mirrors every mutation to a JSON snapshot on disk
//!
//! Ids are assigned from a monotonic counter and never reused.
//!
//! Every call is synchronous and [`FileStore`] mutations do file I/O while
//! holding the table's write lock. Async callers run store calls on the
//! blocking pool.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::model::{NewProduct, Product, ProductChanges};

/// Repository over the product table
///
/// Every method is atomic with respect to the others.
pub trait ProductStore: Send + Sync {
    /// All products, ascending by id
    fn list(&self) -> StoreResult<Vec<Product>>;

    /// Look up a product by id
    fn get(&self, id: u64) -> StoreResult<Option<Product>>;

    /// Store a new product under a fresh id
    fn insert(&self, product: NewProduct) -> StoreResult<Product>;

    /// Store a batch of new products as one mutation, ids in input order
    fn insert_many(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>>;

    /// Overwrite every field of an existing product. `None` if absent.
    fn replace(&self, id: u64, product: NewProduct) -> StoreResult<Option<Product>>;

    /// Overwrite the submitted fields of an existing product. `None` if absent.
    fn update(&self, id: u64, changes: ProductChanges) -> StoreResult<Option<Product>>;

    /// Remove a product. `false` if absent.
    fn delete(&self, id: u64) -> StoreResult<bool>;

    /// Number of stored products
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// The table shared by both backends
#[derive(Debug, Clone)]
struct Table {
    next_id: u64,
    rows: BTreeMap<u64, Product>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl Table {
    fn list(&self) -> Vec<Product> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: u64) -> Option<Product> {
        self.rows.get(&id).cloned()
    }

    fn insert(&mut self, product: NewProduct) -> Product {
        let id = self.next_id;
        self.next_id += 1;
        let product = product.into_product(id);
        self.rows.insert(id, product.clone());
        product
    }

    fn insert_many(&mut self, products: Vec<NewProduct>) -> Vec<Product> {
        products.into_iter().map(|p| self.insert(p)).collect()
    }

    fn replace(&mut self, id: u64, product: NewProduct) -> Option<Product> {
        let row = self.rows.get_mut(&id)?;
        *row = product.into_product(id);
        Some(row.clone())
    }

    fn update(&mut self, id: u64, changes: ProductChanges) -> Option<Product> {
        let row = self.rows.get_mut(&id)?;
        changes.apply(row);
        Some(row.clone())
    }

    fn delete(&mut self, id: u64) -> Option<Product> {
        self.rows.remove(&id)
    }
}

/// On-disk layout of a [`FileStore`]
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    products: Vec<Product>,
}

impl From<&Table> for Snapshot {
    fn from(table: &Table) -> Self {
        Self {
            next_id: table.next_id,
            products: table.list(),
        }
    }
}

impl From<Snapshot> for Table {
    fn from(snapshot: Snapshot) -> Self {
        let rows: BTreeMap<u64, Product> = snapshot
            .products
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        // A hand-edited file may carry a stale counter
        let after_last = rows.keys().next_back().map_or(1, |id| id + 1);
        Self {
            next_id: snapshot.next_id.max(after_last),
            rows,
        }
    }
}

// ==================
// Memory backend
// ==================

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Table>> {
        self.table.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Table>> {
        self.table.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl ProductStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.list())
    }

    fn get(&self, id: u64) -> StoreResult<Option<Product>> {
        Ok(self.read()?.get(id))
    }

    fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        Ok(self.write()?.insert(product))
    }

    fn insert_many(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>> {
        Ok(self.write()?.insert_many(products))
    }

    fn replace(&self, id: u64, product: NewProduct) -> StoreResult<Option<Product>> {
        Ok(self.write()?.replace(id, product))
    }

    fn update(&self, id: u64, changes: ProductChanges) -> StoreResult<Option<Product>> {
        Ok(self.write()?.update(id, changes))
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        Ok(self.write()?.delete(id).is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.rows.len())
    }
}

// ==================
// File backend
// ==================

/// Store backed by a JSON snapshot file
///
/// The whole table is rewritten after each mutation: the snapshot goes to a
/// sibling temp file which is then renamed over the data file. If the write
/// fails the in-memory table is rolled back, so memory never runs ahead of
/// disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    table: RwLock<Table>,
    writes: AtomicU64,
}

impl FileStore {
    /// Open a data file. A missing file starts an empty table.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let table = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            let snapshot: Snapshot =
                serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                    path: path.clone(),
                    source,
                })?;
            Table::from(snapshot)
        } else {
            Table::default()
        };

        tracing::debug!(path = %path.display(), rows = table.rows.len(), "opened data file");

        Ok(Self {
            path,
            table: RwLock::new(table),
            writes: AtomicU64::new(0),
        })
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshots written since open
    pub fn snapshot_writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Table>> {
        self.table.read().map_err(|_| StoreError::LockPoisoned)
    }

    /// Run a mutation and persist it. When `changed` reports nothing was
    /// touched the file is left alone.
    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Table) -> R,
        changed: impl FnOnce(&R) -> bool,
    ) -> StoreResult<R> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = table.clone();

        let result = f(&mut table);
        if !changed(&result) {
            return Ok(result);
        }

        if let Err(e) = self.persist(&table) {
            *table = before;
            return Err(e);
        }
        Ok(result)
    }

    fn persist(&self, table: &Table) -> StoreResult<()> {
        let encoded =
            serde_json::to_vec_pretty(&Snapshot::from(table)).map_err(StoreError::Encode)?;

        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, encoded).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl ProductStore for FileStore {
    fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.list())
    }

    fn get(&self, id: u64) -> StoreResult<Option<Product>> {
        Ok(self.read()?.get(id))
    }

    fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        self.mutate(|table| table.insert(product), |_| true)
    }

    fn insert_many(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>> {
        self.mutate(|table| table.insert_many(products), |rows| !rows.is_empty())
    }

    fn replace(&self, id: u64, product: NewProduct) -> StoreResult<Option<Product>> {
        self.mutate(|table| table.replace(id, product), Option::is_some)
    }

    fn update(&self, id: u64, changes: ProductChanges) -> StoreResult<Option<Product>> {
        self.mutate(|table| table.update(id, changes), Option::is_some)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        let removed = self.mutate(|table| table.delete(id), Option::is_some)?;
        Ok(removed.is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.rows.len())
    }
}
