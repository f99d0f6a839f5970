use std::path::Path;

use anyhow::Result;
use bincode::{
    config::{BigEndian, WithOtherEndian},
    DefaultOptions, Options,
};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db as Sled, IVec};

type Encoder = WithOtherEndian<DefaultOptions, BigEndian>;

fn encoder() -> Encoder {
    bincode::options().with_big_endian()
}

pub struct Db {
    handle: Sled,
    encoder: Encoder,
}
impl Db {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let handle = sled::open(path)?;
        Ok(Self {
            handle,
            encoder: encoder(),
        })
    }
    /// In-memory database, removed on drop.
    pub fn temporary() -> Result<Self> {
        let handle = sled::Config::new().temporary(true).open()?;
        Ok(Self {
            handle,
            encoder: encoder(),
        })
    }

    // CRUD
    /// Monotonic id, starting at 1.
    pub fn next_id(&self) -> Result<u64> {
        let id = self.handle.generate_id()?;
        Ok(id + 1)
    }
    pub fn insert<T: Serialize, K: AsRef<[u8]>>(&self, key: K, value: &T) -> Result<()> {
        let value = self.encoder.serialize(value)?;
        self.handle.insert(key, value)?;
        Ok(())
    }
    pub fn get<T: DeserializeOwned, K: AsRef<[u8]>>(&self, key: K) -> Result<Option<T>> {
        let value = match self.handle.get(key)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let value = self.encoder.deserialize(&value)?;
        Ok(Some(value))
    }
    /// Removes the key, returning the previous value if there was one.
    pub fn remove<T: DeserializeOwned, K: AsRef<[u8]>>(&self, key: K) -> Result<Option<T>> {
        let value = match self.handle.remove(key)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let value = self.encoder.deserialize(&value)?;
        Ok(Some(value))
    }

    // Iterators
    /// Entries under `prefix`, in ascending key order.
    pub fn scan_prefix<'a, T: DeserializeOwned + 'a>(
        &'a self,
        prefix: &[u8],
    ) -> impl Iterator<Item = Result<(IVec, T)>> + 'a {
        self.handle.scan_prefix(prefix).map(move |item| {
            let (key, value) = item?;
            let value = self.encoder.deserialize(&value)?;
            Ok((key, value))
        })
    }

    // Batches
    pub fn batch(&self) -> Batch {
        Batch {
            inner: sled::Batch::default(),
            encoder: encoder(),
            len: 0,
        }
    }
    /// Applies every staged write atomically.
    pub fn apply(&self, batch: Batch) -> Result<()> {
        self.handle.apply_batch(batch.inner)?;
        Ok(())
    }
}

// Required Debug implementation for `Db`
impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").finish()
    }
}

/// Writes staged for a single atomic `Db::apply`.
pub struct Batch {
    inner: sled::Batch,
    encoder: Encoder,
    len: u64,
}
impl Batch {
    pub fn insert<T: Serialize, K: AsRef<[u8]>>(&mut self, key: K, value: &T) -> Result<()> {
        let value = self.encoder.serialize(value)?;
        self.inner.insert(key.as_ref(), value);
        self.len += 1;
        Ok(())
    }
    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K) {
        self.inner.remove(key.as_ref());
        self.len += 1;
    }
    pub fn len(&self) -> u64 {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
