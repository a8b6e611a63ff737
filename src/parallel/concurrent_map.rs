use std::collections::BTreeMap;
use crossbeam::utils::CachePadded;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Integer keys that can pick their own bucket.
pub trait ShardKey: Ord + Copy + Send {
    fn shard(&self, bucket_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard(&self, bucket_count: usize) -> usize {
                    // negative keys wrap, like a cast to an unsigned 64-bit integer
                    ((*self as u64) % bucket_count as u64) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Locked reference to one value; the owning bucket stays locked until drop.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

/// Associative container split into independently locked buckets.
///
/// A key lives in bucket `key % bucket_count`. Writers on different buckets
/// never contend. Callers must not hold two `Access` guards of the same map
/// at once: two keys sharing a bucket would deadlock.
pub struct ConcurrentMap<K, V> {
    buckets: Vec<CachePadded<Mutex<BTreeMap<K, V>>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// A zero bucket count is raised to one.
    pub fn new(bucket_count: usize) -> Self {
        let buckets = (0..bucket_count.max(1))
            .map(|_| CachePadded::new(Mutex::new(BTreeMap::new())))
            .collect();
        ConcurrentMap { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.buckets[key.shard(self.buckets.len())]
    }

    /// Lock the key's bucket and return its value, inserting `V::default()` if absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.bucket(&key).lock(), |map| map.entry(key).or_default())
    }

    /// Remove `key`, locking only its bucket.
    pub fn erase(&self, key: K) -> Option<V> {
        self.bucket(&key).lock().remove(&key)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.lock().is_empty())
    }

    /// Merge all buckets into one ordered map.
    ///
    /// Buckets are locked one at a time, so writers running concurrently may be
    /// seen in some buckets and not in others.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut ordinary_map = BTreeMap::new();
        for bucket in &self.buckets {
            let guard = bucket.lock();
            ordinary_map.extend(guard.iter().map(|(key, value)| (*key, value.clone())));
        }
        ordinary_map
    }

    /// Consume the map; no locking needed since nobody else can hold it.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut ordinary_map = BTreeMap::new();
        for bucket in self.buckets {
            ordinary_map.append(&mut CachePadded::into_inner(bucket).into_inner());
        }
        ordinary_map
    }
}
