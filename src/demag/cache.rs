//! # 计算结果缓存
//!
//! 通用的键值记忆化缓存：
//! - 容量上限，超出时按插入顺序淘汰最早的条目（FIFO，不是 LRU）
//! - 可选有效期，读取时惰性检查过期，`cleanup` 主动清扫
//!
//! 缓存本身不加锁，由持有者（`demag/engine.rs`）负责串行化访问。
//!
//! ## 依赖关系
//! - 被 `demag/engine.rs` 使用
//! - 无外部模块依赖

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// 缓存统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub len: usize,
}

/// FIFO + TTL 记忆化缓存
#[derive(Debug)]
pub struct ComputationCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// 插入顺序
    order: VecDeque<K>,
    capacity: usize,
    ttl: Option<Duration>,
    stats: CacheStats,
}

impl<K, V> ComputationCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// 创建永不过期的缓存
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl: None,
            stats: CacheStats::default(),
        }
    }

    /// 创建带有效期的缓存
    pub fn with_ttl(capacity: usize, ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::new(capacity)
        }
    }

    /// 读取缓存，过期条目在此删除
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => self.is_expired(entry, Instant::now()),
            None => {
                self.stats.misses += 1;
                return None;
            }
        };

        if expired {
            self.remove(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            return None;
        }

        self.stats.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// 写入缓存
    ///
    /// 已存在的键更新值和时间戳，但保留原插入位置。
    pub fn set(&mut self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    self.stats.evictions += 1;
                }
                None => break,
            }
        }
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// 删除所有过期条目，返回删除数量
    pub fn cleanup(&mut self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);

        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));

        let removed = before - self.entries.len();
        self.stats.expirations += removed as u64;
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            ..self.stats
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(entry.inserted_at) >= ttl,
            None => false,
        }
    }

    fn remove(&mut self, key: &K) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}
