//! In-memory store for generated career packages with LRU eviction.
//!
//! Packages live only as long as the process; the least recently used ones
//! are dropped once capacity is reached.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::CareerPackage;

#[derive(Debug, Clone)]
pub struct PackageStore {
    packages: Arc<RwLock<LruCache<Uuid, Arc<CareerPackage>>>>,
}

impl PackageStore {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            packages: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    pub async fn insert(&self, package: CareerPackage) -> Arc<CareerPackage> {
        let package = Arc::new(package);
        let mut packages = self.packages.write().await;
        if let Some((evicted, _)) = packages.push(package.id, Arc::clone(&package)) {
            if evicted != package.id {
                tracing::debug!("Evicted career package {evicted}");
            }
        }
        package
    }

    /// Fetches a package and marks it recently used.
    pub async fn get(&self, id: Uuid) -> Option<Arc<CareerPackage>> {
        self.packages.write().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Arc<CareerPackage>> {
        self.packages.write().await.pop(&id)
    }

    pub async fn len(&self) -> usize {
        self.packages.read().await.len()
    }
}

impl Default for PackageStore {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, Industry, Rank, TargetPosition};
    use chrono::Utc;

    fn package() -> CareerPackage {
        CareerPackage {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            profile: CandidateProfile {
                rank: Rank::E7,
                years_of_service: 18,
                experience: None,
            },
            target: TargetPosition {
                industry: Industry::Federal,
                title: "Supply Systems Analyst".to_string(),
                job_description: "GS-2003 supply analyst".to_string(),
            },
            keywords: vec!["Property Accountability".to_string()],
            resume_md: "# Name".to_string(),
            cover_letter_md: "Dear Hiring Manager,".to_string(),
            interview_md: "## LIKELY INTERVIEW QUESTIONS".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = PackageStore::new(4);
        let pkg = store.insert(package()).await;

        let fetched = store.get(pkg.id).await.unwrap();
        assert_eq!(fetched.target.title, "Supply Systems Analyst");

        assert!(store.remove(pkg.id).await.is_some());
        assert!(store.get(pkg.id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let store = PackageStore::new(2);
        let first = store.insert(package()).await;
        let second = store.insert(package()).await;

        // touch `first` so `second` becomes the eviction candidate
        store.get(first.id).await;
        let third = store.insert(package()).await;

        assert!(store.get(first.id).await.is_some());
        assert!(store.get(second.id).await.is_none());
        assert!(store.get(third.id).await.is_some());
        assert_eq!(store.len().await, 2);
    }
}
