use std::sync::atomic::{AtomicUsize, Ordering};

/// 内部容器统计信息（原子计数器）
#[derive(Debug, Default)]
pub(crate) struct InnerStats {
    total_resolutions: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
    constructions: AtomicUsize,
    failed_constructions: AtomicUsize,
    unknown_services: AtomicUsize,
}

impl InnerStats {
    pub(crate) fn resolution(&self) {
        self.total_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn constructed(&self) {
        self.constructions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failed(&self) {
        self.failed_constructions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn unknown(&self) {
        self.unknown_services.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ContainerStats {
        ContainerStats {
            total_resolutions: self.total_resolutions.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            constructions: self.constructions.load(Ordering::Relaxed),
            failed_constructions: self.failed_constructions.load(Ordering::Relaxed),
            unknown_services: self.unknown_services.load(Ordering::Relaxed),
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerStats {
    pub total_resolutions: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// 成功的构造次数
    pub constructions: usize,
    pub failed_constructions: usize,
    /// 请求未注册名称的次数
    pub unknown_services: usize,
}

impl ContainerStats {
    /// 获取总解析次数
    pub fn total(&self) -> usize {
        self.total_resolutions
    }

    /// 获取缓存命中率，只统计已注册名称的解析
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = InnerStats::default().snapshot();

        assert_eq!(stats, ContainerStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let inner = InnerStats::default();
        for _ in 0..4 {
            inner.resolution();
        }
        inner.miss();
        inner.constructed();
        for _ in 0..3 {
            inner.hit();
        }

        let stats = inner.snapshot();
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.constructions, 1);
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_lookups_do_not_affect_hit_rate() {
        let inner = InnerStats::default();
        inner.resolution();
        inner.miss();
        inner.resolution();
        inner.hit();
        inner.resolution();
        inner.unknown();

        let stats = inner.snapshot();
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.unknown_services, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
