//! Environment-driven tunables, read once per process

use std::str::FromStr;
use std::sync::OnceLock;

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

static ADAPTIVE_WINDOW: OnceLock<usize> = OnceLock::new();

/// Side of the local window used by adaptive binarization (odd, pixels)
pub(crate) fn adaptive_window() -> usize {
    *ADAPTIVE_WINDOW.get_or_init(|| parse_env("QR_ADAPTIVE_WINDOW", 31usize).clamp(7, 255) | 1)
}

static ADAPTIVE_BIAS: OnceLock<u32> = OnceLock::new();

/// Percentage below the local mean a pixel must fall to count as dark
pub(crate) fn adaptive_bias_percent() -> u32 {
    *ADAPTIVE_BIAS.get_or_init(|| parse_env("QR_ADAPTIVE_BIAS", 15u32).clamp(0, 50))
}

static MIN_MODULE_PX: OnceLock<usize> = OnceLock::new();

/// Smallest module size (pixels) the finder scan accepts
pub(crate) fn min_module_px() -> usize {
    *MIN_MODULE_PX.get_or_init(|| parse_env("QR_MIN_MODULE_PX", 2usize).clamp(1, 16))
}

static MAX_FINDER_CANDIDATES: OnceLock<usize> = OnceLock::new();

/// Finder candidates kept (strongest first) before grouping
pub(crate) fn max_finder_candidates() -> usize {
    *MAX_FINDER_CANDIDATES
        .get_or_init(|| parse_env("QR_MAX_FINDER_CANDIDATES", 16usize).clamp(3, 64))
}

static MAX_GROUP_ATTEMPTS: OnceLock<usize> = OnceLock::new();

/// Finder triples tried per frame
pub(crate) fn max_group_attempts() -> usize {
    *MAX_GROUP_ATTEMPTS.get_or_init(|| parse_env("QR_MAX_GROUP_ATTEMPTS", 24usize).clamp(1, 256))
}

static SCAN_INTERVAL_MS: OnceLock<u64> = OnceLock::new();

/// Default polling interval of a scan session
pub(crate) fn scan_interval_ms() -> u64 {
    *SCAN_INTERVAL_MS.get_or_init(|| parse_env("QR_SCAN_INTERVAL_MS", 500u64).clamp(1, 60_000))
}
