// Probabilistic fallback classifier — trait-based abstraction for
// swappable providers.
//
// The FallbackClassifier trait defines the capability the cascade's last
// stage consumes. PerspectiveFallback implements it over Google's
// Perspective API; test suites inject stubs. The cascade treats absence,
// errors, and timeouts identically (degraded verdict), so providers can
// fail freely without breaking classification.

pub mod perspective;
pub mod rate_limiter;
pub mod traits;
