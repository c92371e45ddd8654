//! The transport collaborator (§6): a single capability, supplied by the
//! embedder, that answers "how big is this file" and "give me these byte
//! ranges".
//!
//! This crate treats the collaborator as an external boundary: discovery of
//! the backend (URL parsing, credentials, retries) is explicitly out of
//! scope (§1 Non-goals). `segy-io` only defines the trait and ships one
//! reference implementation, [`crate::local::LocalFileSource`], for local
//! disk.
use segy_core::SegyError;

/// A byte-addressable backend capable of reporting its size and returning
/// arbitrary byte ranges.
///
/// Implementations are expected to fan out `range_fetch` requests
/// concurrently; the degree of parallelism is entirely the collaborator's
/// choice (§5) — the core above this trait is correct for any permutation
/// of completion order, since it always re-associates fetched bytes with
/// the range that was asked for, not the order fetches complete in.
///
/// A native `async fn` in a trait, rather than `async-trait`'s boxed-future
/// adapter: this workspace only ever uses `RangeSource` through a concrete
/// generic type parameter (never as `dyn RangeSource`), so no v-table is
/// needed and the extra allocation a trait-object adapter would require is
/// avoided.
pub trait RangeSource: Send + Sync {
    /// Total size of the resource at `url`, in bytes.
    fn size(&self, url: &str) -> impl std::future::Future<Output = Result<u64, SegyError>> + Send;

    /// Fetch each `(start, end)` range in `ranges`, returning one buffer per
    /// range **in request order**, independent of completion order.
    ///
    /// A successful buffer's length must equal `end - start`; a short
    /// buffer is the collaborator's signal of [`SegyError::TruncatedBuffer`]
    /// and callers must treat it as such rather than silently padding.
    fn range_fetch(
        &self,
        url: &str,
        ranges: &[(u64, u64)],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<u8>>, SegyError>> + Send;
}
