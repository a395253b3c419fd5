//! # Contracts and Advisories
//!
//! One facade for the two kinds of diagnostics the engine emits:
//!
//! - **Contracts**: programmer errors (double-add, remove-of-absent, destroying
//!   an invalid entity, ...). Checked when [`CONTRACTS_ENABLED`] is true, which
//!   is every debug build plus release builds with the `contracts` feature.
//!   When disabled the condition is never evaluated.
//! - **Advisories**: wasteful but harmless calls (useless growth, thrashing
//!   reallocation). Logged through `tracing` at `warn`, never affect control flow.
//!
//! All emissions go through `tracing`, so any subscriber is the log sink.
//! The `strip-diagnostics` feature compiles them out entirely.

use crate::error::ContractViolation;

/// Whether [`contract!`](crate::contract) checks are compiled in.
pub const CONTRACTS_ENABLED: bool = cfg!(any(debug_assertions, feature = "contracts"));

/// Checks a precondition; on failure reports the given [`ContractViolation`]
/// and panics.
///
/// The violation expression is only built on failure.
///
/// ```rust,ignore
/// contract!(index < self.len, ContractViolation::IndexOutOfRange { index, len: self.len });
/// ```
#[macro_export]
macro_rules! contract {
    ($cond:expr, $violation:expr $(,)?) => {
        if $crate::diagnostics::CONTRACTS_ENABLED && !($cond) {
            $crate::diagnostics::violated($violation)
        }
    };
}

/// Reports a contract violation and aborts the current operation.
///
/// Used directly for checks that guard an index and therefore stay active in
/// every build.
#[cold]
#[inline(never)]
#[track_caller]
pub fn violated(violation: ContractViolation) -> ! {
    tracing::error!(%violation, "contract violation");
    panic!("contract violation: {violation}");
}

/// Whether resizing from `old` to `new` slots looks like thrashing: shrinking
/// by less than half, or growing by less than double.
#[inline]
#[must_use]
pub const fn is_thrashing(old: usize, new: usize) -> bool {
    (old > new && old / 2 < new) || (new > old && new < old.saturating_mul(2))
}

/// Logs a warning when a reallocation from `old` to `new` slots is likely to
/// be followed by another one soon.
#[inline]
pub(crate) fn warn_if_thrashing(old: usize, new: usize) {
    if is_thrashing(old, new) {
        tracing::warn!(old, new, "wasteful reallocation");
    }
}

/// Test support: counts the `warn` events emitted while `f` runs on this
/// thread.
#[cfg(test)]
pub(crate) fn count_warnings(f: impl FnOnce()) -> usize {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}
