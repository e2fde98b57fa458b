//! Spans and events for renders and batches, compiled out without the
//! `tracing` feature.

/// Info-level span around a render, preview, or export.
///
/// Without `tracing` this yields a `NoopSpan` so `.entered()` still works.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Info-level event carrying computed geometry (placement box, fit plan) or
/// batch totals.
///
/// Without `tracing` the field values are still evaluated, then dropped.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Emit a warn-level event for a skipped combination.
///
/// Fields accept the full `tracing` syntax (`%display`, `?debug`) when enabled.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($name:expr, $($field:tt)+) => {
        tracing::warn!(name: $name, $($field)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($name:expr, $($field:tt)+) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;
pub(crate) use trace_warn;

/// Stand-in for a span guard when `tracing` is off.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
