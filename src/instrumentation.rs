//! Span timing for profiling, compiled in with `--features instrumentation`.
//!
//! Hot functions carry `#[instrument]` attributes under that feature. The
//! layer installed here times every span and keeps the totals per thread;
//! [`report`] merges them and prints a table to stderr.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use thread_local::ThreadLocal;
use tracing::span;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Clone, Copy, Debug, Default)]
struct SpanTiming {
    calls: u64,
    total: Duration,
    longest: Duration,
}

impl SpanTiming {
    fn record(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total += elapsed;
        self.longest = self.longest.max(elapsed);
    }

    fn merge(&mut self, other: &SpanTiming) {
        self.calls += other.calls;
        self.total += other.total;
        self.longest = self.longest.max(other.longest);
    }
}

type TimingTable = HashMap<&'static str, SpanTiming>;

static TIMINGS: Lazy<ThreadLocal<Mutex<TimingTable>>> = Lazy::new(ThreadLocal::new);

struct SpanStart(Instant);

struct TimingLayer;

impl<S> Layer<S> for TimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanStart(Instant::now()));
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };
        let start = match span.extensions_mut().remove::<SpanStart>() {
            Some(SpanStart(start)) => start,
            None => return,
        };
        let table = TIMINGS.get_or(|| Mutex::new(TimingTable::new()));
        let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
        table
            .entry(span.metadata().name())
            .or_default()
            .record(start.elapsed());
    }
}

/// Installs the timing layer. With `RUST_LOG` set, span events are also
/// printed, filtered by it; otherwise every span is timed silently.
pub fn init() -> Result<(), SetGlobalDefaultError> {
    let verbose = std::env::var("RUST_LOG")
        .map(|filter| !filter.is_empty() && filter != "off")
        .unwrap_or(false);

    if verbose {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(TimingLayer)
            .with(tracing_subscriber::fmt::layer().with_target(false).compact());
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(TimingLayer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// Prints per-span call counts and times, merged over all threads, longest
/// total first.
pub fn report() {
    let mut merged = TimingTable::new();
    for table in TIMINGS.iter() {
        let table = table.lock().unwrap_or_else(PoisonError::into_inner);
        for (name, timing) in table.iter() {
            merged.entry(*name).or_default().merge(timing);
        }
    }

    if merged.is_empty() {
        eprintln!("no spans were recorded");
        return;
    }

    let mut rows: Vec<_> = merged.into_iter().collect();
    rows.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.total));

    eprintln!("\n{:<32} {:>12} {:>12} {:>12} {:>12}", "span", "calls", "total ms", "avg µs", "max µs");
    eprintln!("{:-<84}", "");
    for (name, timing) in rows.iter() {
        let average = timing.total.as_secs_f64() * 1e6 / timing.calls.max(1) as f64;
        eprintln!(
            "{:<32} {:>12} {:>12.2} {:>12.2} {:>12.2}",
            name,
            timing.calls,
            timing.total.as_secs_f64() * 1e3,
            average,
            timing.longest.as_secs_f64() * 1e6
        );
    }
}
