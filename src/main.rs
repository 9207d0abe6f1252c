use std::time::Duration;

use clap::Parser;
use primebench::bench::{MonotonicClock, run_timed};
use primebench::math::primes::wheel_primes;
use primebench::math::sieve::odd_sieve;

#[derive(Parser)]
struct Cli {
    /// Inclusive upper bound of the searched range
    #[arg(long, default_value_t = 1_000)]
    bound: u64,
    /// Measurement window per algorithm, in seconds
    #[arg(long, default_value_t = 5.0)]
    window: f64,
}

fn enable_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;

    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .without_time()
        .with_target(false)
        .init();
}

fn bench_one<R>(label: &str, window: Duration, work: impl FnMut() -> R) {
    let span = tracing::info_span!("bench", algorithm = label);
    let _guard = span.enter();
    let clock = MonotonicClock::new();
    let result = run_timed(&clock, window, work);
    tracing::info!(
        iterations = result.iterations,
        elapsed_secs = result.elapsed.as_secs_f64(),
        "window closed"
    );
    println!("{label}: {result}");
}

fn main() -> anyhow::Result<()> {
    enable_tracing();
    let cli = Cli::parse();
    let window = Duration::try_from_secs_f64(cli.window)
        .map_err(|e| anyhow::anyhow!("bad --window {}: {e}", cli.window))?;

    // one untimed sieve up front: rejects an unsievable bound before any
    // clock starts, and tells us how much work each iteration does
    let table = odd_sieve(cli.bound)?;
    tracing::info!(bound = cli.bound, primes = table.primes().len(), "warmed up");
    drop(table);

    bench_one("trial-division", window, || wheel_primes::<u64>(cli.bound));
    bench_one("odd-sieve", window, || odd_sieve(cli.bound));

    Ok(())
}
