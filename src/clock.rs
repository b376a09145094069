//! Per-thread CPU-time measurement.
//!
//! Worker instrumentation wants the CPU time consumed by *one* thread, not
//! wall-clock time: summed per-worker CPU time can then exceed the wall time
//! of the whole multiply, which is exactly the signature of real parallel
//! speedup.

use std::time::Duration;

/// Returns the CPU time consumed by the calling thread since an arbitrary,
/// thread-local start point. Only differences between two readings on the
/// same thread are meaningful.
#[cfg(unix)]
pub fn thread_cpu_time() -> Duration {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
    if rc == 0 {
        Duration::new(ts.tv_sec.max(0) as u64, ts.tv_nsec as u32)
    } else {
        // CLOCK_THREAD_CPUTIME_ID is mandatory on every Unix we target; a
        // failure here leaves the stats at zero rather than aborting the run.
        Duration::ZERO
    }
}

/// Wall-clock fallback for platforms without a per-thread CPU clock.
///
/// With this fallback the summed worker times cannot exceed wall time, so
/// they no longer demonstrate parallel speedup; they still bound how long
/// each worker's loop ran.
#[cfg(not(unix))]
pub fn thread_cpu_time() -> Duration {
    use std::time::Instant;

    thread_local! {
        static THREAD_START: Instant = Instant::now();
    }
    THREAD_START.with(|start| start.elapsed())
}
