use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info};
use tracing::info_span;

use crate::error::WatchError;
use crate::lookup::MetadataLookup;
use crate::storage::Placement;
use crate::watcher::orchestrator::{CycleReport, EntryOrchestrator};
use crate::watcher::scanner::IncomingScanner;

const SLEEP_SLICE: Duration = Duration::from_millis(200);

/// Re-scans the incoming directory every `delay` until shut down.
pub struct Poller<P, L> {
    scanner: IncomingScanner,
    orchestrator: EntryOrchestrator<P, L>,
    delay: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<P: Placement, L: MetadataLookup> Poller<P, L> {
    pub fn new(
        scanner: IncomingScanner,
        orchestrator: EntryOrchestrator<P, L>,
        delay: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            scanner,
            orchestrator,
            delay,
            shutdown,
        }
    }

    fn stopping(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// One pass over the incoming directory: every directory first, then
    /// the loose root files. Stops early between entries on shutdown.
    pub fn process_cycle(&self) -> Result<CycleReport, WatchError> {
        let _span = info_span!("cycle").entered();
        let listing = self.scanner.scan()?;
        let mut report = CycleReport::default();

        for entry in listing.directories.iter().chain(listing.files.iter()) {
            if self.stopping() {
                info!("Shutdown requested; stopping cycle early");
                break;
            }
            let outcome = self.orchestrator.process(entry);
            report.record(&outcome);
        }
        Ok(report)
    }

    /// Polls until the shutdown flag is set. Cycle failures are logged and
    /// the loop carries on.
    pub fn run(&self) {
        info!(
            "Watching {} every {} seconds",
            self.scanner.incoming_dir().display(),
            self.delay.as_secs()
        );

        while !self.stopping() {
            match self.process_cycle() {
                Ok(report) => info!("Cycle finished: {}", report),
                Err(e) => error!("Cycle failed: {}", e),
            }
            if self.stopping() {
                break;
            }
            info!("Sleeping for {} seconds", self.delay.as_secs());
            self.sleep();
        }
        info!("Watcher shutting down...");
    }

    fn sleep(&self) {
        let deadline = Instant::now() + self.delay;
        while !self.stopping() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

/// Installs a Ctrl-C handler that flips the returned flag.
pub fn install_shutdown_handler() -> Result<Arc<AtomicBool>, WatchError> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(true, Ordering::Relaxed);
    })
    .map_err(|e| WatchError::Signal(e.to_string()))?;
    Ok(shutdown)
}
