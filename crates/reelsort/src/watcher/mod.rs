pub mod orchestrator;
pub mod poller;
pub mod scanner;

pub use orchestrator::{CycleReport, EntryOrchestrator, EntryOutcome};
pub use poller::{install_shutdown_handler, Poller};
pub use scanner::{list_files, list_subdirectories, IncomingListing, IncomingScanner};
