pub mod cleaner;
pub mod filesystem;
pub mod placement;

pub use cleaner::{CleanReport, SampleRemover};
pub use filesystem::{move_path, rename_in_place};
pub use placement::{Disposition, Placement, PlacementOutcome, PlacementResolver};
