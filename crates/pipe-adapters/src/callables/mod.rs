pub mod acquire;
pub mod measure;
pub mod segment;

pub use acquire::LoadStack;
pub use measure::MeasureRegions;
pub use segment::SegmentStack;
