pub mod evidence;
pub mod index_record;
pub mod locker_mode;
pub mod prune_log;
pub mod prune_request;

pub use crate::model::evidence::{EvidenceRef, PartitionSpec};
pub use crate::model::index_record::{
    DirectoryIndex, IndexRecord, PartitionTombstone, PrunedIndexRecord, TombstoneEntry,
    Tombstones,
};
pub use crate::model::locker_mode::LockerMode;
pub use crate::model::prune_log::PruneLog;
pub use crate::model::prune_request::PruneRequest;
