use crate::volume::VolumeModel;

/// The mounted filesystem: just the model, plus whatever FUSE needs of us.
/// All the real work happened at mount time; the methods on this are
/// lookups against a finished snapshot.
pub struct MxFs {
    pub(super) volume: VolumeModel,
}

impl MxFs {
    pub fn new(volume: VolumeModel) -> Self {
        Self { volume }
    }
}
