use crossbeam_channel::{Receiver, Sender};

use crate::common::LensProduct;
use crate::error::LensError;

/// Outcome of one capture cycle, stamped with the sequence number of the
/// cycle that issued it so stale results can be discarded.
#[derive(Debug)]
pub struct CycleResult {
    pub seq: u64,
    pub outcome: Result<Vec<LensProduct>, LensError>,
}

/// Producer half handed to the spawned detect task.
#[derive(Debug, Clone)]
pub struct CycleSink {
    pub res_tx: Sender<CycleResult>,
}

/// Consumer half drained by the playback controller's event loop.
#[derive(Debug)]
pub struct CyclePump {
    pub res_rx: Receiver<CycleResult>,
}

pub fn cycle_channels() -> (CycleSink, CyclePump) {
    let (res_tx, res_rx) = crossbeam_channel::unbounded();
    (CycleSink { res_tx }, CyclePump { res_rx })
}
