use super::ProcessControlBlock;

/// Processes waiting on simulated I/O, kept in the order they blocked.
#[derive(Debug, Default)]
pub struct BlockedQueue {
    waiting: Vec<ProcessControlBlock>,
}

impl BlockedQueue {
    pub fn new() -> BlockedQueue {
        BlockedQueue { waiting: Vec::new() }
    }

    pub fn enqueue(&mut self, pcb: ProcessControlBlock) {
        self.waiting.push(pcb);
    }

    /// Counts every held process down by one tick and hands back the ones whose
    /// I/O completed, in the order they blocked.
    ///
    /// The countdown pass and the removal pass are separate, so no entry is
    /// skipped or visited twice.
    pub fn tick(&mut self) -> Vec<ProcessControlBlock> {
        if self.waiting.is_empty() {
            return Vec::new();
        }

        let expired: Vec<bool> = self.waiting.iter_mut().map(|pcb| pcb.tick_block()).collect();

        let (done, still_waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiting)
            .into_iter()
            .zip(expired)
            .partition(|(_, expired)| *expired);

        self.waiting = still_waiting.into_iter().map(|(pcb, _)| pcb).collect();
        done.into_iter().map(|(pcb, _)| pcb).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.waiting.iter().map(|pcb| pcb.get_id())
    }
}
