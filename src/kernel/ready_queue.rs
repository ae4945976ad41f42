use std::collections::VecDeque;

use super::ProcessControlBlock;

/// FIFO of processes waiting for the CPU. Arrival order is dispatch order.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    fifo_queue: VecDeque<ProcessControlBlock>,
}

impl ReadyQueue {
    pub fn new() -> ReadyQueue {
        ReadyQueue {
            fifo_queue: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, pcb: ProcessControlBlock) {
        self.fifo_queue.push_back(pcb);
    }

    pub fn dequeue(&mut self) -> Option<ProcessControlBlock> {
        self.fifo_queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.fifo_queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fifo_queue.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.fifo_queue.iter().map(|pcb| pcb.get_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_queue_is_fifo() {
        let mut queue = ReadyQueue::new();
        queue.enqueue(ProcessControlBlock::new(1, vec![]));
        queue.enqueue(ProcessControlBlock::new(2, vec![]));
        queue.enqueue(ProcessControlBlock::new(3, vec![]));

        assert_eq!(queue.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(queue.dequeue().map(|p| p.get_id()), Some(1));
        assert_eq!(queue.dequeue().map(|p| p.get_id()), Some(2));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_ready_queue_dequeue_empty() {
        let mut queue = ReadyQueue::new();
        assert!(queue.is_empty());
        assert!(queue.dequeue().is_none());
    }
}
