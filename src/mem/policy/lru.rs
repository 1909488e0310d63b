//! Least recently used. Same initial queue as FIFO, but a hit refreshes
//! the frame by moving it to the most-recently-used end, so eviction
//! always lands on the frame untouched the longest.

use std::collections::VecDeque;

use crate::mem::observer;
use crate::mem::state::{FrameKey, FrameTable};
use crate::mem::trace::ReplacementTrace;

pub(super) fn run(mut table: FrameTable, sequence: &[String]) -> ReplacementTrace {
    let mut queue: VecDeque<FrameKey> = table.by_load_time().into();
    let mut trace = ReplacementTrace::new();

    for (time, page) in sequence.iter().enumerate() {
        match table.lookup(page) {
            Some(key) => {
                let pos = queue
                    .iter()
                    .position(|&k| k == key)
                    .expect("hit frame missing from queue");
                queue.remove(pos);
                queue.push_back(key);
                trace.record(page, time, true, &table);
            }
            None => {
                let victim = queue.pop_front().expect("frame queue cannot be empty");
                table.install(victim, page);
                queue.push_back(victim);
                trace.record(page, time, false, &table);
            }
        }
        observer::check(&table, &trace);
    }

    trace
}
