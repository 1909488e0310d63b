//! Second chance. A FIFO queue where a set reference bit buys a frame one
//! trip to the back instead of eviction. When every bit in the queue is
//! set, all of them are cleared in place first and the sweep then takes
//! the front frame directly.

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
                table.set_referenced(key, true);
                trace.record(page, time, true, &table);
            }
            None => {
                if table.all_referenced() {
                    // Queue order is deliberately left alone here; only
                    // the bits reset.
                    table.clear_all_referenced();
                }
                loop {
                    let front = *queue.front().expect("frame queue cannot be empty");
                    if table.frame(front).referenced {
                        queue.rotate_left(1);
                        table.set_referenced(front, false);
                    } else {
                        queue.rotate_left(1);
                        table.install(front, page);
                        table.set_referenced(front, true);
                        break;
                    }
                }
                trace.record(page, time, false, &table);
            }
        }
        observer::check(&table, &trace);
    }

    trace
}
