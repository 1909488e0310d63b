//! First in, first out. Frames queue up by load time; a fault always
//! evicts the front of the queue and the refilled frame becomes the
//! freshest-loaded at the back. Hits change nothing.

use std::collections::VecDeque;

use crate::mem::observer;
use crate::mem::state::{FrameKey, FrameTable};
use crate::mem::trace::ReplacementTrace;

pub(super) fn run(mut table: FrameTable, sequence: &[String]) -> ReplacementTrace {
    let mut queue: VecDeque<FrameKey> = table.by_load_time().into();
    let mut trace = ReplacementTrace::new();

    for (time, page) in sequence.iter().enumerate() {
        let hit = table.lookup(page).is_some();
        if !hit {
            let victim = queue.pop_front().expect("frame queue cannot be empty");
            table.install(victim, page);
            queue.push_back(victim);
        }
        trace.record(page, time, hit, &table);
        observer::check(&table, &trace);
    }

    trace
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::mem::policy::testutil::{frames, pages, snapshot};
    use crate::mem::policy::ReplacementPolicy;

    #[test]
    fn evicts_in_load_time_order() {
        let frames = frames(&[
            ("0", 11, "5"),
            ("1", 8, "8"),
            ("2", 3, "1"),
            ("3", 14, "4"),
        ]);
        let sequence = pages(&["9", "7", "8", "3", "5", "7", "7", "9", "6", "3", "3"]);
        let trace = ReplacementPolicy::Fifo.run(&frames, &sequence).unwrap();

        // The first fault lands on the frame loaded longest ago.
        let first = &trace.accesses()[0];
        assert!(!first.hit);
        assert_eq!(first.frames, snapshot(&["5", "8", "9", "4"]));

        let hits: Vec<bool> = trace.accesses().iter().map(|a| a.hit).collect();
        assert_eq!(
            hits,
            [false, false, false, false, false, true, true, false, false, true, true]
        );
        assert_eq!(trace.hits(), 4);
        assert_eq!(trace.faults(), 7);
        assert_eq!(
            trace.final_frames().unwrap(),
            snapshot(&["6", "9", "5", "3"])
        );
    }

    #[test]
    fn hits_leave_the_queue_untouched() {
        let frames = frames(&[("0", 1, "1"), ("1", 2, "2")]);
        let sequence = pages(&["1", "1", "3"]);
        let trace = ReplacementPolicy::Fifo.run(&frames, &sequence).unwrap();

        // Two hits on frame 0 do not save it from being the oldest.
        assert_eq!(trace.hits(), 2);
        assert_eq!(
            trace.final_frames().unwrap(),
            snapshot(&["3", "2"])
        );
    }
}
