//! Farthest-in-future eviction. On a fault, every resident page is scored
//! by how many requests away its next use is; the page that stays cold the
//! longest loses its frame. A page never requested again (or an empty
//! frame) scores as infinitely far, and ties fall to the numerically
//! lowest frame id. Each fault rescans the rest of the sequence.

use crate::mem::observer;
use crate::mem::state::{FrameKey, FrameTable};
use crate::mem::trace::ReplacementTrace;

/// Stand-in for "never used again"; real distances are bounded by the
/// sequence length.
const NEVER: u64 = u64::MAX;

pub(super) fn run(mut table: FrameTable, sequence: &[String]) -> ReplacementTrace {
    let mut trace = ReplacementTrace::new();

    for (time, page) in sequence.iter().enumerate() {
        let hit = table.lookup(page).is_some();
        if !hit {
            let victim = farthest_use(&table, sequence, time + 1);
            table.install(victim, page);
        }
        trace.record(page, time, hit, &table);
        observer::check(&table, &trace);
    }

    trace
}

fn farthest_use(table: &FrameTable, sequence: &[String], from: usize) -> FrameKey {
    table
        .iter()
        .max_by(|(_, a), (_, b)| {
            distance(a.page.as_deref(), sequence, from)
                .cmp(&distance(b.page.as_deref(), sequence, from))
                // Greater distance wins; on equal distance the smaller
                // frame id does.
                .then_with(|| b.id_num.cmp(&a.id_num))
        })
        .map(|(key, _)| key)
        .expect("frame table cannot be empty")
}

fn distance(page: Option<&str>, sequence: &[String], from: usize) -> u64 {
    let Some(page) = page else {
        return NEVER;
    };
    sequence[from..]
        .iter()
        .position(|next| next == page)
        .map(|offset| offset as u64 + 1)
        .unwrap_or(NEVER)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::mem::policy::testutil::{frames, pages, snapshot};
    use crate::mem::policy::ReplacementPolicy;

    #[test]
    fn evicts_the_page_used_farthest_in_the_future() {
        let frames = frames(&[("0", 1, "1"), ("1", 2, "2"), ("2", 3, "3")]);
        let sequence = pages(&["4", "2", "3"]);
        let trace = ReplacementPolicy::Optimal.run(&frames, &sequence).unwrap();

        // Pages 2 and 3 are both still needed; page 1 never is.
        assert_eq!(
            trace.accesses()[0].frames,
            snapshot(&["4", "2", "3"])
        );
        assert_eq!(trace.hits(), 2);
        assert_eq!(trace.faults(), 1);
    }

    #[test]
    fn never_again_ties_break_to_the_lowest_frame_id() {
        let frames = frames(&[("0", 1, "1"), ("1", 2, "2"), ("2", 3, "3")]);
        let sequence = pages(&["4", "5"]);
        let trace = ReplacementPolicy::Optimal.run(&frames, &sequence).unwrap();

        // Every resident page is dead, so frame 0 takes both faults; the
        // 4 it just received is itself never used again.
        assert_eq!(
            trace.accesses()[0].frames,
            snapshot(&["4", "2", "3"])
        );
        assert_eq!(
            trace.final_frames().unwrap(),
            snapshot(&["5", "2", "3"])
        );
    }

    #[test]
    fn tie_break_is_numeric_not_lexicographic() {
        let frames = frames(&[("2", 1, "1"), ("10", 2, "2")]);
        let sequence = pages(&["9"]);
        let trace = ReplacementPolicy::Optimal.run(&frames, &sequence).unwrap();
        // Frame 2 wins the tie against frame 10.
        assert_eq!(
            trace.final_frames().unwrap(),
            snapshot(&["9", "2"])
        );
    }

    #[test]
    fn an_empty_frame_is_filled_before_live_pages_are_evicted() {
        let frames = frames(&[("0", 1, "1"), ("1", 2, "")]);
        let sequence = pages(&["4", "1"]);
        let trace = ReplacementPolicy::Optimal.run(&frames, &sequence).unwrap();

        // Page 1 is needed again; the empty frame 1 takes the fault.
        assert_eq!(
            trace.final_frames().unwrap(),
            snapshot(&["1", "4"])
        );
        assert_eq!(trace.hits(), 1);
    }
}
