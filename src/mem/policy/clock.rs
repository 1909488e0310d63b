//! Clock. Second chance without the queue shuffling: frames sit in a
//! fixed circle and a hand walks over them. The circle starts at the
//! numerically highest frame id and continues through the rest in
//! ascending order; the hand begins on the frame loaded longest ago. On a
//! fault the hand clears set bits as it passes, stops on the first clear
//! one, and ends up just past the victim. The very first fault, like the
//! all-bits-set case, clears every bit and takes the frame under the hand
//! without any sweep.

use crate::mem::observer;
use crate::mem::state::{FrameKey, FrameTable};
use crate::mem::trace::ReplacementTrace;

pub(super) fn run(mut table: FrameTable, sequence: &[String]) -> ReplacementTrace {
    let circle = build_circle(&table);
    let mut hand = initial_hand(&table, &circle);
    let mut first_fault = true;
    let mut trace = ReplacementTrace::new();

    for (time, page) in sequence.iter().enumerate() {
        match table.lookup(page) {
            Some(key) => {
                // The hand does not move on a hit.
                table.set_referenced(key, true);
                trace.record(page, time, true, &table);
            }
            None => {
                if first_fault || table.all_referenced() {
                    table.clear_all_referenced();
                    first_fault = false;
                } else {
                    while table.frame(circle[hand]).referenced {
                        table.set_referenced(circle[hand], false);
                        hand = (hand + 1) % circle.len();
                    }
                }

                let victim = circle[hand];
                table.install(victim, page);
                table.set_referenced(victim, true);
                hand = (hand + 1) % circle.len();
                trace.record(page, time, false, &table);
            }
        }
        observer::check(&table, &trace);
    }

    trace
}

/// Highest id first, then the rest ascending.
fn build_circle(table: &FrameTable) -> Vec<FrameKey> {
    let mut keys: Vec<FrameKey> = table.iter().map(|(key, _)| key).collect();
    keys.sort_by_key(|&key| table.frame(key).id_num);
    keys.rotate_right(1);
    keys
}

fn initial_hand(table: &FrameTable, circle: &[FrameKey]) -> usize {
    let oldest = circle
        .iter()
        .min_by_key(|&&key| table.frame(key).load_time)
        .expect("frame table cannot be empty");
    circle
        .iter()
        .position(|key| key == oldest)
        .expect("oldest frame must sit in the circle")
}
