//! Property-based tests for navigation and the playback controller
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::*;
use musify_playback::navigation::{sequential_next, sequential_previous};
use musify_playback::{pick_random_excluding, progress, ActiveList, PlaybackStatus};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Operations a user can perform on the player
#[derive(Debug, Clone)]
enum Op {
    Play(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Confirm,
    Reject,
    Ended,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6).prop_map(Op::Play),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Previous),
        (-1.0f64..2.0).prop_map(Op::Seek),
        Just(Op::Confirm),
        Just(Op::Reject),
        Just(Op::Ended),
    ]
}

proptest! {
    /// Property: shuffle never returns the excluded index unless it is the only one
    #[test]
    fn shuffle_pick_excludes_current(seed in any::<u64>(), len in 1usize..40, exclude in 0usize..40) {
        let mut rng = StdRng::seed_from_u64(seed);
        let exclude = exclude % len;
        let pick = pick_random_excluding(&mut rng, len, Some(exclude));

        prop_assert!(pick.is_some());
        let pick = pick.unwrap();
        prop_assert!(pick < len);
        if len > 1 {
            prop_assert_ne!(pick, exclude);
        }
    }

    /// Property: next and previous are inverse steps
    #[test]
    fn next_then_previous_returns_to_start(len in 1usize..100, index in 0usize..100) {
        let index = index % len;
        let next = sequential_next(Some(index), len).unwrap();
        prop_assert!(next < len);
        prop_assert_eq!(sequential_previous(Some(next), len), Some(index));
    }

    /// Property: progress always lies in [0, 1]
    #[test]
    fn progress_is_bounded(position in any::<f64>(), duration in any::<f64>()) {
        let value = progress(position, duration);
        prop_assert!((0.0..=1.0).contains(&value));
    }

    /// Property: any sequence of operations keeps at most one session open
    /// and never reports Playing without a current track
    #[test]
    fn controller_invariants_hold(ops in prop::collection::vec(op(), 1..60), seed in any::<u64>()) {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let list = ActiveList::shuffle(tracks(&ids));
        let mut controller = controller_with_seed(seed);

        for op in ops {
            match op {
                Op::Play(index) => controller.play(track(ids[index]), list.clone()),
                Op::Toggle => controller.toggle_play_pause(),
                Op::Next => controller.next(),
                Op::Previous => controller.previous(),
                Op::Seek(fraction) => controller.seek(fraction),
                Op::Confirm | Op::Reject => {
                    if controller.backend().request_count() > 0 {
                        let outcome = if matches!(op, Op::Confirm) {
                            Ok(())
                        } else {
                            Err(musify_playback::PlaybackError::Media("decode".into()))
                        };
                        settle_last(&mut controller, outcome);
                    }
                }
                Op::Ended => {
                    if controller.session_id().is_some() {
                        end_current(&mut controller);
                    }
                }
            }

            prop_assert!(controller.backend().open_sessions.len() <= 1);
            prop_assert!((0.0..=1.0).contains(&controller.progress()));
            if controller.status() == PlaybackStatus::Playing {
                prop_assert!(controller.current_track().is_some());
            }
        }
    }
}
