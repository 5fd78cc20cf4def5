//! Property-based tests for the session controller
//!
//! Random sequences of user actions and platform reports must never leave two
//! clips live at once, and repeat/range settings must be honoured exactly.

mod common;

use common::*;
use proptest::prelude::*;
use quran_core::Reciter;
use quran_playback::{
    PlaybackEvent, PlaybackMode, PlaybackOutcome, PlaybackSelection, RepeatCount, SessionConfig,
};
use std::num::NonZeroU32;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Action {
    PlayAll,
    PlayVerse(u16),
    Stop,
    Next,
    Previous,
    Ended,
    Failed,
    StaleEnded,
    SwitchReciter,
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => Just(Action::PlayAll),
        3 => (1u16..=9).prop_map(Action::PlayVerse),
        1 => Just(Action::Stop),
        1 => Just(Action::Next),
        1 => Just(Action::Previous),
        6 => Just(Action::Ended),
        1 => Just(Action::Failed),
        1 => Just(Action::StaleEnded),
        1 => Just(Action::SwitchReciter),
    ]
}

/// Load whatever surah the controller asked for
fn follow_navigation(ctrl: &mut Controller) {
    let events = ctrl.drain_events();
    for event in events {
        if let PlaybackEvent::NavigateToSurah { surah: target, .. } = event {
            let count = target.verse_count().min(8);
            ctrl.load_surah(target, &verses(target.get(), count, &[2]))
                .unwrap();
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: at most one clip is ever live, and the controller's view of
    /// the live clip matches the output's
    #[test]
    fn at_most_one_live_clip(actions in prop::collection::vec(arbitrary_action(), 1..200)) {
        let mut ctrl = controller_with(Reciter::Alafasy, 2, 8, &[2], SessionConfig::default());
        let mut stale = Vec::new();

        for action in actions {
            match action {
                Action::PlayAll => { ctrl.play_all().ok(); }
                Action::PlayVerse(n) => { ctrl.play_verse(v(n)).ok(); }
                Action::Stop => ctrl.stop(),
                Action::Next => { ctrl.next().ok(); }
                Action::Previous => { ctrl.previous().ok(); }
                Action::Ended | Action::Failed => {
                    if let Some(token) = ctrl.output_mut().live.take() {
                        stale.push(token);
                        let outcome = if matches!(action, Action::Ended) {
                            PlaybackOutcome::Ended
                        } else {
                            PlaybackOutcome::Failed("synthetic".into())
                        };
                        ctrl.on_playback_finished(token, outcome);
                    }
                }
                Action::StaleEnded => {
                    if let Some(token) = stale.first().copied() {
                        let before = ctrl.output().started.len();
                        let live = ctrl.live_token();
                        if live != Some(token) {
                            ctrl.on_playback_finished(token, PlaybackOutcome::Ended);
                            prop_assert_eq!(ctrl.output().started.len(), before);
                            prop_assert_eq!(ctrl.live_token(), live);
                        }
                    }
                }
                Action::SwitchReciter => {
                    let next = if ctrl.reciter() == Reciter::Alafasy {
                        Reciter::Sudais
                    } else {
                        Reciter::Alafasy
                    };
                    ctrl.set_reciter(next);
                    prop_assert!(ctrl.output().live.is_none());
                }
            }
            follow_navigation(&mut ctrl);

            prop_assert_eq!(ctrl.output().overlaps, 0);
            prop_assert_eq!(ctrl.output().live, ctrl.live_token());
            if ctrl.live_token().is_some() {
                prop_assert_ne!(ctrl.session().mode, PlaybackMode::Idle);
            }
        }
    }

    /// Property: a verse played on its own starts exactly k times
    #[test]
    fn single_verse_repeat_is_exact(k in 1u32..30, verse in 1u16..=8) {
        let mut ctrl = controller(36, 8);
        ctrl.set_verse_repeat(v(verse), RepeatCount::from_count(k)).unwrap();
        ctrl.play_verse(v(verse)).unwrap();
        run_to_idle(&mut ctrl, 100);

        prop_assert_eq!(ctrl.output().started.len(), k as usize);
        prop_assert_eq!(ctrl.session().mode, PlaybackMode::Idle);
    }

    /// Property: a range is traversed in order, each verse `per_verse` times,
    /// once per pass
    #[test]
    fn range_traversal_matches_settings(
        start in 1u16..=10,
        len in 0u16..10,
        per_verse in 1u32..4,
        passes in 1u32..4,
    ) {
        let end = (start + len).min(10);
        let mut ctrl = controller(2, 10);
        ctrl.set_selection(
            PlaybackSelection::range(v(start), Some(v(end)))
                .with_verse_repeat(RepeatCount::from_count(per_verse))
                .with_range_repeat(NonZeroU32::new(passes).unwrap()),
        ).unwrap();
        ctrl.play_all().unwrap();
        run_to_idle(&mut ctrl, 1000);

        let expected: Vec<u16> = (0..passes)
            .flat_map(|_| (start..=end).flat_map(|n| std::iter::repeat(n).take(per_verse as usize)))
            .collect();
        prop_assert_eq!(started_verses(&ctrl.drain_events()), expected);
    }

    /// Property: the Bismillah plays iff the range starts at verse 1 of a surah
    /// other than 1 and 9, and only once regardless of passes
    #[test]
    fn bismillah_gating(surah_number in 1u16..=114, start in 1u16..=3, passes in 1u32..3) {
        let count = surah(surah_number).verse_count().min(3);
        prop_assume!(start <= count);

        let mut ctrl = controller_with(Reciter::Alafasy, surah_number, count, &[], SessionConfig::default());
        ctrl.set_selection(
            PlaybackSelection::range(v(start), None)
                .with_range_repeat(NonZeroU32::new(passes).unwrap()),
        ).unwrap();
        ctrl.play_all().unwrap();
        run_to_idle(&mut ctrl, 100);

        let bismillahs = started_urls(&ctrl)
            .iter()
            .filter(|url| url.as_str() == BISMILLAH_URL)
            .count();
        let expected = usize::from(start == 1 && surah_number != 1 && surah_number != 9);
        prop_assert_eq!(bismillahs, expected);
    }
}
