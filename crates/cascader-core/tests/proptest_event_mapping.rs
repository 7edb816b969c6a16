#![cfg(not(target_arch = "wasm32"))]

//! Property tests for the crossterm event mapping.
//!
//! 1. Character keys keep their character, modifiers and kind.
//! 2. Release events are never actionable, press and repeat always are.
//! 3. Modifier bits map one-to-one for shift/alt/ctrl.

use cascader_core::event::{Event, KeyCode, KeyEventKind, Modifiers};
use crossterm::event as cte;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = cte::KeyEventKind> {
    prop_oneof![
        Just(cte::KeyEventKind::Press),
        Just(cte::KeyEventKind::Repeat),
        Just(cte::KeyEventKind::Release),
    ]
}

fn modifiers_strategy() -> impl Strategy<Value = cte::KeyModifiers> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(shift, alt, ctrl)| {
        let mut mods = cte::KeyModifiers::NONE;
        if shift {
            mods |= cte::KeyModifiers::SHIFT;
        }
        if alt {
            mods |= cte::KeyModifiers::ALT;
        }
        if ctrl {
            mods |= cte::KeyModifiers::CONTROL;
        }
        mods
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Character keys survive the mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn char_keys_round_trip(c in any::<char>(), mods in modifiers_strategy(), kind in kind_strategy()) {
        let raw = cte::KeyEvent::new_with_kind(cte::KeyCode::Char(c), mods, kind);
        let Some(Event::Key(key)) = Event::from_crossterm(cte::Event::Key(raw)) else {
            return Err(TestCaseError::fail("char key did not map"));
        };
        prop_assert_eq!(key.code, KeyCode::Char(c));
        prop_assert!(key.is_char(c));
        prop_assert_eq!(key.shift(), mods.contains(cte::KeyModifiers::SHIFT));
        prop_assert_eq!(key.alt(), mods.contains(cte::KeyModifiers::ALT));
        prop_assert_eq!(key.ctrl(), mods.contains(cte::KeyModifiers::CONTROL));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Actionability follows the event kind
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_is_never_actionable(kind in kind_strategy()) {
        let raw = cte::KeyEvent::new_with_kind(cte::KeyCode::Down, cte::KeyModifiers::NONE, kind);
        let Some(Event::Key(key)) = Event::from_crossterm(cte::Event::Key(raw)) else {
            return Err(TestCaseError::fail("arrow key did not map"));
        };
        prop_assert_eq!(key.is_actionable(), key.kind != KeyEventKind::Release);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Modifier bits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn modifier_bits_map_one_to_one(mods in modifiers_strategy()) {
        let raw = cte::KeyEvent::new(cte::KeyCode::Enter, mods);
        let Some(Event::Key(key)) = Event::from_crossterm(cte::Event::Key(raw)) else {
            return Err(TestCaseError::fail("enter did not map"));
        };
        let expected_bits = [
            (cte::KeyModifiers::SHIFT, Modifiers::SHIFT),
            (cte::KeyModifiers::ALT, Modifiers::ALT),
            (cte::KeyModifiers::CONTROL, Modifiers::CTRL),
        ];
        for (raw_bit, mapped) in expected_bits {
            prop_assert_eq!(mods.contains(raw_bit), key.modifiers.contains(mapped));
        }
        prop_assert!(!key.modifiers.contains(Modifiers::SUPER));
    }
}
