#![no_main]

use arbitrary::Arbitrary;
use ftui_panels::{
    NavigationEngine, PanelDescriptor, PanelEvent, PanelName, PanelNode, PanelsConfig,
    RetentionConfig, SwipeDirection, TextDirection,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Session {
    animated: bool,
    infinite: bool,
    vertical: bool,
    rtl: bool,
    max: u8,
    /// Bit i set: panel i disabled.
    layout: u16,
    len: u8,
    start: u8,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Previous,
    Swipe(u8),
    Select(u8),
    Rebuild { layout: u16, len: u8 },
    Accept,
    Reject,
    Settle,
    Tick,
}

fn children(layout: u16, len: u8) -> Vec<PanelNode<()>> {
    let len = usize::from(len % 17);
    (0..len)
        .map(|i| {
            PanelDescriptor::new(i, ())
                .disabled(layout & (1 << i) != 0)
                .into()
        })
        .collect()
}

fn swipe(raw: u8) -> SwipeDirection {
    match raw % 4 {
        0 => SwipeDirection::Up,
        1 => SwipeDirection::Down,
        2 => SwipeDirection::Left,
        _ => SwipeDirection::Right,
    }
}

fuzz_target!(|session: Session| {
    let config = PanelsConfig::default()
        .animated(session.animated)
        .infinite(session.infinite)
        .vertical(session.vertical)
        .swipeable(true)
        .retention(RetentionConfig::enabled().max(usize::from(session.max % 8)));
    let mut engine = NavigationEngine::new(config, Some(PanelName::from(u32::from(session.start))));
    engine.set_children(children(session.layout, session.len));
    if session.rtl {
        engine.set_text_direction(TextDirection::Rtl);
    }

    // Requests issued before a rebuild may name panels that are gone.
    let mut stale = false;
    for op in session.ops.into_iter().take(256) {
        match op {
            Op::Next => {
                engine.next();
            }
            Op::Previous => {
                engine.previous();
            }
            Op::Swipe(raw) => {
                engine.on_swipe(swipe(raw));
            }
            Op::Select(n) => {
                let old = engine.selection().cloned();
                engine.on_selection_changed(Some(PanelName::from(u32::from(n))), old);
            }
            Op::Rebuild { layout, len } => {
                engine.set_children(children(layout, len));
                stale = !engine.pending_events().is_empty();
            }
            Op::Accept => {
                for event in engine.drain_events() {
                    if let PanelEvent::UpdateSelection(name) = event {
                        let panel = engine.panels().iter().find(|p| p.name() == &name);
                        assert!(
                            stale || panel.is_some_and(|p| p.is_enabled()),
                            "requested a panel that is missing or disabled"
                        );
                        let old = engine.selection().cloned();
                        engine.on_selection_changed(Some(name), old);
                    }
                }
                stale = false;
            }
            Op::Reject => {
                engine.drain_events();
                stale = false;
            }
            Op::Settle => {
                engine.settle();
            }
            Op::Tick => {
                engine.tick();
            }
        }

        // Post-conditions that must always hold:
        if let Some(i) = engine.current_index() {
            let panel = engine.panels().get(i).expect("current index OOB");
            assert!(panel.is_enabled(), "current index on a disabled panel");
        }
        if !engine.config().animated {
            assert!(engine.transition_name().is_none(), "transition without animation");
        }
        if let Some(retention) = engine.retention()
            && let Some(max) = engine.config().retention.max.filter(|&m| m > 0)
        {
            assert!(retention.len() <= max, "retention over bound");
        }
    }

    engine.tick();
    assert!(!engine.is_suppressed(), "suppression outlived its release");
});
