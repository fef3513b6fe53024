// End-to-end test of the host loop: frame deltas drive the tick scheduler,
// and a tick subscriber moves a unit one cell per tick along a path found by
// A*, the way game logic sits on top of this crate.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use hydraulik_sim::hex::{self, Axial};
use hydraulik_sim::{SimConfig, TickScheduler, find_path_within};

/// A unit that follows a precomputed path, one cell per tick.
struct Walker {
    path: Vec<Axial>,
    step: usize,
    arrived_at_tick: Option<u64>,
}

impl Walker {
    fn position(&self) -> Axial {
        self.path[self.step]
    }

    fn on_tick(&mut self, tick: u64) {
        if self.step + 1 < self.path.len() {
            self.step += 1;
            if self.step + 1 == self.path.len() {
                self.arrived_at_tick = Some(tick);
            }
        }
    }
}

fn walls() -> BTreeSet<Axial> {
    // A ring-shaped wall of radius 2 with one gap on the east side.
    hex::ring(Axial::ZERO, 2)
        .into_iter()
        .filter(|&c| c != Axial::new(2, 0))
        .collect()
}

#[test]
fn walker_reaches_goal_through_gap() {
    let walls = walls();
    let start = Axial::ZERO;
    let goal = Axial::new(-4, 0);
    let path = find_path_within(start, goal, 8, |c| !walls.contains(&c));
    assert!(path.contains(&Axial::new(2, 0)), "must exit through the gap");

    let walker = Rc::new(RefCell::new(Walker {
        path: path.clone(),
        step: 0,
        arrived_at_tick: None,
    }));
    let mut sched = TickScheduler::new();
    let handle = Rc::clone(&walker);
    sched.subscribe(move |tick| handle.borrow_mut().on_tick(tick));

    // 60 fps frames: ~16.7 ms each, three frames per 50 ms tick.
    let needed_ticks = path.len() as u64 - 1;
    let mut frames = 0;
    while walker.borrow().arrived_at_tick.is_none() {
        sched.advance(1000.0 / 60.0);
        frames += 1;
        assert!(frames < 10_000, "walker never arrived");
    }

    assert_eq!(walker.borrow().position(), goal);
    assert_eq!(walker.borrow().arrived_at_tick, Some(needed_ticks));
}

#[test]
fn stalled_host_loses_backlog() {
    let config = SimConfig::from_json(r#"{ "step_duration_ms": 100.0 }"#).unwrap();
    let mut sched = TickScheduler::with_config(&config).unwrap();
    let count = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&count);
    let id = sched.subscribe(move |_| *sink.borrow_mut() += 1);

    // A five second stall only yields the catch-up cap's worth of ticks.
    assert_eq!(sched.advance(5000.0), 8);
    assert_eq!(*count.borrow(), 8);

    assert!(sched.unsubscribe(id));
    sched.advance(1000.0);
    assert_eq!(*count.borrow(), 8);
    assert_eq!(sched.tick_count(), 16);
}
