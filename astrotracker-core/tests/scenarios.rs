//! End-to-end command scenarios over a scripted link

use std::collections::VecDeque;

use astrotracker_core::config::MountConfig;
use astrotracker_core::traits::{Direction, Link, StepOutput};
use astrotracker_core::{
    AccelRamp, Axis, CoordinatePair, InstantMotion, Motion, MotionPrimitive, Mount, Outcome,
    PayloadKind,
};
use proptest::prelude::*;

/// In-memory link fed from a byte script
#[derive(Default)]
struct ScriptedLink {
    rx: VecDeque<u8>,
    tx: Vec<String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl ScriptedLink {
    fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

#[derive(Debug, PartialEq)]
struct LinkDown;

impl Link for ScriptedLink {
    type Error = LinkDown;

    fn poll_byte(&mut self) -> Result<Option<u8>, LinkDown> {
        if self.fail_reads {
            return Err(LinkDown);
        }
        Ok(self.rx.pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<(), LinkDown> {
        if self.fail_writes {
            return Err(LinkDown);
        }
        self.tx.push(line.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct CountingOutput {
    enabled: bool,
    steps: i64,
}

impl StepOutput for CountingOutput {
    fn step(&mut self, direction: Direction) {
        self.steps += i64::from(direction.delta());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

const TICK_US: u64 = 50;

struct Bench<P: MotionPrimitive> {
    mount: Mount<P>,
    link: ScriptedLink,
    now_us: u64,
    outcomes: Vec<Outcome>,
}

impl<P: MotionPrimitive> Bench<P> {
    fn new(mount: Mount<P>) -> Self {
        Self {
            mount,
            link: ScriptedLink::default(),
            now_us: 0,
            outcomes: Vec::new(),
        }
    }

    fn cycle(&mut self) -> Result<(), LinkDown> {
        let serviced = self.mount.cycle(&mut self.link, self.now_us);
        self.now_us += TICK_US;
        let (outcome, result) = match serviced {
            Ok(outcome) => (outcome, Ok(())),
            Err(fault) => (fault.outcome, Err(fault.error)),
        };
        self.outcomes.extend(outcome);
        result
    }

    /// Deliver bytes and cycle until the receive queue is drained
    fn send(&mut self, bytes: &[u8]) {
        self.link.send(bytes);
        while !self.link.rx.is_empty() {
            self.cycle().unwrap();
        }
    }

    /// Cycle until both axes rest on their targets
    fn settle(&mut self) {
        for _ in 0..2_000_000 {
            if self.mount.at_target() {
                return;
            }
            self.cycle().unwrap();
        }
        panic!("mount did not settle");
    }

    fn replies(&self) -> Vec<&str> {
        self.link.tx.iter().map(String::as_str).collect()
    }
}

fn ramp_bench() -> Bench<AccelRamp<CountingOutput>> {
    let config = MountConfig::default();
    let motion = config.motion;
    let ramp = || {
        AccelRamp::new(
            CountingOutput::default(),
            motion.acceleration,
            motion.default_max_speed,
        )
    };
    Bench::new(Mount::new(&config, ramp(), ramp()))
}

fn instant_bench() -> Bench<InstantMotion> {
    Bench::new(Mount::new(
        &MountConfig::default(),
        InstantMotion::new(),
        InstantMotion::new(),
    ))
}

#[test]
fn test_jog_then_report() {
    let mut bench = ramp_bench();
    bench.send(b"F");
    assert_eq!(bench.mount.axis(Axis::X).target(), 200);

    bench.settle();
    bench.send(b"P");
    assert_eq!(bench.replies(), vec!["200,0\n"]);
    assert_eq!(bench.mount.motion(Axis::X).output().steps, 200);
    assert_eq!(bench.mount.motion(Axis::Y).output().steps, 0);
}

#[test]
fn test_jog_outside_declared_limits() {
    let mut bench = ramp_bench();
    bench.send(b"M50,50\n");
    bench.send(b"F");
    assert_eq!(bench.replies(), vec!["Movimiento X fuera de límites\n"]);
    assert_eq!(bench.mount.axis(Axis::X).target(), 0);
}

#[test]
fn test_declare_zero_then_report() {
    let mut bench = ramp_bench();
    bench.send(b"Z10,10\n");
    bench.send(b"P");
    assert_eq!(bench.replies(), vec!["10,10\n"]);
}

#[test]
fn test_report_after_zero_outside_limits() {
    let mut bench = ramp_bench();
    bench.send(b"M5,5\n");
    bench.send(b"Z10,10\n");
    bench.send(b"P");
    assert_eq!(bench.replies(), vec!["Posición fuera de límites\n"]);
}

#[test]
fn test_speed_floor() {
    let mut bench = ramp_bench();
    bench.send(b"---------");
    assert_eq!(bench.mount.axis(Axis::X).max_speed(), 100);
    assert_eq!(bench.mount.axis(Axis::Y).max_speed(), 100);

    bench.send(b"-");
    assert_eq!(bench.mount.axis(Axis::X).max_speed(), 100);
    assert_eq!(bench.mount.axis(Axis::Y).max_speed(), 100);
    assert!(bench.replies().is_empty());
}

#[test]
fn test_speed_up() {
    let mut bench = ramp_bench();
    bench.send(b"+");
    assert_eq!(bench.mount.axis(Axis::X).max_speed(), 1100);
    assert_eq!(bench.mount.axis(Axis::Y).max_speed(), 1100);
    assert_eq!(bench.outcomes, vec![Outcome::SpeedChanged { max_speed: 1100 }]);
}

#[test]
fn test_report_is_idempotent() {
    let mut bench = ramp_bench();
    bench.send(b"RR");
    bench.settle();
    bench.send(b"PP");
    assert_eq!(bench.replies(), vec!["0,200\n", "0,200\n"]);
}

#[test]
fn test_malformed_payload_reply() {
    let mut bench = instant_bench();
    bench.send(b"Z1020\n");
    bench.send(b"M,5\n");
    assert_eq!(
        bench.replies(),
        vec!["Coordenadas inválidas\n", "Coordenadas inválidas\n"]
    );
    assert_eq!(bench.mount.position().x, 0);
    assert!(!bench.mount.axis(Axis::X).limits_established());
}

#[test]
fn test_motion_continues_while_payload_assembles() {
    let mut bench = instant_bench();
    bench.send(b"F");
    let before = bench.mount.position().x;

    // One payload byte per cycle; the axis keeps stepping meanwhile
    bench.send(b"M");
    for &byte in b"900,900" {
        bench.send(&[byte]);
    }
    assert!(bench.mount.position().x >= before + 8);
    assert_eq!(
        bench.mount.interpreter().awaiting_payload(),
        Some(PayloadKind::Max)
    );

    bench.send(b"\n");
    assert!(bench.mount.axis(Axis::X).limits_established());
}

#[test]
fn test_payload_timeout_discards_line() {
    let mut bench = instant_bench();
    bench.send(b"Z12");
    for _ in 0..(1_000_000 / TICK_US) {
        bench.cycle().unwrap();
    }
    assert_eq!(
        bench.outcomes.last(),
        Some(&Outcome::PayloadTimedOut(PayloadKind::Zero))
    );

    // The rest of the line is dropped, then bytes are commands again
    bench.send(b",5\nP");
    assert_eq!(bench.replies(), vec!["0,0\n"]);
}

#[test]
fn test_stalled_payload_tail_changes_nothing() {
    let mut bench = instant_bench();
    bench.send(b"Z1,");
    for _ in 0..(1_100_000 / TICK_US) {
        bench.cycle().unwrap();
    }
    bench.outcomes.clear();

    bench.send(b"-50\n");
    assert_eq!(bench.mount.axis(Axis::X).max_speed(), 1000);
    assert_eq!(bench.mount.axis(Axis::Y).max_speed(), 1000);
    assert_eq!(bench.mount.position(), CoordinatePair::new(0, 0));
    assert!(bench
        .outcomes
        .iter()
        .all(|o| matches!(o, Outcome::Ignored(_))));
}

#[test]
fn test_link_error_keeps_motion_running() {
    let mut bench = instant_bench();
    bench.send(b"F");
    bench.link.fail_reads = true;

    let before = bench.mount.position().x;
    assert_eq!(bench.cycle(), Err(LinkDown));
    assert_eq!(bench.mount.position().x, before + 1);
}

#[test]
fn test_failed_reply_keeps_outcome() {
    let mut bench = instant_bench();
    bench.send(b"M50,50\n");
    bench.link.fail_writes = true;
    bench.link.send(b"F");

    assert_eq!(bench.cycle(), Err(LinkDown));
    assert!(matches!(
        bench.outcomes.last(),
        Some(Outcome::MoveRejected { axis: Axis::X, .. })
    ));
    assert_eq!(bench.mount.axis(Axis::X).target(), 0);
}

#[test]
fn test_ignored_bytes() {
    let mut bench = instant_bench();
    bench.send(b"xq\r");
    assert_eq!(
        bench.outcomes,
        vec![
            Outcome::Ignored(b'x'),
            Outcome::Ignored(b'q'),
            Outcome::Ignored(b'\r')
        ]
    );
    assert!(bench.replies().is_empty());
}

#[test]
fn test_idle_mount_stays_idle() {
    let mut bench = ramp_bench();
    for _ in 0..100 {
        bench.cycle().unwrap();
    }
    assert_eq!(bench.mount.advance(bench.now_us), (Motion::Idle, Motion::Idle));
    assert!(bench.mount.motion(Axis::X).output().is_enabled());
}

proptest! {
    #[test]
    fn prop_moves_accepted_before_limits(
        script in proptest::collection::vec(prop::sample::select(b"FBRL".to_vec()), 0..40),
    ) {
        let mut bench = instant_bench();
        for byte in script {
            bench.send(&[byte]);
        }
        let all_accepted = bench
            .outcomes
            .iter()
            .all(|o| matches!(o, Outcome::MoveAccepted { .. }));
        prop_assert!(all_accepted);
        prop_assert!(bench.replies().is_empty());
    }

    #[test]
    fn prop_accepted_targets_stay_in_limits(
        max in 0i32..1000,
        script in proptest::collection::vec(prop::sample::select(b"FBRL".to_vec()), 0..40),
    ) {
        let mut bench = instant_bench();
        bench.send(format!("M{},{}\n", max, max).as_bytes());
        for byte in script {
            bench.send(&[byte]);
            for axis in Axis::ALL {
                let state = bench.mount.axis(axis);
                prop_assert!(0 <= state.target() && state.target() <= max);
            }
        }
    }

    #[test]
    fn prop_zero_always_applies(x in any::<i32>(), y in any::<i32>(), max in any::<i32>()) {
        let mut bench = instant_bench();
        bench.send(format!("M{},{}\n", max, max).as_bytes());
        bench.send(format!("Z{},{}\n", x, y).as_bytes());
        prop_assert_eq!(bench.mount.position(), CoordinatePair::new(x, y));
    }

    #[test]
    fn prop_payload_chunking_is_irrelevant(
        x in -10_000i32..10_000,
        y in -10_000i32..10_000,
        split in 0usize..12,
    ) {
        let line = format!("Z{},{}\n", x, y);
        let bytes = line.as_bytes();
        let split = split.min(bytes.len());

        let mut burst = instant_bench();
        burst.send(bytes);

        let mut spread = instant_bench();
        spread.send(&bytes[..split]);
        for _ in 0..25 {
            spread.cycle().unwrap();
        }
        spread.send(&bytes[split..]);

        prop_assert_eq!(burst.mount.position(), spread.mount.position());
    }
}
