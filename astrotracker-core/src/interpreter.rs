//! Command interpreter
//!
//! Consumes one link byte at a time. Single-byte commands resolve
//! immediately. `Z` and `M` switch the interpreter into payload mode,
//! where bytes accumulate across cycles until the `"<x>,<y>"` line is
//! terminated, rejected, or times out. Payload bytes are never taken as
//! commands: the tail of a timed-out line is dropped up to its terminator.

use astrotracker_protocol::{
    parse_pair, Axis, Command, CoordinatePair, LineAccumulator, LineError, PayloadError,
    PayloadKind, LINE_END,
};

/// Default time allowed for a payload line after its command byte
pub const DEFAULT_PAYLOAD_TIMEOUT_MS: u32 = 1000;

/// A fully decoded request, ready to apply to the mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    Jog { axis: Axis, forward: bool },
    Zero(CoordinatePair),
    Max(CoordinatePair),
    ReportPosition,
    SpeedUp,
    SpeedDown,
}

/// What one byte (or an expired timeout) produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// A complete request
    Request(Request),
    /// Byte is not a command, or belongs to a timed-out payload line
    Ignored(u8),
    /// `Z`/`M` received, payload line expected next
    AwaitingPayload(PayloadKind),
    /// Payload line terminated but malformed
    Rejected(PayloadKind, PayloadError),
    /// No payload terminator in time
    TimedOut(PayloadKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingCommand,
    AwaitingPayload { kind: PayloadKind, started_us: u64 },
    /// Payload timed out; dropping the rest of its line
    Draining,
}

/// Byte-fed command state machine
#[derive(Debug, Clone)]
pub struct Interpreter {
    state: State,
    line: LineAccumulator,
    payload_timeout_us: u64,
}

impl Interpreter {
    /// Create an interpreter; a zero timeout waits for a payload forever
    pub fn new(payload_timeout_ms: u32) -> Self {
        Self {
            state: State::AwaitingCommand,
            line: LineAccumulator::new(),
            payload_timeout_us: u64::from(payload_timeout_ms) * 1000,
        }
    }

    /// Check if a payload line is being assembled
    pub fn awaiting_payload(&self) -> Option<PayloadKind> {
        match self.state {
            State::AwaitingPayload { kind, .. } => Some(kind),
            State::AwaitingCommand | State::Draining => None,
        }
    }

    /// Abandon any partial payload
    pub fn reset(&mut self) {
        self.state = State::AwaitingCommand;
        self.line.reset();
    }

    /// Feed one byte received at `now_us`
    ///
    /// Returns `None` while a payload byte was buffered without completing
    /// the line.
    pub fn feed(&mut self, byte: u8, now_us: u64) -> Option<Step> {
        match self.state {
            State::AwaitingCommand => Some(self.command(byte, now_us)),
            State::AwaitingPayload { kind, .. } => self.payload(kind, byte),
            State::Draining => {
                if byte == LINE_END {
                    self.state = State::AwaitingCommand;
                }
                Some(Step::Ignored(byte))
            }
        }
    }

    /// Drop a payload whose timeout elapsed by `now_us`
    ///
    /// Bytes up to and including the next terminator are ignored afterwards.
    pub fn expire(&mut self, now_us: u64) -> Option<Step> {
        let State::AwaitingPayload { kind, started_us } = self.state else {
            return None;
        };
        if self.payload_timeout_us == 0
            || now_us.saturating_sub(started_us) < self.payload_timeout_us
        {
            return None;
        }
        self.line.reset();
        self.state = State::Draining;
        Some(Step::TimedOut(kind))
    }

    fn command(&mut self, byte: u8, now_us: u64) -> Step {
        let Some(command) = Command::from_byte(byte) else {
            return Step::Ignored(byte);
        };
        let request = match command {
            Command::Jog { axis, forward } => Request::Jog { axis, forward },
            Command::Declare(kind) => {
                self.line.reset();
                self.state = State::AwaitingPayload {
                    kind,
                    started_us: now_us,
                };
                return Step::AwaitingPayload(kind);
            }
            Command::ReportPosition => Request::ReportPosition,
            Command::SpeedUp => Request::SpeedUp,
            Command::SpeedDown => Request::SpeedDown,
        };
        Step::Request(request)
    }

    fn payload(&mut self, kind: PayloadKind, byte: u8) -> Option<Step> {
        let parsed = match self.line.feed(byte) {
            Ok(None) => return None,
            Ok(Some(line)) => parse_pair(&line),
            Err(LineError::TooLong) => Err(PayloadError::TooLong),
            Err(LineError::NotAscii) => Err(PayloadError::NotAscii),
        };
        self.state = State::AwaitingCommand;

        Some(match parsed {
            Ok(pair) => Step::Request(match kind {
                PayloadKind::Zero => Request::Zero(pair),
                PayloadKind::Max => Request::Max(pair),
            }),
            Err(e) => Step::Rejected(kind, e),
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(interp: &mut Interpreter, bytes: &[u8]) -> Vec<Step> {
        bytes.iter().filter_map(|&b| interp.feed(b, 0)).collect()
    }

    #[test]
    fn test_single_byte_commands() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.feed(b'F', 0),
            Some(Step::Request(Request::Jog {
                axis: Axis::X,
                forward: true
            }))
        );
        assert_eq!(
            interp.feed(b'L', 0),
            Some(Step::Request(Request::Jog {
                axis: Axis::Y,
                forward: false
            }))
        );
        assert_eq!(interp.feed(b'P', 0), Some(Step::Request(Request::ReportPosition)));
        assert_eq!(interp.feed(b'+', 0), Some(Step::Request(Request::SpeedUp)));
        assert_eq!(interp.feed(b'-', 0), Some(Step::Request(Request::SpeedDown)));
    }

    #[test]
    fn test_unknown_bytes_ignored() {
        let mut interp = Interpreter::default();
        assert_eq!(interp.feed(b'x', 0), Some(Step::Ignored(b'x')));
        assert_eq!(interp.feed(b'\n', 0), Some(Step::Ignored(b'\n')));
        assert_eq!(interp.awaiting_payload(), None);
    }

    #[test]
    fn test_zero_payload() {
        let mut interp = Interpreter::default();
        let steps = feed_all(&mut interp, b"Z10,20\n");
        assert_eq!(
            steps,
            vec![
                Step::AwaitingPayload(PayloadKind::Zero),
                Step::Request(Request::Zero(CoordinatePair::new(10, 20))),
            ]
        );
        assert_eq!(interp.awaiting_payload(), None);
    }

    #[test]
    fn test_payload_bytes_are_not_commands() {
        let mut interp = Interpreter::default();
        let steps = feed_all(&mut interp, b"MF,P\nP");
        assert_eq!(
            steps,
            vec![
                Step::AwaitingPayload(PayloadKind::Max),
                Step::Rejected(PayloadKind::Max, PayloadError::InvalidX),
                Step::Request(Request::ReportPosition),
            ]
        );
    }

    #[test]
    fn test_missing_comma_rejected() {
        let mut interp = Interpreter::default();
        let steps = feed_all(&mut interp, b"Z1020\n");
        assert_eq!(steps[1], Step::Rejected(PayloadKind::Zero, PayloadError::MissingComma));
    }

    #[test]
    fn test_non_ascii_payload_rejected() {
        let mut interp = Interpreter::default();
        let steps = feed_all(&mut interp, "Z1é,2\n".as_bytes());
        assert_eq!(
            steps.last().copied(),
            Some(Step::Rejected(PayloadKind::Zero, PayloadError::NotAscii))
        );
    }

    #[test]
    fn test_overlong_payload_rejected_at_terminator() {
        let mut interp = Interpreter::default();
        interp.feed(b'M', 0);
        for _ in 0..40 {
            assert_eq!(interp.feed(b'1', 0), None);
        }
        assert_eq!(
            interp.feed(b'\n', 0),
            Some(Step::Rejected(PayloadKind::Max, PayloadError::TooLong))
        );
        assert_eq!(interp.awaiting_payload(), None);
    }

    #[test]
    fn test_payload_timeout() {
        let mut interp = Interpreter::new(1000);
        interp.feed(b'Z', 5_000);
        interp.feed(b'1', 5_100);
        assert_eq!(interp.expire(1_004_999), None);
        assert_eq!(interp.expire(1_005_000), Some(Step::TimedOut(PayloadKind::Zero)));
        assert_eq!(interp.awaiting_payload(), None);

        // The partial line is gone
        assert_eq!(interp.feed(b'\n', 1_006_000), Some(Step::Ignored(b'\n')));
        assert_eq!(interp.feed(b'P', 1_006_050), Some(Step::Request(Request::ReportPosition)));
    }

    #[test]
    fn test_timed_out_tail_is_not_commands() {
        let mut interp = Interpreter::new(1000);
        for (i, &b) in b"Z1,".iter().enumerate() {
            interp.feed(b, i as u64);
        }
        assert_eq!(interp.expire(1_100_000), Some(Step::TimedOut(PayloadKind::Zero)));

        let steps: Vec<Step> = b"-50\n+"
            .iter()
            .filter_map(|&b| interp.feed(b, 1_200_000))
            .collect();
        assert_eq!(
            steps,
            vec![
                Step::Ignored(b'-'),
                Step::Ignored(b'5'),
                Step::Ignored(b'0'),
                Step::Ignored(b'\n'),
                Step::Request(Request::SpeedUp),
            ]
        );
    }

    #[test]
    fn test_reset_stops_draining() {
        let mut interp = Interpreter::new(1);
        interp.feed(b'M', 0);
        interp.expire(1_000);
        interp.reset();
        assert_eq!(interp.feed(b'-', 2_000), Some(Step::Request(Request::SpeedDown)));
    }

    #[test]
    fn test_zero_timeout_waits_forever() {
        let mut interp = Interpreter::new(0);
        interp.feed(b'M', 0);
        assert_eq!(interp.expire(u64::MAX), None);
        assert_eq!(interp.awaiting_payload(), Some(PayloadKind::Max));
    }

    #[test]
    fn test_expire_without_payload() {
        let mut interp = Interpreter::default();
        assert_eq!(interp.expire(u64::MAX), None);
    }

    proptest! {
        #[test]
        fn prop_any_pair_decodes(x in any::<i32>(), y in any::<i32>()) {
            let mut interp = Interpreter::default();
            let line = format!("M{},{}\r\n", x, y);
            let steps = feed_all(&mut interp, line.as_bytes());
            prop_assert_eq!(
                steps.last().copied(),
                Some(Step::Request(Request::Max(CoordinatePair::new(x, y))))
            );
        }
    }
}
