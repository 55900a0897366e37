//! Render loop
//!
//! Owns every collaborator and drives the status screen:
//!
//! ```text
//! boot():  initialize display -> splash -> wait for association -> identity
//!          -> initial fetch -> Displaying
//! tick():  refresh address if due -> snapshot -> clear/draw/present -> sleep
//! ```
//!
//! The loop never logs; [`BootReport`] and [`TickReport`] carry what happened
//! back to the caller.

use core::net::Ipv4Addr;

use embedded_hal_async::delay::DelayNs;

use crate::config::{RenderConfig, ScreenMode, ALTERNATE_CLOCK_MS, ALTERNATE_INFO_MS};
use crate::refresh::{AddressCache, FetchOutcome};
use crate::state::{Event, RunState};
use crate::status::{
    compose, format_hardware_address, truncated, HardwareAddressLabel, Line, StatusSnapshot,
    TimeLabel, UNAVAILABLE,
};
use crate::traits::{AddressSource, Clock, DisplayError, NetworkLink, NetworkName, StatusDisplay};

/// Shown while the network is associating
const BOOT_SPLASH: [&str; 1] = ["Booting..."];

/// Shown when association times out
const ASSOCIATION_FAILED: [&str; 4] = ["Wi-Fi failed", "Check creds", "", ""];

/// First row of the fault screen
const FAULT_HEADER: &str = "Error:";

/// Errors that stop the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunError {
    /// The network did not associate in time
    AssociationTimeout,
    /// The display failed; the loop is stopped
    Display(DisplayError),
    /// `tick()` called while not displaying
    NotRunning(RunState),
    /// `boot()` called after boot already ran
    InvalidState(RunState),
}

impl From<DisplayError> for RunError {
    fn from(err: DisplayError) -> Self {
        RunError::Display(err)
    }
}

/// Network identity, read once after association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Joined network name
    pub network_name: NetworkName,
    /// Formatted hardware address or the placeholder
    pub hardware_address: HardwareAddressLabel,
    /// Address assigned by the local network
    pub local_address: Option<Ipv4Addr>,
}

impl Identity {
    /// Identity before association: no name, unknown hardware address
    pub fn unknown() -> Self {
        Self {
            network_name: NetworkName::new(),
            hardware_address: truncated(UNAVAILABLE),
            local_address: None,
        }
    }

    /// Read the identity from a connected link
    pub fn read<L: NetworkLink + ?Sized>(link: &L) -> Self {
        Self {
            network_name: link.network_name(),
            hardware_address: link
                .hardware_address()
                .map(|bytes| format_hardware_address(&bytes))
                .unwrap_or_else(|| truncated(UNAVAILABLE)),
            local_address: link.local_address(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Identity {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Identity {{ network: {=str}, mac: {=str}, local: ",
            self.network_name.as_str(),
            self.hardware_address.as_str()
        );
        match self.local_address.map(|ip| ip.octets()) {
            Some([a, b, c, d]) => defmt::write!(f, "{}.{}.{}.{} }}", a, b, c, d),
            None => defmt::write!(f, "none }}"),
        }
    }
}

/// Outcome of a successful boot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// Identity read after association
    pub identity: Identity,
    /// Time spent waiting for association (ms)
    pub association_ms: u64,
    /// Result of the initial address fetch
    pub fetch: FetchOutcome,
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// What was rendered
    pub snapshot: StatusSnapshot,
    /// Whether the public address was refreshed
    pub fetch: FetchOutcome,
}

/// Status render loop
///
/// Generic over its collaborators so it runs unchanged against the board
/// implementations and the test mocks.
pub struct RenderLoop<L, S, C, D, T> {
    link: L,
    source: S,
    clock: C,
    display: D,
    delay: T,
    config: RenderConfig,
    state: RunState,
    cache: AddressCache,
    identity: Identity,
}

impl<L, S, C, D, T> RenderLoop<L, S, C, D, T>
where
    L: NetworkLink,
    S: AddressSource,
    C: Clock,
    D: StatusDisplay,
    T: DelayNs,
{
    /// Create a loop in the `Booting` state
    pub fn new(link: L, source: S, clock: C, display: D, delay: T, config: RenderConfig) -> Self {
        Self {
            link,
            source,
            clock,
            display,
            delay,
            config,
            state: RunState::Booting,
            cache: AddressCache::new(config.refresh_interval_ms()),
            identity: Identity::unknown(),
        }
    }

    /// Bring up the display, wait for the network and fetch the address once
    pub async fn boot(&mut self) -> Result<BootReport, RunError> {
        if self.state != RunState::Booting {
            return Err(RunError::InvalidState(self.state));
        }

        let result = self.display.initialize().await;
        self.guard(result)?;
        let result = self.display.show_lines(&BOOT_SPLASH);
        self.guard(result)?;
        self.delay.delay_ms(self.config.splash_ms).await;

        let association_ms = self.await_association().await?;

        self.identity = Identity::read(&self.link);
        let fetch = self.refresh().await;
        self.state = self.state.transition(Event::Associated);

        Ok(BootReport {
            identity: self.identity.clone(),
            association_ms,
            fetch,
        })
    }

    /// Render one frame and sleep until the next
    pub async fn tick(&mut self) -> Result<TickReport, RunError> {
        if !self.state.is_displaying() {
            return Err(RunError::NotRunning(self.state));
        }

        let fetch = self.refresh().await;
        let snapshot = self.snapshot();

        match self.config.mode {
            ScreenMode::ShowAll => {
                let result = self.display.show_lines(&snapshot.lines());
                self.guard(result)?;
                self.delay.delay_ms(self.config.tick_ms).await;
            }
            ScreenMode::Alternate => {
                let result = self.display.show_lines(&snapshot.info_lines());
                self.guard(result)?;
                self.delay.delay_ms(ALTERNATE_INFO_MS).await;

                // Time moved on while the info screen was up
                let clock = StatusSnapshot {
                    time: TimeLabel::from_clock(&self.clock),
                    ..snapshot.clone()
                };
                let result = self
                    .display
                    .show_lines(&clock.clock_lines(self.config.board_label));
                self.guard(result)?;
                self.delay.delay_ms(ALTERNATE_CLOCK_MS).await;
            }
        }

        Ok(TickReport { snapshot, fetch })
    }

    /// Best-effort fault screen for fatal errors
    pub fn show_fault(&mut self, message: &str) -> Result<(), DisplayError> {
        let lines: [Line; 4] = [
            compose(FAULT_HEADER, ""),
            compose("", message),
            Line::new(),
            Line::new(),
        ];
        self.display.show_lines(&lines)
    }

    /// Snapshot of what the next frame would show
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::new(
            &self.identity.network_name,
            &self.identity.hardware_address,
            self.cache.label(),
            TimeLabel::from_clock(&self.clock),
        )
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Network identity (placeholder before boot)
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Public address cache
    pub fn cache(&self) -> &AddressCache {
        &self.cache
    }

    /// Active configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The display collaborator
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Poll the link until it connects or the timeout elapses
    async fn await_association(&mut self) -> Result<u64, RunError> {
        let started = self.clock.uptime_ms();
        let timeout = u64::from(self.config.association_timeout_ms);

        loop {
            let waited = self.clock.uptime_ms().saturating_sub(started);
            if self.link.is_connected() {
                return Ok(waited);
            }
            if waited >= timeout {
                let result = self.display.show_lines(&ASSOCIATION_FAILED);
                self.guard(result)?;
                self.state = self.state.transition(Event::AssociationTimedOut);
                return Err(RunError::AssociationTimeout);
            }
            self.delay.delay_ms(self.config.association_poll_ms).await;
        }
    }

    /// Fetch the public address if the refresh interval has elapsed
    async fn refresh(&mut self) -> FetchOutcome {
        if !self.cache.is_due(self.clock.uptime_ms()) {
            return FetchOutcome::NotDue;
        }
        let result = self.source.fetch(self.config.fetch_timeout_ms).await;
        self.cache.record(self.clock.uptime_ms(), result)
    }

    /// Any display error is a bus fault and stops the loop
    fn guard<R>(&mut self, result: Result<R, DisplayError>) -> Result<R, RunError> {
        result.map_err(|err| {
            self.state = self.state.transition(Event::BusFault);
            RunError::Display(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FailureKind;
    use crate::traits::DateTime;
    use embassy_futures::block_on;
    use netglance_protocol::PublicAddress;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    const NOON: DateTime = DateTime {
        year: 2024,
        month: 3,
        day: 9,
        hour: 12,
        minute: 0,
        second: 0,
    };

    /// Uptime shared between the clock, the delay and the link
    type Uptime = Rc<Cell<u64>>;

    struct MockClock {
        now: Uptime,
        rtc: Option<DateTime>,
    }

    impl Clock for MockClock {
        fn uptime_ms(&self) -> u64 {
            self.now.get()
        }

        fn wall_clock(&self) -> Option<DateTime> {
            self.rtc
        }
    }

    /// Sleeping advances the shared uptime
    struct MockDelay {
        now: Uptime,
        slept: Rc<std::cell::RefCell<Vec<u32>>>,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.now.set(self.now.get() + u64::from(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.slept.borrow_mut().push(ms);
            self.now.set(self.now.get() + u64::from(ms));
        }
    }

    struct MockLink {
        now: Uptime,
        /// Uptime at which association completes
        connects_at: Option<u64>,
        mac: Option<[u8; 6]>,
    }

    impl NetworkLink for MockLink {
        fn is_connected(&self) -> bool {
            self.connects_at.is_some_and(|at| self.now.get() >= at)
        }

        fn network_name(&self) -> NetworkName {
            let mut name = NetworkName::new();
            let _ = name.push_str("HomeNet");
            name
        }

        fn hardware_address(&self) -> Option<[u8; 6]> {
            self.mac
        }

        fn local_address(&self) -> Option<Ipv4Addr> {
            Some(Ipv4Addr::new(192, 168, 1, 20))
        }
    }

    /// Replays scripted fetch results; an exhausted script fails every fetch
    struct MockSource {
        script: VecDeque<Option<&'static str>>,
        calls: Rc<Cell<usize>>,
    }

    impl AddressSource for MockSource {
        async fn fetch(&mut self, _timeout_ms: u32) -> Option<PublicAddress> {
            self.calls.set(self.calls.get() + 1);
            self.script
                .pop_front()
                .flatten()
                .and_then(PublicAddress::parse)
        }
    }

    /// Records every presented frame as four strings
    #[derive(Default)]
    struct MockDisplay {
        rows: [String; 4],
        frames: Vec<[String; 4]>,
        initialized: bool,
        fail_init: bool,
        /// Fail the nth present (0-based)
        fail_present_at: Option<usize>,
    }

    impl StatusDisplay for MockDisplay {
        async fn initialize(&mut self) -> Result<(), DisplayError> {
            if self.fail_init {
                return Err(DisplayError::Transport);
            }
            self.initialized = true;
            Ok(())
        }

        fn clear(&mut self) {
            self.rows = Default::default();
        }

        fn draw_line(&mut self, row: u8, text: &str) {
            if let Some(slot) = self.rows.get_mut(row as usize) {
                *slot = text.to_string();
            }
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            if !self.initialized {
                return Err(DisplayError::NotInitialized);
            }
            if self.fail_present_at == Some(self.frames.len()) {
                return Err(DisplayError::Transport);
            }
            self.frames.push(self.rows.clone());
            Ok(())
        }
    }

    struct Harness {
        now: Uptime,
        slept: Rc<std::cell::RefCell<Vec<u32>>>,
        fetches: Rc<Cell<usize>>,
    }

    type TestLoop = RenderLoop<MockLink, MockSource, MockClock, MockDisplay, MockDelay>;

    fn build(
        connects_at: Option<u64>,
        rtc: Option<DateTime>,
        script: &[Option<&'static str>],
        display: MockDisplay,
        config: RenderConfig,
    ) -> (TestLoop, Harness) {
        let now: Uptime = Rc::new(Cell::new(0));
        let slept = Rc::new(std::cell::RefCell::new(Vec::new()));
        let fetches = Rc::new(Cell::new(0));

        let render = RenderLoop::new(
            MockLink {
                now: now.clone(),
                connects_at,
                mac: Some([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            },
            MockSource {
                script: script.iter().copied().collect(),
                calls: fetches.clone(),
            },
            MockClock {
                now: now.clone(),
                rtc,
            },
            display,
            MockDelay {
                now: now.clone(),
                slept: slept.clone(),
            },
            config,
        );

        (
            render,
            Harness {
                now,
                slept,
                fetches,
            },
        )
    }

    fn frame(lines: [&str; 4]) -> [String; 4] {
        lines.map(|l| l.to_string())
    }

    #[test]
    fn test_boot_and_tick_show_all() {
        let (mut render, harness) = build(
            Some(3_000),
            Some(NOON),
            &[Some("198.51.100.7")],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        let report = block_on(render.boot()).unwrap();
        assert_eq!(render.state(), RunState::Displaying);
        assert_eq!(report.identity.network_name.as_str(), "HomeNet");
        assert_eq!(report.identity.hardware_address.as_str(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(
            report.identity.local_address,
            Some(Ipv4Addr::new(192, 168, 1, 20))
        );
        assert_eq!(report.association_ms, 2_000);
        assert!(matches!(report.fetch, FetchOutcome::Refreshed(_)));

        let tick = block_on(render.tick()).unwrap();
        assert_eq!(tick.fetch, FetchOutcome::NotDue);
        assert_eq!(
            render.display().frames.last().unwrap(),
            &frame([
                "WiFi:HomeNet",
                "MAC:AA:BB:CC:DD:EE:FF",
                "PubIP:198.51.100.7",
                "12:00:00"
            ])
        );
        assert_eq!(harness.slept.borrow().last(), Some(&1_000));
        assert_eq!(harness.fetches.get(), 1);
    }

    #[test]
    fn test_boot_splash_comes_first() {
        let (mut render, _harness) = build(
            Some(0),
            Some(NOON),
            &[],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        block_on(render.boot()).unwrap();
        assert_eq!(
            render.display().frames[0],
            frame(["Booting...", "", "", ""])
        );
    }

    #[test]
    fn test_association_timeout_never_shows_status() {
        let (mut render, harness) = build(
            None,
            Some(NOON),
            &[Some("198.51.100.7")],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        let result = block_on(render.boot());
        assert_eq!(result, Err(RunError::AssociationTimeout));
        assert_eq!(
            render.state(),
            RunState::Failed(FailureKind::AssociationTimeout)
        );
        assert_eq!(harness.fetches.get(), 0);

        let frames = &render.display().frames;
        assert_eq!(
            frames.last().unwrap(),
            &frame(["Wi-Fi failed", "Check creds", "", ""])
        );
        assert!(frames
            .iter()
            .flatten()
            .all(|row| !row.starts_with("WiFi:") && !row.starts_with("PubIP:")));

        // Splash plus 20 s of one-second polls
        assert_eq!(harness.now.get(), 1_000 + 20_000);
        assert_eq!(block_on(render.tick()).unwrap_err(), RunError::NotRunning(render.state()));
    }

    #[test]
    fn test_failed_fetch_keeps_stale_address() {
        let config = RenderConfig {
            refresh_interval_s: 1,
            tick_ms: 2_000,
            ..RenderConfig::default()
        };
        let (mut render, harness) = build(
            Some(0),
            Some(NOON),
            &[Some("203.0.113.9"), None],
            MockDisplay::default(),
            config,
        );

        block_on(render.boot()).unwrap();
        assert_eq!(block_on(render.tick()).unwrap().fetch, FetchOutcome::NotDue);

        let tick = block_on(render.tick()).unwrap();
        assert_eq!(tick.fetch, FetchOutcome::KeptStale);
        assert_eq!(tick.snapshot.public_address.as_str(), "203.0.113.9");
        assert_eq!(harness.fetches.get(), 2);
    }

    #[test]
    fn test_failed_initial_fetch_shows_placeholder() {
        let (mut render, _harness) = build(
            Some(0),
            Some(NOON),
            &[None],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        let report = block_on(render.boot()).unwrap();
        assert_eq!(report.fetch, FetchOutcome::KeptStale);

        let tick = block_on(render.tick()).unwrap();
        assert_eq!(tick.snapshot.lines()[2].as_str(), "PubIP:N/A");
    }

    #[test]
    fn test_uptime_label_without_rtc() {
        let (mut render, _harness) = build(
            Some(0),
            None,
            &[],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        block_on(render.boot()).unwrap();
        let tick = block_on(render.tick()).unwrap();

        // Only the splash delay has elapsed
        assert_eq!(tick.snapshot.time, TimeLabel::Uptime { seconds: 1 });
        assert_eq!(render.display().frames.last().unwrap()[3], "Up:1s");
    }

    #[test]
    fn test_missing_mac_uses_placeholder() {
        let (mut render, _harness) = build(
            Some(0),
            Some(NOON),
            &[],
            MockDisplay::default(),
            RenderConfig::default(),
        );
        render.link.mac = None;

        let report = block_on(render.boot()).unwrap();
        assert_eq!(report.identity.hardware_address.as_str(), UNAVAILABLE);
    }

    #[test]
    fn test_alternate_mode_shows_two_screens() {
        let config = RenderConfig {
            mode: ScreenMode::Alternate,
            board_label: "Pico W",
            ..RenderConfig::default()
        };
        let (mut render, harness) = build(
            Some(0),
            Some(NOON),
            &[Some("198.51.100.7")],
            MockDisplay::default(),
            config,
        );

        block_on(render.boot()).unwrap();
        let before = render.display().frames.len();
        block_on(render.tick()).unwrap();

        let frames = &render.display().frames[before..];
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames[0],
            frame(["WiFi:HomeNet", "MAC:AA:BB:CC:DD:EE:FF", "PubIP:198.51.100.7", ""])
        );
        assert_eq!(frames[1], frame(["2024-03-09", "12:00:00", "", "Pico W"]));

        let slept = harness.slept.borrow();
        assert_eq!(&slept[slept.len() - 2..], &[ALTERNATE_INFO_MS, ALTERNATE_CLOCK_MS]);
    }

    #[test]
    fn test_init_bus_failure() {
        let display = MockDisplay {
            fail_init: true,
            ..MockDisplay::default()
        };
        let (mut render, _harness) = build(Some(0), Some(NOON), &[], display, RenderConfig::default());

        let result = block_on(render.boot());
        assert_eq!(result, Err(RunError::Display(DisplayError::Transport)));
        assert_eq!(render.state(), RunState::Failed(FailureKind::Bus));
        assert!(render.display().frames.is_empty());
    }

    #[test]
    fn test_bus_failure_mid_run_is_terminal() {
        // Frame 0 is the splash; frame 1 is the first status frame
        let display = MockDisplay {
            fail_present_at: Some(1),
            ..MockDisplay::default()
        };
        let (mut render, _harness) = build(Some(0), Some(NOON), &[], display, RenderConfig::default());

        block_on(render.boot()).unwrap();
        assert_eq!(
            block_on(render.tick()).unwrap_err(),
            RunError::Display(DisplayError::Transport)
        );
        assert_eq!(render.state(), RunState::Failed(FailureKind::Bus));
        assert!(matches!(
            block_on(render.tick()),
            Err(RunError::NotRunning(RunState::Failed(FailureKind::Bus)))
        ));
    }

    #[test]
    fn test_boot_only_once() {
        let (mut render, _harness) = build(
            Some(0),
            Some(NOON),
            &[],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        block_on(render.boot()).unwrap();
        assert_eq!(
            block_on(render.boot()).unwrap_err(),
            RunError::InvalidState(RunState::Displaying)
        );
    }

    #[test]
    fn test_fault_screen() {
        let (mut render, _harness) = build(
            Some(0),
            Some(NOON),
            &[],
            MockDisplay::default(),
            RenderConfig::default(),
        );

        block_on(render.boot()).unwrap();
        render.show_fault("DNS down").unwrap();
        assert_eq!(
            render.display().frames.last().unwrap(),
            &frame(["Error:", "DNS down", "", ""])
        );
    }
}
