//! Tick loop: sample, format, join, publish.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::StatusSettings;
use crate::counters::CounterSource;
use crate::providers::{
    AcpiPower, AmixerAudio, AudioStatusProvider, DateTimeProvider, LocalClock,
    PowerStatusProvider,
};
use crate::rate::{self, NET_RECEIVED_SIGN, NET_TRANSMITTED_SIGN};
use crate::sink::{LineSink, NoTitle, StdoutSink, TitleSink, XsetrootTitle};
use crate::tracker::DeltaTracker;

/// Joins the fields of the status line.
pub const FIELD_SEPARATOR: &str = "  -  ";

/// Network field used when the counter table cannot be read.
pub fn network_error_field() -> String {
    format!("{} ERR {} ERR", NET_RECEIVED_SIGN, NET_TRANSMITTED_SIGN)
}

/// Join fields into one status line.
pub fn compose_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Drives one status line per tick.
pub struct Scheduler {
    source: CounterSource,
    tracker: DeltaTracker,
    power: Box<dyn PowerStatusProvider>,
    audio: Box<dyn AudioStatusProvider>,
    clock: Box<dyn DateTimeProvider>,
    title: Box<dyn TitleSink>,
    output: Box<dyn LineSink>,
    interval: Duration,
    ticks: u64,
}

impl Scheduler {
    /// Create a scheduler with the system collaborators (`acpi`, `amixer`,
    /// local clock, `xsetroot`, stdout).
    pub fn new(source: CounterSource, interval: Duration, command_timeout: Duration) -> Self {
        Self {
            source,
            tracker: DeltaTracker::new(),
            power: Box::new(AcpiPower::new(command_timeout)),
            audio: Box::new(AmixerAudio::new(command_timeout)),
            clock: Box::new(LocalClock),
            title: Box::new(XsetrootTitle::new(command_timeout)),
            output: Box::new(StdoutSink),
            interval,
            ticks: 0,
        }
    }

    /// Create a scheduler from the status settings.
    pub fn from_settings(settings: &StatusSettings) -> Self {
        let source = CounterSource::new(
            settings.counter_path.clone(),
            settings.interfaces.iter().cloned(),
        );
        let scheduler = Self::new(source, settings.tick_interval(), settings.command_timeout());

        if settings.publish_title {
            scheduler
        } else {
            scheduler.with_title(NoTitle)
        }
    }

    pub fn with_tracker(mut self, tracker: DeltaTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_power(mut self, power: impl PowerStatusProvider + 'static) -> Self {
        self.power = Box::new(power);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioStatusProvider + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_clock(mut self, clock: impl DateTimeProvider + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_title(mut self, title: impl TitleSink + 'static) -> Self {
        self.title = Box::new(title);
        self
    }

    pub fn with_output(mut self, output: impl LineSink + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn tracker(&self) -> &DeltaTracker {
        &self.tracker
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of completed cycles.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Network field for this tick.
    ///
    /// The tracker baseline only moves when the table was read.
    pub fn network_field(&mut self) -> String {
        match self.source.sample() {
            Ok(current) => {
                let rates = self.tracker.delta(current);
                debug!(
                    rx_total = current.rx,
                    tx_total = current.tx,
                    rx_rate = rates.rx,
                    tx_rate = rates.tx,
                    "Sampled network counters"
                );
                format!(
                    "{} {}",
                    rate::format(NET_RECEIVED_SIGN, rates.rx),
                    rate::format(NET_TRANSMITTED_SIGN, rates.tx)
                )
            }
            Err(e) => {
                warn!(error = %e, "Network counters unavailable");
                network_error_field()
            }
        }
    }

    /// Build the status line for one tick without publishing it.
    pub async fn build_line(&mut self) -> String {
        let network = self.network_field();
        let power = self.power.power().await;
        let audio = self.audio.audio().await;
        let datetime = self.clock.datetime();

        compose_line(&[network, power, audio, datetime])
    }

    /// Run one full cycle: build the line and publish it to both sinks.
    pub async fn run_once(&mut self) -> String {
        let line = self.build_line().await;

        self.title.set_title(&line).await;
        self.output.write_line(&line);

        self.ticks += 1;
        debug!(tick = self.ticks, line = %line, "Published status line");
        line
    }

    /// Run cycles forever, one per interval.
    pub async fn run(&mut self) {
        info!(
            "Starting status loop (interval: {}s, interfaces: {})",
            self.interval.as_secs(),
            self.interface_list()
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }

    fn interface_list(&self) -> String {
        let mut names: Vec<&str> = self.source.interfaces().iter().map(String::as_str).collect();
        names.sort_unstable();
        names.join(" ")
    }
}
