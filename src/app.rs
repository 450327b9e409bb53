//! Main polling loop.
//!
//! One thread wakes every [`Config::tick_interval`], reads every source,
//! feeds the counters through the [`RateEngine`], renders and publishes.
//! Per-metric failures are logged and rendered as unavailable; only a
//! publish failure ends the loop.

use crate::collectors::{
    read_battery, read_byte_counter, read_cpu_buckets, read_meminfo, read_temperature,
    read_volume,
};
use crate::config::{Config, CORE_COUNT, DATE_FORMAT, TIME_FORMAT};
use crate::error::Result;
use crate::publish::Publisher;
use crate::rate::RateEngine;
use crate::render::{render, Snapshot, StatusLine};
use crate::types::{CpuBucket, Link, NetCounter};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use tracing::{debug, error, info};

/// Converts a per-metric result into an optional value, logging the failure.
fn available<T>(metric: &str, result: Result<T>) -> Option<T> {
    result.map_err(|e| debug!(metric, error = %e, "source unavailable")).ok()
}

/// The status sampler: configuration, counter state and output.
pub struct App<P> {
    config: Config,
    engine: RateEngine,
    publisher: P,
}

impl<P: Publisher> App<P> {
    /// Creates an application that has not read any counter yet.
    pub fn new(config: Config, publisher: P) -> Self {
        Self { config, engine: RateEngine::new(), publisher }
    }

    /// Returns the publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Returns the counter state.
    pub fn engine(&self) -> &RateEngine {
        &self.engine
    }

    fn interface(&self, link: Link) -> &str {
        match link {
            Link::Wireless => &self.config.wireless_interface,
            Link::Wired => &self.config.wired_interface,
        }
    }

    fn read_cores(&self) -> Vec<Option<CpuBucket>> {
        match read_cpu_buckets(&self.config.proc_stat, CORE_COUNT) {
            Ok(buckets) => buckets.into_iter().map(Some).collect(),
            Err(e) => {
                debug!(error = %e, "cpu statistics unavailable");
                vec![None; CORE_COUNT]
            }
        }
    }

    fn sample_cores(&mut self) -> [Option<f64>; CORE_COUNT] {
        let mut percents = [None; CORE_COUNT];
        for (core, bucket) in self.read_cores().into_iter().enumerate() {
            percents[core] = match bucket {
                Some(bucket) => self.engine.cpu_percent(core, bucket).value(),
                None => {
                    self.engine.forget_cpu(core);
                    None
                }
            };
        }
        percents
    }

    fn sample_net(&mut self) -> [Option<u64>; NetCounter::COUNT] {
        let mut rates = [None; NetCounter::COUNT];
        for counter in NetCounter::ALL {
            let bytes =
                read_byte_counter(&self.config.net_class, self.interface(counter.link), counter.direction);
            rates[counter.index()] = match bytes {
                Ok(bytes) => self.engine.net_rate(counter, bytes).value(),
                Err(e) => {
                    debug!(?counter, error = %e, "byte counter unavailable");
                    self.engine.forget_net(counter);
                    None
                }
            };
        }
        rates
    }

    /// Records the first sample of every counter.
    ///
    /// Called once before the loop so the first published line already
    /// carries rates.
    pub fn prime(&mut self) {
        let cores = self.sample_cores();
        self.sample_net();
        info!(
            cores = (0..cores.len()).filter(|&c| self.engine.cpu_primed(c)).count(),
            links = NetCounter::ALL.iter().filter(|c| self.engine.net_primed(**c)).count(),
            "counters primed"
        );
    }

    /// Reads every source and builds the values of one tick.
    pub fn sample<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Snapshot
    where
        Tz::Offset: Display,
    {
        let config = &self.config;
        let battery = available("battery", read_battery(&config.battery_capacity));
        let volume = available("volume", read_volume(&config.volume_command, config.command_timeout));
        let memory = available("memory", read_meminfo(&config.meminfo));
        let temperature = available("temperature", read_temperature(&config.thermal_input));

        Snapshot {
            battery,
            net: self.sample_net(),
            volume,
            cores: self.sample_cores(),
            temperature,
            memory,
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        }
    }

    /// Samples, renders and publishes one line stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only if publishing fails.
    pub fn tick_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<StatusLine>
    where
        Tz::Offset: Display,
    {
        let line = render(&self.sample(now));
        self.publisher.publish(&line)?;
        Ok(line)
    }

    /// Samples, renders and publishes one line stamped with the local time.
    pub fn tick(&mut self) -> Result<StatusLine> {
        self.tick_at(&Local::now())
    }

    /// Primes the counters, then ticks until publishing fails.
    pub fn run(&mut self) -> Result<()> {
        self.prime();
        loop {
            std::thread::sleep(self.config.tick_interval);
            let line = self.tick().map_err(|e| {
                error!(error = %e, "publish failed");
                e
            })?;
            debug!(len = line.as_str().len(), "published status");
        }
    }
}
