// src/acquisition/runner.rs
//! Consumer loop driving the pipeline at a fixed display cadence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, error, info, warn};

use crate::acquisition::slot::BlockSlot;
use crate::config::PipelineConfig;
use crate::error::EegError;
use crate::processing::pipeline::{BlockOutput, PipelineOrchestrator};

/// Outputs buffered toward the display before stale cycles get dropped
const OUTPUT_CHANNEL_CAPACITY: usize = 4;

/// Periodic consumer that pulls the latest block from a [`BlockSlot`], runs
/// the pipeline, and hands [`BlockOutput`]s to the display layer
///
/// The producer keeps publishing at the device's own cadence and never waits
/// on this loop. Ticks with no published block yet are skipped without error;
/// persistent processing failures stop the loop, since continuing to render
/// garbage is worse than stopping.
pub struct PipelineRunner {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    outputs: Receiver<BlockOutput>,
}

impl PipelineRunner {
    /// Build the pipeline from `config` and start the consumer thread
    pub fn spawn(config: &PipelineConfig, slot: Arc<BlockSlot>) -> Result<Self, EegError> {
        let pipeline = PipelineOrchestrator::new(config)?;
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = bounded(OUTPUT_CHANNEL_CAPACITY);

        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let failure_limit = config.max_consecutive_failures;
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("eeg-pipeline".to_string())
            .spawn(move || {
                consumer_loop(pipeline, slot, tx, thread_stop, tick_interval, failure_limit);
            })
            .map_err(|e| EegError::Configuration {
                component: "runner".to_string(),
                reason: format!("cannot spawn consumer thread: {e}"),
            })?;

        info!(
            tick_ms = tick_interval.as_millis() as u64,
            "pipeline runner started"
        );

        Ok(Self {
            handle: Some(handle),
            stop,
            outputs: rx,
        })
    }

    /// Channel of per-cycle outputs for the display layer
    pub fn outputs(&self) -> &Receiver<BlockOutput> {
        &self.outputs
    }

    /// Whether the consumer loop is still running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop the consumer loop and join its thread
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("pipeline consumer thread panicked");
            } else {
                info!("pipeline runner stopped");
            }
        }
    }
}

impl Drop for PipelineRunner {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn consumer_loop(
    mut pipeline: PipelineOrchestrator,
    slot: Arc<BlockSlot>,
    outputs: Sender<BlockOutput>,
    stop: Arc<AtomicBool>,
    tick_interval: Duration,
    failure_limit: u32,
) {
    let mut last_generation = 0u64;

    while !stop.load(Ordering::Acquire) {
        let tick_start = Instant::now();

        match slot.snapshot() {
            None => {
                // Nothing published yet; not an error
                debug!("tick with no capture block");
            }
            Some((generation, block)) => {
                if generation == last_generation {
                    // Consumer outpaced the producer; reprocess the latest
                    // block rather than going dark
                    debug!(generation, "reusing previous block");
                }
                last_generation = generation;

                match pipeline.process_block(&block) {
                    Ok(output) => match outputs.try_send(output) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            debug!("display not keeping up, dropping cycle output");
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            info!("display side disconnected, stopping");
                            return;
                        }
                    },
                    Err(err) => {
                        let failures = pipeline.consecutive_failures();
                        if failures >= failure_limit {
                            error!(
                                failures,
                                error = %err,
                                "persistent processing failures, stopping pipeline"
                            );
                            return;
                        }
                        warn!(failures, error = %err, "skipping display update");
                    }
                }
            }
        }

        if let Some(remaining) = tick_interval.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn fast_config() -> PipelineConfig {
        PipelineConfig {
            tick_interval_ms: 2,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_runner_emits_outputs() {
        let slot = Arc::new(BlockSlot::new());
        let runner = PipelineRunner::spawn(&fast_config(), Arc::clone(&slot)).unwrap();

        let block: Vec<f32> = (0..240)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin())
            .collect();
        slot.publish(block);

        let output = runner
            .outputs()
            .recv_timeout(Duration::from_secs(2))
            .expect("no output within timeout");
        assert_eq!(output.band_powers.len(), 6);

        runner.shutdown();
    }

    #[test]
    fn test_runner_survives_empty_slot() {
        let slot = Arc::new(BlockSlot::new());
        let runner = PipelineRunner::spawn(&fast_config(), Arc::clone(&slot)).unwrap();

        thread::sleep(Duration::from_millis(20));
        assert!(runner.is_running());
        runner.shutdown();
    }

    #[test]
    fn test_runner_stops_on_persistent_failures() {
        let config = PipelineConfig {
            max_consecutive_failures: 3,
            ..fast_config()
        };
        let slot = Arc::new(BlockSlot::new());
        let runner = PipelineRunner::spawn(&config, Arc::clone(&slot)).unwrap();

        slot.publish(vec![f32::NAN; 240]);

        let deadline = Instant::now() + Duration::from_secs(2);
        while runner.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!runner.is_running());
    }
}
