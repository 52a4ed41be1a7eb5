use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use embedded_graphics::prelude::DrawTarget;
use embedded_graphics::prelude::Point;
use embedded_graphics::Pixel;
use rgb::RGB8;
use smart_leds_matrix::layout::Layout;
use smart_leds_matrix::SmartLedMatrix;
use smart_leds_trait::SmartLedsWrite;
use time::{OffsetDateTime, UtcOffset};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::color::ColorSource;
use crate::error::Error;
use crate::event::{Event, EventInner};
use crate::grid::GridBuilder;
use crate::status::{ClockStatus, ZoneTime};
use crate::zones::ZoneClock;

pub struct ClockTask<T, L, const SIZE: usize>
where
    T: SmartLedsWrite,
    L: Layout,
    <T as SmartLedsWrite>::Color: From<RGB8>,
{
    tick_interval: std::time::Duration,
    running: Arc<AtomicBool>,
    cancellation_token: CancellationToken,
    matrix: SmartLedMatrix<T, L, SIZE>,
    grid_builder: GridBuilder,
    color: ColorSource,
    time_offset: UtcOffset,
    zones: Vec<ZoneClock>,
    brightness: u8,
    count: f64,
    counting: bool,
    status_sender: watch::Sender<ClockStatus>,
    reload_sender: mpsc::Sender<()>,
}

impl<T, L, const SIZE: usize> ClockTask<T, L, SIZE>
where
    T: SmartLedsWrite,
    L: Layout,
    <T as SmartLedsWrite>::Color: From<RGB8>,
    crate::error::Error: From<<T as SmartLedsWrite>::Error>,
{
    pub fn new(
        running: Arc<AtomicBool>,
        cancellation_token: CancellationToken,
        matrix: SmartLedMatrix<T, L, SIZE>,
        time_offset: UtcOffset,
        status_sender: watch::Sender<ClockStatus>,
        reload_sender: mpsc::Sender<()>,
        config: &crate::config::Config,
    ) -> Self {
        Self {
            tick_interval: config.display.tick_interval,
            running,
            cancellation_token,
            matrix,
            grid_builder: GridBuilder::new(),
            color: ColorSource::from(config.display.color),
            time_offset,
            zones: config.zones.clone(),
            brightness: config.display.initial_brightness.clamp(0, 100),
            count: 0.0,
            counting: false,
            status_sender,
            reload_sender,
        }
    }

    pub fn run(
        mut self,
        mut event_receiver: mpsc::Receiver<Event>,
    ) -> impl std::future::Future<Output = Result<(), Error>> {
        let mut render_interval = tokio::time::interval(self.tick_interval);
        let cancellation_token = self.cancellation_token.clone();

        async move {
            loop {
                tokio::select! {
                    _ = cancellation_token.cancelled() => {
                        tracing::info!("Ending render loop");
                        break;
                    }

                    _tick = render_interval.tick() => {
                        let now = OffsetDateTime::now_utc().to_offset(self.time_offset);
                        self.render_tick(now)?;
                    }

                    event = event_receiver.recv() => {
                        let Some(event) = event else {
                            tracing::error!("Event channel closed");
                            break;
                        };
                        self.handle_event(event.event)?;
                    }
                }
            }
            Ok(())
        }
    }

    /// One render pass: advance the stopwatch, rebuild the grid for `now`,
    /// push it to the discs if the display is on, publish the new status.
    fn render_tick(&mut self, now: OffsetDateTime) -> Result<(), Error> {
        if self.counting {
            self.count += self.tick_interval.as_secs_f64();
        }

        let frame = self.grid_builder.build(now)?;

        if self.running.load(std::sync::atomic::Ordering::Relaxed) {
            let on_color = self.color.next_color();
            let off_color = embedded_graphics::pixelcolor::Rgb888::default();

            let pixels = frame.grid.iter_cells().map(|(x, y, on)| {
                Pixel(
                    Point::new(x as i32, y as i32),
                    if on { on_color } else { off_color },
                )
            });

            self.matrix.draw_iter(pixels).unwrap();
            self.matrix.flush()?;
            tracing::trace!(display = %frame.display, "Rendered clock");
        }

        self.publish_status(frame.display, now);
        Ok(())
    }

    fn handle_event(&mut self, event: EventInner) -> Result<(), Error> {
        match event {
            EventInner::TurnOn => {
                tracing::info!("Turning display on");
                self.running.store(true, std::sync::atomic::Ordering::Relaxed);
            }

            EventInner::TurnOff => {
                tracing::info!("Turning display off");
                self.running.store(false, std::sync::atomic::Ordering::Relaxed);
                self.blank()?;
            }

            EventInner::SetBrightness(brightness) => {
                tracing::info!(?brightness, "Setting brightness");
                self.brightness = brightness.clamp(5, 100);
                self.matrix.set_brightness(self.brightness);
            }

            EventInner::StartCountUp => {
                tracing::info!("Starting stopwatch");
                self.counting = true;
            }

            EventInner::StopCountUp => {
                tracing::info!("Stopping stopwatch");
                self.counting = false;
            }

            EventInner::ResetCountUp => {
                tracing::info!("Resetting stopwatch");
                self.count = 0.0;
            }

            EventInner::Reload => {
                tracing::info!("Reload requested");
                if let Err(error) = self.reload_sender.try_send(()) {
                    tracing::warn!(?error, "Reload already pending");
                }
            }
        }

        Ok(())
    }

    fn blank(&mut self) -> Result<(), Error> {
        self.matrix
            .clear(embedded_graphics::pixelcolor::Rgb888::default())
            .unwrap();
        self.matrix.flush()?;
        Ok(())
    }

    fn publish_status(&self, display: String, now: OffsetDateTime) {
        let zones = self
            .zones
            .iter()
            .map(|zone| ZoneTime {
                label: zone.label.clone(),
                time: crate::zones::format_in_zone(zone, now),
            })
            .collect();

        self.status_sender.send_replace(ClockStatus {
            display,
            count: self.count,
            counting: self.counting,
            brightness: self.brightness,
            on: self.running.load(std::sync::atomic::Ordering::Relaxed),
            zones,
        });
    }
}
