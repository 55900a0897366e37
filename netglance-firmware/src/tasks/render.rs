//! Status screen task

use defmt::*;
use embassy_rp::peripherals::{RTC, SPI0};
use embassy_time::{Delay, Timer};

use netglance_core::{FetchOutcome, RenderLoop, RunError};
use netglance_display::{Pcd8544, SpiTransport};
use netglance_hal_rp2040::{RpClock, RpOutput, RpSpi};

use crate::fetch::EchoFetcher;
use crate::link::PicoLink;

/// PCD8544 on SPI0 with GPIO control lines
pub type Lcd = Pcd8544<
    SpiTransport<RpSpi<'static, SPI0>, RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>,
    Delay,
>;

/// The render loop with the board's collaborators
pub type StatusLoop = RenderLoop<PicoLink, EchoFetcher, RpClock<'static, RTC>, Lcd, Delay>;

/// Boot the status screen, then render forever
///
/// Any error stops rendering. The last frame (or the fault screen) stays
/// on the panel and the task idles.
#[embassy_executor::task]
pub async fn render_task(mut status: StatusLoop) -> ! {
    info!("Render task started ({})", status.config().mode);

    match status.boot().await {
        Ok(report) => {
            info!(
                "Associated after {} ms: {}",
                report.association_ms, report.identity
            );
            log_fetch(&report.fetch);
        }
        Err(e) => halt(&mut status, e).await,
    }

    loop {
        match status.tick().await {
            Ok(report) => {
                log_fetch(&report.fetch);
                trace!("Frame: {}", report.snapshot);
            }
            Err(e) => halt(&mut status, e).await,
        }
    }
}

fn log_fetch(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::NotDue => {}
        FetchOutcome::Refreshed(address) => info!("Public address: {}", address),
        FetchOutcome::KeptStale => warn!("Public address refresh failed, keeping last value"),
    }
}

async fn halt(status: &mut StatusLoop, err: RunError) -> ! {
    error!("Render loop stopped in {}: {}", status.state(), err);

    let message = match err {
        // Failure screen is already up
        RunError::AssociationTimeout => None,
        RunError::Display(_) => Some("LCD bus"),
        RunError::NotRunning(_) | RunError::InvalidState(_) => Some("render state"),
    };
    if let Some(message) = message {
        if let Err(e) = status.show_fault(message) {
            error!("Fault screen failed: {}", e);
        }
    }

    loop {
        Timer::after_secs(60).await;
        trace!("Render task halted");
    }
}
