//! Radio and network tasks

use cyw43::JoinOptions;
use cyw43_pio::PioSpi;
use defmt::*;
use embassy_net::Stack;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_time::Timer;

use crate::config::{WIFI_PASS, WIFI_SSID};

/// Pause between failed join attempts
const JOIN_RETRY_S: u64 = 2;

/// Drives the CYW43439 bus
#[embassy_executor::task]
pub async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// Drives the IP stack
#[embassy_executor::task]
pub async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Join the configured network and rejoin whenever the link drops
///
/// The render task decides when waiting has gone on too long; this task
/// just keeps trying.
#[embassy_executor::task]
pub async fn join_task(mut control: cyw43::Control<'static>, stack: Stack<'static>) -> ! {
    info!("Join task started");

    loop {
        join(&mut control).await;

        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            info!("DHCP lease: {}", Debug2Format(&config.address));
        }

        stack.wait_link_down().await;
        warn!("Link to '{}' lost, rejoining", WIFI_SSID);
    }
}

async fn join(control: &mut cyw43::Control<'static>) {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let options = if WIFI_PASS.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(WIFI_PASS.as_bytes())
        };

        match control.join(WIFI_SSID, options).await {
            Ok(()) => {
                info!("Joined '{}' (attempt {})", WIFI_SSID, attempt);
                return;
            }
            Err(e) => {
                warn!(
                    "Join '{}' failed with status {} (attempt {})",
                    WIFI_SSID, e.status, attempt
                );
                Timer::after_secs(JOIN_RETRY_S).await;
            }
        }
    }
}
