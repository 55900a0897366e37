//! netglance - network status at a glance
//!
//! Firmware for a Raspberry Pi Pico W driving a Nokia 5110 (PCD8544) LCD.
//! Joins a build-time configured network and shows the network name, the
//! radio's hardware address, the public IP address and the time of day.

#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_time::{Delay, Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use netglance_core::RenderLoop;
use netglance_display::{Pcd8544, SpiTransport};
use netglance_hal_rp2040::{RpClock, RpOutput, RpSpi};

use crate::config::{lcd_spi_config, pins, render_config, LCD_SPI_HZ, WIFI_SSID};
use crate::fetch::EchoFetcher;
use crate::link::PicoLink;

mod config;
mod fetch;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Sockets: DHCP, DNS, the fetch socket and one spare
const SOCKET_COUNT: usize = 4;

// Radio and stack state must live forever
static RADIO_STATE: StaticCell<cyw43::State> = StaticCell::new();
static STACK_RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("netglance firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // LCD on SPI0; nothing is sent until the render loop initializes it
    let spi = RpSpi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, &lcd_spi_config());
    let cs = RpOutput::new(p.PIN_17, true);
    let dc = RpOutput::new(p.PIN_20, false);
    let rst = RpOutput::new(p.PIN_21, true);
    let lcd = Pcd8544::new(SpiTransport::new(spi, cs, dc, rst), Delay);
    info!(
        "LCD on SPI0 at {} Hz: SCK=GP{} MOSI=GP{} CS=GP{} DC=GP{} RST=GP{}",
        LCD_SPI_HZ,
        pins::LCD_SCK,
        pins::LCD_MOSI,
        pins::LCD_CS,
        pins::LCD_DC,
        pins::LCD_RST
    );

    // CYW43439 on PIO0: power GP23, CS GP25, DIO GP24, CLK GP29
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(p.PIN_23, Level::Low);
    let radio_cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let radio_spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        radio_cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = RADIO_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, radio_spi, fw).await;
    spawner.spawn(unwrap!(tasks::cyw43_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Radio initialized");

    let mac = control.address().await;
    let seed = stack_seed(&mac, Instant::now().as_ticks());

    let (stack, net_runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(unwrap!(tasks::net_task(net_runner)));
    spawner.spawn(unwrap!(tasks::join_task(control, stack)));
    info!("Joining '{}'", WIFI_SSID);

    let status = RenderLoop::new(
        PicoLink::new(stack),
        EchoFetcher::new(stack),
        RpClock::new(p.RTC),
        lcd,
        Delay,
        render_config(),
    );
    spawner.spawn(unwrap!(tasks::render_task(status)));

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Seed for the stack's port and sequence number randomization
///
/// Hardware address mixed with the boot time
fn stack_seed(mac: &[u8; 6], ticks: u64) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[2..].copy_from_slice(mac);
    u64::from_be_bytes(bytes) ^ ticks.rotate_left(17)
}
