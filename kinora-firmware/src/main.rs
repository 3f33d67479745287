//! Kinora - Rotating LED Display Firmware
//!
//! Main firmware binary for RP2040-based persistence-of-vision displays:
//! two banks of eight LEDs on a spinning arm, behind 74HC595 latches,
//! repainted once per angular step and resynchronized once per rotation.
//!
//! Named after the kinora, an early motion picture viewer that fused
//! fast-moving images into one.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kinora_core::config::LatchConfig;
use kinora_core::dispatch::PovContext;
use kinora_core::render::FrameRenderer;
use kinora_drivers::ShiftRegisterLatch;

use crate::config::load_config;
use crate::tasks::{Display, Latch};
use crate::timing::{MarkClock, SharedStepTimer};

mod board;
mod channels;
mod config;
mod tasks;
mod timing;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART receive buffer (must live forever)
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kinora firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    if !board::check_wiring(&config) {
        warn!("display.toml pins do not match the board, using board pins");
    }
    info!(
        "Timing: engine {} Hz, step {} Hz, rotation window {}..{} ticks",
        config.timing.engine_tick_hz,
        config.timing.step_tick_hz,
        config.timing.min_rotation_ticks,
        config.timing.max_rotation_ticks
    );

    // LED latches
    // Pin assignments are board-specific (see board.rs)
    let upper = latch(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        &config.upper,
    );
    let lower = latch(
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        &config.lower,
    );
    info!("LED latches initialized");

    // Rotation sensor
    let pull = if config.sensor.pull_up {
        Pull::Up
    } else {
        Pull::None
    };
    let sensor = Input::new(p.PIN_15, pull);

    // Bluetooth serial, receive only
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baud_rate;
    let rx_buf = RX_BUF.init([0u8; 64]);
    let rx = BufferedUartRx::new(p.UART0, Irqs, p.PIN_1, rx_buf, uart_config);
    info!("UART initialized at {} baud", config.serial.baud_rate);

    // Programs the step timer from the initial rotation period
    let renderer = FrameRenderer::from_config(&config, upper, lower);
    let display: Display = PovContext::new(
        &config,
        MarkClock::new(config.timing.engine_tick_hz),
        SharedStepTimer,
        renderer,
    );
    info!(
        "Showing {:?}, initial step {} ticks",
        display.picture().id(),
        display.picture_timer().resolution_time()
    );

    // Spawn tasks
    spawner.spawn(tasks::dispatch_task(display)).unwrap();
    spawner
        .spawn(tasks::step_timer_task(config.timing.step_tick_hz))
        .unwrap();
    spawner
        .spawn(tasks::rotation_sensor_task(sensor, config.sensor.pin.inverted))
        .unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Build a latch driver with the data polarity from its config
fn latch(
    data: Output<'static>,
    clock: Output<'static>,
    strobe: Output<'static>,
    config: &LatchConfig,
) -> Latch {
    match ShiftRegisterLatch::new(data, clock, strobe) {
        Ok(latch) => latch.with_inverted_data(config.data_pin.inverted),
        Err(e) => match e {},
    }
}
