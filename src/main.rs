//! VFO Main Application
//!
//! Entry point for the STM32G474 encoder-tuned VFO.
//! Initializes hardware, spawns the input tasks and runs the control loop.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use {defmt_rtt as _, panic_probe as _};

use vfo_firmware::control::{self, SharedInput};
use vfo_firmware::drivers::encoder::{run_button, run_encoder};
use vfo_firmware::drivers::{Si5351, StatusDisplay};
use vfo_firmware::hal::gpio::{EncoderLines, PushButton};
use vfo_firmware::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

static INPUT: SharedInput = SharedInput::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("VFO Firmware v{}", env!("CARGO_PKG_VERSION"));

    let tuning = TuningConfig::default();
    if let Err(e) = tuning.validate() {
        defmt::panic!("invalid tuning configuration: {}", e);
    }

    let p = embassy_stm32::init(embassy_stm32::Config::default());
    info!("Peripherals initialized");

    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // Encoder A/B on EXTI0/EXTI1, push switch on EXTI2, all pulled up
    let lines = EncoderLines::new(
        ExtiInput::new(p.PA0, p.EXTI0, Pull::Up),
        ExtiInput::new(p.PA1, p.EXTI1, Pull::Up),
    );
    let button = PushButton::new(ExtiInput::new(p.PA2, p.EXTI2, Pull::Up), BUTTON_ACTIVE_LOW);

    // I2C1 for the Si5351A: PB8 = SCL, PB9 = SDA
    let synth_bus = I2c::new(
        p.I2C1,
        p.PB8,
        p.PB9,
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    // I2C2 for the OLED: PA9 = SCL, PA8 = SDA
    let display_bus = I2c::new_blocking(
        p.I2C2,
        p.PA9,
        p.PA8,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    spawner.spawn(encoder_task(lines)).unwrap();
    spawner.spawn(button_task(button)).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();
    info!("Input tasks spawned");

    let mut synth = Si5351::new(synth_bus, SI5351_XTAL_FREQ);
    if let Err(e) = synth.init().await {
        warn!("Si5351A init failed: {}", e);
    }

    let mut display = StatusDisplay::new(display_bus);
    if let Err(e) = display.init() {
        warn!("Display init failed: {}", e);
    }

    let mut vfo = Vfo::new(&tuning);
    info!("VFO at {} Hz, band {} - {} Hz", vfo.hz(), tuning.band_min_hz, tuning.band_max_hz);

    control::run(&mut vfo, &INPUT, &mut synth, &mut display).await
}

/// Encoder task - decodes line edges into detents
#[embassy_executor::task]
async fn encoder_task(lines: EncoderLines<'static>) {
    run_encoder(lines, &INPUT.detents, &INPUT.activity).await
}

/// Button task - debounces the push switch
#[embassy_executor::task]
async fn button_task(button: PushButton<'static>) {
    run_button(button, BUTTON_DEBOUNCE_MS, &INPUT.button, &INPUT.activity).await
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
